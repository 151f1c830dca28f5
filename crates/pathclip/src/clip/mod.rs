//! Clipper: cut a subject path to a window and restitch it along the window's edges.
//!
//! Purpose
//! - `intersection` keeps the parts of the subject that lie inside the window.
//!   With `close_path`, cut ends are joined by walking the window boundary, and
//!   window loops that turn out to be holes in the subject are added back.
//! - `splice_segment` breaks one segment at a crossing; the clipper feeds the
//!   pieces back into its work queue.
//!
//! Conventions
//! - A section is a MoveTo followed by the segments drawn before the next
//!   MoveTo. The clipper only ever keeps or drops whole sections.
//! - Edge positions are `loop index` + `edge index within the loop` + the
//!   fraction of the way along that edge.

use tracing::{debug, trace};

use crate::cfg::KernelCfg;
use crate::containment::{encompasses, Side};
use crate::crossing::edge_crossings_with_cfg;
use crate::domain::Domain;
use crate::error::{PathError, Result};
use crate::geometry::{angle_sign, arc_center};
use crate::path::{path_to_string, resolved_endpoints, Path, PathSegment, Point};

/// Where a point sits on the window boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgePosition {
    pub loop_index: usize,
    /// Edge index within the loop plus the projected fraction along that edge.
    pub index: f64,
}

/// Clip `subject` to `window` with the default configuration.
pub fn intersection(
    subject: &[PathSegment],
    window: &[PathSegment],
    domain: &Domain,
    close_path: bool,
) -> Result<Path> {
    intersection_with_cfg(subject, window, domain, close_path, &KernelCfg::default())
}

/// Clip `subject` to `window`.
///
/// Without `close_path` the result is the set of subject pieces inside the
/// window, each drawn on its own. With it, the subject must be closed and
/// the result is a closed region.
pub fn intersection_with_cfg(
    subject: &[PathSegment],
    window: &[PathSegment],
    domain: &Domain,
    close_path: bool,
    cfg: &KernelCfg,
) -> Result<Path> {
    if close_path && !is_closed(subject, domain)? {
        return Err(PathError::OpenPath {
            path: path_to_string(subject),
        });
    }
    if !is_closed(window, domain)? {
        return Err(PathError::OpenEdges {
            path: path_to_string(window),
        });
    }
    let subject = explicit_closures(subject)?;
    let window = explicit_closures(window)?;
    for segment in window.iter().skip(1) {
        let q = segment.endpoint()?;
        if !domain.contains_point(q) {
            return Err(PathError::EdgeOutsideDomain {
                s: q.x,
                t: q.y,
                s_min: domain.s_min,
                s_max: domain.s_max,
                t_min: domain.t_min,
                t_max: domain.t_max,
            });
        }
    }

    let loops = window_loops(&window);
    let sections = cut_sections(&subject, &window, domain, cfg)?;
    debug!(sections = sections.len(), loops = loops.len(), "subject cut into sections");

    let mut output = if close_path {
        restitch(&sections, &window, &loops, domain)?
    } else {
        sections.concat()
    };

    if close_path {
        for edge_loop in &loops {
            let inside_out = if output.is_empty() {
                encompasses(&subject, edge_loop, domain)? != Side::Out
            } else {
                encompasses(&output, edge_loop, domain)? == Side::In
            };
            if inside_out {
                trace!(loop_start = ?edge_loop.first(), "window loop is inside out; drawing it");
                output.extend_from_slice(edge_loop);
            }
        }
    }

    drop_zero_length_segments(&mut output)?;
    drop_orphaned_moves(&mut output);
    Ok(output)
}

/// Split the window at every MoveTo.
fn window_loops(window: &[PathSegment]) -> Vec<Path> {
    let mut loops: Vec<Path> = Vec::new();
    for segment in window {
        match loops.last_mut() {
            Some(current) if !segment.is_move() => current.push(*segment),
            _ => loops.push(vec![*segment]),
        }
    }
    loops
}

/// Walk the subject, splicing it at every window crossing, and keep the sections inside.
fn cut_sections(
    subject: &[PathSegment],
    window: &[PathSegment],
    domain: &Domain,
    cfg: &KernelCfg,
) -> Result<Vec<Path>> {
    let mut queue: Vec<PathSegment> = subject.iter().rev().copied().collect();
    let mut sections = Vec::new();
    let mut current: Option<Path> = None;
    let mut iterations = 0;
    loop {
        let next = queue.pop();
        match next {
            None | Some(PathSegment::MoveTo(_)) => {
                if let Some(section) = current.take() {
                    if encompasses(window, &section, domain)? == Side::In {
                        sections.push(section);
                    }
                }
                match next {
                    Some(segment) => current = Some(vec![segment]),
                    None => break,
                }
            }
            Some(segment) => {
                let section = current.as_mut().ok_or(PathError::MissingMoveTo)?;
                let last = *section.last().ok_or(PathError::MissingMoveTo)?;
                let start = last.endpoint()?;
                let end = segment.endpoint()?;
                let next_is_break = queue.last().map_or(true, |s| s.is_move());
                let crossing = edge_crossings_with_cfg(start, &segment, window, domain, cfg)?
                    .into_iter()
                    .find(|c| {
                        // a crossing already marked by a break is not a new one
                        let at_start = c.intersect1 == start && last.is_move();
                        let at_end = c.intersect0 == end && next_is_break;
                        !at_start && !at_end
                    });
                match crossing {
                    None => section.push(segment),
                    Some(c) => {
                        let pieces = splice_segment(start, &segment, c.intersect0, c.intersect1)?;
                        queue.extend(pieces.into_iter().rev());
                    }
                }
                iterations += 1;
                if iterations > cfg.max_iterations {
                    return Err(PathError::IterationCeiling {
                        previous: path_to_string(&[last]),
                        current: path_to_string(&[segment]),
                        iterations,
                    });
                }
            }
        }
    }
    Ok(sections)
}

/// Join kept sections into closed loops, walking window edges between cut ends.
fn restitch(
    sections: &[Path],
    window: &[PathSegment],
    loops: &[Path],
    domain: &Domain,
) -> Result<Path> {
    let mut starts = Vec::with_capacity(sections.len());
    for section in sections {
        starts.push(position_on_edge(section[0].endpoint()?, window));
    }
    let mut drawn = vec![false; sections.len()];
    let mut output = Vec::new();

    let Some(mut section_index) = drawn.iter().position(|d| !d) else {
        return Ok(output);
    };
    let mut supersection_index = section_index;
    let mut supersection_start = sections[section_index][0].endpoint()?;
    let mut starting_new = true;
    loop {
        let section = &sections[section_index];
        if starting_new {
            supersection_index = section_index;
            supersection_start = section[0].endpoint()?;
            output.extend_from_slice(section);
        } else {
            output.extend_from_slice(&section[1..]);
        }
        drawn[section_index] = true;
        starting_new = false;

        let end = section[section.len() - 1].endpoint()?;
        if end == supersection_start {
            starting_new = true;
        } else if let Some(end_position) = position_on_edge(end, window) {
            let edge_loop = &loops[end_position.loop_index];
            let edge_count = edge_loop.len() - 1;
            let mut best: Option<(usize, f64)> = None;
            for (i, start) in starts.iter().enumerate() {
                let Some(start) = start else { continue };
                if start.loop_index != end_position.loop_index
                    || (drawn[i] && i != supersection_index)
                {
                    continue;
                }
                let mut relative = start.index;
                if start.index < end_position.index {
                    relative += edge_count as f64;
                }
                if best.map_or(true, |(_, b)| relative < b) {
                    best = Some((i, relative));
                }
            }
            let (best_section, best_index) = best.ok_or(PathError::NoRestart {
                loop_index: end_position.loop_index,
            })?;

            let end_edge = end_position.index.trunc() as usize + 1;
            let restart_edge = best_index.trunc() as usize + 1;
            let next_start = sections[best_section][0].endpoint()?;
            for i in end_edge..=restart_edge {
                let edge = &edge_loop[(i - 1) % edge_count + 1];
                let target = if i == restart_edge {
                    next_start
                } else {
                    edge.endpoint()?
                };
                output.push(edge.retarget(target)?);
            }
            trace!(from = end_position.index, to = best_index, "walked the window boundary");

            if best_section == supersection_index {
                starting_new = true;
            } else if drawn[best_section] {
                return Err(PathError::AlreadyDrawn {
                    s: next_start.x,
                    t: next_start.y,
                });
            } else {
                section_index = best_section;
            }
        } else {
            let Some(next) = sections.iter().position(|s| s[0].end() == Some(end)) else {
                return Err(if domain.is_on_edge(end) {
                    PathError::DanglingOnDomainEdge { s: end.x, t: end.y }
                } else {
                    PathError::Dangling { s: end.x, t: end.y }
                });
            };
            if drawn[next] {
                return Err(PathError::AlreadyDrawn { s: end.x, t: end.y });
            }
            section_index = next;
        }

        if starting_new {
            match drawn.iter().position(|d| !d) {
                Some(i) => section_index = i,
                None => break,
            }
        }
    }
    debug!(supersection_start = ?supersection_start, segments = output.len(), "restitched");
    Ok(output)
}

fn drop_zero_length_segments(path: &mut Path) -> Result<()> {
    let mut i = path.len();
    while i > 1 {
        i -= 1;
        if path[i - 1].endpoint()? == path[i].endpoint()? {
            path.remove(i);
        }
    }
    Ok(())
}

fn drop_orphaned_moves(path: &mut Path) {
    let mut i = path.len();
    while i > 1 {
        i -= 1;
        if path[i - 1].is_move() && path[i].is_move() {
            path.remove(i - 1);
        }
    }
}

/// Replace every `Close` with a line back to the start of its sub-path.
fn explicit_closures(path: &[PathSegment]) -> Result<Path> {
    let ends = resolved_endpoints(path)?;
    Ok(path
        .iter()
        .zip(ends)
        .map(|(segment, end)| match segment {
            PathSegment::Close => PathSegment::LineTo(end),
            other => *other,
        })
        .collect())
}

/// Rewrite one segment as `[reduced, MoveTo, remainder]` around a crossing.
///
/// `intersect0` is the crossing on the start's side and `intersect1` the one
/// on the end's side; they differ only across a periodic wrap. A crossing at
/// either end only inserts a MoveTo.
pub fn splice_segment(
    start: Point,
    segment: &PathSegment,
    intersect0: Point,
    intersect1: Point,
) -> Result<Path> {
    let end = segment.endpoint()?;
    if start == intersect0 {
        return Ok(vec![PathSegment::MoveTo(start), *segment]);
    }
    if intersect1 == end {
        return Ok(vec![*segment, PathSegment::MoveTo(end)]);
    }
    match *segment {
        PathSegment::LineTo(_) | PathSegment::Parallel(_) | PathSegment::Meridian(_) => Ok(vec![
            segment.retarget(intersect0)?,
            PathSegment::MoveTo(intersect1),
            *segment,
        ]),
        PathSegment::ArcTo {
            radius,
            radius_b,
            rotation,
            large_arc,
            sweep,
            end,
        } => {
            let center = arc_center(start, end, radius, large_arc != sweep);
            let sign = if sweep { 1.0 } else { -1.0 };
            // each piece's flag follows from its own swept angle
            let large_head = sign * angle_sign(start, center, intersect0) > 0.0;
            let large_tail = sign * angle_sign(intersect1, center, end) > 0.0;
            Ok(vec![
                PathSegment::ArcTo {
                    radius,
                    radius_b,
                    rotation,
                    large_arc: large_head,
                    sweep,
                    end: intersect0,
                },
                PathSegment::MoveTo(intersect1),
                PathSegment::ArcTo {
                    radius,
                    radius_b,
                    rotation,
                    large_arc: large_tail,
                    sweep,
                    end,
                },
            ])
        }
        other => Err(PathError::UnsupportedSegment {
            kind: other.kind(),
            operation: "segment splicing",
        }),
    }
}

/// Whether every sub-path ends where it started, or starts and ends on the domain edge.
pub fn is_closed(path: &[PathSegment], domain: &Domain) -> Result<bool> {
    match path.first() {
        None => return Ok(true),
        Some(first) if !first.is_move() => return Err(PathError::MissingMoveTo),
        Some(_) => {}
    }
    let ends = resolved_endpoints(path)?;
    let mut start = ends[0];
    for i in 0..path.len() {
        if path[i].is_move() {
            start = ends[i];
        }
        let section_ends = i + 1 == path.len() || path[i + 1].is_move();
        if section_ends {
            let end = ends[i];
            let on_start = end == start;
            let along_edge = domain.is_on_edge(start) && domain.is_on_edge(end);
            if !on_start && !along_edge {
                return Ok(false);
            }
        }
    }
    Ok(true)
}

/// Position of `point` on the first window edge whose bounding box holds it.
pub fn position_on_edge(point: Point, edges: &[PathSegment]) -> Option<EdgePosition> {
    let mut loop_index = 0;
    let mut edge_index = 0;
    let mut loop_start = edges.first()?.end();
    let mut previous = loop_start;
    for segment in edges.iter().skip(1) {
        if let PathSegment::MoveTo(p) = *segment {
            loop_index += 1;
            edge_index = 0;
            loop_start = Some(p);
            previous = Some(p);
            continue;
        }
        let end = segment.end().or(loop_start);
        if let (Some(a), Some(b)) = (previous, end) {
            let on_this_edge = point.x >= a.x.min(b.x)
                && point.x <= a.x.max(b.x)
                && point.y >= a.y.min(b.y)
                && point.y <= a.y.max(b.y);
            if on_this_edge {
                let along = (point - a).dot(&(b - a)) / (b - a).norm_squared();
                return Some(EdgePosition {
                    loop_index,
                    index: edge_index as f64 + along,
                });
            }
        }
        edge_index += 1;
        previous = end;
    }
    None
}

#[cfg(test)]
mod tests;
