//! Crossings with lines of constant `t`, one at a time or as a comb.

use std::f64::consts::PI;

use crate::domain::{localize_in_closed_range, localize_in_range, Domain};
use crate::error::{PathError, Result};
use crate::geometry::{angle_sign, arc_center};
use crate::path::{calculate_path_bounds, PathSegment, Point};

/// A path crossing the line `t = const`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineCrossing {
    /// Index of the crossing segment in the input path.
    pub segment_index: usize,
    pub s: f64,
    /// Whether `t` increases along the path at the crossing.
    pub going_east: bool,
}

/// A path crossing line `line_index` of a comb `t = t0 + j·Δt`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CombCrossing {
    pub segment_index: usize,
    pub s: f64,
    pub line_index: i64,
    pub going_east: bool,
}

/// Unique crossings of `path` with the line at `t`.
///
/// A point exactly on the line counts as below it (`t+`), so a segment that
/// only touches the line from below never registers.
pub fn horizontal_line_crossings(
    path: &[PathSegment],
    t: f64,
    domain: &Domain,
) -> Result<Vec<LineCrossing>> {
    let mut crossings = Vec::new();
    for i in 1..path.len() {
        let start = path[i - 1].endpoint()?;
        for (s, going_east) in segment_line_crossings(start, &path[i], t, domain)? {
            crossings.push(LineCrossing {
                segment_index: i,
                s,
                going_east,
            });
        }
    }
    Ok(crossings)
}

/// Crossings of every segment with every line of the comb `t0 + j·dt`.
///
/// Only lines strictly above a segment's lowest `t` and no higher than its
/// highest `t` are tested.
pub fn comb_crossings(
    path: &[PathSegment],
    t0: f64,
    dt: f64,
    domain: &Domain,
) -> Result<Vec<CombCrossing>> {
    let mut crossings = Vec::new();
    for i in 1..path.len() {
        let start = path[i - 1].endpoint()?;
        let limits = calculate_path_bounds(&[PathSegment::MoveTo(start), path[i]])?;
        let j_min = ((limits.t_min - t0) / dt).floor() as i64 + 1;
        let j_max = ((limits.t_max - t0) / dt).floor() as i64;
        for j in j_min..=j_max {
            let t = t0 + j as f64 * dt;
            for (s, going_east) in segment_line_crossings(start, &path[i], t, domain)? {
                crossings.push(CombCrossing {
                    segment_index: i,
                    s,
                    line_index: j,
                    going_east,
                });
            }
        }
    }
    Ok(crossings)
}

fn segment_line_crossings(
    start: Point,
    segment: &PathSegment,
    t: f64,
    domain: &Domain,
) -> Result<Vec<(f64, bool)>> {
    match *segment {
        PathSegment::MoveTo(_) | PathSegment::Meridian(_) => Ok(Vec::new()),
        PathSegment::Parallel(end) => {
            if (start.y < t) != (end.y < t) {
                Ok(vec![(end.x, end.y > start.y)])
            } else {
                Ok(Vec::new())
            }
        }
        PathSegment::LineTo(end) => Ok(line_crossing(start, end, t, domain).into_iter().collect()),
        PathSegment::ArcTo {
            radius,
            large_arc,
            sweep,
            end,
            ..
        } => {
            if domain.is_periodic() {
                return Err(PathError::ArcOnPeriodicDomain);
            }
            Ok(arc_crossings(start, end, radius, large_arc, sweep, t))
        }
        other => Err(PathError::UnsupportedSegment {
            kind: other.kind(),
            operation: "horizontal line crossings",
        }),
    }
}

fn line_crossing(mut start: Point, mut end: Point, t: f64, domain: &Domain) -> Option<(f64, bool)> {
    let mut crosses = (start.y < t) != (end.y < t);
    let mut going_east = end.y > start.y;
    if domain.is_periodic() {
        // the short way round crosses the wrap
        if (end.y - start.y).abs() > PI {
            crosses = !crosses;
            going_east = !going_east;
            start.y = localize_in_range(start.y, t - PI, t + PI);
            end.y = localize_in_range(end.y, t - PI, t + PI);
        }
        end.x = localize_in_range(end.x, start.x - PI, start.x + PI);
    }
    if !crosses {
        return None;
    }
    let mut s = if end.x == start.x {
        end.x
    } else {
        let start_weight = (end.y - t) / (end.y - start.y);
        start_weight * start.x + (1.0 - start_weight) * end.x
    };
    if domain.is_periodic() {
        s = localize_in_closed_range(s, domain.s_min, domain.s_max);
    }
    Some((s, going_east))
}

fn arc_crossings(
    q0: Point,
    q1: Point,
    radius: f64,
    large_arc: bool,
    sweep: bool,
    t: f64,
) -> Vec<(f64, bool)> {
    let center = arc_center(q0, q1, radius, large_arc != sweep);
    let discriminant = radius * radius - (t - center.y).powi(2);
    if discriminant < 0.0 {
        return Vec::new();
    }
    let mut crossings = Vec::new();
    for sign in [-1.0, 1.0] {
        let x = center.x + sign * discriminant.sqrt();
        let vy = if sweep { x - center.x } else { center.x - x };
        if vy == 0.0 {
            // tangent
            continue;
        }
        let point_sign = -angle_sign(q0, Point::new(x, t), q1);
        if point_sign != 0.0 && (point_sign < 0.0) != sweep {
            continue;
        }
        // an endpoint hit only counts if the rest of the arc is above the line
        if (t == q0.y && vy > 0.0) || (t == q1.y && vy < 0.0) {
            continue;
        }
        crossings.push((x, vy > 0.0));
    }
    crossings
}
