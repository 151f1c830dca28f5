//! Polygon approximation and Ramer–Douglas–Peucker decimation.
//!
//! Both assume the Cartesian plane.

use std::f64::consts::PI;

use super::segment::{Path, PathSegment, Point};
use crate::error::{PathError, Result};
use crate::geometry::{arc_center, line_segment_distance};
use crate::path::path_to_string;

/// Replace arcs with inscribed polylines and `Z` with an explicit line home.
///
/// An arc sweeping `Δθ` radians becomes `ceil(precision·|Δθ|)` lines whose
/// vertices lie on the circle.
pub fn polygonize(path: &[PathSegment], precision: f64) -> Result<Path> {
    let mut out = Vec::with_capacity(path.len());
    let mut sub_path_start: Option<Point> = None;
    let mut pen: Option<Point> = None;
    for segment in path {
        match *segment {
            PathSegment::MoveTo(p) => {
                sub_path_start = Some(p);
                out.push(*segment);
            }
            PathSegment::LineTo(_) => out.push(*segment),
            PathSegment::Close => {
                let home = sub_path_start.ok_or(PathError::MissingMoveTo)?;
                out.push(PathSegment::LineTo(home));
                pen = Some(home);
                continue;
            }
            PathSegment::ArcTo {
                radius,
                radius_b,
                large_arc,
                sweep,
                end,
                ..
            } => {
                let start = pen.ok_or(PathError::MissingMoveTo)?;
                out.extend(arc_polyline(
                    start,
                    end,
                    (radius + radius_b) / 2.0,
                    large_arc,
                    sweep,
                    precision,
                ));
            }
            other => {
                return Err(PathError::UnsupportedSegment {
                    kind: other.kind(),
                    operation: "polygonize",
                })
            }
        }
        pen = segment.end();
    }
    Ok(out)
}

fn arc_polyline(
    start: Point,
    end: Point,
    r: f64,
    large_arc: bool,
    sweep: bool,
    precision: f64,
) -> Vec<PathSegment> {
    let chord = (end - start).norm();
    let c = arc_center(start, end, r, large_arc != sweep);
    let minor = 2.0 * (chord / (2.0 * r)).min(1.0).asin();
    let magnitude = if large_arc { 2.0 * PI - minor } else { minor };
    // positive θ runs clockwise on a y-down screen
    let dtheta = if sweep { magnitude } else { -magnitude };
    let theta0 = (start.y - c.y).atan2(start.x - c.x);
    let n = ((precision * dtheta.abs()).ceil() as usize).max(1);
    let mut lines: Vec<PathSegment> = (1..n)
        .map(|j| {
            let theta = theta0 + dtheta * j as f64 / n as f64;
            PathSegment::LineTo(c + Point::new(theta.cos(), theta.sin()) * r)
        })
        .collect();
    lines.push(PathSegment::LineTo(end));
    lines
}

/// Simplify every polyline run so no dropped vertex is farther than `tolerance` from the result.
///
/// A run is one non-`L` segment followed by its `L`s; the first and last
/// vertex of each run always survive.
pub fn decimate(path: &[PathSegment], tolerance: f64) -> Result<Path> {
    let mut out = Vec::with_capacity(path.len());
    let mut run_start = 0;
    for i in 1..=path.len() {
        if i == path.len() || !matches!(path[i], PathSegment::LineTo(_)) {
            out.extend(decimate_run(&path[run_start..i], tolerance)?);
            run_start = i;
        }
    }
    Ok(out)
}

fn decimate_run(run: &[PathSegment], tolerance: f64) -> Result<Vec<PathSegment>> {
    if run.len() <= 2 {
        return Ok(run.to_vec());
    }
    let start = run[0].endpoint()?;
    let end = run[run.len() - 1].endpoint()?;
    let mut farthest = 0;
    let mut greatest = f64::NEG_INFINITY;
    for (i, segment) in run.iter().enumerate().take(run.len() - 1).skip(1) {
        let d = line_segment_distance(start, end, segment.endpoint()?);
        if d > greatest {
            greatest = d;
            farthest = i;
        }
    }
    if farthest == 0 {
        // only NaN distances get here
        return Err(PathError::DecimationStalled {
            path: path_to_string(run),
        });
    }
    if greatest < tolerance {
        return Ok(vec![run[0], run[run.len() - 1]]);
    }
    let mut head = decimate_run(&run[..=farthest], tolerance)?;
    let tail = decimate_run(&run[farthest..], tolerance)?;
    head.pop();
    head.extend(tail);
    Ok(head)
}
