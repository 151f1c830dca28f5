//! Segment × window edge crossings, planar and geographic.

use std::f64::consts::PI;

use crate::cfg::KernelCfg;
use crate::domain::{is_between, localize_in_range, Domain};
use crate::error::{PathError, Result};
use crate::geometry::{arc_center, line_arc_intersections_eps, line_line_intersection};
use crate::path::{resolved_endpoints, rotate_segment, PathSegment, Point, Rotation};

/// One place where a segment meets a window edge.
///
/// `intersect0` lies on the segment start's side and `intersect1` on the end's
/// side. They differ only where the crossing sits on a periodic wrap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeCrossing {
    pub intersect0: Point,
    pub intersect1: Point,
    pub loop_index: usize,
}

/// Every crossing of the segment from `start` with the directed edges of `edges`.
///
/// The loop index counts `MoveTo`s in `edges`. A segment lying along an edge
/// counts only as leaving it. Passing through a vertex between two edges may
/// be reported twice.
pub fn edge_crossings(
    start: Point,
    segment: &PathSegment,
    edges: &[PathSegment],
    domain: &Domain,
) -> Result<Vec<EdgeCrossing>> {
    edge_crossings_with_cfg(start, segment, edges, domain, &KernelCfg::default())
}

/// `edge_crossings` with the arc tangency threshold taken from `cfg`.
pub fn edge_crossings_with_cfg(
    start: Point,
    segment: &PathSegment,
    edges: &[PathSegment],
    domain: &Domain,
    cfg: &KernelCfg,
) -> Result<Vec<EdgeCrossing>> {
    let ends = resolved_endpoints(edges)?;
    let mut crossings = Vec::new();
    let mut loop_index = 0;
    for i in 1..edges.len() {
        let edge = &edges[i];
        if edge.is_move() {
            loop_index += 1;
            continue;
        }
        let edge_start = ends[i - 1];
        if domain.is_periodic() {
            if let Some((intersect0, intersect1)) =
                geo_edge_crossing(start, segment, edge_start, edge, domain)?
            {
                crossings.push(EdgeCrossing {
                    intersect0,
                    intersect1,
                    loop_index,
                });
            }
        } else {
            let points =
                map_edge_crossings(start, segment, edge_start, edge, cfg.arc_root_epsilon)?;
            for point in points {
                crossings.push(EdgeCrossing {
                    intersect0: point,
                    intersect1: point,
                    loop_index,
                });
            }
        }
    }
    Ok(crossings)
}

fn map_edge_crossings(
    start: Point,
    segment: &PathSegment,
    edge_start: Point,
    edge: &PathSegment,
    arc_root_epsilon: f64,
) -> Result<Vec<Point>> {
    let PathSegment::LineTo(edge_end) = *edge else {
        return Err(PathError::UnsupportedSegment {
            kind: edge.kind(),
            operation: "planar window edges",
        });
    };
    match *segment {
        PathSegment::LineTo(end) => {
            Ok(line_line_intersection(start, end, edge_start, edge_end)
                .into_iter()
                .collect())
        }
        PathSegment::ArcTo {
            radius,
            large_arc,
            sweep,
            end,
            ..
        } => {
            // order the endpoints so the arc runs clockwise from q0 to q1
            let (q0, q1) = if sweep { (start, end) } else { (end, start) };
            let center = arc_center(q0, q1, radius, !large_arc);
            Ok(line_arc_intersections_eps(
                edge_start,
                edge_end,
                center,
                radius,
                q0,
                q1,
                arc_root_epsilon,
            ))
        }
        other => Err(PathError::UnsupportedSegment {
            kind: other.kind(),
            operation: "planar edge crossings",
        }),
    }
}

/// Crossing of one segment with one graticule edge, as (near, far) points.
///
/// The body handles a westward parallel; anything else is rotated a quarter
/// turn, solved, and rotated back.
fn geo_edge_crossing(
    start: Point,
    segment: &PathSegment,
    edge_start: Point,
    edge: &PathSegment,
    domain: &Domain,
) -> Result<Option<(Point, Point)>> {
    let edge_end = match *edge {
        PathSegment::LineTo(end) => {
            // only zero-length lines may close a loop
            if domain.fold(edge_start) != domain.fold(end) {
                return Err(PathError::GeographicEdgeHasLength {
                    s0: edge_start.x,
                    t0: edge_start.y,
                    s1: end.x,
                    t1: end.y,
                });
            }
            return Ok(None);
        }
        PathSegment::Parallel(end) | PathSegment::Meridian(end) => end,
        other => {
            return Err(PathError::UnsupportedSegment {
                kind: other.kind(),
                operation: "geographic window edges",
            })
        }
    };

    if matches!(edge, PathSegment::Meridian(_)) || edge_end.y > edge_start.y {
        let turn = Rotation::Quarter;
        let crossing = geo_edge_crossing(
            turn.apply(start),
            &rotate_segment(segment, turn),
            turn.apply(edge_start),
            &rotate_segment(edge, turn),
            &domain.rotated(),
        )?;
        let back = Rotation::ThreeQuarter;
        return Ok(crossing.map(|(p0, p1)| (back.apply(p0), back.apply(p1))));
    }

    let phi_x = edge_start.x;
    match *segment {
        PathSegment::LineTo(end) => {
            let phi0 = localize_in_range(start.x, phi_x, phi_x + 2.0 * PI);
            let phi1 = localize_in_range(end.x, phi_x, phi_x + 2.0 * PI);
            if (phi0 - phi1).abs() >= PI {
                let (p0, p1) = parallel_crossing(phi0, start.y, phi1, end.y, phi_x, domain);
                if is_between(p0.y, edge_start.y, edge_end.y) {
                    return Ok(Some((p0, p1)));
                }
            }
            Ok(None)
        }
        PathSegment::Parallel(_) => Ok(None),
        PathSegment::Meridian(end) => {
            if is_between(start.y, edge_start.y, edge_end.y)
                && (start.x >= phi_x) != (end.x >= phi_x)
            {
                let place = Point::new(phi_x, start.y);
                Ok(Some((place, place)))
            } else {
                Ok(None)
            }
        }
        other => Err(PathError::UnsupportedSegment {
            kind: other.kind(),
            operation: "geographic edge crossings",
        }),
    }
}

/// Where the line between two folded points crosses the parallel at `phi_x`.
///
/// Returns the near and far points; on the antiequator (a domain bound) they
/// sit at opposite bounds.
pub(crate) fn parallel_crossing(
    phi0: f64,
    mut lam0: f64,
    phi1: f64,
    mut lam1: f64,
    phi_x: f64,
    domain: &Domain,
) -> (Point, Point) {
    let w0 = localize_in_range(phi1 - phi_x, -PI, PI);
    let w1 = localize_in_range(phi_x - phi0, -PI, PI);
    let lam_x = if w0 == 0.0 {
        lam1
    } else if w1 == 0.0 {
        lam0
    } else {
        if (lam1 - lam0).abs() > PI {
            let lam_min = lam0.max(lam1);
            let lam_max = lam_min + 2.0 * PI;
            lam0 = localize_in_range(lam0, lam_min, lam_max);
            lam1 = localize_in_range(lam1, lam_min, lam_max);
        }
        localize_in_range(
            (w0 * lam0 + w1 * lam1) / (w0 + w1),
            domain.t_min,
            domain.t_max,
        )
    };
    if phi_x == domain.s_min || phi_x == domain.s_max {
        let (near, far) = if phi0 < phi1 {
            (domain.s_min, domain.s_max)
        } else {
            (domain.s_max, domain.s_min)
        };
        (Point::new(near, lam_x), Point::new(far, lam_x))
    } else {
        let place = Point::new(phi_x, lam_x);
        (place, place)
    }
}
