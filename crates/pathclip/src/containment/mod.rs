//! Containment oracle: which side of a signed region a point falls on.
//!
//! Purpose
//! - `contains` decides In/Out/Borderline for one point under a fill rule.
//! - `encompasses` decides the same for a whole path, on the assumption that
//!   it lies entirely on one side.
//!
//! Conventions
//! - Regions are signed. Walking along the boundary, points on the left are
//!   inside (left-handed frame: with `t` decreasing, larger `s` is on the right).
//! - A point exactly on the boundary is `Borderline`, never guessed.
//! - Crossings are summed with inverse-distance weights, so two crossings at
//!   the same place cancel and the sign follows the nearest unambiguous one.

use std::f64::consts::PI;

use tracing::debug;

use crate::crossing::horizontal_line_crossings;
use crate::domain::{is_between, localize_in_range, Domain};
use crate::error::{PathError, Result};
use crate::geometry::{arc_center, line_segment_distance};
use crate::path::{
    path_to_string, reflect_path, rotate_path, PathSegment, Point, Rotation,
};

/// Where a point lies relative to a region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    In,
    Out,
    Borderline,
}

impl Side {
    /// Swap `In` and `Out`.
    #[inline]
    pub fn inverted(self) -> Self {
        match self {
            Side::In => Side::Out,
            Side::Out => Side::In,
            Side::Borderline => Side::Borderline,
        }
    }
}

/// How winding turns into membership.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum FillRule {
    /// Nonzero-like: any net positive winding is inside; far away is outside.
    Positive,
    /// Even-odd: an odd number of wraps either way is inside.
    Odd,
    /// Only the side of the nearest boundary matters. The only rule defined
    /// on periodic domains; the empty region contains everything.
    #[default]
    Left,
}

/// Side of `polygon` on which `point` lies under `rule`.
pub fn contains(
    polygon: &[PathSegment],
    point: Point,
    domain: &Domain,
    rule: FillRule,
) -> Result<Side> {
    contains_with(polygon, point, domain, rule, false)
}

fn contains_with(
    polygon: &[PathSegment],
    point: Point,
    domain: &Domain,
    rule: FillRule,
    success_guaranteed: bool,
) -> Result<Side> {
    if rule != FillRule::Left && domain.is_periodic() {
        return Err(PathError::FillRuleOnPeriodicDomain(rule));
    }
    if !domain.contains_point(point) {
        return Err(PathError::PointOutsideDomain {
            s: point.x,
            t: point.y,
            s_min: domain.s_min,
            s_max: domain.s_max,
            t_min: domain.t_min,
            t_max: domain.t_max,
        });
    }
    check_well_posed(polygon)?;

    if polygon.is_empty() {
        return Ok(match rule {
            FillRule::Positive | FillRule::Odd => Side::Out,
            FillRule::Left => Side::In,
        });
    }

    if touches_straight_edge(polygon, point, domain)? {
        return Ok(Side::Borderline);
    }

    let mut sum = 0.0;
    for crossing in horizontal_line_crossings(polygon, point.y, domain)? {
        let d = crossing.s - point.x;
        if d == 0.0 {
            return Ok(Side::Borderline);
        }
        let weight = match rule {
            FillRule::Left => 1.0 / d,
            FillRule::Positive | FillRule::Odd => d.signum(),
        };
        sum += if crossing.going_east { -weight } else { weight };
    }

    match rule {
        FillRule::Positive => return Ok(if sum > 0.0 { Side::In } else { Side::Out }),
        FillRule::Odd => {
            return Ok(if (sum / 2.0) % 2.0 != 0.0 {
                Side::In
            } else {
                Side::Out
            })
        }
        FillRule::Left if sum > 0.0 => return Ok(Side::In),
        FillRule::Left if sum < 0.0 => return Ok(Side::Out),
        FillRule::Left => {}
    }

    if success_guaranteed {
        return Err(PathError::Indecisive {
            path: path_to_string(polygon),
        });
    }
    escalate(polygon, point, domain, rule)
}

/// Rerun an indecisive query along a vertical line, then about a mirror.
///
/// An indecisive sum means the ray only grazes the boundary, so every point
/// of the ray off the boundary is on the same side as `point`. The vertical
/// reruns are aimed through the midpoint of each slanted segment in turn until
/// one lands off the boundary and decides; failing that, the horizontal ray is
/// shifted off the grazed vertices by less than the point's clearance.
fn escalate(
    polygon: &[PathSegment],
    point: Point,
    domain: &Domain,
    rule: FillRule,
) -> Result<Side> {
    let rotated_polygon = rotate_path(polygon, Rotation::Quarter);
    let rotated_domain = domain.rotated();
    let vertices = polygon
        .iter()
        .map(PathSegment::endpoint)
        .collect::<Result<Vec<_>>>()?;
    for s_new in aim_abscissae(polygon, domain)? {
        if vertices.contains(&Point::new(s_new, point.y)) {
            continue;
        }
        debug!(s = point.x, t = point.y, s_new, "containment indecisive; rotating");
        match contains_with(
            &rotated_polygon,
            Point::new(point.y, -s_new),
            &rotated_domain,
            rule,
            true,
        ) {
            Ok(Side::Borderline) | Err(PathError::Indecisive { .. }) => continue,
            decided => return decided,
        }
    }

    if let Some(dt) = clearance(polygon, point, domain)? {
        for t in [point.y + dt, point.y - dt] {
            let shifted = Point::new(point.x, t);
            if !domain.contains_point(shifted) {
                continue;
            }
            debug!(
                s = point.x,
                t = point.y,
                shifted_t = t,
                "every rotated ray grazes; shifting the ray"
            );
            match contains_with(polygon, shifted, domain, rule, true) {
                Ok(Side::Borderline) | Err(PathError::Indecisive { .. }) => continue,
                decided => return decided,
            }
        }
    }

    debug!(s = point.x, t = point.y, "no rotated or shifted ray decided; reflecting");
    match contains_with(
        &reflect_path(polygon),
        Point::new(point.x, -point.y),
        &domain.reflected(),
        rule,
        true,
    )? {
        Side::Borderline => Err(PathError::Indecisive {
            path: path_to_string(polygon),
        }),
        side => Ok(side.inverted()),
    }
}

/// The `s` of the midpoint of every segment not parallel to the t axis, in path order.
fn aim_abscissae(polygon: &[PathSegment], domain: &Domain) -> Result<Vec<f64>> {
    let mut abscissae: Vec<f64> = Vec::new();
    for i in 1..polygon.len() {
        let segment = &polygon[i];
        if segment.is_move() {
            continue;
        }
        let start = polygon[i - 1].endpoint()?;
        let end = segment.endpoint()?;
        if matches!(segment, PathSegment::ArcTo { .. }) || start.x != end.x {
            let s = midpoint(&polygon[i - 1], segment, domain)?.x;
            if !abscissae.contains(&s) {
                abscissae.push(s);
            }
        }
    }
    if abscissae.is_empty() {
        return Err(PathError::NoSegments {
            path: path_to_string(polygon),
        });
    }
    Ok(abscissae)
}

/// A shift in `t` that moves `point` off every vertex row without reaching the boundary.
///
/// Half the smaller of the point's distance to the boundary and the gap to the
/// nearest vertex `t` other than its own. `None` on periodic domains, for
/// curves other than circular arcs, and for points on the boundary.
fn clearance(polygon: &[PathSegment], point: Point, domain: &Domain) -> Result<Option<f64>> {
    if domain.is_periodic() {
        return Ok(None);
    }
    let mut distance = f64::INFINITY;
    let mut gap = f64::INFINITY;
    for i in 0..polygon.len() {
        let end = polygon[i].endpoint()?;
        if end.y != point.y {
            gap = gap.min((end.y - point.y).abs());
        }
        if i == 0 || polygon[i].is_move() {
            continue;
        }
        let start = polygon[i - 1].endpoint()?;
        let d = match polygon[i] {
            PathSegment::LineTo(_) | PathSegment::Parallel(_) | PathSegment::Meridian(_) => {
                line_segment_distance(start, end, point)
            }
            PathSegment::ArcTo {
                radius,
                large_arc,
                sweep,
                ..
            } => {
                // distance to the whole circle bounds the distance to the arc from below
                let center = arc_center(start, end, radius, large_arc != sweep);
                let r = radius.max((end - start).norm() / 2.0);
                ((point - center).norm() - r).abs()
            }
            _ => return Ok(None),
        };
        distance = distance.min(d);
    }
    let dt = distance.min(gap) / 2.0;
    Ok((dt > 0.0 && dt.is_finite()).then_some(dt))
}

/// Reject sub-paths of fewer than three straight segments.
fn check_well_posed(polygon: &[PathSegment]) -> Result<()> {
    let mut last_move: Option<usize> = None;
    let mut curved_since_move = false;
    for i in 0..=polygon.len() {
        let at_move = i == polygon.len() || polygon[i].is_move();
        if at_move {
            if let Some(m) = last_move {
                if i - m <= 3 && !curved_since_move {
                    return Err(PathError::IllPosed {
                        start: m,
                        len: i - m,
                        path: path_to_string(polygon),
                    });
                }
            }
            last_move = Some(i);
            curved_since_move = false;
        } else if !matches!(polygon[i], PathSegment::LineTo(_)) {
            curved_since_move = true;
        }
    }
    Ok(())
}

/// Whether `point` lies exactly on an axis-aligned line, parallel or meridian.
fn touches_straight_edge(polygon: &[PathSegment], point: Point, domain: &Domain) -> Result<bool> {
    for i in 1..polygon.len() {
        let segment = &polygon[i];
        if !matches!(
            segment,
            PathSegment::LineTo(_) | PathSegment::Parallel(_) | PathSegment::Meridian(_)
        ) {
            continue;
        }
        let start = polygon[i - 1].endpoint()?;
        let end = segment.endpoint()?;
        let mut in_s = is_between(point.x, start.x, end.x);
        let mut in_t = is_between(point.y, start.y, end.y);
        if domain.is_periodic() && matches!(segment, PathSegment::LineTo(_)) {
            // the short way round leaves the coordinate range
            if (start.x - end.x).abs() > PI {
                in_s = !in_s;
            }
            if (start.y - end.y).abs() > PI {
                in_t = !in_t;
            }
        }
        if in_s
            && in_t
            && ((start.x == end.x && start.x == point.x) || (start.y == end.y && start.y == point.y))
        {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Side of `polygon` (left rule) on which all of `points` lie.
///
/// Vertices are tried first, then segment midpoints; the first one off the
/// boundary decides. A path entirely on the boundary is `Borderline`.
pub fn encompasses(polygon: &[PathSegment], points: &[PathSegment], domain: &Domain) -> Result<Side> {
    for segment in points {
        let side = contains(polygon, segment.endpoint()?, domain, FillRule::Left)?;
        if side != Side::Borderline {
            return Ok(side);
        }
    }
    for pair in points.windows(2) {
        if pair[1].is_move() {
            continue;
        }
        let sample = midpoint(&pair[0], &pair[1], domain)?;
        let side = contains(polygon, sample, domain, FillRule::Left)?;
        if side != Side::Borderline {
            return Ok(side);
        }
    }
    Ok(Side::Borderline)
}

/// A point on `segment`, which starts at the end of `prev`.
///
/// Lines give the mean of their ends, taken the short way round on periodic
/// domains. Arcs give a point biased toward the start, so a sample never lands
/// on the apex where a tangent window edge would touch.
pub fn midpoint(prev: &PathSegment, segment: &PathSegment, domain: &Domain) -> Result<Point> {
    let start = prev.endpoint()?;
    match *segment {
        PathSegment::LineTo(end) => {
            let mut mid = (start + end) / 2.0;
            if domain.is_periodic() {
                if (end.x - start.x).abs() > PI {
                    mid.x = localize_in_range(mid.x + PI, domain.s_min, domain.s_max);
                }
                if (end.y - start.y).abs() > PI {
                    mid.y = localize_in_range(mid.y + PI, domain.t_min, domain.t_max);
                }
            }
            Ok(mid)
        }
        PathSegment::Parallel(end) | PathSegment::Meridian(end) => Ok((start + end) / 2.0),
        PathSegment::ArcTo {
            radius,
            large_arc,
            sweep,
            end,
            ..
        } => {
            let sign = if sweep { -1.0 } else { 1.0 };
            let center = arc_center(start, end, radius, sweep != large_arc);
            let direction = Point::new(
                -sign * (end.y - start.y) + start.x - center.x,
                sign * (end.x - start.x) + start.y - center.y,
            );
            Ok(center + direction / direction.norm() * radius)
        }
        other => Err(PathError::UnsupportedSegment {
            kind: other.kind(),
            operation: "midpoint",
        }),
    }
}
