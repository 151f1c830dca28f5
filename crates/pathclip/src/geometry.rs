//! Planar primitives: signed areas, arc centers and segment intersections.
//!
//! All signs are for a left-handed (y-down) frame, matching the arc sweep
//! convention of the path syntax.

use crate::cfg::ARC_ROOT_EPSILON;
use crate::path::Point;

/// Signed area of the parallelogram spanned by `b − a` and `d − c`.
///
/// Positive if `d` is to the right of `c` for an observer facing from `a` to `b`
/// (left-handed frame); zero if the two are collinear or either is degenerate.
#[inline]
pub fn crossing_sign(a: Point, b: Point, c: Point, d: Point) -> f64 {
    (b.x - a.x) * (d.y - c.y) - (b.y - a.y) * (d.x - c.x)
}

/// Twice the signed area of triangle `abc`: positive if it turns clockwise (left-handed frame).
#[inline]
pub fn angle_sign(a: Point, b: Point, c: Point) -> f64 {
    crossing_sign(b, c, b, a)
}

/// Dot product of `b − a` and `d − c`.
#[inline]
pub fn passing_sign(a: Point, b: Point, c: Point, d: Point) -> f64 {
    (b - a).dot(&(d - c))
}

/// Center of the circle of radius `r` through `a` and `b`.
///
/// `on_the_right` picks the center to the right of the straight path from `a`
/// to `b`; for an SVG arc that is `large_arc != sweep`. A radius shorter than
/// half the chord is treated as exactly half the chord.
pub fn arc_center(a: Point, b: Point, r: f64, on_the_right: bool) -> Point {
    let d = (b - a).norm();
    let mut l = (r * r - d * d / 4.0).max(0.0).sqrt();
    if on_the_right {
        l = -l;
    }
    let sin_th = (b.y - a.y) / d;
    let cos_th = -(b.x - a.x) / d;
    Point::new((a.x + b.x) / 2.0 + l * sin_th, (a.y + b.y) / 2.0 + l * cos_th)
}

#[inline]
fn transpose(p: Point) -> Point {
    Point::new(p.y, p.x)
}

/// Intersection of segment `p1p2` with segment `q1q2`, endpoints included.
///
/// Axis-aligned `q` edges are solved directly and reuse a `p` endpoint verbatim
/// when it lies on the edge's constant coordinate, so points already on a
/// window edge are reported without roundoff. Oblique edges use the
/// parametric solution.
pub fn line_line_intersection(p1: Point, p2: Point, q1: Point, q2: Point) -> Option<Point> {
    if q1.x == q2.x {
        let r = if p1.x == q1.x {
            Some(p1)
        } else if p2.x == q1.x {
            Some(p2)
        } else if p1.x.min(p2.x) <= q1.x && p1.x.max(p2.x) >= q1.x {
            Some(Point::new(
                q1.x,
                (q1.x - p1.x) / (p2.x - p1.x) * (p2.y - p1.y) + p1.y,
            ))
        } else {
            None
        };
        r.filter(|r| r.y >= q1.y.min(q2.y) && r.y <= q1.y.max(q2.y))
    } else if q1.y == q2.y {
        line_line_intersection(transpose(p1), transpose(p2), transpose(q1), transpose(q2))
            .map(transpose)
    } else {
        oblique_intersection(p1, p2, q1, q2)
    }
}

fn oblique_intersection(p1: Point, p2: Point, q1: Point, q2: Point) -> Option<Point> {
    let on_q = |p: Point| {
        crossing_sign(q1, q2, q1, p) == 0.0
            && passing_sign(q1, p, q1, q2) >= 0.0
            && passing_sign(q2, p, q2, q1) >= 0.0
    };
    if on_q(p1) {
        return Some(p1);
    }
    if on_q(p2) {
        return Some(p2);
    }
    let denom = crossing_sign(p1, p2, q1, q2);
    if denom == 0.0 {
        return None;
    }
    // p1 + u (p2 − p1) = q1 + v (q2 − q1)
    let u = crossing_sign(p1, q1, q1, q2) / denom;
    let v = crossing_sign(p1, q1, p1, p2) / denom;
    if (0.0..=1.0).contains(&u) && (0.0..=1.0).contains(&v) {
        Some(p1 + (p2 - p1) * u)
    } else {
        None
    }
}

/// Intersections of segment `p0p1` with the arc of center `o` and radius `r`
/// running clockwise (viewed from the center, left-handed frame) from `q0` to `q1`.
///
/// Tangency does not count; passing through an arc endpoint does, and such a
/// hit is snapped to the endpoint exactly.
pub fn line_arc_intersections(p0: Point, p1: Point, o: Point, r: f64, q0: Point, q1: Point) -> Vec<Point> {
    line_arc_intersections_eps(p0, p1, o, r, q0, q1, ARC_ROOT_EPSILON)
}

/// `line_arc_intersections` with an explicit relative tangency threshold.
pub fn line_arc_intersections_eps(
    p0: Point,
    p1: Point,
    o: Point,
    r: f64,
    q0: Point,
    q1: Point,
    epsilon: f64,
) -> Vec<Point> {
    let scale = (p1 - p0).norm_squared();
    let pitch = (p0 - o).dot(&(p1 - p0));
    let distance = (p0 + q0 - o * 2.0).dot(&(p0 - q0));
    let vertex = -pitch / scale;
    let discriminant = vertex * vertex - distance / scale;
    if discriminant <= r * r / scale * epsilon {
        return Vec::new();
    }
    let root = discriminant.sqrt();
    let mut crossings = Vec::new();
    for t in [vertex + root, vertex - root] {
        if !(0.0..=1.0).contains(&t) {
            continue;
        }
        let mut x = p0 + (p1 - p0) * t;
        for q in [q0, q1] {
            if angle_sign(q, p0, p1) == 0.0 && (t > vertex) == (passing_sign(o, q, p0, p1) > 0.0) {
                x = q;
            }
        }
        let right_of_q0 = angle_sign(q0, o, x) <= 0.0;
        let left_of_q1 = angle_sign(x, o, q1) <= 0.0;
        let inside_out = angle_sign(q0, o, q1) >= 0.0;
        let on_arc = if inside_out {
            right_of_q0 || left_of_q1
        } else {
            right_of_q0 && left_of_q1
        };
        if on_arc {
            crossings.push(x);
        }
    }
    crossings
}

/// Distance from `point` to the segment `ab` (or to `a` if the segment is degenerate).
pub fn line_segment_distance(a: Point, b: Point, point: Point) -> f64 {
    if a == b {
        return (point - a).norm();
    }
    let t = (point - a).dot(&(b - a)) / (b - a).norm_squared();
    let nearest = if t < 0.0 {
        a
    } else if t > 1.0 {
        b
    } else {
        a * (1.0 - t) + b * t
    };
    (point - nearest).norm()
}
