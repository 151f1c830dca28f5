use super::segment::{PathSegment, Point};
use crate::error::{PathError, Result};
use crate::geometry::angle_sign;

/// Axis-aligned bounding box in `(s, t)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub s_min: f64,
    pub s_max: f64,
    pub t_min: f64,
    pub t_max: f64,
}

impl Bounds {
    fn empty() -> Self {
        Self {
            s_min: f64::INFINITY,
            s_max: f64::NEG_INFINITY,
            t_min: f64::INFINITY,
            t_max: f64::NEG_INFINITY,
        }
    }

    fn include(&mut self, p: Point) {
        self.s_min = self.s_min.min(p.x);
        self.s_max = self.s_max.max(p.x);
        self.t_min = self.t_min.min(p.y);
        self.t_max = self.t_max.max(p.y);
    }
}

/// Bounding box enclosing every segment of `path`.
///
/// Béziers are bounded by their control polygons; arcs by their endpoint and
/// whichever of the circle's four cardinal points lie on the arc. Poles
/// enclosed by geographic regions are not detected.
pub fn calculate_path_bounds(path: &[PathSegment]) -> Result<Bounds> {
    if path.is_empty() {
        return Err(PathError::EmptyPath);
    }
    let mut bounds = Bounds::empty();
    for (i, segment) in path.iter().enumerate() {
        match *segment {
            PathSegment::MoveTo(p)
            | PathSegment::LineTo(p)
            | PathSegment::Parallel(p)
            | PathSegment::Meridian(p) => bounds.include(p),
            PathSegment::QuadraticTo { control, end } => {
                bounds.include(control);
                bounds.include(end);
            }
            PathSegment::CubicTo {
                control1,
                control2,
                end,
            } => {
                bounds.include(control1);
                bounds.include(control2);
                bounds.include(end);
            }
            PathSegment::ArcTo {
                radius,
                large_arc,
                sweep,
                end,
                ..
            } => {
                if i == 0 {
                    return Err(PathError::MissingMoveTo);
                }
                let start = path[i - 1].endpoint()?;
                for p in arc_extrema(start, segment, radius, large_arc, sweep, end)? {
                    bounds.include(p);
                }
            }
            PathSegment::Close => {}
        }
    }
    Ok(bounds)
}

fn arc_extrema(
    start: Point,
    segment: &PathSegment,
    radius: f64,
    large_arc: bool,
    sweep: bool,
    end: Point,
) -> Result<Vec<Point>> {
    let chord = (end - start).norm();
    if chord == 0.0 {
        return Err(PathError::DegenerateArc {
            segment: segment.to_string(),
        });
    }
    // roundoff can leave r a hair short of the half chord
    let r = radius.max(chord / 2.0);
    let apothem = (r * r - chord * chord / 4.0).sqrt();
    let arc_sign = if large_arc == sweep { 1.0 } else { -1.0 };
    let step = Point::new(
        (end.y - start.y) / chord * apothem * arc_sign,
        (start.x - end.x) / chord * apothem * arc_sign,
    );
    let center = (start + end) / 2.0 + step;
    let mut points = vec![end];
    for cardinal in [
        Point::new(center.x + r, center.y),
        Point::new(center.x, center.y + r),
        Point::new(center.x - r, center.y),
        Point::new(center.x, center.y - r),
    ] {
        let sign = -angle_sign(start, cardinal, end);
        if (!sweep) == (sign > 0.0) {
            points.push(cardinal);
        }
    }
    Ok(points)
}
