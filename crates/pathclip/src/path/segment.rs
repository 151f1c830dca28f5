//! Segment model: one tagged variant per path command.

use nalgebra::Vector2;

use crate::error::{PathError, Result};

/// A location `(s, t)`; `(x, y)` on the plane, `(φ, λ)` on a geographic domain.
pub type Point = Vector2<f64>;

/// One or more sub-paths, each starting with `MoveTo`.
pub type Path = Vec<PathSegment>;

/// One path command. The start of every segment is the previous segment's endpoint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathSegment {
    /// `M`: starts a sub-path.
    MoveTo(Point),
    /// `L`: straight line.
    LineTo(Point),
    /// `A`: circular arc (the two radii are equal in practice).
    /// `sweep == true` is clockwise in a y-down, left-handed frame.
    ArcTo {
        radius: f64,
        radius_b: f64,
        rotation: f64,
        large_arc: bool,
        sweep: bool,
        end: Point,
    },
    /// `Q`: quadratic Bézier.
    QuadraticTo { control: Point, end: Point },
    /// `C`: cubic Bézier.
    CubicTo {
        control1: Point,
        control2: Point,
        end: Point,
    },
    /// `Φ`: constant-latitude arc (geographic domains only).
    Parallel(Point),
    /// `Λ`: constant-longitude arc (geographic domains only).
    Meridian(Point),
    /// `Z`: explicit closure marker.
    Close,
}

impl PathSegment {
    #[inline]
    pub fn move_to(s: f64, t: f64) -> Self {
        Self::MoveTo(Point::new(s, t))
    }
    #[inline]
    pub fn line_to(s: f64, t: f64) -> Self {
        Self::LineTo(Point::new(s, t))
    }
    #[inline]
    pub fn parallel(s: f64, t: f64) -> Self {
        Self::Parallel(Point::new(s, t))
    }
    #[inline]
    pub fn meridian(s: f64, t: f64) -> Self {
        Self::Meridian(Point::new(s, t))
    }
    /// Circular arc with equal radii and no rotation.
    #[inline]
    pub fn arc_to(radius: f64, large_arc: bool, sweep: bool, s: f64, t: f64) -> Self {
        Self::ArcTo {
            radius,
            radius_b: radius,
            rotation: 0.0,
            large_arc,
            sweep,
            end: Point::new(s, t),
        }
    }

    /// Single-letter command of this segment.
    pub fn kind(&self) -> char {
        match self {
            Self::MoveTo(_) => 'M',
            Self::LineTo(_) => 'L',
            Self::ArcTo { .. } => 'A',
            Self::QuadraticTo { .. } => 'Q',
            Self::CubicTo { .. } => 'C',
            Self::Parallel(_) => 'Φ',
            Self::Meridian(_) => 'Λ',
            Self::Close => 'Z',
        }
    }

    #[inline]
    pub fn is_move(&self) -> bool {
        matches!(self, Self::MoveTo(_))
    }

    /// Endpoint, if the command has one (`Close` does not).
    pub fn end(&self) -> Option<Point> {
        match *self {
            Self::MoveTo(p) | Self::LineTo(p) | Self::Parallel(p) | Self::Meridian(p) => Some(p),
            Self::ArcTo { end, .. } | Self::QuadraticTo { end, .. } | Self::CubicTo { end, .. } => {
                Some(end)
            }
            Self::Close => None,
        }
    }

    /// Endpoint, or an error for `Close`.
    #[inline]
    pub fn endpoint(&self) -> Result<Point> {
        self.end().ok_or(PathError::UnsupportedSegment {
            kind: 'Z',
            operation: "endpoint lookup",
        })
    }

    /// Numeric argument tuple in command order (flags as 0/1).
    pub fn args(&self) -> Vec<f64> {
        let flag = |b: bool| if b { 1.0 } else { 0.0 };
        match *self {
            Self::MoveTo(p) | Self::LineTo(p) | Self::Parallel(p) | Self::Meridian(p) => {
                vec![p.x, p.y]
            }
            Self::ArcTo {
                radius,
                radius_b,
                rotation,
                large_arc,
                sweep,
                end,
            } => vec![
                radius,
                radius_b,
                rotation,
                flag(large_arc),
                flag(sweep),
                end.x,
                end.y,
            ],
            Self::QuadraticTo { control, end } => vec![control.x, control.y, end.x, end.y],
            Self::CubicTo {
                control1,
                control2,
                end,
            } => vec![
                control1.x, control1.y, control2.x, control2.y, end.x, end.y,
            ],
            Self::Close => Vec::new(),
        }
    }

    /// Apply `f` to every point argument (arc radii and flags are untouched).
    pub fn map_points<F: Fn(Point) -> Point>(&self, f: F) -> Self {
        match *self {
            Self::MoveTo(p) => Self::MoveTo(f(p)),
            Self::LineTo(p) => Self::LineTo(f(p)),
            Self::Parallel(p) => Self::Parallel(f(p)),
            Self::Meridian(p) => Self::Meridian(f(p)),
            Self::ArcTo {
                radius,
                radius_b,
                rotation,
                large_arc,
                sweep,
                end,
            } => Self::ArcTo {
                radius,
                radius_b,
                rotation,
                large_arc,
                sweep,
                end: f(end),
            },
            Self::QuadraticTo { control, end } => Self::QuadraticTo {
                control: f(control),
                end: f(end),
            },
            Self::CubicTo {
                control1,
                control2,
                end,
            } => Self::CubicTo {
                control1: f(control1),
                control2: f(control2),
                end: f(end),
            },
            Self::Close => Self::Close,
        }
    }

    /// Same command kind, ending at `end`. Only defined for straight and graticule commands.
    pub fn retarget(&self, end: Point) -> Result<Self> {
        match self {
            Self::MoveTo(_) => Ok(Self::MoveTo(end)),
            Self::LineTo(_) => Ok(Self::LineTo(end)),
            Self::Parallel(_) => Ok(Self::Parallel(end)),
            Self::Meridian(_) => Ok(Self::Meridian(end)),
            other => Err(PathError::UnsupportedSegment {
                kind: other.kind(),
                operation: "edge retargeting",
            }),
        }
    }
}

/// Endpoint of every segment, with each `Close` resolved to the start of its sub-path.
pub(crate) fn resolved_endpoints(path: &[PathSegment]) -> Result<Vec<Point>> {
    let mut out = Vec::with_capacity(path.len());
    let mut start: Option<Point> = None;
    for segment in path {
        match segment {
            PathSegment::MoveTo(p) => {
                start = Some(*p);
                out.push(*p);
            }
            PathSegment::Close => out.push(start.ok_or(PathError::MissingMoveTo)?),
            other => out.push(other.endpoint()?),
        }
    }
    Ok(out)
}
