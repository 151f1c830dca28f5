//! Whole-path transforms. Every function returns a fresh path.

use super::segment::{resolved_endpoints, Path, PathSegment, Point};
use crate::domain::{localize_in_closed_range, Domain};
use crate::error::{PathError, Result};

/// Rotation about the origin, widdershins in a right-handed frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rotation {
    Zero,
    Quarter,
    Half,
    ThreeQuarter,
}

impl Rotation {
    pub fn from_degrees(angle: i32) -> Result<Self> {
        match angle {
            0 => Ok(Self::Zero),
            90 => Ok(Self::Quarter),
            180 => Ok(Self::Half),
            270 => Ok(Self::ThreeQuarter),
            other => Err(PathError::UnsupportedRotation(other)),
        }
    }

    #[inline]
    pub fn apply(self, p: Point) -> Point {
        match self {
            Self::Zero => p,
            Self::Quarter => Point::new(p.y, -p.x),
            Self::Half => -p,
            Self::ThreeQuarter => Point::new(-p.y, p.x),
        }
    }
}

/// Rotate one segment. Quarter turns swap parallels and meridians.
pub fn rotate_segment(segment: &PathSegment, rotation: Rotation) -> PathSegment {
    let moved = segment.map_points(|p| rotation.apply(p));
    match (rotation, moved) {
        (Rotation::Quarter | Rotation::ThreeQuarter, PathSegment::Parallel(p)) => {
            PathSegment::Meridian(p)
        }
        (Rotation::Quarter | Rotation::ThreeQuarter, PathSegment::Meridian(p)) => {
            PathSegment::Parallel(p)
        }
        (_, other) => other,
    }
}

pub fn rotate_path(path: &[PathSegment], rotation: Rotation) -> Path {
    path.iter().map(|s| rotate_segment(s, rotation)).collect()
}

/// Reflect one segment about the s axis; arcs flip their sweep.
pub fn reflect_segment(segment: &PathSegment) -> PathSegment {
    match segment.map_points(|p| Point::new(p.x, -p.y)) {
        PathSegment::ArcTo {
            radius,
            radius_b,
            rotation,
            large_arc,
            sweep,
            end,
        } => PathSegment::ArcTo {
            radius,
            radius_b,
            rotation,
            large_arc,
            sweep: !sweep,
            end,
        },
        other => other,
    }
}

pub fn reflect_path(path: &[PathSegment]) -> Path {
    path.iter().map(reflect_segment).collect()
}

/// Scale about the origin. Arcs only admit isotropic scaling.
pub fn scale_path(path: &[PathSegment], scale_s: f64, scale_t: f64) -> Result<Path> {
    path.iter()
        .map(|segment| {
            let scaled = segment.map_points(|p| Point::new(p.x * scale_s, p.y * scale_t));
            match scaled {
                PathSegment::ArcTo { .. } if scale_s != scale_t => {
                    Err(PathError::AnisotropicArcScale { scale_s, scale_t })
                }
                PathSegment::ArcTo {
                    radius,
                    radius_b,
                    rotation,
                    large_arc,
                    sweep,
                    end,
                } => Ok(PathSegment::ArcTo {
                    radius: radius * scale_s.abs(),
                    radius_b: radius_b * scale_s.abs(),
                    rotation,
                    large_arc,
                    // a negative scale mirrors the plane
                    sweep: if scale_s < 0.0 { !sweep } else { sweep },
                    end,
                }),
                other => Ok(other),
            }
        })
        .collect()
}

/// The same route traced backwards. Sub-path order reverses too; `Z` markers stay with their sub-paths.
pub fn reverse_path(path: &[PathSegment]) -> Result<Path> {
    let ends = resolved_endpoints(path)?;
    let mut out = Vec::with_capacity(path.len());
    let mut stop = path.len();
    for start in (0..path.len()).rev() {
        if !path[start].is_move() {
            continue;
        }
        let section = start..stop;
        stop = start;
        let closed = path[section.clone()]
            .iter()
            .any(|s| matches!(s, PathSegment::Close));
        let mut last = section.end - 1;
        while last > start && matches!(path[last], PathSegment::Close) {
            last -= 1;
        }
        out.push(PathSegment::MoveTo(ends[last]));
        for i in (start + 1..=last).rev() {
            let target = ends[i - 1];
            out.push(match path[i] {
                PathSegment::LineTo(_) => PathSegment::LineTo(target),
                PathSegment::Parallel(_) => PathSegment::Parallel(target),
                PathSegment::Meridian(_) => PathSegment::Meridian(target),
                PathSegment::ArcTo {
                    radius,
                    radius_b,
                    rotation,
                    large_arc,
                    sweep,
                    ..
                } => PathSegment::ArcTo {
                    radius,
                    radius_b,
                    rotation,
                    large_arc,
                    sweep: !sweep,
                    end: target,
                },
                PathSegment::QuadraticTo { control, .. } => PathSegment::QuadraticTo {
                    control,
                    end: target,
                },
                PathSegment::CubicTo {
                    control1, control2, ..
                } => PathSegment::CubicTo {
                    control1: control2,
                    control2: control1,
                    end: target,
                },
                PathSegment::Close => PathSegment::LineTo(target),
                PathSegment::MoveTo(_) => unreachable!("sections hold a single leading moveto"),
            });
        }
        if closed {
            out.push(PathSegment::Close);
        }
    }
    if stop != 0 {
        return Err(PathError::MissingMoveTo);
    }
    Ok(out)
}

/// Each sub-path followed by its own reversal, giving closed loops of zero area.
pub fn double_path(path: &[PathSegment]) -> Result<Path> {
    let mut out = Vec::with_capacity(2 * path.len());
    let mut section_start: Option<usize> = None;
    for j in 0..=path.len() {
        if j == path.len() || path[j].is_move() {
            if let Some(i) = section_start {
                let forward = &path[i..j];
                out.extend_from_slice(forward);
                out.extend(reverse_path(forward)?.into_iter().skip(1));
            }
            section_start = Some(j);
        }
    }
    Ok(out)
}

/// Drop movetos that no segment continues from.
pub fn remove_loose_points(path: &[PathSegment]) -> Path {
    path.iter()
        .enumerate()
        .filter(|(i, s)| !s.is_move() || path.get(i + 1).is_some_and(|next| !next.is_move()))
        .map(|(_, s)| *s)
        .collect()
}

/// Append a `Z` at the end of every sub-path. Assumes the path is already closed.
pub fn convert_path_closures_to_z(path: &[PathSegment]) -> Path {
    let mut out = Vec::with_capacity(path.len() + 4);
    for (i, s) in path.iter().enumerate() {
        out.push(*s);
        if path.get(i + 1).map_or(true, |next| next.is_move()) {
            out.push(PathSegment::Close);
        }
    }
    out
}

/// Closed rectangle through `(s0, t0)` and `(s2, t2)`, drawn with graticule arcs when `geographic`.
pub fn rectangle(s0: f64, t0: f64, s2: f64, t2: f64, geographic: bool) -> Path {
    if geographic {
        vec![
            PathSegment::move_to(s0, t0),
            PathSegment::parallel(s0, t2),
            PathSegment::meridian(s2, t2),
            PathSegment::parallel(s2, t0),
            PathSegment::meridian(s0, t0),
        ]
    } else {
        vec![
            PathSegment::move_to(s0, t0),
            PathSegment::line_to(s0, t2),
            PathSegment::line_to(s2, t2),
            PathSegment::line_to(s2, t0),
            PathSegment::line_to(s0, t0),
        ]
    }
}

/// Shift every coordinate by whole periods so it lies inside `domain`.
///
/// Coordinates already on either bound are kept, so a longitude of π stays π.
/// Only straight and graticule commands are meaningful in absolute
/// latitude/longitude input.
pub fn transform_input(domain: &Domain, path: &[PathSegment]) -> Result<Path> {
    let snap = |p: Point| {
        if !domain.is_periodic() {
            return p;
        }
        Point::new(
            localize_in_closed_range(p.x, domain.s_min, domain.s_max),
            localize_in_closed_range(p.y, domain.t_min, domain.t_max),
        )
    };
    path.iter()
        .map(|segment| match segment {
            PathSegment::MoveTo(_)
            | PathSegment::LineTo(_)
            | PathSegment::Parallel(_)
            | PathSegment::Meridian(_) => Ok(segment.map_points(snap)),
            other => Err(PathError::UnsupportedSegment {
                kind: other.kind(),
                operation: "transform_input",
            }),
        })
        .collect()
}
