//! Path model: segments, text format, bounds and whole-path utilities.
//!
//! Purpose
//! - One tagged enum per path command, so every algorithm matches on the
//!   command kind instead of inspecting argument arrays.
//! - Utilities that callers need around clipping: bounding boxes, polygon
//!   approximation, decimation and the rotate/reflect/reverse transforms.
//!
//! Conventions
//! - `Point.x` is `s`, `Point.y` is `t`.
//! - Arc sweep is read in a y-down, left-handed frame: `sweep == true` turns clockwise on screen.

pub mod bounds;
pub mod format;
pub mod segment;
pub mod simplify;
pub mod transform;

pub use bounds::{calculate_path_bounds, Bounds};
pub use format::{parse_path, path_to_string};
pub use segment::{Path, PathSegment, Point};
pub(crate) use segment::resolved_endpoints;
pub use simplify::{decimate, polygonize};
pub use transform::{
    convert_path_closures_to_z, double_path, rectangle, reflect_path, reflect_segment,
    remove_loose_points, reverse_path, rotate_path, rotate_segment, scale_path, transform_input,
    Rotation,
};
