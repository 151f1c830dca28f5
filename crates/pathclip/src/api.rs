//! Curated surface for callers (UNSTABLE).
//!
//! Important
//! - Breaking changes are allowed. This module only gathers the operations a
//!   mapping pipeline needs into one import.

// Containment
pub use crate::containment::{contains, encompasses, midpoint, FillRule, Side};
// Clipping
pub use crate::clip::{
    intersection, intersection_with_cfg, is_closed, position_on_edge, splice_segment, EdgePosition,
};
// Crossings
pub use crate::crossing::{
    comb_crossings, edge_crossings, edge_crossings_with_cfg, horizontal_line_crossings,
    CombCrossing, EdgeCrossing, LineCrossing,
};
// Domains
pub use crate::domain::{is_between, localize_in_range, Domain};
// Path utilities
pub use crate::path::{
    calculate_path_bounds, convert_path_closures_to_z, decimate, double_path, parse_path,
    path_to_string, polygonize, rectangle, reflect_path, remove_loose_points, reverse_path,
    rotate_path, scale_path, transform_input, Bounds, Path, PathSegment, Point, Rotation,
};
// Random regions
pub use crate::random::{
    draw_points, draw_star_region, ReplayToken, StarCfg, VertexCount,
};
