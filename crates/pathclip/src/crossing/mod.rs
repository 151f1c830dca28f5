//! Crossing detectors.
//!
//! Purpose
//! - `edge_crossings`: where a subject segment meets the window's edges. The
//!   clipper splices subjects at these points.
//! - `horizontal_line_crossings` / `comb_crossings`: where a path meets lines
//!   of constant `t`. The containment oracle counts these.
//!
//! Conventions
//! - Coincidences are decided by exact comparisons; interpolation only runs
//!   when no endpoint already lies on the line or edge.
//! - On periodic domains the short way round between two points is the
//!   segment, even when it crosses the wrap.

pub mod edge;
pub mod line;

pub use edge::{edge_crossings, edge_crossings_with_cfg, EdgeCrossing};
pub use line::{comb_crossings, horizontal_line_crossings, CombCrossing, LineCrossing};
