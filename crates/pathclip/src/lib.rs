//! Path containment and clipping on planar and periodic domains.
//!
//! Purpose
//! - Decide which side of a signed region a point or path falls on
//!   (`containment`), and cut a path to a window region, restitching the cut
//!   ends along the window boundary (`clip`).
//! - Work the same way on the Cartesian plane and on latitude/longitude
//!   domains, where both coordinates wrap and window edges are parallels and
//!   meridians.
//!
//! Conventions
//! - `Point.x` is `s` and `Point.y` is `t`; the frame is left-handed (y down).
//! - Coincidences are decided by exact float comparisons; no tolerance is
//!   applied anywhere a point could land exactly on an edge.

pub mod api;
pub mod cfg;
pub mod clip;
pub mod containment;
pub mod crossing;
pub mod domain;
pub mod error;
pub mod geometry;
pub mod path;
pub mod random;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use cfg::KernelCfg;
pub use domain::Domain;
pub use error::{PathError, Result};
pub use path::{Path, PathSegment, Point};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::clip::{intersection, is_closed};
    pub use crate::containment::{contains, encompasses, FillRule, Side};
    pub use crate::domain::Domain;
    pub use crate::error::{PathError, Result};
    pub use crate::path::{parse_path, path_to_string, Path, PathSegment, Point};
    pub use crate::KernelCfg;
}
