//! Kernel configuration and its defaults.
//!
//! Policy
//! - Defaults are fixed constants; almost every caller uses `KernelCfg::default()`.
//! - None of these are equality tolerances. Coincidences are decided by exact
//!   comparisons; the values here only bound work or pick sample densities.

/// Hard ceiling on work-queue iterations in `clip::intersection`.
pub const MAX_CLIP_ITERATIONS: usize = 1_000_000;
/// Relative discriminant threshold below which a line is treated as tangent to an arc.
pub const ARC_ROOT_EPSILON: f64 = 1e-15;
/// Default line segments per radian of arc for `path::polygonize` callers.
pub const POLYGONIZE_PRECISION: f64 = 6.0;

/// Clipping configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KernelCfg {
    pub max_iterations: usize,
    /// Passed to `geometry::line_arc_intersections_eps` for every planar arc crossing.
    pub arc_root_epsilon: f64,
}

impl Default for KernelCfg {
    fn default() -> Self {
        Self {
            max_iterations: MAX_CLIP_ITERATIONS,
            arc_root_epsilon: ARC_ROOT_EPSILON,
        }
    }
}
