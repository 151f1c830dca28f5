//! Coordinate domains: bounds, periodicity and the edge predicate.
//!
//! Purpose
//! - Define when two coordinates name the same place. On a periodic domain
//!   `localize_in_range` folds any value into the domain's period, so 181°
//!   and −179° of longitude compare equal after folding.
//! - Provide the rotate/reflect transforms the containment oracle uses to
//!   rerun itself along a different axis.
//!
//! Conventions
//! - `Point.x` is `s` (latitude on geographic domains), `Point.y` is `t`
//!   (longitude).
//! - A domain is periodic iff `s_min` is finite, and then each axis spans
//!   exactly one period.

use std::f64::consts::PI;
use std::fmt;
use std::sync::Arc;

use crate::path::Point;

type EdgePredicate = Arc<dyn Fn(Point) -> bool + Send + Sync>;

/// Coordinate space in which paths are interpreted.
#[derive(Clone)]
pub struct Domain {
    pub s_min: f64,
    pub s_max: f64,
    pub t_min: f64,
    pub t_max: f64,
    on_edge: EdgePredicate,
}

impl Domain {
    pub fn new<F>(s_min: f64, s_max: f64, t_min: f64, t_max: f64, on_edge: F) -> Self
    where
        F: Fn(Point) -> bool + Send + Sync + 'static,
    {
        Self {
            s_min,
            s_max,
            t_min,
            t_max,
            on_edge: Arc::new(on_edge),
        }
    }

    /// The unbounded, non-periodic Cartesian plane. Nothing is on its edge.
    pub fn infinite_plane() -> Self {
        Self::new(
            f64::NEG_INFINITY,
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::INFINITY,
            |_| false,
        )
    }

    /// Whole-globe latitude/longitude domain, `[-π, π]²`, with no edge.
    pub fn geoid() -> Self {
        Self::new(-PI, PI, -PI, PI, |_| false)
    }

    #[inline]
    pub fn is_periodic(&self) -> bool {
        self.s_min.is_finite()
    }

    #[inline]
    pub fn is_on_edge(&self, p: Point) -> bool {
        (self.on_edge)(p)
    }

    /// Inclusive bounds test.
    #[inline]
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.s_min && p.x <= self.s_max && p.y >= self.t_min && p.y <= self.t_max
    }

    /// Fold both coordinates of `p` into the domain's period. Identity on the plane.
    pub fn fold(&self, p: Point) -> Point {
        if !self.is_periodic() {
            return p;
        }
        Point::new(
            localize_in_range(p.x, self.s_min, self.s_max),
            localize_in_range(p.y, self.t_min, self.t_max),
        )
    }

    /// The domain as seen after rotating every path 90° widdershins, `(s, t) ↦ (t, −s)`.
    pub fn rotated(&self) -> Self {
        let inner = Arc::clone(&self.on_edge);
        Self {
            s_min: self.t_min,
            s_max: self.t_max,
            t_min: -self.s_max,
            t_max: -self.s_min,
            on_edge: Arc::new(move |p: Point| inner(Point::new(-p.y, p.x))),
        }
    }

    /// The domain as seen after reflecting every path about the s axis, `(s, t) ↦ (s, −t)`.
    pub fn reflected(&self) -> Self {
        let inner = Arc::clone(&self.on_edge);
        Self {
            s_min: self.s_min,
            s_max: self.s_max,
            t_min: -self.t_max,
            t_max: -self.t_min,
            on_edge: Arc::new(move |p: Point| inner(Point::new(p.x, -p.y))),
        }
    }
}

impl fmt::Debug for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Domain")
            .field("s", &(self.s_min..=self.s_max))
            .field("t", &(self.t_min..=self.t_max))
            .field("periodic", &self.is_periodic())
            .finish_non_exhaustive()
    }
}

/// Reduce `value` into `[min, max)` by whole periods of `max − min`.
///
/// Results within a couple of ulps of `max` snap to `min`, so roundoff never
/// produces a value that should have wrapped.
#[inline]
pub fn localize_in_range(value: f64, min: f64, max: f64) -> f64 {
    let period = max - min;
    let folded = value - ((value - min) / period).floor() * period;
    if (folded - max).abs() % period < 2.0 * f64::EPSILON * period {
        min
    } else {
        folded
    }
}

/// Like `localize_in_range`, but values already in `[min, max]` (either end included) are kept as is.
#[inline]
pub fn localize_in_closed_range(value: f64, min: f64, max: f64) -> f64 {
    if value >= min && value <= max {
        value
    } else {
        localize_in_range(value, min, max)
    }
}

/// Inclusive interval test; the order of `a` and `b` does not matter.
#[inline]
pub fn is_between(value: f64, a: f64, b: f64) -> bool {
    if a < b {
        value >= a && value <= b
    } else {
        value >= b && value <= a
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn localize_wraps_longitudes() {
        let deg = PI / 180.0;
        let a = localize_in_range(181.0 * deg, -PI, PI);
        let b = localize_in_range(-179.0 * deg, -PI, PI);
        assert!((a - b).abs() < 1e-12);
        assert_eq!(localize_in_range(0.5, 0.0, 1.0), 0.5);
        assert_eq!(localize_in_range(1.0, 0.0, 1.0), 0.0);
        assert!((localize_in_range(-0.25, 0.0, 1.0) - 0.75).abs() < 1e-15);
    }

    #[test]
    fn localize_snaps_roundoff_at_the_top() {
        let almost = PI - 1e-15;
        assert_eq!(localize_in_range(almost, -PI, PI), -PI);
    }

    #[test]
    fn closed_range_keeps_the_upper_bound() {
        assert_eq!(localize_in_closed_range(PI, -PI, PI), PI);
        assert_eq!(localize_in_range(PI, -PI, PI), -PI);
        assert!((localize_in_closed_range(PI + 1.0, -PI, PI) - (1.0 - PI)).abs() < 1e-12);
    }

    #[test]
    fn between_is_inclusive_and_unordered() {
        assert!(is_between(1.0, 1.0, 2.0));
        assert!(is_between(2.0, 3.0, 2.0));
        assert!(!is_between(3.5, 3.0, 2.0));
    }

    #[test]
    fn rotation_and_reflection_remap_bounds_and_predicate() {
        let disc = Domain::new(-PI / 2.0, -0.1, -PI, PI, |p| p.x == -0.1);
        let rot = disc.rotated();
        assert_eq!((rot.s_min, rot.s_max), (-PI, PI));
        assert_eq!((rot.t_min, rot.t_max), (0.1, PI / 2.0));
        // (s, t) ↦ (t, −s): the edge point (−0.1, 0.3) becomes (0.3, 0.1)
        assert!(rot.is_on_edge(vector![0.3, 0.1]));
        assert!(!rot.is_on_edge(vector![0.3, 0.2]));

        let refl = disc.reflected();
        assert_eq!((refl.t_min, refl.t_max), (-PI, PI));
        assert!(refl.is_on_edge(vector![-0.1, -0.3]));
        assert!(disc.is_periodic() && rot.is_periodic());
        assert!(!Domain::infinite_plane().rotated().is_periodic());
    }

    #[test]
    fn fold_and_bounds() {
        let g = Domain::geoid();
        let p = g.fold(vector![0.5, 3.0 * PI / 2.0]);
        assert!((p.y + PI / 2.0).abs() < 1e-12);
        assert!(g.contains_point(vector![PI, -PI]));
        assert!(!g.contains_point(vector![-9.0, 8.0]));
        assert!(Domain::infinite_plane().contains_point(vector![1e300, -1e300]));
    }
}
