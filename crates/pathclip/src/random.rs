//! Seeded random regions for property tests and benches.
//!
//! Model
//! - A star-shaped polygon around a center: `n` jittered angles in increasing
//!   order, each at a jittered radius. Simple by construction, and traced
//!   widdershins in the y-down frame, so its inside is on the left.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use std::f64::consts::PI;

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::path::{Path, PathSegment, Point};

/// Vertex count distribution.
#[derive(Clone, Copy, Debug)]
pub enum VertexCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}

impl VertexCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            VertexCount::Fixed(n) => n.max(3),
            VertexCount::Uniform { min, max } => {
                let lo = min.max(3);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Star-region sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct StarCfg {
    pub vertex_count: VertexCount,
    /// Angular jitter as a fraction of the base spacing Δ=2π/n. Clamped to [0, 0.49].
    pub angle_jitter_frac: f64,
    /// Radii are `base_radius * (1 + u)` with `u∈[-radial_jitter, radial_jitter]`.
    pub radial_jitter: f64,
    pub base_radius: f64,
    pub center: Point,
}

impl Default for StarCfg {
    fn default() -> Self {
        Self {
            vertex_count: VertexCount::Fixed(12),
            angle_jitter_frac: 0.3,
            radial_jitter: 0.5,
            base_radius: 1.0,
            center: Vector2::zeros(),
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw a closed star-shaped region (M, then `n` L segments ending at the start).
pub fn draw_star_region(cfg: StarCfg, tok: ReplayToken) -> Path {
    let mut rng = tok.to_std_rng();
    let n = cfg.vertex_count.sample(&mut rng);
    let aj = cfg.angle_jitter_frac.clamp(0.0, 0.49);
    let rj = cfg.radial_jitter.clamp(0.0, 0.95);
    let r0 = cfg.base_radius.max(1e-9);
    let delta = 2.0 * PI / n as f64;
    let phase = rng.gen::<f64>() * delta;
    let vertices: Vec<Point> = (0..n)
        .map(|k| {
            let theta = phase + k as f64 * delta + (rng.gen::<f64>() * 2.0 - 1.0) * aj * delta;
            let r = (1.0 + (rng.gen::<f64>() * 2.0 - 1.0) * rj) * r0;
            // −sin keeps the inside on the left
            cfg.center + Point::new(theta.cos(), -theta.sin()) * r
        })
        .collect();
    let mut path = Vec::with_capacity(n + 1);
    path.push(PathSegment::MoveTo(vertices[0]));
    path.extend(vertices[1..].iter().map(|&v| PathSegment::LineTo(v)));
    path.push(PathSegment::LineTo(vertices[0]));
    path
}

/// `count` points drawn uniformly from the box `[lo, hi]`.
pub fn draw_points(count: usize, lo: Point, hi: Point, tok: ReplayToken) -> Vec<Point> {
    let mut rng = tok.to_std_rng();
    (0..count)
        .map(|_| Point::new(rng.gen_range(lo.x..=hi.x), rng.gen_range(lo.y..=hi.y)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::is_closed;
    use crate::containment::{contains, FillRule, Side};
    use crate::domain::Domain;

    #[test]
    fn reproducible_draw() {
        let tok = ReplayToken { seed: 42, index: 7 };
        let a = draw_star_region(StarCfg::default(), tok);
        let b = draw_star_region(StarCfg::default(), tok);
        assert_eq!(a, b);
        let c = draw_star_region(StarCfg::default(), ReplayToken { seed: 42, index: 8 });
        assert_ne!(a, c);
    }

    #[test]
    fn star_regions_are_closed_and_contain_their_center() {
        let plane = Domain::infinite_plane();
        for index in 0..20 {
            let cfg = StarCfg {
                vertex_count: VertexCount::Uniform { min: 3, max: 16 },
                center: Point::new(2.0, -1.0),
                ..StarCfg::default()
            };
            let region = draw_star_region(cfg, ReplayToken { seed: 1, index });
            assert!(is_closed(&region, &plane).unwrap());
            let side = contains(&region, cfg.center, &plane, FillRule::Left).unwrap();
            assert_eq!(side, Side::In, "{region:?}");
        }
    }

    #[test]
    fn points_stay_in_their_box() {
        let lo = Point::new(-1.0, 2.0);
        let hi = Point::new(1.0, 3.0);
        for q in draw_points(100, lo, hi, ReplayToken { seed: 3, index: 0 }) {
            assert!(q.x >= lo.x && q.x <= hi.x && q.y >= lo.y && q.y <= hi.y);
        }
    }
}
