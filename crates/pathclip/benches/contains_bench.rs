//! Criterion benchmarks for the containment oracle.
//! Focus sizes: n in {8, 32, 128, 512} region vertices.
//! Results: by default under target/criterion; to store under data/bench, run:
//!   CARGO_TARGET_DIR=data/bench cargo bench -p pathclip

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use nalgebra::Vector2;
use pathclip::api::{
    contains, draw_points, draw_star_region, encompasses, Domain, FillRule, ReplayToken, StarCfg,
    VertexCount,
};

fn bench_contains(c: &mut Criterion) {
    let plane = Domain::infinite_plane();
    let mut group = c.benchmark_group("contains");
    for &n in &[8usize, 32, 128, 512] {
        let cfg = StarCfg {
            vertex_count: VertexCount::Fixed(n),
            ..StarCfg::default()
        };
        let region = draw_star_region(cfg, ReplayToken { seed: 42, index: n as u64 });
        let samples = draw_points(
            64,
            Vector2::new(-2.0, -2.0),
            Vector2::new(2.0, 2.0),
            ReplayToken { seed: 43, index: 0 },
        );

        group.bench_with_input(BenchmarkId::new("left", n), &n, |b, _| {
            b.iter(|| {
                for &q in &samples {
                    let _side = contains(&region, q, &plane, FillRule::Left);
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("odd", n), &n, |b, _| {
            b.iter(|| {
                for &q in &samples {
                    let _side = contains(&region, q, &plane, FillRule::Odd);
                }
            })
        });

        let inner = draw_star_region(
            StarCfg {
                base_radius: 0.2,
                radial_jitter: 0.1,
                ..cfg
            },
            ReplayToken { seed: 44, index: n as u64 },
        );
        group.bench_with_input(BenchmarkId::new("encompasses", n), &n, |b, _| {
            b.iter(|| encompasses(&region, &inner, &plane))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_contains);
criterion_main!(benches);
