//! Criterion benchmarks for clipping star-shaped subjects to a square window.
//! Focus sizes: n in {8, 32, 128} subject vertices.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use nalgebra::Vector2;
use pathclip::api::{
    draw_star_region, intersection, rectangle, Domain, ReplayToken, StarCfg, VertexCount,
};

fn bench_clip(c: &mut Criterion) {
    let plane = Domain::infinite_plane();
    let window = rectangle(-0.8, -0.8, 0.8, 0.8, false);
    let mut group = c.benchmark_group("intersection");
    for &n in &[8usize, 32, 128] {
        let cfg = StarCfg {
            vertex_count: VertexCount::Fixed(n),
            center: Vector2::new(0.3, -0.2),
            ..StarCfg::default()
        };
        group.bench_with_input(BenchmarkId::new("closed", n), &n, |b, &n| {
            b.iter_batched(
                || draw_star_region(cfg, ReplayToken { seed: 7, index: n as u64 }),
                |subject| {
                    let _out = intersection(&subject, &window, &plane, true);
                },
                BatchSize::SmallInput,
            )
        });
        group.bench_with_input(BenchmarkId::new("open", n), &n, |b, &n| {
            b.iter_batched(
                || draw_star_region(cfg, ReplayToken { seed: 8, index: n as u64 }),
                |subject| {
                    let _out = intersection(&subject, &window, &plane, false);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_clip);
criterion_main!(benches);
