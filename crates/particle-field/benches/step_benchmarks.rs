//! Benchmarks for the advection hot path.
//!
//! Run with: cargo bench --package particle-field

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use particle_field::ParticleField;
use viz_common::GeoBounds;
use wind_grid::WindGrid;

/// Build a rotating wind field of the given edge length.
fn build_vortex_grid(size: usize) -> WindGrid {
    let axis: Vec<f64> = (0..size).map(|i| i as f64).collect();
    let center = (size as f32 - 1.0) / 2.0;

    let mut u = Vec::with_capacity(size * size);
    let mut v = Vec::with_capacity(size * size);
    for row in 0..size {
        for col in 0..size {
            u.push(-(row as f32 - center) * 0.1);
            v.push((col as f32 - center) * 0.1);
        }
    }
    WindGrid::new(axis.clone(), axis, u, v).unwrap()
}

fn bench_field_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("field_step");

    for &particle_count in &[500usize, 2000, 10_000] {
        let grid = build_vortex_grid(150);
        let bounds = GeoBounds::new(0.0, 0.0, 149.0, 149.0);

        group.bench_with_input(
            BenchmarkId::from_parameter(particle_count),
            &particle_count,
            |b, &count| {
                let mut field = ParticleField::new(count, bounds, 120, Some(42));
                b.iter(|| {
                    field.step(black_box(&grid), 0.02, 1.0);
                });
            },
        );
    }

    group.finish();
}

fn bench_sample_nearest(c: &mut Criterion) {
    let grid = build_vortex_grid(150);

    c.bench_function("sample_nearest_150x150", |b| {
        b.iter(|| {
            let sample = grid.sample_nearest(black_box(74.3), black_box(10.9));
            black_box(sample)
        })
    });
}

criterion_group!(benches, bench_field_step, bench_sample_nearest);
criterion_main!(benches);
