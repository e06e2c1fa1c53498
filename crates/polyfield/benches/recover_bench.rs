//! Criterion benchmarks for gridding, scoring and recovery.
//! Focus sizes: ls in {4, 2, 1} (50², 100², 200² lattice windows).
//! Results: by default under target/criterion.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use polyfield::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_targets(n: usize, seed: u64) -> TargetSet {
    let mut rng = StdRng::seed_from_u64(seed);
    let pts = (0..n)
        .map(|_| {
            let th = rng.gen::<f64>() * std::f64::consts::TAU;
            let r = rng.gen_range(0.0..0.45);
            Vec2::new(r * th.cos(), r * th.sin())
        })
        .collect();
    TargetSet::new(pts)
}

fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine");
    let contour = draw_contour(ContourCfg::default(), ReplayToken::new(7, 0)).unwrap();
    for &ls in &[4.0f64, 2.0, 1.0] {
        group.bench_with_input(BenchmarkId::new("build_grid", ls), &ls, |b, &ls| {
            b.iter(|| build_grid(&contour, ls, GridCfg::default()).unwrap())
        });

        let grid = build_grid(&contour, ls, GridCfg::default()).unwrap();
        let targets = random_targets(12, 43);
        group.bench_with_input(BenchmarkId::new("score", ls), &ls, |b, _| {
            b.iter(|| score(&grid, &targets).unwrap())
        });

        let scores = score(&grid, &targets).unwrap();
        group.bench_with_input(BenchmarkId::new("recover_one", ls), &ls, |b, _| {
            b.iter_batched(
                || (grid.clone(), scores.clone()),
                |(g, s)| {
                    // Random targets may sit next to each other; errors are part of the workload.
                    let _v = recover_one(&g, &s);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_engine);
criterion_main!(benches);
