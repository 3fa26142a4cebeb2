/*
 * Boid Simulation Benchmark
 *
 * This file contains benchmarks for the boid simulation to compare the
 * neighbour search strategies. It measures grid rebuilds and full flock
 * steps with the all-pairs scan, the spatial grid and rayon.
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::time::Duration;

use flock3d::rng::create_rng;
use flock3d::{Flock, SimulationParams, SpatialGrid};

const DELTA: f32 = 1.0 / 60.0;
const SIZES: [usize; 3] = [100, 500, 1000];

fn flock(num_boids: usize, enable_spatial_grid: bool, enable_parallel: bool) -> Flock {
    let params = SimulationParams {
        num_boids,
        spawn_bounds: 300.0,
        enable_spatial_grid,
        enable_parallel,
        ..SimulationParams::default()
    };
    Flock::spawn(params, &mut create_rng(42)).expect("default params are valid")
}

// Benchmark the spatial grid rebuild on its own
fn bench_spatial_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("spatial_grid");

    for num_boids in SIZES.iter() {
        group.bench_with_input(BenchmarkId::from_parameter(num_boids), num_boids, |b, &n| {
            let flock = flock(n, true, false);
            let params = flock.params();
            let mut grid = SpatialGrid::new(params.cell_size(), params.boundary.radius);

            b.iter(|| {
                grid.rebuild(flock.boids().iter().map(|boid| boid.position));
                black_box(grid.nearby_indices(flock.boids()[0].position));
            });
        });
    }

    group.finish();
}

// Benchmark a full step for each neighbour strategy
fn bench_update_loop(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_loop");

    let variants = [
        ("all_pairs", false, false),
        ("grid", true, false),
        ("all_pairs_parallel", false, true),
        ("grid_parallel", true, true),
    ];

    for (name, spatial_grid, parallel) in variants {
        for num_boids in SIZES.iter() {
            group.bench_with_input(BenchmarkId::new(name, num_boids), num_boids, |b, &n| {
                let mut flock = flock(n, spatial_grid, parallel);
                b.iter(|| {
                    flock.step(black_box(DELTA));
                });
            });
        }
    }

    group.finish();
}

// Configure the benchmarks
criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(10)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1));
    targets = bench_spatial_grid, bench_update_loop
}

criterion_main!(benches);
