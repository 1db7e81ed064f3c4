//! Benchmarks for the CPU-side orchestration paths.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use driftdeck::boundary;
use driftdeck::populate::BoardPopulator;
use driftdeck::spawn::SpawnContext;
use driftdeck::viewport::DeviceClass;
use driftdeck::world::PhysicsWorld;

fn bench_boundary_build(c: &mut Criterion) {
    c.bench_function("boundary_build", |b| {
        b.iter(|| black_box(boundary::build(black_box(1920.0), black_box(1080.0))))
    });
}

fn bench_populate_sync(c: &mut Criterion) {
    let mut group = c.benchmark_group("populate_sync");

    for count in [3usize, 8, 24] {
        let ids: Vec<String> = (0..count).map(|i| format!("deck-{i}")).collect();
        group.bench_with_input(BenchmarkId::from_parameter(count), &ids, |b, ids| {
            let mut world = PhysicsWorld::new();
            let mut populator = BoardPopulator::new();
            let mut spawn = SpawnContext::with_seed(1920.0, 1080.0, 7);
            b.iter(|| {
                populator.sync(&mut world, ids, DeviceClass::Desktop, &mut spawn);
                black_box(populator.len())
            })
        });
    }

    group.finish();
}

fn bench_world_step(c: &mut Criterion) {
    c.bench_function("world_step_8_boards", |b| {
        let ids: Vec<String> = (0..8).map(|i| format!("deck-{i}")).collect();
        let mut world = PhysicsWorld::new();
        let mut populator = BoardPopulator::new();
        let mut spawn = SpawnContext::with_seed(1920.0, 1080.0, 7);
        populator.sync(&mut world, &ids, DeviceClass::Desktop, &mut spawn);
        b.iter(|| world.step(black_box(1.0 / 60.0)))
    });
}

criterion_group!(
    benches,
    bench_boundary_build,
    bench_populate_sync,
    bench_world_step
);
criterion_main!(benches);
