use collision_lab::*;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, SeedableRng};
use std::hint::black_box;

const DT: f64 = 1.0;

fn prepare_world(body_count: usize, strategy: StrategyKind) -> CollisionWorld {
    let mut world = CollisionWorld::builder()
        .bounds(Bounds::from_size(4000.0, 4000.0).unwrap())
        .strategy(strategy)
        .build()
        .unwrap();
    world
        .spawn_random(body_count, &mut StdRng::seed_from_u64(body_count as u64))
        .unwrap();
    world
}

fn random_circles(count: usize) -> Vec<Circle> {
    let world = prepare_world(count, StrategyKind::Exhaustive);
    world
        .bodies()
        .iter()
        .filter_map(Shape::as_circle)
        .cloned()
        .collect()
}

fn bench_detect(c: &mut Criterion) {
    let mut group = c.benchmark_group("detect");
    let arena = Bounds::from_size(4000.0, 4000.0).unwrap();
    for &count in &[100usize, 500, 2000] {
        let circles = random_circles(count);
        group.bench_with_input(BenchmarkId::new("exhaustive", count), &circles, |b, circles| {
            let mut strategy = ExhaustiveStrategy::new();
            b.iter(|| strategy.detect(black_box(circles)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("quadtree", count), &circles, |b, circles| {
            let mut strategy = QuadTreeStrategy::new(arena, IndexConfig::default()).unwrap();
            b.iter(|| strategy.detect(black_box(circles)).unwrap())
        });
    }
    group.finish();
}

fn bench_capacity(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_capacity");
    let arena = Bounds::from_size(4000.0, 4000.0).unwrap();
    let circles = random_circles(2000);
    for &capacity in &[1usize, 4, 16, 64] {
        group.bench_with_input(BenchmarkId::from_parameter(capacity), &capacity, |b, &capacity| {
            let mut strategy =
                QuadTreeStrategy::new(arena, IndexConfig::new(capacity, 10)).unwrap();
            b.iter(|| strategy.detect(black_box(&circles)).unwrap())
        });
    }
    group.finish();
}

fn bench_world_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("world_step");
    for &count in &[500usize, 2000] {
        group.bench_with_input(BenchmarkId::new("sequential", count), &count, |b, &count| {
            let mut world = prepare_world(count, StrategyKind::Quadtree);
            b.iter(|| world.step(black_box(DT)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("parallel", count), &count, |b, &count| {
            let mut world = prepare_world(count, StrategyKind::Quadtree);
            world.set_parallel_enabled(true);
            b.iter(|| world.step(black_box(DT)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_detect, bench_capacity, bench_world_step);
criterion_main!(benches);
