use collision_lab::*;
use rand::{rngs::StdRng, SeedableRng};

fn small_world(strategy: StrategyKind) -> CollisionWorld {
    CollisionWorld::builder()
        .bounds(Bounds::new(0.0, 0.0, 100.0, 100.0).unwrap())
        .max_capacity(2)
        .max_depth(5)
        .strategy(strategy)
        .build()
        .unwrap()
}

#[test]
fn default_world_matches_demo_arena() {
    let world = CollisionWorld::new(WorldConfig::default()).unwrap();
    assert_eq!(world.bounds().width(), 800.0);
    assert_eq!(world.bounds().height(), 600.0);
    assert_eq!(world.strategy(), StrategyKind::Quadtree);
    assert!(world.is_empty());
}

#[test]
fn builder_rejects_invalid_config() {
    assert!(CollisionWorld::builder().max_capacity(0).build().is_err());
    assert!(CollisionWorld::builder().frame_budget_ms(-1.0).build().is_err());
}

#[test]
fn bodies_outside_the_arena_are_rejected() {
    let mut world = small_world(StrategyKind::Quadtree);
    assert!(world.add_body(Circle::at(99.0, 50.0, 2.0)).is_err());
    assert_eq!(world.add_body(Circle::at(50.0, 50.0, 2.0)).unwrap(), 0);
}

#[test]
fn step_moves_bodies_then_reports_pairs() {
    let mut world = small_world(StrategyKind::Quadtree);
    let a = world
        .add_body(Circle::at(40.0, 50.0, 3.0).with_velocity(2.0, 0.0))
        .unwrap();
    let b = world
        .add_body(Circle::at(50.0, 50.0, 3.0).with_velocity(-2.0, 0.0))
        .unwrap();
    let c = world.add_body(Rect::at(10.0, 10.0, 2.0, 2.0)).unwrap();

    // 10 apart and closing at 4 per tick: touching after one tick
    let report = world.step(1.0).unwrap();
    assert_eq!(report.tick, 1);
    assert_eq!(report.pairs.to_vec(), vec![(a, b)]);
    assert_eq!(report.stats.objects, 3);
    assert!(world.is_colliding(a) && world.is_colliding(b));
    assert!(!world.is_colliding(c));
    assert_eq!(world.profiler().pair_count, 1);
    assert!(world.quadtree().is_some());
}

#[test]
fn walls_reflect_bodies() {
    let mut world = small_world(StrategyKind::Exhaustive);
    let id = world
        .add_body(Circle::at(95.0, 50.0, 4.0).with_velocity(3.0, 0.0))
        .unwrap();

    let report = world.step(1.0).unwrap();
    assert_eq!(report.bounces, 1);
    let body = world.body(id).unwrap();
    assert_eq!(body.center(), DVec2::new(96.0, 50.0));
    assert_eq!(body.velocity(), &Vector::xy(-3.0, 0.0));
}

#[test]
fn strategies_report_the_same_pairs_every_tick() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut world = CollisionWorld::builder().build().unwrap();
    world.spawn_random(120, &mut rng).unwrap();

    for _ in 0..30 {
        let indexed = world.step(1.0).unwrap().pairs;
        world.set_strategy(StrategyKind::Exhaustive).unwrap();
        let baseline = world.detect().unwrap().clone();
        world.set_strategy(StrategyKind::Quadtree).unwrap();
        assert_eq!(indexed, baseline);
        assert!(world.bodies().iter().all(|body| body.lies_within(world.bounds())));
    }
}

#[test]
fn spawn_random_stays_inside_and_within_limits() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut world = CollisionWorld::builder().build().unwrap();
    let ids = world.spawn_random(config::DEFAULT_SPAWN_COUNT, &mut rng).unwrap();

    assert_eq!(ids, 0..10);
    for body in world.bodies() {
        let circle = body.as_circle().unwrap();
        assert!(circle.radius() >= config::DEFAULT_MIN_RADIUS);
        assert!(circle.radius() < config::DEFAULT_MIN_RADIUS * 2.0);
        assert!(circle.velocity().x().abs() <= config::DEFAULT_MAX_SPEED);
        assert!(circle.velocity().y().abs() <= config::DEFAULT_MAX_SPEED);
        assert!(body.lies_within(world.bounds()));
    }
}

#[test]
fn spawn_random_needs_room() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut world = CollisionWorld::builder()
        .bounds(Bounds::new(0.0, 0.0, 30.0, 30.0).unwrap())
        .build()
        .unwrap();
    assert!(world.spawn_random(1, &mut rng).is_err());
}

#[test]
fn resize_pulls_bodies_back_inside() {
    let mut world = small_world(StrategyKind::Quadtree);
    world.add_body(Circle::at(90.0, 90.0, 5.0)).unwrap();

    let smaller = Bounds::new(0.0, 0.0, 50.0, 50.0).unwrap();
    world.resize(smaller).unwrap();
    assert_eq!(world.bounds(), &smaller);
    assert_eq!(world.body(0).unwrap().center(), DVec2::new(45.0, 45.0));
    assert!(world.step(0.0).is_ok());
    assert_eq!(world.quadtree().unwrap().bounds(), &smaller);

    let tiny = Bounds::new(0.0, 0.0, 5.0, 5.0).unwrap();
    assert!(world.resize(tiny).is_err());
    assert_eq!(world.bounds(), &smaller);
}

#[test]
fn index_config_changes_between_ticks() {
    let mut world = small_world(StrategyKind::Quadtree);
    world.add_body(Circle::at(20.0, 20.0, 2.0)).unwrap();
    world.add_body(Circle::at(80.0, 80.0, 2.0)).unwrap();
    world.step(0.0).unwrap();
    assert!(world.quadtree().unwrap().node_count() > 1);

    world.set_index_config(IndexConfig::new(8, 5)).unwrap();
    world.step(0.0).unwrap();
    assert_eq!(world.quadtree().unwrap().node_count(), 1);
    assert!(world.set_index_config(IndexConfig::new(0, 5)).is_err());
}

#[test]
fn clear_forgets_bodies_and_pairs() {
    let mut world = small_world(StrategyKind::Exhaustive);
    world.add_body(Circle::at(20.0, 20.0, 2.0)).unwrap();
    world.add_body(Circle::at(21.0, 20.0, 2.0)).unwrap();
    assert_eq!(world.detect().unwrap().len(), 1);

    world.clear();
    assert!(world.is_empty());
    assert!(world.last_pairs().is_empty());
}

#[test]
fn world_config_loads_from_ron() {
    let text = "(bounds: (x0: 0.0, y0: 0.0, x1: 400.0, y1: 300.0), strategy: Exhaustive)";
    let config: WorldConfig = ron::from_str(text).unwrap();
    let world = CollisionWorld::new(config).unwrap();
    assert_eq!(world.strategy(), StrategyKind::Exhaustive);
    assert_eq!(world.config().index, IndexConfig::default());
}

#[test]
fn engine_steps_with_fixed_timestep() {
    let mut engine = CollisionEngine::new(0.5).unwrap();
    let id = engine
        .add_body(Circle::at(100.0, 100.0, 10.0).with_velocity(2.0, 2.0))
        .unwrap();
    engine.step().unwrap();
    assert_eq!(engine.get_body(id).unwrap().center(), DVec2::new(101.0, 101.0));
    assert!(!engine.parallel_enabled());
}
