use collision_lab::{CollisionWorld, StrategyKind};
use rand::{rngs::StdRng, SeedableRng};
use std::sync::{Arc, Mutex};
use std::thread;

#[test]
fn test_collision_world_is_sync_and_send() {
    fn assert_sync_send<T: Sync + Send>() {}
    assert_sync_send::<CollisionWorld>();
}

#[test]
fn test_shared_collision_world_across_threads() {
    let mut world = CollisionWorld::builder().build().unwrap();
    world
        .spawn_random(50, &mut StdRng::seed_from_u64(3))
        .unwrap();
    let world = Arc::new(Mutex::new(world));

    let mut handles = vec![];
    for i in 0..4 {
        let world_clone = Arc::clone(&world);
        let handle = thread::spawn(move || {
            let mut world = world_clone.lock().unwrap();
            if i % 2 == 0 {
                world.set_strategy(StrategyKind::Exhaustive).unwrap();
            }
            world.step(1.0).unwrap();
            world.set_strategy(StrategyKind::Quadtree).unwrap();
        });
        handles.push(handle);
    }

    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(world.lock().unwrap().tick(), 4);
}
