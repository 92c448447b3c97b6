use std::time::Instant;

use collision_lab::*;
use rand::{rngs::StdRng, SeedableRng};

fn main() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(11);
    let mut world = CollisionWorld::builder()
        .bounds(Bounds::from_size(3000.0, 3000.0)?)
        .max_capacity(4)
        .max_depth(10)
        .build()?;
    world.spawn_random(1500, &mut rng)?;

    for kind in [StrategyKind::Exhaustive, StrategyKind::Quadtree] {
        world.set_strategy(kind)?;
        let start = Instant::now();
        let pairs = world.detect()?.len();
        let elapsed = start.elapsed();
        println!(
            "{:>10}: {pairs} pairs in {:.2} ms",
            kind.name(),
            elapsed.as_secs_f64() * 1000.0
        );
    }

    let report = world.step(1.0)?;
    println!(
        "one tick: {} checks for {} objects ({:.2}% of all pairs)",
        report.stats.candidate_checks,
        report.stats.objects,
        world.profiler().check_ratio() * 100.0
    );

    if let Some(tree) = world.quadtree() {
        let height = tree.height();
        println!("quadtree: {} nodes, height {height}", tree.node_count());
        tree.walk(|node| {
            if node.is_leaf() && !node.elements().is_empty() && node.depth() == height {
                println!("  deepest leaf {} holds {}", node.bounds(), node.elements().len());
            }
        });
    }
    Ok(())
}
