use collision_lab::*;
use rand::{rngs::StdRng, SeedableRng};

fn main() -> Result<()> {
    let mut engine = CollisionEngine::new(1.0)?;
    engine
        .world_mut()
        .spawn_random(config::DEFAULT_SPAWN_COUNT, &mut StdRng::seed_from_u64(2024))?;

    for _ in 0..600 {
        let report = engine.step()?;
        if !report.pairs.is_empty() {
            let ids: Vec<String> = report
                .pairs
                .iter()
                .map(|pair| format!("{}-{}", pair.first(), pair.second()))
                .collect();
            println!("tick {:>3}: colliding {}", report.tick, ids.join(", "));
        }
    }

    let world = engine.world();
    for (id, body) in world.bodies().iter().enumerate() {
        let marker = if world.is_colliding(id) { "*" } else { " " };
        println!("{marker} body {id} at {}", body.position());
    }
    Ok(())
}
