//! Collision Lab – broad-phase collision detection for moving 2D bodies.
//!
//! The crate pairs an exhaustive all-pairs detector with an adaptive quadtree that is
//! rebuilt every tick, so the two can be compared on the same population. Both report
//! the same set of colliding pairs.

pub mod collision;
pub mod config;
pub mod core;
pub mod dynamics;
pub mod error;
pub mod utils;
pub mod world;

pub use glam::DVec2;

pub use collision::{
    CollidingPair, CollisionSet, CollisionStrategy, DetectionStats, Detector, ExhaustiveStrategy,
    Indexed, QuadNode, QuadTree, QuadTreeStrategy,
};
pub use config::{IndexConfig, StrategyKind, WorldConfig};
pub use core::{Bounds, Circle, Quadrant, Rect, Shape, SpatialObject, Vector};
pub use dynamics::Integrator;
pub use error::{CollisionError, Result};
pub use utils::DetectionProfiler;
pub use world::{CollisionWorld, TickReport, WorldBuilder};

/// High-level convenience wrapper that owns a [`CollisionWorld`] with a fixed timestep.
pub struct CollisionEngine {
    world: CollisionWorld,
    timestep: f64,
}

impl CollisionEngine {
    /// Creates an engine over the default 800x600 arena.
    pub fn new(timestep: f64) -> Result<Self> {
        Ok(Self {
            world: CollisionWorld::new(WorldConfig::default())?,
            timestep,
        })
    }

    pub fn with_world(world: CollisionWorld, timestep: f64) -> Self {
        Self { world, timestep }
    }

    /// Adds a body and returns its id.
    pub fn add_body(&mut self, body: impl Into<Shape>) -> Result<usize> {
        self.world.add_body(body)
    }

    /// Advances the simulation by one fixed timestep.
    pub fn step(&mut self) -> Result<TickReport> {
        self.world.step(self.timestep)
    }

    pub fn set_strategy(&mut self, kind: StrategyKind) -> Result<()> {
        self.world.set_strategy(kind)
    }

    pub fn set_parallel_enabled(&mut self, enabled: bool) {
        self.world.set_parallel_enabled(enabled);
    }

    pub fn parallel_enabled(&self) -> bool {
        self.world.parallel_enabled()
    }

    pub fn get_body(&self, id: usize) -> Option<&Shape> {
        self.world.body(id)
    }

    pub fn world(&self) -> &CollisionWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut CollisionWorld {
        &mut self.world
    }
}
