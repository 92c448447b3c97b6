use std::{
    ops::Range,
    time::{Duration, Instant},
};

use log::{debug, info};
use rand::Rng;

use crate::{
    collision::{CollisionSet, CollisionStrategy, DetectionStats, Detector, Indexed, QuadTree},
    config::{
        IndexConfig, StrategyKind, WorldConfig, DEFAULT_MAX_SPEED, DEFAULT_MIN_RADIUS,
    },
    core::{Bounds, Circle, Shape, SpatialObject, Vector},
    dynamics::Integrator,
    error::{CollisionError, Result},
    utils::{
        logging::{warn_if_frame_budget_exceeded, ScopedTimer},
        profiling::{self, DetectionProfiler},
    },
};

/// What one [`CollisionWorld::step`] produced.
#[derive(Debug, Clone)]
pub struct TickReport {
    pub tick: u64,
    pub pairs: CollisionSet,
    pub stats: DetectionStats,
    /// Bodies that bounced off a wall this tick.
    pub bounces: usize,
    pub elapsed: Duration,
}

/// Owns a population of moving bodies and runs detection over them every tick.
///
/// Body ids are indices into [`CollisionWorld::bodies`] and stay stable until
/// [`CollisionWorld::clear`].
pub struct CollisionWorld {
    bodies: Vec<Shape>,
    config: WorldConfig,
    detector: Detector<Shape>,
    integrator: Integrator,
    profiler: DetectionProfiler,
    last_pairs: CollisionSet,
    tick: u64,
}

impl CollisionWorld {
    pub fn new(config: WorldConfig) -> Result<Self> {
        config.validate()?;
        let detector = Detector::new(config.strategy, config.bounds, config.index)?;
        info!(
            "collision world {} using {} strategy",
            config.bounds,
            config.strategy.name()
        );
        Ok(Self {
            bodies: Vec::new(),
            config,
            detector,
            integrator: Integrator::new(),
            profiler: DetectionProfiler::default(),
            last_pairs: CollisionSet::new(),
            tick: 0,
        })
    }

    pub fn builder() -> WorldBuilder {
        WorldBuilder::new()
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn bounds(&self) -> &Bounds {
        &self.config.bounds
    }

    /// Adds a body whose footprint must already lie inside the arena.
    pub fn add_body(&mut self, body: impl Into<Shape>) -> Result<usize> {
        let body = body.into();
        if !body.lies_within(&self.config.bounds) {
            return Err(CollisionError::OutOfBounds {
                position: body.position().to_vec(),
                bounds: self.config.bounds.to_string(),
            });
        }
        self.bodies.push(body);
        Ok(self.bodies.len() - 1)
    }

    /// Spawns `count` circles at random positions inside the arena, with radii in
    /// `[DEFAULT_MIN_RADIUS, 2 * DEFAULT_MIN_RADIUS)` and per-axis speeds below
    /// `DEFAULT_MAX_SPEED`. Returns the id range of the new bodies.
    pub fn spawn_random<R: Rng>(&mut self, count: usize, rng: &mut R) -> Result<Range<usize>> {
        let bounds = self.config.bounds;
        let max_radius = DEFAULT_MIN_RADIUS * 2.0;
        if bounds.width() < max_radius * 2.0 || bounds.height() < max_radius * 2.0 {
            return Err(CollisionError::InvalidConfig(format!(
                "arena {bounds} is too small to spawn circles of radius {max_radius}"
            )));
        }

        let start = self.bodies.len();
        for _ in 0..count {
            let radius = DEFAULT_MIN_RADIUS * (1.0 + rng.gen::<f64>());
            let x = bounds.x0() + radius + rng.gen::<f64>() * (bounds.width() - 2.0 * radius);
            let y = bounds.y0() + radius + rng.gen::<f64>() * (bounds.height() - 2.0 * radius);
            let vx = (rng.gen::<f64>() * 2.0 - 1.0) * DEFAULT_MAX_SPEED;
            let vy = (rng.gen::<f64>() * 2.0 - 1.0) * DEFAULT_MAX_SPEED;
            let circle = Circle::new(Vector::xy(x, y), Vector::xy(vx, vy), radius)?;
            self.add_body(circle)?;
        }
        debug!("spawned {count} circles, {} bodies total", self.bodies.len());
        Ok(start..self.bodies.len())
    }

    pub fn bodies(&self) -> &[Shape] {
        &self.bodies
    }

    pub fn body(&self, id: usize) -> Option<&Shape> {
        self.bodies.get(id)
    }

    /// Mutable access for external movers. The footprint must stay inside the arena or the
    /// next quadtree pass fails.
    pub fn body_mut(&mut self, id: usize) -> Option<&mut Shape> {
        self.bodies.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn clear(&mut self) {
        self.bodies.clear();
        self.last_pairs = CollisionSet::new();
    }

    pub fn strategy(&self) -> StrategyKind {
        self.detector.kind()
    }

    /// Switches the detection algorithm; takes effect on the next pass.
    pub fn set_strategy(&mut self, kind: StrategyKind) -> Result<()> {
        if kind == self.detector.kind() {
            return Ok(());
        }
        self.detector = Detector::new(kind, self.config.bounds, self.config.index)?;
        self.config.strategy = kind;
        info!("switched to {} strategy", kind.name());
        Ok(())
    }

    pub fn set_index_config(&mut self, index: IndexConfig) -> Result<()> {
        index.validate()?;
        if let Detector::Quadtree(strategy) = &mut self.detector {
            strategy.set_config(index)?;
        }
        self.config.index = index;
        Ok(())
    }

    /// Replaces the arena, pulling every body back inside it.
    ///
    /// Fails without changing anything if some body is larger than the new arena.
    pub fn resize(&mut self, bounds: Bounds) -> Result<()> {
        if let Some(body) = self.bodies.iter().find(|body| {
            let size = body.half_extents() * 2.0;
            size.x > bounds.width() || size.y > bounds.height()
        }) {
            return Err(CollisionError::OutOfBounds {
                position: body.position().to_vec(),
                bounds: bounds.to_string(),
            });
        }

        for body in &mut self.bodies {
            self.integrator.confine(body, &bounds)?;
        }
        if let Detector::Quadtree(strategy) = &mut self.detector {
            strategy.set_bounds(bounds);
        }
        self.config.bounds = bounds;
        debug!("arena resized to {bounds}");
        Ok(())
    }

    pub fn set_parallel_enabled(&mut self, enabled: bool) {
        self.config.parallel = enabled;
    }

    /// Whether the quadtree query pass runs on rayon. Always false without the `parallel`
    /// feature.
    pub fn parallel_enabled(&self) -> bool {
        cfg!(feature = "parallel") && self.config.parallel
    }

    pub fn integrator_mut(&mut self) -> &mut Integrator {
        &mut self.integrator
    }

    /// Moves every body by `velocity * dt`, then detects collisions at the new positions.
    pub fn step(&mut self, dt: f64) -> Result<TickReport> {
        let _timer = ScopedTimer::new("world::step");
        let start = Instant::now();
        self.profiler.reset();

        let bounces = {
            let _movement = profiling::ScopedTimer::new(&mut self.profiler.movement_time);
            self.integrator
                .step(&mut self.bodies, &self.config.bounds, dt)?
        };

        let pairs = {
            let _detection = profiling::ScopedTimer::new(&mut self.profiler.detection_time);
            Self::run_detection(&mut self.detector, &self.bodies, self.config.parallel)?
        };
        let stats = self.detector.stats();
        self.profiler.record_stats(&stats);

        let elapsed = start.elapsed();
        self.profiler.total_frame_time = elapsed;
        warn_if_frame_budget_exceeded(elapsed, self.config.frame_budget_ms);

        self.tick += 1;
        self.last_pairs = pairs.clone();
        Ok(TickReport {
            tick: self.tick,
            pairs,
            stats,
            bounces,
            elapsed,
        })
    }

    /// Runs detection on the current positions without moving anything.
    pub fn detect(&mut self) -> Result<&CollisionSet> {
        self.last_pairs = Self::run_detection(&mut self.detector, &self.bodies, self.config.parallel)?;
        Ok(&self.last_pairs)
    }

    #[cfg(feature = "parallel")]
    fn run_detection(detector: &mut Detector<Shape>, bodies: &[Shape], parallel: bool) -> Result<CollisionSet> {
        if parallel {
            if let Detector::Quadtree(strategy) = detector {
                return strategy.detect_parallel(bodies);
            }
        }
        detector.detect(bodies)
    }

    #[cfg(not(feature = "parallel"))]
    fn run_detection(detector: &mut Detector<Shape>, bodies: &[Shape], _parallel: bool) -> Result<CollisionSet> {
        detector.detect(bodies)
    }

    /// Pairs found by the most recent pass.
    pub fn last_pairs(&self) -> &CollisionSet {
        &self.last_pairs
    }

    /// Highlight state for presentation: is `id` in any pair of the last pass?
    pub fn is_colliding(&self, id: usize) -> bool {
        self.last_pairs.is_colliding(id)
    }

    /// Index built by the last pass, when the quadtree strategy is active.
    pub fn quadtree(&self) -> Option<&QuadTree<Indexed<Shape>>> {
        self.detector.quadtree()
    }

    pub fn profiler(&self) -> &DetectionProfiler {
        &self.profiler
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }
}

pub struct WorldBuilder {
    config: WorldConfig,
}

impl Default for WorldBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldBuilder {
    pub fn new() -> Self {
        Self {
            config: WorldConfig::default(),
        }
    }

    pub fn bounds(mut self, bounds: Bounds) -> Self {
        self.config.bounds = bounds;
        self
    }

    pub fn max_capacity(mut self, max_capacity: usize) -> Self {
        self.config.index.max_capacity = max_capacity;
        self
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.config.index.max_depth = max_depth;
        self
    }

    pub fn strategy(mut self, strategy: StrategyKind) -> Self {
        self.config.strategy = strategy;
        self
    }

    pub fn frame_budget_ms(mut self, budget: f32) -> Self {
        self.config.frame_budget_ms = budget;
        self
    }

    pub fn parallel(mut self, enabled: bool) -> Self {
        self.config.parallel = enabled;
        self
    }

    pub fn config(mut self, config: WorldConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<CollisionWorld> {
        CollisionWorld::new(self.config)
    }
}
