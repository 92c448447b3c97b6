//! Configuration defaults and serialisable settings for Collision Lab.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::{
    core::Bounds,
    error::{CollisionError, Result},
};

/// Element count at which a quadtree leaf subdivides.
pub const DEFAULT_MAX_CAPACITY: usize = 4;

/// Hard ceiling on quadtree subdivision.
pub const DEFAULT_MAX_DEPTH: usize = 8;

/// Default arena size, in world units (x grows right, y grows down).
pub const DEFAULT_ARENA_SIZE: [f64; 2] = [800.0, 600.0];

/// Number of circles spawned by [`crate::CollisionWorld::spawn_random`] callers by default.
pub const DEFAULT_SPAWN_COUNT: usize = 10;

/// Spawned radii are drawn from `[MIN, MIN * 2)`.
pub const DEFAULT_MIN_RADIUS: f64 = 10.0;

/// Largest per-axis speed of a spawned body, in units per tick.
pub const DEFAULT_MAX_SPEED: f64 = 2.0;

/// Frame budget used for over-budget warnings (one 60 Hz frame).
pub const DEFAULT_FRAME_BUDGET_MS: f32 = 1000.0 / 60.0;

/// Which detection algorithm runs each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StrategyKind {
    /// Compare every pair.
    Exhaustive,
    /// Rebuild a quadtree and compare only nearby candidates.
    #[default]
    Quadtree,
}

impl StrategyKind {
    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::Exhaustive => "exhaustive",
            StrategyKind::Quadtree => "quadtree",
        }
    }
}

/// Subdivision policy of the spatial index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Element count that triggers subdivision of a leaf. Must be at least 1.
    pub max_capacity: usize,
    /// Deepest level a node may be created at; the root is depth 0.
    pub max_depth: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            max_capacity: DEFAULT_MAX_CAPACITY,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl IndexConfig {
    pub fn new(max_capacity: usize, max_depth: usize) -> Self {
        Self {
            max_capacity,
            max_depth,
        }
    }

    /// Subdivide whenever capacity is reached, with no depth ceiling.
    pub fn unbounded_depth(max_capacity: usize) -> Self {
        Self::new(max_capacity, usize::MAX)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_capacity == 0 {
            return Err(CollisionError::InvalidConfig(
                "max_capacity must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Settings for a [`crate::CollisionWorld`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Arena the bodies move in; also the root bounds of the index.
    pub bounds: Bounds,
    pub index: IndexConfig,
    pub strategy: StrategyKind,
    /// Ticks slower than this are logged at warn level.
    pub frame_budget_ms: f32,
    /// Fan the candidate query pass out over rayon (needs the `parallel` feature).
    pub parallel: bool,
}

impl Default for WorldConfig {
    fn default() -> Self {
        let half = DVec2::from_array(DEFAULT_ARENA_SIZE) / 2.0;
        Self {
            bounds: Bounds::around(half, half),
            index: IndexConfig::default(),
            strategy: StrategyKind::default(),
            frame_budget_ms: DEFAULT_FRAME_BUDGET_MS,
            parallel: false,
        }
    }
}

impl WorldConfig {
    pub fn validate(&self) -> Result<()> {
        self.index.validate()?;
        if !(self.frame_budget_ms.is_finite() && self.frame_budget_ms > 0.0) {
            return Err(CollisionError::InvalidConfig(format!(
                "frame_budget_ms must be positive, got {}",
                self.frame_budget_ms
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_capacity_is_rejected() {
        assert!(IndexConfig::new(0, 3).validate().is_err());
        assert!(IndexConfig::new(1, 0).validate().is_ok());
    }

    #[test]
    fn world_defaults_cover_the_arena() {
        let config = WorldConfig::default();
        assert_eq!(config.bounds, Bounds::from_size(800.0, 600.0).unwrap());
        assert_eq!(config.strategy, StrategyKind::Quadtree);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let config: WorldConfig = ron::from_str(
            "(bounds: (x0: 0.0, y0: 0.0, x1: 100.0, y1: 50.0), strategy: Exhaustive)",
        )
        .unwrap();
        assert_eq!(config.bounds.width(), 100.0);
        assert_eq!(config.strategy, StrategyKind::Exhaustive);
        assert_eq!(config.index, IndexConfig::default());
    }

    #[test]
    fn inverted_bounds_fail_to_deserialize() {
        let parsed: std::result::Result<WorldConfig, _> =
            ron::from_str("(bounds: (x0: 10.0, y0: 0.0, x1: 0.0, y1: 50.0))");
        assert!(parsed.is_err());
    }
}
