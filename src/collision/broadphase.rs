use log::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::{
    pairs::{CollisionSet, DetectionStats},
    quadtree::QuadTree,
};
use crate::{
    config::{IndexConfig, StrategyKind},
    core::{Bounds, SpatialObject, Vector},
    error::Result,
    utils::logging::ScopedTimer,
};

/// Algorithm turning a snapshot of objects into the set of pairs that overlap.
///
/// Object identity is the index in the slice handed to [`CollisionStrategy::detect`].
pub trait CollisionStrategy<T: SpatialObject> {
    fn kind(&self) -> StrategyKind;

    fn detect(&mut self, objects: &[T]) -> Result<CollisionSet>;

    /// Counters of the most recent [`CollisionStrategy::detect`] call.
    fn stats(&self) -> DetectionStats;
}

/// Tests every pair. Used as the correctness baseline and for small populations.
#[derive(Debug, Clone)]
pub struct ExhaustiveStrategy {
    stats: DetectionStats,
}

impl Default for ExhaustiveStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl ExhaustiveStrategy {
    pub fn new() -> Self {
        Self {
            stats: DetectionStats {
                strategy: StrategyKind::Exhaustive,
                ..DetectionStats::default()
            },
        }
    }
}

impl<T: SpatialObject> CollisionStrategy<T> for ExhaustiveStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Exhaustive
    }

    fn detect(&mut self, objects: &[T]) -> Result<CollisionSet> {
        let _timer = ScopedTimer::new("exhaustive::detect");
        let mut pairs = CollisionSet::new();
        let mut checks = 0;

        for (a, object_a) in objects.iter().enumerate() {
            for (b, object_b) in objects.iter().enumerate() {
                if a == b || pairs.contains(a, b) {
                    continue;
                }
                checks += 1;
                if object_a.collides_with(object_b) {
                    pairs.insert(a, b);
                }
            }
        }

        self.stats = DetectionStats {
            strategy: StrategyKind::Exhaustive,
            objects: objects.len(),
            candidate_checks: checks,
            pairs: pairs.len(),
        };
        debug!("{:?}", self.stats);
        Ok(pairs)
    }

    fn stats(&self) -> DetectionStats {
        self.stats
    }
}

/// Element stored by [`QuadTreeStrategy`]: a copy of the object tagged with its slice index.
#[derive(Debug, Clone, PartialEq)]
pub struct Indexed<T> {
    pub id: usize,
    pub object: T,
}

impl<T: SpatialObject> SpatialObject for Indexed<T> {
    fn position(&self) -> &Vector {
        self.object.position()
    }

    fn footprint(&self) -> Bounds {
        self.object.footprint()
    }

    fn lies_within(&self, bounds: &Bounds) -> bool {
        self.object.lies_within(bounds)
    }

    fn collides_with(&self, other: &Self) -> bool {
        self.object.collides_with(&other.object)
    }
}

/// Rebuilds a quadtree from scratch on every call and tests only the candidates it returns.
#[derive(Debug, Clone)]
pub struct QuadTreeStrategy<T> {
    tree: QuadTree<Indexed<T>>,
    stats: DetectionStats,
}

impl<T: SpatialObject + Clone> QuadTreeStrategy<T> {
    pub fn new(bounds: Bounds, config: IndexConfig) -> Result<Self> {
        Ok(Self {
            tree: QuadTree::new(bounds, config)?,
            stats: DetectionStats {
                strategy: StrategyKind::Quadtree,
                ..DetectionStats::default()
            },
        })
    }

    /// Index built by the last [`CollisionStrategy::detect`] call, for visualisation.
    pub fn tree(&self) -> &QuadTree<Indexed<T>> {
        &self.tree
    }

    pub fn set_config(&mut self, config: IndexConfig) -> Result<()> {
        self.tree.set_config(config)
    }

    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.tree.set_bounds(bounds);
    }

    fn rebuild(&mut self, objects: &[T]) -> Result<()> {
        let _timer = ScopedTimer::new("quadtree::rebuild");
        self.tree.destroy();
        for (id, object) in objects.iter().enumerate() {
            self.tree.insert(Indexed {
                id,
                object: object.clone(),
            })?;
        }
        Ok(())
    }

    fn finish(&mut self, objects: usize, checks: usize, pairs: &CollisionSet) {
        self.stats = DetectionStats {
            strategy: StrategyKind::Quadtree,
            objects,
            candidate_checks: checks,
            pairs: pairs.len(),
        };
        debug!(
            "{:?} (tree: {} nodes, height {})",
            self.stats,
            self.tree.node_count(),
            self.tree.height()
        );
    }

    /// Same result as [`CollisionStrategy::detect`], with the query pass spread over rayon.
    #[cfg(feature = "parallel")]
    pub fn detect_parallel(&mut self, objects: &[T]) -> Result<CollisionSet>
    where
        T: Send + Sync,
    {
        self.rebuild(objects)?;

        let tree = &self.tree;
        let per_object: Vec<(usize, Vec<super::pairs::CollidingPair>)> = {
            let _timer = ScopedTimer::new("quadtree::query_parallel");
            objects
                .par_iter()
                .enumerate()
                .map(|(id, object)| {
                    let mut checks = 0;
                    let mut found = Vec::new();
                    for candidate in tree.query_candidates(object) {
                        if candidate.id == id {
                            continue;
                        }
                        checks += 1;
                        if object.collides_with(&candidate.object) {
                            found.extend(super::pairs::CollidingPair::new(id, candidate.id));
                        }
                    }
                    (checks, found)
                })
                .collect()
        };

        let checks = per_object.iter().map(|(checks, _)| checks).sum();
        let pairs: CollisionSet = per_object
            .into_iter()
            .flat_map(|(_, found)| found)
            .collect();
        self.finish(objects.len(), checks, &pairs);
        Ok(pairs)
    }
}

impl<T: SpatialObject + Clone> CollisionStrategy<T> for QuadTreeStrategy<T> {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Quadtree
    }

    fn detect(&mut self, objects: &[T]) -> Result<CollisionSet> {
        self.rebuild(objects)?;

        let mut pairs = CollisionSet::new();
        let mut checks = 0;
        {
            let _timer = ScopedTimer::new("quadtree::query");
            let mut candidates = Vec::new();
            for (id, object) in objects.iter().enumerate() {
                candidates.clear();
                self.tree.query_candidates_into(object, &mut candidates);
                for candidate in &candidates {
                    if candidate.id == id || pairs.contains(id, candidate.id) {
                        continue;
                    }
                    checks += 1;
                    if object.collides_with(&candidate.object) {
                        pairs.insert(id, candidate.id);
                    }
                }
            }
        }

        self.finish(objects.len(), checks, &pairs);
        Ok(pairs)
    }

    fn stats(&self) -> DetectionStats {
        self.stats
    }
}

/// Runtime-selectable strategy.
#[derive(Debug, Clone)]
pub enum Detector<T> {
    Exhaustive(ExhaustiveStrategy),
    Quadtree(QuadTreeStrategy<T>),
}

impl<T: SpatialObject + Clone> Detector<T> {
    pub fn new(kind: StrategyKind, bounds: Bounds, config: IndexConfig) -> Result<Self> {
        Ok(match kind {
            StrategyKind::Exhaustive => Detector::Exhaustive(ExhaustiveStrategy::new()),
            StrategyKind::Quadtree => Detector::Quadtree(QuadTreeStrategy::new(bounds, config)?),
        })
    }

    /// The quadtree of the last pass, when the quadtree strategy is active.
    pub fn quadtree(&self) -> Option<&QuadTree<Indexed<T>>> {
        match self {
            Detector::Exhaustive(_) => None,
            Detector::Quadtree(strategy) => Some(strategy.tree()),
        }
    }

    pub fn as_strategy_mut(&mut self) -> &mut dyn CollisionStrategy<T> {
        match self {
            Detector::Exhaustive(strategy) => strategy,
            Detector::Quadtree(strategy) => strategy,
        }
    }
}

impl<T: SpatialObject + Clone> CollisionStrategy<T> for Detector<T> {
    fn kind(&self) -> StrategyKind {
        match self {
            Detector::Exhaustive(_) => StrategyKind::Exhaustive,
            Detector::Quadtree(_) => StrategyKind::Quadtree,
        }
    }

    fn detect(&mut self, objects: &[T]) -> Result<CollisionSet> {
        match self {
            Detector::Exhaustive(strategy) => strategy.detect(objects),
            Detector::Quadtree(strategy) => strategy.detect(objects),
        }
    }

    fn stats(&self) -> DetectionStats {
        match self {
            Detector::Exhaustive(strategy) => CollisionStrategy::<T>::stats(strategy),
            Detector::Quadtree(strategy) => strategy.stats(),
        }
    }
}
