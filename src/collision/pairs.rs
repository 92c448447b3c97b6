use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::config::StrategyKind;

/// Unordered pair of two distinct objects, identified by their index in the detected slice.
///
/// Stored normalised so that `first < second`; `(a, b)` and `(b, a)` are the same pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CollidingPair {
    first: usize,
    second: usize,
}

impl CollidingPair {
    /// Returns `None` when both ids name the same object.
    pub fn new(a: usize, b: usize) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { first: a, second: b }),
            std::cmp::Ordering::Greater => Some(Self { first: b, second: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn first(&self) -> usize {
        self.first
    }

    pub fn second(&self) -> usize {
        self.second
    }

    pub fn involves(&self, id: usize) -> bool {
        self.first == id || self.second == id
    }

    /// The other member of the pair, if `id` is one of them.
    pub fn partner(&self, id: usize) -> Option<usize> {
        if id == self.first {
            Some(self.second)
        } else if id == self.second {
            Some(self.first)
        } else {
            None
        }
    }
}

/// Result of one detection pass: every colliding pair, each reported once.
///
/// Presentation code derives highlight state from membership here instead of reading a
/// flag on the objects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionSet {
    pairs: BTreeSet<CollidingPair>,
}

impl CollisionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `(a, b)`. Returns `false` for self pairs and pairs already present.
    pub fn insert(&mut self, a: usize, b: usize) -> bool {
        match CollidingPair::new(a, b) {
            Some(pair) => self.pairs.insert(pair),
            None => false,
        }
    }

    pub fn contains(&self, a: usize, b: usize) -> bool {
        CollidingPair::new(a, b).is_some_and(|pair| self.pairs.contains(&pair))
    }

    /// Whether object `id` takes part in at least one pair.
    pub fn is_colliding(&self, id: usize) -> bool {
        self.pairs.iter().any(|pair| pair.involves(id))
    }

    /// Ids of every object in at least one pair.
    pub fn colliding_ids(&self) -> BTreeSet<usize> {
        self.pairs
            .iter()
            .flat_map(|pair| [pair.first, pair.second])
            .collect()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Pairs in ascending `(first, second)` order.
    pub fn iter(&self) -> impl Iterator<Item = &CollidingPair> + '_ {
        self.pairs.iter()
    }

    pub fn to_vec(&self) -> Vec<(usize, usize)> {
        self.pairs.iter().map(|p| (p.first, p.second)).collect()
    }
}

impl Extend<CollidingPair> for CollisionSet {
    fn extend<I: IntoIterator<Item = CollidingPair>>(&mut self, iter: I) {
        self.pairs.extend(iter);
    }
}

impl FromIterator<CollidingPair> for CollisionSet {
    fn from_iter<I: IntoIterator<Item = CollidingPair>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a CollisionSet {
    type Item = &'a CollidingPair;
    type IntoIter = std::collections::btree_set::Iter<'a, CollidingPair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

/// Cost counters for one detection pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionStats {
    pub strategy: StrategyKind,
    pub objects: usize,
    /// Number of pairwise predicate evaluations.
    pub candidate_checks: usize,
    pub pairs: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_are_unordered_and_never_reflexive() {
        assert_eq!(CollidingPair::new(3, 1), CollidingPair::new(1, 3));
        assert!(CollidingPair::new(2, 2).is_none());

        let mut set = CollisionSet::new();
        assert!(set.insert(4, 1));
        assert!(!set.insert(1, 4));
        assert!(!set.insert(7, 7));
        assert_eq!(set.len(), 1);
        assert!(set.contains(1, 4) && set.contains(4, 1));
    }

    #[test]
    fn membership_queries() {
        let set: CollisionSet = [(0, 2), (2, 5)]
            .into_iter()
            .filter_map(|(a, b)| CollidingPair::new(a, b))
            .collect();
        assert!(set.is_colliding(2));
        assert!(!set.is_colliding(1));
        assert_eq!(set.colliding_ids().into_iter().collect::<Vec<_>>(), vec![0, 2, 5]);
        assert_eq!(set.to_vec(), vec![(0, 2), (2, 5)]);
        let first = set.iter().next().unwrap();
        assert_eq!(first.partner(0), Some(2));
        assert_eq!(first.partner(5), None);
    }
}
