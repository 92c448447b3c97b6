//! Collision detection: the quadtree index, colliding-pair sets, and the detection strategies.

pub mod quadtree;
pub mod pairs;
pub mod broadphase;

pub use broadphase::{CollisionStrategy, Detector, ExhaustiveStrategy, Indexed, QuadTreeStrategy};
pub use pairs::{CollidingPair, CollisionSet, DetectionStats};
pub use quadtree::{QuadNode, QuadTree};
