//! Core geometry: vectors, axis-aligned bounds, and the shapes stored in the spatial index.

pub mod vector;
pub mod bounds;
pub mod collider;

pub use vector::Vector;
pub use bounds::{Bounds, Quadrant};
pub use collider::{Circle, Rect, Shape, SpatialObject};
