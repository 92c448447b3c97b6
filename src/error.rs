//! Error types for Collision Lab.
//!
//! This module provides a unified error type [`CollisionError`] and a convenient [`Result`] alias.

use thiserror::Error;

/// Main error type for the crate.
///
/// Every failure mode here is a programmer or integration error. Nothing is transient, so
/// callers should surface these rather than retry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CollisionError {
    /// Two vectors of different arity were combined.
    #[error("vectors must have equal length (left: {left}, right: {right})")]
    LengthMismatch { left: usize, right: usize },

    /// A vector with the wrong number of components was supplied for a fixed-arity slot.
    #[error("expected a {expected}-component vector, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Corner coordinates were not ordered `x0 <= x1`, `y0 <= y1`, or were not finite.
    #[error("invalid bounds ({x0}, {y0}) .. ({x1}, {y1})")]
    InvalidBounds { x0: f64, y0: f64, x1: f64, y1: f64 },

    /// A shape was given a negative or non-finite extent.
    #[error("invalid shape: {0}")]
    InvalidShape(String),

    /// A configuration value is out of its allowed range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An object's footprint is not contained in the root bounds of the index.
    #[error("object at {position:?} does not fit inside index bounds {bounds}")]
    OutOfBounds { position: Vec<f64>, bounds: String },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CollisionError>;
