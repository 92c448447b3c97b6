use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{CollisionError, Result};

/// Fixed-arity coordinate tuple used for positions and velocities.
///
/// Arity is chosen at construction and never changes. Every operation returns a new
/// vector; combining vectors of different arity fails with
/// [`CollisionError::LengthMismatch`] instead of truncating or padding.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vector {
    coords: SmallVec<[f64; 2]>,
}

impl Vector {
    pub fn new<I>(coords: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        Self {
            coords: coords.into_iter().collect(),
        }
    }

    /// Two-component vector.
    pub fn xy(x: f64, y: f64) -> Self {
        Self::new([x, y])
    }

    pub fn zeros(len: usize) -> Self {
        Self::new(std::iter::repeat(0.0).take(len))
    }

    pub fn from_slice(coords: &[f64]) -> Self {
        Self::new(coords.iter().copied())
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn get(&self, axis: usize) -> Option<f64> {
        self.coords.get(axis).copied()
    }

    /// First component, or `0.0` for an empty vector.
    pub fn x(&self) -> f64 {
        self.get(0).unwrap_or(0.0)
    }

    /// Second component, or `0.0` for a vector with fewer than two components.
    pub fn y(&self) -> f64 {
        self.get(1).unwrap_or(0.0)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.coords
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.coords.to_vec()
    }

    pub fn neg(&self) -> Vector {
        self.map(|c| -c)
    }

    pub fn add(&self, other: &Vector) -> Result<Vector> {
        self.zip_with(other, |a, b| a + b)
    }

    pub fn sub(&self, other: &Vector) -> Result<Vector> {
        self.zip_with(other, |a, b| a - b)
    }

    /// Elementwise product.
    pub fn mul(&self, other: &Vector) -> Result<Vector> {
        self.zip_with(other, |a, b| a * b)
    }

    /// Elementwise quotient. Division by a zero component follows IEEE semantics.
    pub fn div(&self, other: &Vector) -> Result<Vector> {
        self.zip_with(other, |a, b| a / b)
    }

    pub fn scale(&self, scalar: f64) -> Vector {
        self.map(|c| c * scalar)
    }

    pub fn div_scalar(&self, scalar: f64) -> Vector {
        self.map(|c| c / scalar)
    }

    pub fn dot(&self, other: &Vector) -> Result<f64> {
        self.check_len(other)?;
        Ok(self
            .coords
            .iter()
            .zip(other.coords.iter())
            .map(|(a, b)| a * b)
            .sum())
    }

    /// Euclidean norm.
    pub fn magnitude(&self) -> f64 {
        self.coords.iter().map(|c| c * c).sum::<f64>().sqrt()
    }

    /// Magnitude of the difference `self - other`.
    pub fn distance(&self, other: &Vector) -> Result<f64> {
        Ok(self.sub(other)?.magnitude())
    }

    /// Converts a two-component vector into a `glam` vector.
    pub fn to_dvec2(&self) -> Result<DVec2> {
        match self.coords.as_slice() {
            [x, y] => Ok(DVec2::new(*x, *y)),
            _ => Err(CollisionError::DimensionMismatch {
                expected: 2,
                actual: self.len(),
            }),
        }
    }

    pub(crate) fn expect_len(&self, expected: usize) -> Result<()> {
        if self.len() == expected {
            Ok(())
        } else {
            Err(CollisionError::DimensionMismatch {
                expected,
                actual: self.len(),
            })
        }
    }

    fn check_len(&self, other: &Vector) -> Result<()> {
        if self.len() != other.len() {
            return Err(CollisionError::LengthMismatch {
                left: self.len(),
                right: other.len(),
            });
        }
        Ok(())
    }

    fn map(&self, f: impl Fn(f64) -> f64) -> Vector {
        Vector {
            coords: self.coords.iter().map(|&c| f(c)).collect(),
        }
    }

    fn zip_with(&self, other: &Vector, f: impl Fn(f64, f64) -> f64) -> Result<Vector> {
        self.check_len(other)?;
        Ok(Vector {
            coords: self
                .coords
                .iter()
                .zip(other.coords.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }
}

impl From<DVec2> for Vector {
    fn from(v: DVec2) -> Self {
        Self::xy(v.x, v.y)
    }
}

impl From<[f64; 2]> for Vector {
    fn from(v: [f64; 2]) -> Self {
        Self::new(v)
    }
}

impl std::ops::Mul<f64> for &Vector {
    type Output = Vector;
    fn mul(self, rhs: f64) -> Vector {
        self.scale(rhs)
    }
}

impl std::ops::Div<f64> for &Vector {
    type Output = Vector;
    fn div(self, rhs: f64) -> Vector {
        self.div_scalar(rhs)
    }
}

impl std::ops::Neg for &Vector {
    type Output = Vector;
    fn neg(self) -> Vector {
        Vector::neg(self)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.coords.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, ")")
    }
}
