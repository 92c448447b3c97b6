use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::{bounds::Bounds, vector::Vector};
use crate::error::{CollisionError, Result};

/// Capability every entity stored in the spatial index must provide.
///
/// `lies_within` tests the object's whole footprint, not just its position, so a body
/// straddling an edge is not within either side.
pub trait SpatialObject {
    fn position(&self) -> &Vector;

    /// Axis-aligned box enclosing everything the object occupies.
    fn footprint(&self) -> Bounds;

    fn lies_within(&self, bounds: &Bounds) -> bool;

    /// Pairwise overlap predicate. Touching counts as colliding.
    fn collides_with(&self, other: &Self) -> bool;
}

fn check_extent(label: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(CollisionError::InvalidShape(format!(
            "{label} must be finite and non-negative, got {value}"
        )))
    }
}

/// Moving disc.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CircleFields", into = "CircleFields")]
pub struct Circle {
    position: Vector,
    velocity: Vector,
    radius: f64,
}

impl Circle {
    pub fn new(position: Vector, velocity: Vector, radius: f64) -> Result<Self> {
        position.expect_len(2)?;
        velocity.expect_len(2)?;
        check_extent("radius", radius)?;
        Ok(Self {
            position,
            velocity,
            radius,
        })
    }

    /// Stationary circle at `(x, y)`. The radius must be finite and non-negative.
    pub fn at(x: f64, y: f64, radius: f64) -> Self {
        debug_assert!(
            radius.is_finite() && radius >= 0.0,
            "radius must be finite and non-negative, got {radius}"
        );
        Self {
            position: Vector::xy(x, y),
            velocity: Vector::zeros(2),
            radius,
        }
    }

    pub fn with_velocity(mut self, vx: f64, vy: f64) -> Self {
        self.velocity = Vector::xy(vx, vy);
        self
    }

    pub fn velocity(&self) -> &Vector {
        &self.velocity
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn set_radius(&mut self, radius: f64) -> Result<()> {
        check_extent("radius", radius)?;
        self.radius = radius;
        Ok(())
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.position.x(), self.position.y())
    }

    pub fn set_position(&mut self, position: Vector) -> Result<()> {
        position.expect_len(2)?;
        self.position = position;
        Ok(())
    }

    pub fn set_velocity(&mut self, velocity: Vector) -> Result<()> {
        velocity.expect_len(2)?;
        self.velocity = velocity;
        Ok(())
    }

    pub fn distance_to(&self, other: &Circle) -> f64 {
        // both positions are two-component by construction
        self.position
            .distance(&other.position)
            .unwrap_or(f64::INFINITY)
    }

    pub fn intersects_circle(&self, other: &Circle) -> bool {
        self.distance_to(other) <= self.radius + other.radius
    }

    pub fn intersects_rect(&self, rect: &Rect) -> bool {
        let closest = rect.footprint().clamp_point(self.center());
        closest.distance_squared(self.center()) <= self.radius * self.radius
    }
}

impl SpatialObject for Circle {
    fn position(&self) -> &Vector {
        &self.position
    }

    fn footprint(&self) -> Bounds {
        Bounds::around(self.center(), DVec2::splat(self.radius))
    }

    fn lies_within(&self, bounds: &Bounds) -> bool {
        bounds.contains_circle(self.center(), self.radius)
    }

    fn collides_with(&self, other: &Self) -> bool {
        self.intersects_circle(other)
    }
}

/// Moving axis-aligned box described by its center and half extents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RectFields", into = "RectFields")]
pub struct Rect {
    position: Vector,
    velocity: Vector,
    half_extents: DVec2,
}

impl Rect {
    pub fn new(position: Vector, velocity: Vector, half_extents: DVec2) -> Result<Self> {
        position.expect_len(2)?;
        velocity.expect_len(2)?;
        check_extent("half width", half_extents.x)?;
        check_extent("half height", half_extents.y)?;
        Ok(Self {
            position,
            velocity,
            half_extents,
        })
    }

    /// Stationary box centered at `(x, y)`. Both half extents must be finite and non-negative.
    pub fn at(x: f64, y: f64, half_width: f64, half_height: f64) -> Self {
        debug_assert!(
            check_extent("half width", half_width).is_ok()
                && check_extent("half height", half_height).is_ok(),
            "half extents must be finite and non-negative, got ({half_width}, {half_height})"
        );
        Self {
            position: Vector::xy(x, y),
            velocity: Vector::zeros(2),
            half_extents: DVec2::new(half_width, half_height),
        }
    }

    pub fn with_velocity(mut self, vx: f64, vy: f64) -> Self {
        self.velocity = Vector::xy(vx, vy);
        self
    }

    pub fn velocity(&self) -> &Vector {
        &self.velocity
    }

    pub fn half_extents(&self) -> DVec2 {
        self.half_extents
    }

    pub fn set_half_extents(&mut self, half_extents: DVec2) -> Result<()> {
        check_extent("half width", half_extents.x)?;
        check_extent("half height", half_extents.y)?;
        self.half_extents = half_extents;
        Ok(())
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.position.x(), self.position.y())
    }

    pub fn set_position(&mut self, position: Vector) -> Result<()> {
        position.expect_len(2)?;
        self.position = position;
        Ok(())
    }

    pub fn set_velocity(&mut self, velocity: Vector) -> Result<()> {
        velocity.expect_len(2)?;
        self.velocity = velocity;
        Ok(())
    }
}

impl SpatialObject for Rect {
    fn position(&self) -> &Vector {
        &self.position
    }

    fn footprint(&self) -> Bounds {
        Bounds::around(self.center(), self.half_extents)
    }

    fn lies_within(&self, bounds: &Bounds) -> bool {
        bounds.contains_bounds(&self.footprint())
    }

    fn collides_with(&self, other: &Self) -> bool {
        self.footprint().intersects(&other.footprint())
    }
}

#[derive(Serialize, Deserialize)]
struct CircleFields {
    position: Vector,
    velocity: Vector,
    radius: f64,
}

impl TryFrom<CircleFields> for Circle {
    type Error = CollisionError;

    fn try_from(raw: CircleFields) -> Result<Self> {
        Circle::new(raw.position, raw.velocity, raw.radius)
    }
}

impl From<Circle> for CircleFields {
    fn from(c: Circle) -> Self {
        CircleFields {
            position: c.position,
            velocity: c.velocity,
            radius: c.radius,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct RectFields {
    position: Vector,
    velocity: Vector,
    half_extents: DVec2,
}

impl TryFrom<RectFields> for Rect {
    type Error = CollisionError;

    fn try_from(raw: RectFields) -> Result<Self> {
        Rect::new(raw.position, raw.velocity, raw.half_extents)
    }
}

impl From<Rect> for RectFields {
    fn from(r: Rect) -> Self {
        RectFields {
            position: r.position,
            velocity: r.velocity,
            half_extents: r.half_extents,
        }
    }
}

/// Closed set of shapes that can share one index and collide with each other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Circle(Circle),
    Rect(Rect),
}

impl Shape {
    pub fn velocity(&self) -> &Vector {
        match self {
            Shape::Circle(c) => c.velocity(),
            Shape::Rect(r) => r.velocity(),
        }
    }

    pub fn center(&self) -> DVec2 {
        match self {
            Shape::Circle(c) => c.center(),
            Shape::Rect(r) => r.center(),
        }
    }

    /// Half size of the footprint along each axis.
    pub fn half_extents(&self) -> DVec2 {
        match self {
            Shape::Circle(c) => DVec2::splat(c.radius),
            Shape::Rect(r) => r.half_extents,
        }
    }

    pub fn set_position(&mut self, position: Vector) -> Result<()> {
        match self {
            Shape::Circle(c) => c.set_position(position),
            Shape::Rect(r) => r.set_position(position),
        }
    }

    pub fn set_velocity(&mut self, velocity: Vector) -> Result<()> {
        match self {
            Shape::Circle(c) => c.set_velocity(velocity),
            Shape::Rect(r) => r.set_velocity(velocity),
        }
    }

    pub fn as_circle(&self) -> Option<&Circle> {
        match self {
            Shape::Circle(c) => Some(c),
            Shape::Rect(_) => None,
        }
    }
}

impl From<Circle> for Shape {
    fn from(c: Circle) -> Self {
        Shape::Circle(c)
    }
}

impl From<Rect> for Shape {
    fn from(r: Rect) -> Self {
        Shape::Rect(r)
    }
}

impl SpatialObject for Shape {
    fn position(&self) -> &Vector {
        match self {
            Shape::Circle(c) => c.position(),
            Shape::Rect(r) => r.position(),
        }
    }

    fn footprint(&self) -> Bounds {
        match self {
            Shape::Circle(c) => c.footprint(),
            Shape::Rect(r) => r.footprint(),
        }
    }

    fn lies_within(&self, bounds: &Bounds) -> bool {
        match self {
            Shape::Circle(c) => c.lies_within(bounds),
            Shape::Rect(r) => r.lies_within(bounds),
        }
    }

    fn collides_with(&self, other: &Self) -> bool {
        match (self, other) {
            (Shape::Circle(a), Shape::Circle(b)) => a.intersects_circle(b),
            (Shape::Rect(a), Shape::Rect(b)) => a.collides_with(b),
            (Shape::Circle(c), Shape::Rect(r)) | (Shape::Rect(r), Shape::Circle(c)) => {
                c.intersects_rect(r)
            }
        }
    }
}
