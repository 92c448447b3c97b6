use glam::DVec2;

use crate::{
    core::{Bounds, Shape, SpatialObject, Vector},
    error::Result,
};

/// Moves bodies by their velocity and bounces them off the arena walls.
///
/// After a step every body's footprint lies inside the arena, so the bodies can always be
/// inserted into an index rooted at the same bounds.
#[derive(Debug, Clone)]
pub struct Integrator {
    /// Fraction of speed kept after hitting a wall.
    pub restitution: f64,
}

impl Default for Integrator {
    fn default() -> Self {
        Self::new()
    }
}

impl Integrator {
    pub fn new() -> Self {
        Self { restitution: 1.0 }
    }

    pub fn with_restitution(restitution: f64) -> Self {
        Self {
            restitution: restitution.clamp(0.0, 1.0),
        }
    }

    /// Advances one body. Returns whether it touched a wall.
    pub fn integrate(&self, body: &mut Shape, arena: &Bounds, dt: f64) -> Result<bool> {
        let moved = body.position().add(&body.velocity().scale(dt))?;
        let (position, velocity, bounced) = self.bounce(
            moved.to_dvec2()?,
            body.velocity().to_dvec2()?,
            body.half_extents(),
            arena,
        );
        body.set_position(Vector::from(position))?;
        if bounced {
            body.set_velocity(Vector::from(velocity))?;
        }
        Ok(bounced)
    }

    /// Advances every body and returns how many hit a wall.
    pub fn step(&self, bodies: &mut [Shape], arena: &Bounds, dt: f64) -> Result<usize> {
        let mut bounces = 0;
        for body in bodies.iter_mut() {
            if self.integrate(body, arena, dt)? {
                bounces += 1;
            }
        }
        Ok(bounces)
    }

    /// Pulls a body back inside `arena` without changing its velocity.
    pub fn confine(&self, body: &mut Shape, arena: &Bounds) -> Result<()> {
        let center = Self::confine_center(body.center(), body.half_extents(), arena);
        body.set_position(Vector::from(center))
    }

    fn confine_center(center: DVec2, half: DVec2, arena: &Bounds) -> DVec2 {
        let lo = arena.min() + half;
        let hi = arena.max() - half;
        DVec2::new(
            Self::confine_axis(center.x, lo.x, hi.x, arena.center().x),
            Self::confine_axis(center.y, lo.y, hi.y, arena.center().y),
        )
    }

    fn confine_axis(value: f64, lo: f64, hi: f64, middle: f64) -> f64 {
        if lo > hi {
            // body is wider than the arena on this axis
            middle
        } else {
            value.clamp(lo, hi)
        }
    }

    fn bounce(
        &self,
        position: DVec2,
        velocity: DVec2,
        half: DVec2,
        arena: &Bounds,
    ) -> (DVec2, DVec2, bool) {
        let lo = arena.min() + half;
        let hi = arena.max() - half;
        let mut position = position;
        let mut velocity = velocity;
        let mut bounced = false;

        for axis in 0..2 {
            if lo[axis] > hi[axis] {
                position[axis] = arena.center()[axis];
                velocity[axis] = 0.0;
                bounced = true;
            } else if position[axis] < lo[axis] {
                position[axis] = lo[axis];
                velocity[axis] = velocity[axis].abs() * self.restitution;
                bounced = true;
            } else if position[axis] > hi[axis] {
                position[axis] = hi[axis];
                velocity[axis] = -velocity[axis].abs() * self.restitution;
                bounced = true;
            }
        }

        (position, velocity, bounced)
    }
}
