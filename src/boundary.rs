/*
 * Boundary Module
 *
 * The flock lives inside a sphere centred on the world origin. A boid that
 * touches the buffered shell has its velocity mirrored about the outward
 * normal, damped by the bounce factor, and is snapped back onto the shell.
 */

use nannou::prelude::*;

use crate::boid::Boid;
use crate::params::ParamsError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundary {
    pub radius: f32,
    pub buffer: f32,
    pub bounce_factor: f32,
    pub agent_radius: f32,
}

impl Default for Boundary {
    fn default() -> Self {
        Self {
            radius: 500.0,
            buffer: 100.0,
            bounce_factor: 0.5,
            agent_radius: 2.0,
        }
    }
}

impl Boundary {
    pub fn validate(&self) -> Result<(), ParamsError> {
        if !(self.radius > 0.0 && (2.0 * self.radius).is_finite()) {
            return Err(ParamsError::InvalidBoundaryRadius(self.radius));
        }
        if !(self.radius.is_finite()
            && self.buffer.is_finite()
            && self.buffer >= 0.0
            && self.buffer < self.radius)
        {
            return Err(ParamsError::InvalidBuffer {
                radius: self.radius,
                buffer: self.buffer,
            });
        }
        if !(self.agent_radius.is_finite()
            && self.agent_radius >= 0.0
            && self.agent_radius < self.radius - self.buffer)
        {
            return Err(ParamsError::InvalidAgentRadius(self.agent_radius));
        }
        if !(0.0..=1.0).contains(&self.bounce_factor) {
            return Err(ParamsError::InvalidBounceFactor(self.bounce_factor));
        }
        Ok(())
    }

    // Radius at which the buffer zone starts
    #[inline]
    pub fn inner_radius(&self) -> f32 {
        self.radius - self.buffer
    }

    // Distance from the origin a bounced boid is placed at
    #[inline]
    pub fn snap_radius(&self) -> f32 {
        self.inner_radius() - self.agent_radius
    }

    // Reflect the boid off the shell if it has reached it. Returns true on a bounce.
    pub fn reflect(&self, boid: &mut Boid) -> bool {
        let dist = boid.position.length();

        // No outward direction at the exact centre
        if dist <= 0.0 || !dist.is_finite() {
            return false;
        }

        if dist + self.agent_radius < self.inner_radius() {
            return false;
        }

        let normal = boid.position / dist;
        let reflected = boid.velocity - normal * (2.0 * boid.velocity.dot(normal));
        boid.velocity = reflected * self.bounce_factor;
        boid.position = normal * self.snap_radius();
        true
    }
}
