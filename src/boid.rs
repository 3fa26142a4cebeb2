/*
 * Boid Module
 *
 * This module defines the Boid struct and its behavior.
 * Each boid follows three main rules:
 * 1. Separation: Avoid crowding neighbors
 * 2. Alignment: Steer towards the average heading of neighbors
 * 3. Cohesion: Steer towards the average position of neighbors
 *
 * Rules read neighbors through a `Neighbors` view over the frame's
 * snapshot, so the same code serves the all-pairs scan and the grid.
 */

use nannou::prelude::*;
use rand::Rng;

use crate::math::{clamp_magnitude, normalize_or_zero, steer_towards};
use crate::params::{SimulationParams, SPAWN_SPEED};

#[derive(Debug, Clone, PartialEq)]
pub struct Boid {
    pub position: Vec3,
    pub velocity: Vec3,
    pub acceleration: Vec3,
    pub max_speed: f32,
    pub max_force: f32,
}

// The boids a rule may look at for the boid in slot `self_index`
pub struct Neighbors<'a> {
    pub boids: &'a [Boid],
    pub candidates: &'a [usize],
    pub self_index: usize,
}

impl<'a> Neighbors<'a> {
    // Candidates with 0 < d < radius, excluding the querying slot
    pub fn within(&self, origin: Vec3, radius: f32) -> impl Iterator<Item = (&'a Boid, f32)> + '_ {
        let boids = self.boids;
        self.candidates
            .iter()
            .copied()
            .filter(move |&j| j != self.self_index)
            .filter_map(move |j| boids.get(j))
            .filter_map(move |other| {
                let d = origin.distance(other.position);
                // Coincident boids are mutually invisible
                (d > 0.0 && d < radius).then_some((other, d))
            })
    }
}

impl Boid {
    // A motionless boid with the default limits
    pub fn at(position: Vec3) -> Self {
        let defaults = SimulationParams::default();
        Self {
            position,
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            max_speed: defaults.max_speed,
            max_force: defaults.max_force,
        }
    }

    pub fn new<R: Rng + ?Sized>(position: Vec3, rng: &mut R) -> Self {
        // Random initial heading
        let heading = vec3(
            rng.gen_range(-1.0f32..1.0),
            rng.gen_range(-1.0f32..1.0),
            rng.gen_range(-1.0f32..1.0),
        );

        Self {
            velocity: normalize_or_zero(heading) * SPAWN_SPEED,
            ..Self::at(position)
        }
    }

    // Direction of travel, used by the renderer to orient the boid
    pub fn heading(&self) -> Vec3 {
        normalize_or_zero(self.velocity)
    }

    // Apply a force to the boid
    pub fn apply_force(&mut self, force: Vec3) {
        self.acceleration += force;
    }

    // Consume the accumulated force and advance by `delta` seconds
    pub fn integrate(&mut self, delta: f32) {
        self.velocity = clamp_magnitude(self.velocity + self.acceleration, self.max_speed);
        self.position += self.velocity * delta;
        self.acceleration = Vec3::ZERO;
    }

    // Calculate separation force (avoid crowding neighbors)
    pub fn separation(&self, neighbors: &Neighbors, radius: f32) -> Vec3 {
        let mut steering = Vec3::ZERO;
        let mut count = 0;

        for (other, d) in neighbors.within(self.position, radius) {
            // Weight by distance so closer neighbors push harder
            steering += normalize_or_zero(self.position - other.position) / d;
            count += 1;
        }

        if count == 0 {
            return Vec3::ZERO;
        }

        steering /= count as f32;

        if steering.length() > 0.0 {
            steering = steer_towards(steering, self.velocity, self.max_speed, self.max_force);
        }

        steering
    }

    // Calculate alignment force (steer towards average heading of neighbors)
    pub fn alignment(&self, neighbors: &Neighbors, radius: f32) -> Vec3 {
        let mut sum = Vec3::ZERO;
        let mut count = 0;

        for (other, _) in neighbors.within(self.position, radius) {
            sum += other.velocity;
            count += 1;
        }

        if count == 0 {
            return Vec3::ZERO;
        }

        steer_towards(sum / count as f32, self.velocity, self.max_speed, self.max_force)
    }

    // Calculate cohesion force (steer towards average position of neighbors)
    pub fn cohesion(&self, neighbors: &Neighbors, radius: f32) -> Vec3 {
        let mut sum = Vec3::ZERO;
        let mut count = 0;

        for (other, _) in neighbors.within(self.position, radius) {
            sum += other.position;
            count += 1;
        }

        if count == 0 {
            return Vec3::ZERO;
        }

        self.seek(sum / count as f32)
    }

    // Steer towards a target point at full speed
    pub fn seek(&self, target: Vec3) -> Vec3 {
        steer_towards(target - self.position, self.velocity, self.max_speed, self.max_force)
    }

    // Weighted sum of the three rules
    pub fn flock_force(&self, neighbors: &Neighbors, params: &SimulationParams) -> Vec3 {
        let separation = self.separation(neighbors, params.separation_radius);
        let alignment = self.alignment(neighbors, params.alignment_radius);
        let cohesion = self.cohesion(neighbors, params.cohesion_radius);

        separation * params.separation_weight
            + alignment * params.alignment_weight
            + cohesion * params.cohesion_weight
    }
}
