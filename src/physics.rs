/*
 * Physics Module
 *
 * This module owns the flock and advances it one frame at a time.
 *
 * Every step works from an owned snapshot of the previous frame: each
 * boid's next state is computed from that snapshot alone and written into
 * a fresh buffer, which then replaces the flock. No boid ever sees another
 * boid's post-step state, so sequential, parallel and grid-accelerated
 * steps all produce the same flock.
 */

use log::debug;
use nannou::prelude::*;
use rand::Rng;
use rayon::prelude::*;

use crate::boid::{Boid, Neighbors};
use crate::params::{ParamsError, SimulationParams};
use crate::spatial_grid::SpatialGrid;

// Spawn `count` boids uniformly inside [-bounds, bounds)^3
pub fn initialize<R: Rng + ?Sized>(count: usize, bounds: f32, rng: &mut R) -> Vec<Boid> {
    (0..count).map(|_| spawn_boid(bounds, rng)).collect()
}

fn spawn_boid<R: Rng + ?Sized>(bounds: f32, rng: &mut R) -> Boid {
    let mut coordinate = || {
        if bounds > 0.0 {
            rng.gen_range(-bounds..bounds)
        } else {
            0.0
        }
    };
    let position = vec3(coordinate(), coordinate(), coordinate());
    Boid::new(position, rng)
}

// Summary figures for debug displays and headless logging
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FlockStats {
    pub count: usize,
    pub mean_speed: f32,
    pub max_speed: f32,
    pub max_distance: f32,
    pub centroid: Vec3,
}

pub struct Flock {
    boids: Vec<Boid>,
    params: SimulationParams,
    spatial_grid: Option<SpatialGrid>,
}

impl Flock {
    // Wrap a fixed set of boids, applying the params' per-boid limits
    pub fn new(boids: Vec<Boid>, params: SimulationParams) -> Result<Self, ParamsError> {
        params.validate()?;
        let mut flock = Self {
            boids,
            params,
            spatial_grid: None,
        };
        flock.apply_limits();
        Ok(flock)
    }

    // Random flock of `params.num_boids` boids
    pub fn spawn<R: Rng + ?Sized>(params: SimulationParams, rng: &mut R) -> Result<Self, ParamsError> {
        params.validate()?;
        let boids = initialize(params.num_boids, params.spawn_bounds, rng);
        debug!(
            "spawned {} boids within +/-{} units",
            boids.len(),
            params.spawn_bounds
        );
        Self::new(boids, params)
    }

    // Random flock with the default params, which always validate
    pub fn spawn_default<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let params = SimulationParams::default();
        let boids = initialize(params.num_boids, params.spawn_bounds, rng);
        let mut flock = Self {
            boids,
            params,
            spatial_grid: None,
        };
        flock.apply_limits();
        flock
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn len(&self) -> usize {
        self.boids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    // Swap in new params; rejected params leave the flock untouched
    pub fn set_params(&mut self, params: SimulationParams) -> Result<(), ParamsError> {
        params.validate()?;
        if params.cell_size() != self.params.cell_size()
            || params.boundary.radius != self.params.boundary.radius
        {
            self.spatial_grid = None;
        }
        self.params = params;
        self.apply_limits();
        debug!("flock params updated");
        Ok(())
    }

    // Grow or shrink the population; existing boids keep their state
    pub fn resize<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) {
        let bounds = self.params.spawn_bounds;
        self.boids.resize_with(count, || spawn_boid(bounds, rng));
        self.params.num_boids = count;
        self.apply_limits();
        debug!("flock resized to {} boids", count);
    }

    // Throw away the current population and spawn a fresh one
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.boids = initialize(self.params.num_boids, self.params.spawn_bounds, rng);
        self.apply_limits();
        debug!("flock reset with {} boids", self.boids.len());
    }

    fn apply_limits(&mut self) {
        for boid in &mut self.boids {
            boid.max_speed = self.params.max_speed;
            boid.max_force = self.params.max_force;
        }
    }

    // Advance every boid by `delta` seconds
    pub fn step(&mut self, delta: f32) {
        let snapshot = std::mem::take(&mut self.boids);

        // Candidate lists: one shared list for the all-pairs scan, per-boid lists from the grid
        let all_indices: Vec<usize> = (0..snapshot.len()).collect();
        let grid = if self.params.enable_spatial_grid {
            let cell_size = self.params.cell_size();
            let half_extent = self.params.boundary.radius;
            let grid = self
                .spatial_grid
                .get_or_insert_with(|| SpatialGrid::new(cell_size, half_extent));
            grid.rebuild(snapshot.iter().map(|boid| boid.position));
            Some(&*grid)
        } else {
            None
        };

        let params = &self.params;
        let next_state = |i: usize| -> Boid {
            let nearby;
            let candidates = match grid {
                Some(grid) => {
                    nearby = grid.nearby_indices(snapshot[i].position);
                    &nearby[..]
                }
                None => &all_indices[..],
            };
            advance(&snapshot, candidates, i, params, delta)
        };

        self.boids = if params.enable_parallel {
            (0..snapshot.len()).into_par_iter().map(next_state).collect()
        } else {
            (0..snapshot.len()).map(next_state).collect()
        };
    }

    pub fn stats(&self) -> FlockStats {
        let count = self.boids.len();
        if count == 0 {
            return FlockStats::default();
        }

        let mut stats = FlockStats {
            count,
            ..FlockStats::default()
        };
        let mut speed_sum = 0.0;
        for boid in &self.boids {
            let speed = boid.velocity.length();
            speed_sum += speed;
            stats.max_speed = stats.max_speed.max(speed);
            stats.max_distance = stats.max_distance.max(boid.position.length());
            stats.centroid += boid.position;
        }
        stats.mean_speed = speed_sum / count as f32;
        stats.centroid /= count as f32;
        stats
    }
}

// Next state of boid `i`, read only from the frame snapshot
fn advance(
    snapshot: &[Boid],
    candidates: &[usize],
    i: usize,
    params: &SimulationParams,
    delta: f32,
) -> Boid {
    let mut boid = snapshot[i].clone();
    let neighbors = Neighbors {
        boids: snapshot,
        candidates,
        self_index: i,
    };

    let force = boid.flock_force(&neighbors, params);
    boid.apply_force(force);
    boid.integrate(delta);
    params.boundary.reflect(&mut boid);
    boid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_rng;

    fn sequential() -> SimulationParams {
        SimulationParams {
            enable_parallel: false,
            ..SimulationParams::default()
        }
    }

    #[test]
    fn initialize_respects_bounds_and_speed() {
        let mut rng = create_rng(3);
        let boids = initialize(200, 5.0, &mut rng);
        assert_eq!(boids.len(), 200);
        for boid in &boids {
            for c in [boid.position.x, boid.position.y, boid.position.z] {
                assert!((-5.0..5.0).contains(&c));
            }
            assert!((boid.velocity.length() - 2.0).abs() < 1e-5);
        }
    }

    #[test]
    fn zero_bounds_spawn_at_origin() {
        let mut rng = create_rng(3);
        let boids = initialize(4, 0.0, &mut rng);
        assert!(boids.iter().all(|b| b.position == Vec3::ZERO));
    }

    #[test]
    fn empty_flock_steps() {
        let mut flock = Flock::new(Vec::new(), sequential()).unwrap();
        flock.step(0.016);
        assert!(flock.is_empty());
        assert_eq!(flock.stats(), FlockStats::default());
    }

    #[test]
    fn lone_boid_flies_freely() {
        let mut boid = Boid::at(vec3(1.0, 2.0, 3.0));
        boid.velocity = vec3(10.0, 0.0, 0.0);
        let mut flock = Flock::new(vec![boid], sequential()).unwrap();
        flock.step(0.5);
        assert_eq!(flock.boids()[0].position, vec3(6.0, 2.0, 3.0));
        assert_eq!(flock.boids()[0].velocity, vec3(10.0, 0.0, 0.0));
    }

    #[test]
    fn step_reads_the_previous_frame_only() {
        // Boid 1 sits inside boid 0's separation radius only before the step
        let mut a = Boid::at(Vec3::ZERO);
        a.velocity = vec3(0.0, 0.0, -100.0);
        let b = Boid::at(vec3(5.0, 0.0, 0.0));
        let mut flock = Flock::new(vec![a, b], sequential()).unwrap();
        flock.step(1.0);

        // Boid 0 leaves in the same frame; boid 1 still reacts to where it was
        assert!(flock.boids()[0].position.length() > 50.0);
        assert!(flock.boids()[1].velocity.x > 0.0);
        assert!(flock.boids()[1].velocity.z < 0.0);
    }

    #[test]
    fn default_flock_uses_default_params() {
        let flock = Flock::spawn_default(&mut create_rng(1));
        assert_eq!(*flock.params(), SimulationParams::default());
        assert_eq!(flock.len(), 1000);
        assert!(flock.params().validate().is_ok());
    }

    #[test]
    fn resize_keeps_existing_boids() {
        let mut rng = create_rng(11);
        let mut flock = Flock::spawn(
            SimulationParams {
                num_boids: 5,
                ..sequential()
            },
            &mut rng,
        )
        .unwrap();
        let first = flock.boids()[0].clone();
        flock.resize(8, &mut rng);
        assert_eq!(flock.len(), 8);
        assert_eq!(flock.params().num_boids, 8);
        assert_eq!(flock.boids()[0], first);
        flock.resize(2, &mut rng);
        assert_eq!(flock.len(), 2);
    }

    #[test]
    fn set_params_updates_limits() {
        let mut flock = Flock::new(vec![Boid::at(Vec3::ZERO)], sequential()).unwrap();
        let params = SimulationParams {
            max_speed: 50.0,
            max_force: 1.0,
            ..sequential()
        };
        flock.set_params(params).unwrap();
        assert_eq!(flock.boids()[0].max_speed, 50.0);
        assert_eq!(flock.boids()[0].max_force, 1.0);
    }

    #[test]
    fn invalid_params_are_rejected() {
        let mut flock = Flock::new(Vec::new(), sequential()).unwrap();
        let bad = SimulationParams {
            max_force: -1.0,
            ..sequential()
        };
        assert_eq!(flock.set_params(bad), Err(ParamsError::InvalidMaxForce(-1.0)));
        assert_eq!(flock.params().max_force, 4.0);
    }

    #[test]
    fn stats_summarise_the_flock() {
        let mut a = Boid::at(vec3(10.0, 0.0, 0.0));
        a.velocity = vec3(0.0, 3.0, 4.0);
        let b = Boid::at(vec3(-30.0, 0.0, 0.0));
        let flock = Flock::new(vec![a, b], sequential()).unwrap();
        let stats = flock.stats();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.mean_speed, 2.5);
        assert_eq!(stats.max_speed, 5.0);
        assert_eq!(stats.max_distance, 30.0);
        assert_eq!(stats.centroid, vec3(-10.0, 0.0, 0.0));
    }
}
