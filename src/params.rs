/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct that contains every
 * tunable constant of the flock: population, per-boid limits, the three
 * rule radii and weights, the spherical boundary and the performance
 * toggles. Values can be edited through the viewer UI, so every edit is
 * validated before it reaches the flock.
 */

use thiserror::Error;

use crate::boundary::Boundary;

// Speed given to freshly spawned boids, independent of max_speed
pub const SPAWN_SPEED: f32 = 2.0;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParamsError {
    #[error("max_speed must be positive and finite, got {0}")]
    InvalidMaxSpeed(f32),
    #[error("max_force must be positive and finite, got {0}")]
    InvalidMaxForce(f32),
    #[error("{rule} radius must be positive and finite, got {value}")]
    InvalidRadius { rule: &'static str, value: f32 },
    #[error("{rule} weight must be finite, got {value}")]
    InvalidWeight { rule: &'static str, value: f32 },
    #[error("spawn_bounds must be non-negative with a finite span, got {0}")]
    InvalidSpawnBounds(f32),
    #[error("boundary radius must be positive with a finite diameter, got {0}")]
    InvalidBoundaryRadius(f32),
    #[error("boundary buffer ({buffer}) must be non-negative and smaller than the boundary radius ({radius})")]
    InvalidBuffer { radius: f32, buffer: f32 },
    #[error("agent radius ({0}) must be non-negative and fit inside the buffered boundary")]
    InvalidAgentRadius(f32),
    #[error("bounce_factor must lie in [0, 1], got {0}")]
    InvalidBounceFactor(f32),
    #[error("cell_size_factor must be finite and at least 1.0, got {0}")]
    InvalidCellSizeFactor(f32),
}

// Parameters for the simulation that can be adjusted via CLI or UI
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationParams {
    pub num_boids: usize,
    pub spawn_bounds: f32,
    pub max_speed: f32,
    pub max_force: f32,
    pub separation_weight: f32,
    pub alignment_weight: f32,
    pub cohesion_weight: f32,
    pub separation_radius: f32,
    pub alignment_radius: f32,
    pub cohesion_radius: f32,
    pub boundary: Boundary,
    // Performance settings
    pub enable_parallel: bool,
    pub enable_spatial_grid: bool,
    pub cell_size_factor: f32, // Multiplier for cell size relative to the largest radius
}

// Everything needed to start a run: the flock params and an optional RNG seed
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunConfig {
    pub params: SimulationParams,
    pub seed: Option<u64>,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            num_boids: 1000,
            spawn_bounds: 5.0,
            max_speed: 400.0,
            max_force: 4.0,
            separation_weight: 1.5,
            alignment_weight: 1.0,
            cohesion_weight: 0.5,
            separation_radius: 10.0,
            alignment_radius: 30.0,
            cohesion_radius: 40.0,
            boundary: Boundary::default(),
            enable_parallel: true,
            enable_spatial_grid: false,
            cell_size_factor: 1.0,
        }
    }
}

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

impl SimulationParams {
    // Reject anything that would make the step produce NaN or break the invariants
    pub fn validate(&self) -> Result<(), ParamsError> {
        if !positive(self.max_speed) {
            return Err(ParamsError::InvalidMaxSpeed(self.max_speed));
        }
        if !positive(self.max_force) {
            return Err(ParamsError::InvalidMaxForce(self.max_force));
        }

        for (rule, value) in [
            ("separation", self.separation_radius),
            ("alignment", self.alignment_radius),
            ("cohesion", self.cohesion_radius),
        ] {
            if !positive(value) {
                return Err(ParamsError::InvalidRadius { rule, value });
            }
        }

        for (rule, value) in [
            ("separation", self.separation_weight),
            ("alignment", self.alignment_weight),
            ("cohesion", self.cohesion_weight),
        ] {
            if !value.is_finite() {
                return Err(ParamsError::InvalidWeight { rule, value });
            }
        }

        // Spawning samples [-bounds, bounds), whose width must stay finite
        if !(self.spawn_bounds >= 0.0 && (2.0 * self.spawn_bounds).is_finite()) {
            return Err(ParamsError::InvalidSpawnBounds(self.spawn_bounds));
        }

        self.boundary.validate()?;

        if !(self.cell_size_factor.is_finite() && self.cell_size_factor >= 1.0) {
            return Err(ParamsError::InvalidCellSizeFactor(self.cell_size_factor));
        }

        Ok(())
    }

    // The largest perception radius, which sizes the spatial grid cells
    pub fn max_radius(&self) -> f32 {
        self.separation_radius
            .max(self.alignment_radius)
            .max(self.cohesion_radius)
    }

    pub fn cell_size(&self) -> f32 {
        self.max_radius() * self.cell_size_factor
    }

    // Get parameter ranges for UI sliders
    pub fn num_boids_range() -> std::ops::RangeInclusive<usize> {
        1..=5000
    }

    pub fn max_speed_range() -> std::ops::RangeInclusive<f32> {
        1.0..=1000.0
    }

    pub fn max_force_range() -> std::ops::RangeInclusive<f32> {
        0.1..=20.0
    }

    pub fn weight_range() -> std::ops::RangeInclusive<f32> {
        0.0..=3.0
    }

    pub fn radius_range() -> std::ops::RangeInclusive<f32> {
        1.0..=100.0
    }

    pub fn cell_size_factor_range() -> std::ops::RangeInclusive<f32> {
        1.0..=4.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(SimulationParams::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_zero_max_speed() {
        let params = SimulationParams {
            max_speed: 0.0,
            ..SimulationParams::default()
        };
        assert_eq!(params.validate(), Err(ParamsError::InvalidMaxSpeed(0.0)));
    }

    #[test]
    fn rejects_nan_radius() {
        let params = SimulationParams {
            alignment_radius: f32::NAN,
            ..SimulationParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ParamsError::InvalidRadius { rule: "alignment", .. })
        ));
    }

    #[test]
    fn rejects_infinite_weight() {
        let params = SimulationParams {
            cohesion_weight: f32::INFINITY,
            ..SimulationParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ParamsError::InvalidWeight { rule: "cohesion", .. })
        ));
    }

    #[test]
    fn rejects_small_cell_factor() {
        let params = SimulationParams {
            cell_size_factor: 0.5,
            ..SimulationParams::default()
        };
        assert_eq!(
            params.validate(),
            Err(ParamsError::InvalidCellSizeFactor(0.5))
        );
    }

    #[test]
    fn rejects_spawn_bounds_with_infinite_span() {
        let params = SimulationParams {
            spawn_bounds: 3.0e38,
            ..SimulationParams::default()
        };
        assert_eq!(
            params.validate(),
            Err(ParamsError::InvalidSpawnBounds(3.0e38))
        );
    }

    #[test]
    fn cell_size_follows_largest_radius() {
        let params = SimulationParams {
            cell_size_factor: 2.0,
            ..SimulationParams::default()
        };
        assert_eq!(params.max_radius(), 40.0);
        assert_eq!(params.cell_size(), 80.0);
    }
}
