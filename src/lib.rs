/*
 * Boid Flocking Simulation - Module Definitions
 *
 * This file defines the module structure for the 3D boid simulation.
 * The simulation core (boid, boundary, physics, spatial_grid) has no
 * windowing dependencies; the viewer modules (app, camera, input,
 * renderer, ui) drive it through nannou.
 */

// Re-export key components for easier access
pub use app::Model;
pub use boid::Boid;
pub use boundary::Boundary;
pub use camera::Camera;
pub use debug::DebugInfo;
pub use params::{ParamsError, RunConfig, SimulationParams};
pub use physics::{Flock, FlockStats};
pub use spatial_grid::SpatialGrid;

// Define modules
pub mod app;
pub mod boid;
pub mod boundary;
pub mod camera;
pub mod debug;
pub mod headless;
pub mod input;
pub mod logging;
pub mod math;
pub mod params;
pub mod physics;
pub mod renderer;
pub mod rng;
pub mod spatial_grid;
pub mod ui;

// Half-length of a drawn boid in world units
pub const BOID_SIZE: f32 = 3.0;
