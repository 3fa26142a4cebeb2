/*
 * Boid Flocking Simulation
 *
 * This application simulates the flocking behavior of birds (boids) in three
 * dimensions based on three main rules:
 * 1. Separation: Avoid crowding neighbors
 * 2. Alignment: Steer towards the average heading of neighbors
 * 3. Cohesion: Steer towards the average position of neighbors
 *
 * The flock lives inside a sphere and bounces softly off its wall. By default
 * an interactive viewer opens; `--headless` steps the flock at a fixed delta
 * and logs a summary instead.
 */

use std::process::ExitCode;

use clap::Parser;
use log::error;

use flock3d::params::{RunConfig, SimulationParams};
use flock3d::{app, headless, logging};

/// A 3D boid flocking simulation
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of boids to spawn
    #[arg(short, long, default_value_t = SimulationParams::default().num_boids)]
    boids: usize,

    /// Seed for a reproducible run
    #[arg(short, long)]
    seed: Option<u64>,

    /// Step the flock without opening a window
    #[arg(long)]
    headless: bool,

    /// Frames to simulate in headless mode
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Seconds per headless frame
    #[arg(long, default_value_t = 1.0 / 60.0)]
    delta: f32,

    /// Step boids on a single thread
    #[arg(long)]
    no_parallel: bool,

    /// Use the uniform grid for neighbour queries
    #[arg(long)]
    spatial_grid: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn run_config(&self) -> RunConfig {
        RunConfig {
            params: SimulationParams {
                num_boids: self.boids,
                enable_parallel: !self.no_parallel,
                enable_spatial_grid: self.spatial_grid,
                ..SimulationParams::default()
            },
            seed: self.seed,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = cli.run_config();

    let result = if cli.headless {
        if !(cli.delta.is_finite() && cli.delta >= 0.0) {
            error!("delta must be non-negative and finite, got {}", cli.delta);
            return ExitCode::FAILURE;
        }
        headless::run(&config, cli.frames, cli.delta).map(|_| ())
    } else {
        app::run(config)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("invalid configuration: {}", err);
            ExitCode::FAILURE
        }
    }
}
