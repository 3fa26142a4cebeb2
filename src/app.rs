/*
 * Application Module
 *
 * This module defines the nannou model for the viewer. It creates the
 * window, owns the flock and feeds it the frame delta, applies UI edits
 * and keeps the debug information current. Drawing lives in the renderer
 * module and event handlers in the input module.
 */

use std::time::Instant;

use log::{debug, info, warn};
use nannou::prelude::*;
use nannou_egui::Egui;
use once_cell::sync::OnceCell;
use rand_chacha::ChaCha12Rng;

use crate::camera::Camera;
use crate::debug::DebugInfo;
use crate::input::{self, MovementKeys};
use crate::params::{ParamsError, RunConfig, SimulationParams};
use crate::physics::Flock;
use crate::renderer;
use crate::rng::rng_from_option;
use crate::ui::{self, ViewSettings};

// Camera fly speed in world units per second
const FLY_SPEED: f32 = 100.0;

// nannou's model function takes no arguments, so the run config is parked here
static RUN_CONFIG: OnceCell<RunConfig> = OnceCell::new();

// Main model for the application
pub struct Model {
    pub flock: Flock,
    // Working copy edited by the UI, applied to the flock once validated
    pub params: SimulationParams,
    pub view: ViewSettings,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub camera: Camera,
    pub mouse_position: Vec2,
    pub movement: MovementKeys,
    pub reset_requested: bool,
    pub rng: ChaCha12Rng,
}

// Validate the config, then hand control to nannou
pub fn run(config: RunConfig) -> Result<(), ParamsError> {
    config.params.validate()?;
    info!(
        "starting viewer with {} boids (seed {:?})",
        config.params.num_boids, config.seed
    );
    if RUN_CONFIG.set(config).is_err() {
        warn!("viewer already configured; keeping the first config");
    }

    nannou::app(model).update(update).run();
    Ok(())
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let config = RUN_CONFIG.get().cloned().unwrap_or_default();

    // Get the primary monitor's dimensions
    let (window_width, window_height) = app
        .primary_monitor()
        .map(|monitor| {
            let size = monitor.size();
            (size.width as f32 * 0.8, size.height as f32 * 0.8)
        })
        .unwrap_or((1280.0, 800.0));

    let window_id = app
        .new_window()
        .title("Boid Flocking Simulation")
        .size(window_width as u32, window_height as u32)
        .view(view)
        .mouse_moved(input::mouse_moved)
        .mouse_pressed(input::mouse_pressed)
        .mouse_released(input::mouse_released)
        .mouse_wheel(input::mouse_wheel)
        .key_pressed(input::key_pressed)
        .key_released(input::key_released)
        .raw_event(input::raw_window_event)
        .build()
        .expect("failed to build the viewer window");

    let window = app
        .window(window_id)
        .expect("viewer window closed during setup");
    let egui = Egui::from_window(&window);

    let mut rng = rng_from_option(config.seed);
    let flock = match Flock::spawn(config.params.clone(), &mut rng) {
        Ok(flock) => flock,
        Err(err) => {
            warn!("{}; falling back to default params", err);
            Flock::spawn_default(&mut rng)
        }
    };

    Model {
        params: flock.params().clone(),
        flock,
        view: ViewSettings::default(),
        egui,
        debug_info: DebugInfo::default(),
        camera: Camera::new(),
        mouse_position: Vec2::ZERO,
        movement: MovementKeys::default(),
        reset_requested: false,
        rng,
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    let delta = update.since_last.as_secs_f32();
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    let actions = ui::update_ui(
        &mut model.egui,
        &mut model.params,
        &mut model.view,
        &model.debug_info,
    );

    if actions.reset_camera {
        model.camera = Camera::new();
    }

    apply_param_edits(model);

    if actions.reset_boids || model.reset_requested {
        model.flock.reset(&mut model.rng);
        model.reset_requested = false;
    }

    let (forward, right) = model.movement.axes();
    if forward != 0.0 || right != 0.0 {
        model.camera.fly(forward * FLY_SPEED * delta, right * FLY_SPEED * delta);
    }

    if !model.view.pause_simulation {
        let started = Instant::now();
        model.flock.step(delta);
        model.debug_info.step_time = started.elapsed();
        model.debug_info.steps += 1;
    }

    model.debug_info.stats = model.flock.stats();
}

// Push validated UI edits into the flock; rejected edits snap back
fn apply_param_edits(model: &mut Model) {
    if model.params == *model.flock.params() {
        return;
    }

    match model.flock.set_params(model.params.clone()) {
        Ok(()) => {
            if model.flock.len() != model.params.num_boids {
                model.flock.resize(model.params.num_boids, &mut model.rng);
            }
            debug!("applied parameter edit");
        }
        Err(err) => {
            warn!("rejected parameter edit: {}", err);
            model.params = model.flock.params().clone();
        }
    }
}

fn view(app: &App, model: &Model, frame: Frame) {
    renderer::view(app, model, frame);
}
