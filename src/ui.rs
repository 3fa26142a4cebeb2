/*
 * UI Module
 *
 * This module contains functions for creating and updating the user interface
 * using nannou_egui. It provides controls for adjusting simulation parameters.
 * Edits land in the model's working copy of the params; the app validates
 * them before handing them to the flock.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::params::SimulationParams;

// Viewer-only switches that never reach the simulation
#[derive(Debug, Clone, Default)]
pub struct ViewSettings {
    pub show_debug: bool,
    pub pause_simulation: bool,
}

// Buttons clicked this frame
#[derive(Debug, Clone, Copy, Default)]
pub struct UiActions {
    pub reset_boids: bool,
    pub reset_camera: bool,
}

pub fn update_ui(
    egui: &mut Egui,
    params: &mut SimulationParams,
    view: &mut ViewSettings,
    debug_info: &DebugInfo,
) -> UiActions {
    let mut actions = UiActions::default();

    let ctx = egui.begin_frame();

    egui::Window::new("Simulation Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Boid Parameters", |ui| {
                ui.add(egui::Slider::new(&mut params.num_boids, SimulationParams::num_boids_range()).text("Number of Boids"));

                if ui.button("Reset Boids").clicked() {
                    actions.reset_boids = true;
                }

                ui.add(egui::Slider::new(&mut params.max_speed, SimulationParams::max_speed_range()).text("Max Speed"));
                ui.add(egui::Slider::new(&mut params.max_force, SimulationParams::max_force_range()).text("Max Force"));
            });

            ui.collapsing("Flocking Behavior", |ui| {
                ui.add(egui::Slider::new(&mut params.separation_weight, SimulationParams::weight_range()).text("Separation Weight"));
                ui.add(egui::Slider::new(&mut params.alignment_weight, SimulationParams::weight_range()).text("Alignment Weight"));
                ui.add(egui::Slider::new(&mut params.cohesion_weight, SimulationParams::weight_range()).text("Cohesion Weight"));
                ui.add(egui::Slider::new(&mut params.separation_radius, SimulationParams::radius_range()).text("Separation Radius"));
                ui.add(egui::Slider::new(&mut params.alignment_radius, SimulationParams::radius_range()).text("Alignment Radius"));
                ui.add(egui::Slider::new(&mut params.cohesion_radius, SimulationParams::radius_range()).text("Cohesion Radius"));
            });

            ui.collapsing("Camera Controls", |ui| {
                ui.label("Orbit: click and drag");
                ui.label("Zoom: mouse wheel");
                ui.label("Move: W/A/S/D");
                if ui.button("Reset Camera").clicked() {
                    actions.reset_camera = true;
                }
            });

            ui.collapsing("Performance Tuning", |ui| {
                ui.checkbox(&mut params.enable_parallel, "Enable Parallel Processing");
                ui.checkbox(&mut params.enable_spatial_grid, "Enable Spatial Grid");
                ui.add(egui::Slider::new(&mut params.cell_size_factor, SimulationParams::cell_size_factor_range()).text("Cell Size Factor"));

                ui.separator();

                for line in debug_info.lines() {
                    ui.label(line);
                }
            });

            ui.checkbox(&mut view.show_debug, "Show Debug Info");
            ui.checkbox(&mut view.pause_simulation, "Pause Simulation");
        });

    actions
}
