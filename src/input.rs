/*
 * Input Module
 *
 * This module handles user input events for the viewer.
 * It processes mouse movements, clicks, wheel events and keys.
 *
 * Features:
 * - Orbiting the camera with mouse drag
 * - Zooming with the mouse wheel
 * - Flying the camera target with W/A/S/D
 * - Space to pause, R to respawn the flock
 * - Leaving pointer input to egui when it is over the UI
 */

use nannou::prelude::*;
use nannou::winit::event::{MouseButton, MouseScrollDelta, TouchPhase};

use crate::app::Model;

// Which fly keys are currently held
#[derive(Debug, Clone, Copy, Default)]
pub struct MovementKeys {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl MovementKeys {
    // (forward, right) in [-1, 1]
    pub fn axes(&self) -> (f32, f32) {
        let axis = |positive: bool, negative: bool| match (positive, negative) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        };
        (axis(self.forward, self.backward), axis(self.right, self.left))
    }

    fn set(&mut self, key: Key, held: bool) {
        match key {
            Key::W => self.forward = held,
            Key::S => self.backward = held,
            Key::A => self.left = held,
            Key::D => self.right = held,
            _ => {}
        }
    }
}

// Mouse moved event handler
pub fn mouse_moved(_app: &App, model: &mut Model, pos: Point2) {
    model.camera.drag(pos);
    model.mouse_position = pos;
}

// Mouse pressed event handler
pub fn mouse_pressed(_app: &App, model: &mut Model, button: MouseButton) {
    if button == MouseButton::Left && !model.egui.ctx().is_pointer_over_area() {
        model.camera.start_drag(model.mouse_position);
    }
}

// Mouse released event handler
pub fn mouse_released(_app: &App, model: &mut Model, button: MouseButton) {
    if button == MouseButton::Left {
        model.camera.end_drag();
    }
}

// Mouse wheel event handler for zooming
pub fn mouse_wheel(_app: &App, model: &mut Model, delta: MouseScrollDelta, _phase: TouchPhase) {
    if model.egui.ctx().is_pointer_over_area() {
        return;
    }

    match delta {
        MouseScrollDelta::LineDelta(_, y) => model.camera.zoom(y),
        MouseScrollDelta::PixelDelta(pos) => model.camera.zoom(pos.y as f32 * 0.01),
    }
}

pub fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    if model.egui.ctx().wants_keyboard_input() {
        return;
    }

    match key {
        Key::Space => model.view.pause_simulation = !model.view.pause_simulation,
        Key::R => model.reset_requested = true,
        _ => model.movement.set(key, true),
    }
}

pub fn key_released(_app: &App, model: &mut Model, key: Key) {
    model.movement.set(key, false);
}

// Pass raw window events to egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
