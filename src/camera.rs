/*
 * Camera Module
 *
 * This module defines an orbit camera for looking at the 3D flock through
 * nannou's 2D drawing API. The camera circles a target point; dragging
 * orbits, the wheel zooms and WASD flies the target around. Points are
 * projected with a simple pinhole model into window coordinates centred
 * on the window, which is what `Draw` expects.
 */

use nannou::prelude::*;

pub struct Camera {
    pub target: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub fov_y: f32,
    pub near: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub is_dragging: bool,
    pub last_cursor_pos: Vec2,
}

// Right, up and forward unit vectors of the view
#[derive(Debug, Clone, Copy)]
pub struct Basis {
    pub right: Vec3,
    pub up: Vec3,
    pub forward: Vec3,
}

const ORBIT_SENSITIVITY: f32 = 0.005;
const PITCH_LIMIT: f32 = 1.5;

impl Default for Camera {
    // Looking at the origin from 600 units down +z
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            distance: 600.0,
            fov_y: 67.0f32.to_radians(),
            near: 0.1,
            min_distance: 20.0,
            max_distance: 5000.0,
            is_dragging: false,
            last_cursor_pos: Vec2::ZERO,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    // Camera position in world space
    pub fn eye(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let offset = vec3(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw);
        self.target + offset * self.distance
    }

    pub fn basis(&self) -> Basis {
        let forward = (self.target - self.eye()).normalize();
        let world_up = vec3(0.0, 1.0, 0.0);
        let right = forward.cross(world_up).normalize();
        let up = right.cross(forward);
        Basis { right, up, forward }
    }

    // Pixels per world unit at unit depth
    pub fn focal_length(&self, window_height: f32) -> f32 {
        (window_height / 2.0) / (self.fov_y / 2.0).tan()
    }

    // Project a world point to window coordinates, plus its depth. None behind the near plane.
    pub fn project(&self, point: Vec3, window_size: Vec2) -> Option<(Vec2, f32)> {
        let basis = self.basis();
        let relative = point - self.eye();
        let depth = relative.dot(basis.forward);
        if depth <= self.near {
            return None;
        }

        let focal = self.focal_length(window_size.y);
        let screen = vec2(relative.dot(basis.right), relative.dot(basis.up)) * (focal / depth);
        Some((screen, depth))
    }

    // Start dragging the camera
    pub fn start_drag(&mut self, position: Vec2) {
        self.last_cursor_pos = position;
        self.is_dragging = true;
    }

    // Orbit around the target while dragging
    pub fn drag(&mut self, position: Vec2) {
        if !self.is_dragging {
            return;
        }
        let delta = position - self.last_cursor_pos;
        self.orbit(delta);
        self.last_cursor_pos = position;
    }

    // End dragging
    pub fn end_drag(&mut self) {
        self.is_dragging = false;
    }

    pub fn orbit(&mut self, delta: Vec2) {
        self.yaw -= delta.x * ORBIT_SENSITIVITY;
        self.pitch = (self.pitch - delta.y * ORBIT_SENSITIVITY).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    // Positive scroll moves closer
    pub fn zoom(&mut self, scroll: f32) {
        let factor = 1.0 - scroll * 0.1;
        self.distance = (self.distance * factor).clamp(self.min_distance, self.max_distance);
    }

    // Move the orbit target along the view's forward and right axes
    pub fn fly(&mut self, forward: f32, right: f32) {
        let basis = self.basis();
        self.target += basis.forward * forward + basis.right * right;
    }
}
