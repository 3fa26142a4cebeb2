/*
 * Renderer Module
 *
 * This module draws the flock through the orbit camera.
 * It draws the boundary sphere, the boids and debug information.
 *
 * Each boid is a triangle at its projected position, pointing along its
 * projected heading and scaled by perspective. Boids behind the camera
 * are skipped.
 */

use log::warn;
use nannou::prelude::*;

use crate::app::Model;
use crate::boid::Boid;
use crate::boundary::Boundary;
use crate::camera::Camera;
use crate::BOID_SIZE;

// Smallest on-screen half-length of a boid, in pixels
const MIN_BOID_PIXELS: f32 = 1.5;

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(BLACK);

    let window_rect = app.window_rect();
    let window_size = window_rect.wh();
    let params = model.flock.params();

    draw_boundary(&draw, &model.camera, &params.boundary, window_size);

    let mut drawn = 0;
    for boid in model.flock.boids() {
        if draw_boid(&draw, &model.camera, boid, window_size) {
            drawn += 1;
        }
    }
    model.debug_info.visible_boids.set(drawn);

    if model.view.show_debug {
        if let Some(first) = model.flock.boids().first() {
            let radii = [
                (params.separation_radius, RED),
                (params.alignment_radius, GREEN),
                (params.cohesion_radius, BLUE),
            ];
            for (radius, color) in radii {
                draw_sphere_outline(&draw, &model.camera, first.position, radius, window_size, color);
            }
        }
        draw_debug_text(&draw, model, window_rect);
    }

    if let Err(err) = draw.to_frame(app, &frame) {
        warn!("failed to draw frame: {:?}", err);
    }
    if let Err(err) = model.egui.draw_to_frame(&frame) {
        warn!("failed to draw UI: {:?}", err);
    }
}

// Projected outline of a sphere, approximated by its centre's depth
fn draw_sphere_outline(
    draw: &Draw,
    camera: &Camera,
    centre: Vec3,
    radius: f32,
    window_size: Vec2,
    color: Rgb<u8>,
) {
    if let Some((screen, depth)) = camera.project(centre, window_size) {
        let screen_radius = radius * camera.focal_length(window_size.y) / depth;
        draw.ellipse()
            .xy(screen)
            .radius(screen_radius)
            .no_fill()
            .stroke(color)
            .stroke_weight(1.0);
    }
}

fn draw_boundary(draw: &Draw, camera: &Camera, boundary: &Boundary, window_size: Vec2) {
    if let Some((screen, depth)) = camera.project(Vec3::ZERO, window_size) {
        let screen_radius = boundary.inner_radius() * camera.focal_length(window_size.y) / depth;
        draw.ellipse()
            .xy(screen)
            .radius(screen_radius)
            .no_fill()
            .stroke(rgba(0.3, 0.3, 0.3, 1.0))
            .stroke_weight(1.0);
    }
}

// Returns false when the boid is behind the camera
fn draw_boid(draw: &Draw, camera: &Camera, boid: &Boid, window_size: Vec2) -> bool {
    let (screen, depth) = match camera.project(boid.position, window_size) {
        Some(projected) => projected,
        None => return false,
    };

    // Orientation from the projected heading; still boids point right
    let nose = boid.position + boid.heading() * BOID_SIZE;
    let angle = match camera.project(nose, window_size) {
        Some((nose_screen, _)) if nose_screen != screen => {
            let dir = nose_screen - screen;
            dir.y.atan2(dir.x)
        }
        _ => 0.0,
    };

    let size = (BOID_SIZE * camera.focal_length(window_size.y) / depth).max(MIN_BOID_PIXELS);
    let points = [
        pt2(size, 0.0),
        pt2(-size, size / 2.0),
        pt2(-size, -size / 2.0),
    ];

    // Fade with distance from the camera
    let brightness = (camera.distance / depth).clamp(0.35, 1.0);
    draw.polygon()
        .color(rgba(0.86 * brightness, 0.86 * brightness, 0.86 * brightness, 1.0))
        .points(points)
        .xy(screen)
        .rotate(angle);
    true
}

fn draw_debug_text(draw: &Draw, model: &Model, window_rect: Rect) {
    let line_height = 20.0;
    let text_x = window_rect.left() + 150.0;
    let text_y = window_rect.top() - 20.0;

    for (i, text) in model.debug_info.lines().iter().enumerate() {
        draw.text(text)
            .x_y(text_x, text_y - i as f32 * line_height)
            .w(280.0)
            .left_justify()
            .color(WHITE)
            .font_size(14);
    }
}
