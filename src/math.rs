/*
 * Vector Math Module
 *
 * Small helpers shared by the steering rules and the boundary check.
 * Every helper treats a zero-length input as a no-op so a degenerate
 * frame never feeds NaN back into the flock.
 */

use nannou::prelude::*;

// Unit vector in the direction of `v`, or zero when `v` has no length
#[inline]
pub fn normalize_or_zero(v: Vec3) -> Vec3 {
    let length = v.length();
    if length > 0.0 && length.is_finite() {
        v / length
    } else {
        Vec3::ZERO
    }
}

// Scale `v` down to `max` if it is longer, otherwise return it unchanged
#[inline]
pub fn clamp_magnitude(v: Vec3, max: f32) -> Vec3 {
    let length_squared = v.length_squared();
    if length_squared > max * max && length_squared > 0.0 {
        v * (max / length_squared.sqrt())
    } else {
        v
    }
}

// Reynolds steering: desired = direction * max_speed, steer = desired - velocity
#[inline]
pub fn steer_towards(direction: Vec3, velocity: Vec3, max_speed: f32, max_force: f32) -> Vec3 {
    let desired = normalize_or_zero(direction) * max_speed;
    clamp_magnitude(desired - velocity, max_force)
}
