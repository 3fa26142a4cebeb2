/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct that contains performance metrics
 * and other debug information to be displayed in the UI.
 *
 * Includes metrics for:
 * - FPS (frames per second)
 * - Frame time and time spent inside the flock step
 * - Number of boids drawn this frame
 * - A summary of the flock's motion
 */

use std::cell::Cell;
use std::time::Duration;

use crate::physics::FlockStats;

// Debug information to display
#[derive(Debug, Clone, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub step_time: Duration,
    pub steps: u64,
    // Written by the renderer, which only gets a shared borrow of the model
    pub visible_boids: Cell<usize>,
    pub stats: FlockStats,
}

impl DebugInfo {
    // One line per metric, shared by the egui panel and the on-screen overlay
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("FPS: {:.1}", self.fps),
            format!("Frame time: {:.2} ms", self.frame_time.as_secs_f64() * 1000.0),
            format!("Step time: {:.2} ms", self.step_time.as_secs_f64() * 1000.0),
            format!("Steps: {}", self.steps),
            format!("Boids: {} ({} drawn)", self.stats.count, self.visible_boids.get()),
            format!(
                "Speed: mean {:.1} / max {:.1}",
                self.stats.mean_speed, self.stats.max_speed
            ),
            format!("Farthest from origin: {:.1}", self.stats.max_distance),
        ]
    }
}
