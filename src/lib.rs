//! Dodgefall - a descending-obstacle dodging arcade game
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (effects engine, entities, spawn/collision, phases)
//! - `renderer`: Vertex generation and the WebGPU pipeline
//! - `platform`: Frame scheduling and browser glue
//! - `audio` / `overlay` / `assets`: Narrow collaborator interfaces
//! - `settings`: Data-driven game tuning

pub mod assets;
pub mod audio;
pub mod color;
pub mod error;
pub mod overlay;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::GameError;
pub use settings::{GameConfig, QualityPreset};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Reference screen height the motion scale is normalized against
    pub const BASE_SCREEN_HEIGHT: f32 = 800.0;
    /// Frame duration (ms) that yields a rate factor of 1.0
    pub const BASE_FRAME_MS: f64 = 1000.0 / 60.0;
    /// Upper bound on the rate factor so a stalled tab can't teleport entities
    pub const MAX_RATE_FACTOR: f32 = 3.0;

    /// Player sprite defaults
    pub const PLAYER_WIDTH: f32 = 48.0;
    pub const PLAYER_HEIGHT: f32 = 48.0;
    /// Distance of the player's baseline from the bottom edge
    pub const PLAYER_BASELINE_OFFSET: f32 = 120.0;

    /// Obstacle sprite defaults
    pub const OBSTACLE_WIDTH: f32 = 44.0;
    pub const OBSTACLE_HEIGHT: f32 = 44.0;

    /// Hard cap for the early-game density ramp
    pub const MAX_RAMP_OBSTACLES: usize = 6;

    /// Burst shards decay below this radius
    pub const SHARD_MIN_RADIUS: f32 = 1.0;
    /// Blast waves decay below this stroke width
    pub const WAVE_MIN_WIDTH: f32 = 1.0;
    /// Fixed per-tick hue decrement for stream stars
    pub const STAR_HUE_DECREMENT: f32 = 0.5;
    /// Per-tick hue drift for burst shards and blast waves
    pub const HUE_DRIFT: f32 = 2.0;
    /// Elements fading below this alpha are dropped
    pub const MIN_ALPHA: f32 = 0.01;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Clamp a value into `[min, max]`, tolerating inverted bounds
#[inline]
pub fn clamp_to(value: f32, min: f32, max: f32) -> f32 {
    if min > max {
        value.clamp(max, min)
    } else {
        value.clamp(min, max)
    }
}

/// Keep a box of `size` (top-left at `pos`) fully inside `[0, screen]`
#[inline]
pub fn bound(pos: Vec2, size: Vec2, screen: Vec2) -> Vec2 {
    Vec2::new(
        clamp_to(pos.x, 0.0, screen.x - size.x),
        clamp_to(pos.y, 0.0, screen.y - size.y),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bound_keeps_box_on_screen() {
        let screen = Vec2::new(400.0, 800.0);
        let size = Vec2::new(40.0, 40.0);

        assert_eq!(bound(Vec2::new(-10.0, 900.0), size, screen), Vec2::new(0.0, 760.0));
        assert_eq!(bound(Vec2::new(100.0, 100.0), size, screen), Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_clamp_to_inverted_bounds() {
        assert_eq!(clamp_to(5.0, 10.0, 0.0), 5.0);
        assert_eq!(clamp_to(-5.0, 10.0, 0.0), 0.0);
    }

    #[test]
    fn test_distance() {
        assert!((distance(Vec2::ZERO, Vec2::new(3.0, 4.0)) - 5.0).abs() < 1e-6);
    }
}
