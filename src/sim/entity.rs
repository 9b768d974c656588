//! Player and obstacle sprites
//!
//! Positions are top-left corners in screen pixels (y grows downward).
//! Collision uses a circle around the sprite center.

use glam::Vec2;

use super::clock::FrameClock;
use super::state::LaneLayout;
use crate::bound;
use crate::consts::*;
use crate::renderer::FrameBuilder;
use crate::renderer::vertex::colors;

/// Positioned, sized sprite
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    /// Relative move; deltas are multiplied by `scale`
    pub fn move_by(&mut self, dx: f32, dy: f32, scale: f32) {
        self.pos += Vec2::new(dx, dy) * scale;
    }

    /// Absolute move on the given axes, overwriting any drift on them
    pub fn move_to(&mut self, x: Option<f32>, y: Option<f32>) {
        if let Some(x) = x {
            self.pos.x = x;
        }
        if let Some(y) = y {
            self.pos.y = y;
        }
    }

    /// Keep the sprite fully on screen
    pub fn bound(&mut self, screen: Vec2) {
        self.pos = bound(self.pos, self.size, screen);
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Collision radius (mean of half-width and half-height)
    pub fn radius(&self) -> f32 {
        (self.size.x + self.size.y) / 4.0
    }
}

/// Input flags consumed by the player each frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveFlags {
    pub left: bool,
    pub right: bool,
}

/// The player's sprite (one per session)
#[derive(Debug, Clone)]
pub struct Player {
    pub body: Body,
    /// Horizontal speed (pixels per unit scale) in open mode
    pub speed: f32,
    pub color: [f32; 4],
}

impl Player {
    /// Spawn centered horizontally on the baseline (or on the player's lane)
    pub fn new(screen: Vec2, lanes: Option<&LaneLayout>, speed: f32, color: [f32; 4]) -> Self {
        let size = Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT);
        let center_x = match lanes {
            Some(l) => l.lane_center(l.player_lane),
            None => screen.x / 2.0,
        };
        let pos = Vec2::new(
            center_x - size.x / 2.0,
            screen.y - PLAYER_BASELINE_OFFSET - size.y / 2.0,
        );
        Self {
            body: Body::new(pos, size),
            speed,
            color,
        }
    }

    /// Per-frame movement: input-gated horizontal, fixed vertical bob
    ///
    /// In lane mode the horizontal axis is snapped to the lane center after
    /// moving, so held flags never drift the player off its lane.
    pub fn update(&mut self, flags: MoveFlags, lanes: Option<&LaneLayout>, clock: &FrameClock, screen: Vec2) {
        let dir = match (flags.left, flags.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        };
        if lanes.is_none() {
            self.body.move_by(dir * self.speed, 0.0, clock.scale);
        }

        let bob = (clock.count as f32 / 5.0).cos() / 30.0;
        self.body.move_by(0.0, bob, 1.0);

        if let Some(l) = lanes {
            let x = l.lane_center(l.player_lane) - self.body.size.x / 2.0;
            self.body.move_to(Some(x), None);
        }
        self.body.bound(screen);
    }

    pub fn draw(&self, frame: &mut FrameBuilder) {
        let b = &self.body;
        let tip = Vec2::new(b.pos.x + b.size.x / 2.0, b.pos.y);
        let left = Vec2::new(b.pos.x, b.pos.y + b.size.y);
        let right = b.pos + b.size;
        frame.triangle(tip, left, right, self.color);
        frame.circle(b.center() + Vec2::new(0.0, b.size.y * 0.15), b.size.x * 0.12, colors::PLAYER_CORE);
    }
}

/// A descending obstacle
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub body: Body,
    /// Lane index when playing in lane mode
    pub lane: Option<u32>,
}

impl Obstacle {
    /// Create an obstacle centered on `center`
    pub fn new(center: Vec2, lane: Option<u32>) -> Self {
        let size = Vec2::new(OBSTACLE_WIDTH, OBSTACLE_HEIGHT);
        Self {
            body: Body::new(center - size / 2.0, size),
            lane,
        }
    }

    /// Descend at the current game speed
    pub fn update(&mut self, game_speed: f32, clock: &FrameClock) {
        self.body.move_by(0.0, game_speed, clock.scale);
    }

    /// Fully below the south edge
    pub fn is_off_screen(&self, screen: Vec2) -> bool {
        self.body.pos.y > screen.y
    }

    pub fn draw(&self, frame: &mut FrameBuilder, color: [f32; 4]) {
        let r = self.body.radius();
        let c = self.body.center();
        frame.circle(c, r, color);
        frame.ring(c, r * 0.8, r, colors::OBSTACLE_OUTLINE);
    }
}
