//! Game state record and its single mutation entry point
//!
//! Every change goes through `GameState::set_state`, which snapshots the
//! current phase into `prev` before merging the update. Phase-entry actions
//! compare `prev` against `current` to run exactly once.

use serde::{Deserialize, Serialize};

/// Lifecycle phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Assets are being acquired; no simulation
    Loading,
    /// Idle, waiting for a start trigger
    Ready,
    /// Active gameplay
    Play,
    /// Death sequence draining, then score report
    Over,
    /// Terminal; the loop stops scheduling frames
    Stop,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Loading => "loading",
            Phase::Ready => "ready",
            Phase::Play => "play",
            Phase::Over => "over",
            Phase::Stop => "stop",
        }
    }
}

/// Lane-mode layout parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneLayout {
    pub lanes: u32,
    pub player_lane: u32,
    /// Lane width in pixels
    pub lane_size: f32,
}

impl LaneLayout {
    /// Evenly split `screen_width` into `lanes` lanes, player in the middle
    pub fn new(lanes: u32, screen_width: f32) -> Self {
        let lanes = lanes.max(1);
        Self {
            lanes,
            player_lane: lanes / 2,
            lane_size: screen_width / lanes as f32,
        }
    }

    /// Horizontal center of a lane
    pub fn lane_center(&self, lane: u32) -> f32 {
        self.lane_size * (lane.min(self.lanes - 1) as f32 + 0.5)
    }

    /// Lane one step left/right of the player's, clamped to the edges
    pub fn shifted(&self, delta: i32) -> u32 {
        (self.player_lane as i64 + delta as i64).clamp(0, self.lanes as i64 - 1) as u32
    }
}

/// The mutable game record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub current: Phase,
    /// Phase that was `current` right before the last `set_state`
    pub prev: Phase,
    pub score: u64,
    pub lives: i32,
    /// Obstacle descent speed; never decreases during a run
    pub game_speed: f32,
    pub muted: bool,
    pub paused: bool,
    /// `None` in open mode
    pub lanes: Option<LaneLayout>,
}

/// Partial update merged by `set_state`; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateUpdate {
    pub current: Option<Phase>,
    pub score: Option<u64>,
    pub lives: Option<i32>,
    pub game_speed: Option<f32>,
    pub muted: Option<bool>,
    pub paused: Option<bool>,
    pub player_lane: Option<u32>,
    pub lane_size: Option<f32>,
}

impl StateUpdate {
    pub fn phase(phase: Phase) -> Self {
        Self {
            current: Some(phase),
            ..Default::default()
        }
    }

    pub fn with_score(mut self, score: u64) -> Self {
        self.score = Some(score);
        self
    }

    pub fn with_lives(mut self, lives: i32) -> Self {
        self.lives = Some(lives);
        self
    }

    pub fn with_game_speed(mut self, speed: f32) -> Self {
        self.game_speed = Some(speed);
        self
    }

    pub fn with_muted(mut self, muted: bool) -> Self {
        self.muted = Some(muted);
        self
    }

    pub fn with_paused(mut self, paused: bool) -> Self {
        self.paused = Some(paused);
        self
    }

    pub fn with_player_lane(mut self, lane: u32) -> Self {
        self.player_lane = Some(lane);
        self
    }

    pub fn with_lane_size(mut self, size: f32) -> Self {
        self.lane_size = Some(size);
        self
    }
}

impl GameState {
    pub fn new(lives: i32, game_speed: f32, muted: bool, lanes: Option<LaneLayout>) -> Self {
        Self {
            current: Phase::Loading,
            prev: Phase::Loading,
            score: 0,
            lives,
            game_speed,
            muted,
            paused: false,
            lanes,
        }
    }

    /// Merge `update`, recording the pre-call phase in `prev`
    pub fn set_state(&mut self, update: StateUpdate) {
        self.prev = self.current;

        if let Some(phase) = update.current {
            if phase != self.current {
                log::info!("Phase {} -> {}", self.current.as_str(), phase.as_str());
            }
            self.current = phase;
        }
        if let Some(score) = update.score {
            self.score = score;
        }
        if let Some(lives) = update.lives {
            self.lives = lives;
        }
        if let Some(speed) = update.game_speed {
            self.game_speed = speed;
        }
        if let Some(muted) = update.muted {
            self.muted = muted;
        }
        if let Some(paused) = update.paused {
            self.paused = paused;
        }
        if let Some(layout) = self.lanes.as_mut() {
            if let Some(lane) = update.player_lane {
                layout.player_lane = lane.min(layout.lanes - 1);
            }
            if let Some(size) = update.lane_size {
                layout.lane_size = size;
            }
        }
    }

    /// True on the first observation of `phase` since it was entered
    pub fn just_entered(&self, phase: Phase) -> bool {
        self.current == phase && self.prev != phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_state_snapshots_prev() {
        let mut state = GameState::new(3, 4.0, false, None);
        state.set_state(StateUpdate::phase(Phase::Ready));
        assert_eq!(state.prev, Phase::Loading);
        assert_eq!(state.current, Phase::Ready);

        // Rapid calls within one tick: prev always tracks the pre-call phase
        state.set_state(StateUpdate::phase(Phase::Play));
        state.set_state(StateUpdate::default().with_score(10));
        assert_eq!(state.prev, Phase::Play);
        assert_eq!(state.current, Phase::Play);
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_just_entered_fires_once() {
        let mut state = GameState::new(3, 4.0, false, None);
        state.set_state(StateUpdate::phase(Phase::Ready));
        assert!(state.just_entered(Phase::Ready));
        state.set_state(StateUpdate::phase(Phase::Ready));
        assert!(!state.just_entered(Phase::Ready));
    }

    #[test]
    fn test_partial_update_leaves_other_fields() {
        let mut state = GameState::new(3, 4.0, false, None);
        state.set_state(StateUpdate::default().with_lives(2).with_muted(true));
        assert_eq!(state.lives, 2);
        assert!(state.muted);
        assert_eq!(state.score, 0);
        assert_eq!(state.game_speed, 4.0);
        assert_eq!(state.current, Phase::Loading);
    }

    #[test]
    fn test_player_lane_clamped() {
        let mut state = GameState::new(3, 4.0, false, Some(LaneLayout::new(3, 300.0)));
        state.set_state(StateUpdate::default().with_player_lane(9));
        assert_eq!(state.lanes.as_ref().unwrap().player_lane, 2);
    }

    #[test]
    fn test_lane_geometry() {
        let layout = LaneLayout::new(4, 400.0);
        assert_eq!(layout.player_lane, 2);
        assert_eq!(layout.lane_center(0), 50.0);
        assert_eq!(layout.lane_center(3), 350.0);
        assert_eq!(layout.shifted(-5), 0);
        assert_eq!(layout.shifted(1), 3);
        assert_eq!(layout.shifted(4), 3);
    }
}
