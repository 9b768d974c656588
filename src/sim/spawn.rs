//! Obstacle spawn policy
//!
//! Spawns happen on a fixed frame period, or whenever the live count is below
//! a ceiling that ramps up with elapsed frames. A candidate too close to any
//! live obstacle is dropped for the tick (no retry).

use glam::Vec2;
use rand::Rng;

use super::entity::Obstacle;
use super::state::LaneLayout;
use crate::consts::*;
use crate::distance;

/// When and where obstacles appear
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnPolicy {
    /// Periodic spawn every `interval` frames (0 disables)
    pub interval: u64,
    /// Frames per +1 step of the density ceiling
    pub ramp_frames: u64,
    /// Minimum spacing, in player widths, between a candidate and live obstacles
    pub crowd_factor: f32,
}

impl Default for SpawnPolicy {
    fn default() -> Self {
        Self {
            interval: 60,
            ramp_frames: 300,
            crowd_factor: 3.0,
        }
    }
}

impl SpawnPolicy {
    /// Density ceiling after `frame` frames of play
    pub fn ramp_ceiling(&self, frame: u64) -> usize {
        let steps = if self.ramp_frames == 0 {
            MAX_RAMP_OBSTACLES as u64
        } else {
            frame / self.ramp_frames
        };
        (1 + steps as usize).min(MAX_RAMP_OBSTACLES)
    }

    pub fn should_spawn(&self, frame: u64, live: usize) -> bool {
        let periodic = self.interval > 0 && frame.is_multiple_of(self.interval);
        periodic || live < self.ramp_ceiling(frame)
    }

    /// Random spawn center just above the top edge, plus its lane
    pub fn pick_candidate<R: Rng>(
        &self,
        rng: &mut R,
        screen: Vec2,
        lanes: Option<&LaneLayout>,
    ) -> (Vec2, Option<u32>) {
        let y = -OBSTACLE_HEIGHT / 2.0;
        match lanes {
            Some(layout) => {
                let lane = rng.random_range(0..layout.lanes);
                (Vec2::new(layout.lane_center(lane), y), Some(lane))
            }
            None => {
                let half = OBSTACLE_WIDTH / 2.0;
                let x = if screen.x > OBSTACLE_WIDTH {
                    rng.random_range(half..=screen.x - half)
                } else {
                    screen.x / 2.0
                };
                (Vec2::new(x, y), None)
            }
        }
    }

    /// Is `candidate` within the crowd radius of any live obstacle?
    pub fn is_crowded(&self, candidate: Vec2, obstacles: &[Obstacle], player_width: f32) -> bool {
        let min_gap = self.crowd_factor * player_width;
        obstacles
            .iter()
            .any(|o| distance(candidate, o.body.center()) < min_gap)
    }

    /// Run the policy for one frame; returns true if an obstacle was added
    pub fn try_spawn<R: Rng>(
        &self,
        frame: u64,
        rng: &mut R,
        screen: Vec2,
        lanes: Option<&LaneLayout>,
        obstacles: &mut Vec<Obstacle>,
    ) -> bool {
        if !self.should_spawn(frame, obstacles.len()) {
            return false;
        }
        let (candidate, lane) = self.pick_candidate(rng, screen, lanes);
        if self.is_crowded(candidate, obstacles, PLAYER_WIDTH) {
            log::debug!("Spawn rejected at ({:.0}, {:.0}): crowded", candidate.x, candidate.y);
            return false;
        }
        obstacles.push(Obstacle::new(candidate, lane));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const SCREEN: Vec2 = Vec2::new(400.0, 800.0);

    #[test]
    fn test_ramp_ceiling_capped() {
        let policy = SpawnPolicy::default();
        assert_eq!(policy.ramp_ceiling(0), 1);
        assert_eq!(policy.ramp_ceiling(300), 2);
        assert_eq!(policy.ramp_ceiling(1_000_000), MAX_RAMP_OBSTACLES);
    }

    #[test]
    fn test_should_spawn_periodic_or_below_ceiling() {
        let policy = SpawnPolicy::default();
        assert!(policy.should_spawn(60, 100));
        assert!(policy.should_spawn(1, 0));
        assert!(!policy.should_spawn(1, 1));
    }

    #[test]
    fn test_candidate_inside_screen() {
        let policy = SpawnPolicy::default();
        let mut rng = Pcg32::seed_from_u64(9);
        for _ in 0..100 {
            let (c, lane) = policy.pick_candidate(&mut rng, SCREEN, None);
            assert!(lane.is_none());
            assert!(c.x >= OBSTACLE_WIDTH / 2.0 && c.x <= SCREEN.x - OBSTACLE_WIDTH / 2.0);
            assert!(c.y < 0.0);
        }
    }

    #[test]
    fn test_lane_candidate_on_lane_center() {
        let policy = SpawnPolicy::default();
        let layout = LaneLayout::new(3, 300.0);
        let mut rng = Pcg32::seed_from_u64(10);
        for _ in 0..50 {
            let (c, lane) = policy.pick_candidate(&mut rng, SCREEN, Some(&layout));
            let lane = lane.unwrap();
            assert!(lane < 3);
            assert_eq!(c.x, layout.lane_center(lane));
        }
    }

    #[test]
    fn test_crowded_candidate_rejected() {
        let policy = SpawnPolicy::default();
        let layout = LaneLayout::new(1, SCREEN.x);
        let mut rng = Pcg32::seed_from_u64(11);
        let mut obstacles = Vec::new();

        assert!(policy.try_spawn(0, &mut rng, SCREEN, Some(&layout), &mut obstacles));
        assert_eq!(obstacles.len(), 1);

        // Single lane: every candidate lands on the live obstacle
        for frame in 1..5 {
            assert!(!policy.try_spawn(frame * 60, &mut rng, SCREEN, Some(&layout), &mut obstacles));
            assert_eq!(obstacles.len(), 1);
        }
    }
}
