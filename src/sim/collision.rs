//! Player/obstacle overlap tests

use super::entity::{Body, Obstacle};
use crate::distance;

/// Circle overlap between two bodies' collision radii
#[inline]
pub fn collide_distance(a: &Body, b: &Body) -> bool {
    distance(a.center(), b.center()) < a.radius() + b.radius()
}

/// Does `obstacle` hit the player this frame?
///
/// In lane mode (`player_lane` set) only an obstacle in the player's lane can
/// collide; lane-less obstacles fall back to the distance test alone.
pub fn obstacle_hits_player(obstacle: &Obstacle, player: &Body, player_lane: Option<u32>) -> bool {
    if let (Some(lane), Some(own)) = (player_lane, obstacle.lane) {
        if lane != own {
            return false;
        }
    }
    collide_distance(&obstacle.body, player)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;

    fn body(x: f32, y: f32, w: f32, h: f32) -> Body {
        Body::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn test_overlap_and_miss() {
        let a = body(0.0, 0.0, 40.0, 40.0);
        assert!(collide_distance(&a, &body(30.0, 0.0, 40.0, 40.0)));
        assert!(!collide_distance(&a, &body(41.0, 0.0, 40.0, 40.0)));
        // Touching exactly is not a hit
        assert!(!collide_distance(&a, &body(40.0, 0.0, 40.0, 40.0)));
    }

    #[test]
    fn test_lane_gate() {
        let player = body(0.0, 0.0, 40.0, 40.0);
        let mut obstacle = Obstacle::new(Vec2::new(20.0, 20.0), Some(1));
        assert!(!obstacle_hits_player(&obstacle, &player, Some(0)));
        assert!(obstacle_hits_player(&obstacle, &player, Some(1)));
        obstacle.lane = None;
        assert!(obstacle_hits_player(&obstacle, &player, Some(0)));
    }

    proptest! {
        #[test]
        fn prop_collide_distance_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            aw in 1.0f32..100.0, ah in 1.0f32..100.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            bw in 1.0f32..100.0, bh in 1.0f32..100.0,
        ) {
            let a = body(ax, ay, aw, ah);
            let b = body(bx, by, bw, bh);
            prop_assert_eq!(collide_distance(&a, &b), collide_distance(&b, &a));
        }
    }
}
