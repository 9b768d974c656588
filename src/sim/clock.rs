//! Frame clock
//!
//! Movement is scaled by `scale` rather than raw elapsed time, so motion
//! stays resolution-independent and a long stall can't teleport entities.

use crate::consts::*;

/// Per-frame timing record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameClock {
    /// Monotonic tick id
    pub count: u64,
    /// Timestamp (ms) of the last tick
    pub time: f64,
    /// Elapsed ms since the previous tick (0 right after a reset)
    pub rate: f64,
    /// Motion multiplier derived from `rate` and screen height
    pub scale: f32,
    has_baseline: bool,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to `now_ms` for a screen of the given height
    pub fn advance(&mut self, now_ms: f64, screen_height: f32) {
        self.rate = if self.has_baseline {
            (now_ms - self.time).max(0.0)
        } else {
            0.0
        };
        self.time = now_ms;
        self.has_baseline = true;
        self.count += 1;

        let rate_factor = ((self.rate / BASE_FRAME_MS) as f32).min(MAX_RATE_FACTOR);
        self.scale = rate_factor * (screen_height / BASE_SCREEN_HEIGHT);
    }

    /// Forget the previous timestamp (used on resume) so the next tick has `rate = 0`
    pub fn reset_baseline(&mut self) {
        self.has_baseline = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_has_zero_rate() {
        let mut clock = FrameClock::new();
        clock.advance(1000.0, BASE_SCREEN_HEIGHT);
        assert_eq!(clock.count, 1);
        assert_eq!(clock.rate, 0.0);
        assert_eq!(clock.scale, 0.0);
    }

    #[test]
    fn test_scale_follows_rate_and_screen() {
        let mut clock = FrameClock::new();
        clock.advance(0.0, BASE_SCREEN_HEIGHT);
        clock.advance(BASE_FRAME_MS, BASE_SCREEN_HEIGHT);
        assert!((clock.scale - 1.0).abs() < 1e-4);

        clock.advance(2.0 * BASE_FRAME_MS, BASE_SCREEN_HEIGHT * 2.0);
        assert!((clock.scale - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_long_stall_capped() {
        let mut clock = FrameClock::new();
        clock.advance(0.0, BASE_SCREEN_HEIGHT);
        clock.advance(10_000.0, BASE_SCREEN_HEIGHT);
        assert_eq!(clock.scale, MAX_RATE_FACTOR);
    }

    #[test]
    fn test_reset_baseline_avoids_time_skip() {
        let mut clock = FrameClock::new();
        clock.advance(0.0, BASE_SCREEN_HEIGHT);
        clock.reset_baseline();
        clock.advance(60_000.0, BASE_SCREEN_HEIGHT);
        assert_eq!(clock.rate, 0.0);
        assert_eq!(clock.count, 2);
    }
}
