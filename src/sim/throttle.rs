//! Rate limiter for side effects
//!
//! A throttle fires at most once per window; calls inside the window are
//! dropped, not queued.

/// Last-fired timestamp plus a fixed window (both in ms)
#[derive(Debug, Clone, PartialEq)]
pub struct Throttle {
    window_ms: f64,
    last_fired: Option<f64>,
}

impl Throttle {
    pub fn new(window_ms: f64) -> Self {
        Self {
            window_ms,
            last_fired: None,
        }
    }

    /// Returns true (and records `now_ms`) if the window has elapsed
    pub fn try_fire(&mut self, now_ms: f64) -> bool {
        match self.last_fired {
            Some(last) if now_ms - last < self.window_ms => false,
            _ => {
                self.last_fired = Some(now_ms);
                true
            }
        }
    }

    /// Forget the last firing (new session)
    pub fn reset(&mut self) {
        self.last_fired = None;
    }
}
