//! Frame scheduling
//!
//! The loop never calls the host's frame primitive directly; it goes through
//! `FrameScheduler`, so tests can step frames by hand.

use crate::sim::{FrameOutcome, Game, TickInput};

/// Handle of a requested frame (matches the browser's rAF id)
pub type FrameHandle = i32;

/// Host frame-request primitive
pub trait FrameScheduler {
    /// Ask for one more frame
    fn request(&mut self) -> FrameHandle;

    /// Drop a requested frame before it runs
    fn cancel(&mut self, handle: FrameHandle);
}

/// Deterministic scheduler: frames run only when the caller says so
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next: FrameHandle,
    pending: Vec<FrameHandle>,
    pub cancelled: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requested frames not yet run or cancelled
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Take the oldest requested frame, if any
    pub fn pop(&mut self) -> Option<FrameHandle> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }
}

impl FrameScheduler for ManualScheduler {
    fn request(&mut self) -> FrameHandle {
        self.next += 1;
        self.pending.push(self.next);
        self.next
    }

    fn cancel(&mut self, handle: FrameHandle) {
        if let Some(i) = self.pending.iter().position(|h| *h == handle) {
            self.pending.remove(i);
            self.cancelled += 1;
        }
    }
}

/// Called after every frame with the finished game (e.g. to render)
pub type Presenter = Box<dyn FnMut(&Game)>;

/// Drives a `Game` through a scheduler and buffers input between frames
pub struct GameLoop<S: FrameScheduler> {
    pub game: Game,
    pub scheduler: S,
    pending: Option<FrameHandle>,
    input: TickInput,
    presenter: Option<Presenter>,
}

impl<S: FrameScheduler> GameLoop<S> {
    pub fn new(game: Game, scheduler: S) -> Self {
        Self {
            game,
            scheduler,
            pending: None,
            input: TickInput::default(),
            presenter: None,
        }
    }

    pub fn with_presenter(mut self, presenter: impl FnMut(&Game) + 'static) -> Self {
        self.presenter = Some(Box::new(presenter));
        self
    }

    /// Request the first frame
    pub fn start(&mut self) {
        if self.pending.is_none() {
            self.pending = Some(self.scheduler.request());
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.pending.is_some()
    }

    /// Body of a scheduled frame
    pub fn run_frame(&mut self, now_ms: f64) -> FrameOutcome {
        self.pending = None;
        let input = self.input;
        self.input.tap = false;

        let outcome = self.game.frame(now_ms, input);
        if let Some(present) = self.presenter.as_mut() {
            present(&self.game);
        }
        if outcome == FrameOutcome::Continue {
            self.pending = Some(self.scheduler.request());
        }
        outcome
    }

    // === Input ===

    pub fn set_left(&mut self, held: bool) {
        self.input.left = held;
    }

    pub fn set_right(&mut self, held: bool) {
        self.input.right = held;
    }

    /// Queue a tap for the next frame
    pub fn tap(&mut self) {
        self.input.tap = true;
    }

    // === Commands ===

    /// Pause cancels the next frame outright; resume reschedules it
    pub fn toggle_pause(&mut self) {
        if !self.game.toggle_pause() {
            return;
        }
        if self.game.state().paused {
            if let Some(handle) = self.pending.take() {
                self.scheduler.cancel(handle);
            }
        } else {
            self.start();
        }
    }

    pub fn toggle_mute(&mut self) {
        self.game.toggle_mute();
    }

    pub fn stop(&mut self) {
        self.game.stop();
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
    }
}
