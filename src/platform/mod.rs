//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame scheduling (requestAnimationFrame on web, manual stepping elsewhere)
//! - Input events
//! - Visibility detection
//! - The DOM overlay

pub mod scheduler;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use scheduler::{FrameHandle, FrameScheduler, GameLoop, ManualScheduler, Presenter};
