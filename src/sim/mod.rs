//! Frame-driven simulation module
//!
//! All gameplay logic lives here:
//! - Seeded RNG only (`Pcg32`), so runs are reproducible
//! - Motion scaled by the frame clock, never by raw time
//! - State mutated only through `GameState::set_state`
//! - Collaborators (audio, overlay, assets) reached through traits

pub mod clock;
pub mod collision;
pub mod effects;
pub mod emitter;
pub mod entity;
pub mod game;
pub mod param;
pub mod spawn;
pub mod state;
pub mod throttle;

pub use clock::FrameClock;
pub use collision::{collide_distance, obstacle_hits_player};
pub use effects::{BlastWave, Burst, Effect, EffectList, StarStream};
pub use entity::{Body, MoveFlags, Obstacle, Player};
pub use game::{FrameOutcome, Game, ScoreReporter, TickInput};
pub use param::Param;
pub use spawn::SpawnPolicy;
pub use state::{GameState, LaneLayout, Phase, StateUpdate};
pub use throttle::Throttle;
