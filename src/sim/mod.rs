//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through `tick`
//! - Seeded RNG only (visual styles)
//! - Stable iteration order (sticks kept left to right)
//! - No rendering or platform dependencies

pub mod ninja;
pub mod state;
pub mod stick;
pub mod tick;
pub mod track;

pub use ninja::{JumpPhase, NinjaCycle};
pub use state::{
    GameEvent, GamePhase, GameSimulation, MAX_QUEUED_EVENTS, NinjaView, RunResult, Snapshot, StickView,
};
pub use stick::{EffectStyle, Stick, StickColor};
pub use tick::{TickInput, step};
pub use track::{RecycleReport, StickTrack};
