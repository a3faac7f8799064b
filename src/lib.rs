//! Space Ninja - A color-matching stick runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (sticks, jump cycle, scoring)
//! - `config`: Immutable simulation configuration, loadable from JSON
//! - `grade`: End-of-run letter grades
//!
//! Rendering, input devices and audio live outside this crate. A presentation
//! layer drives [`sim::GameSimulation`] through `start`, `request_color_switch`
//! and `tick`, and reads back [`sim::Snapshot`]s and [`sim::GameEvent`]s.

pub mod config;
pub mod grade;
pub mod sim;

pub use config::{ConfigError, Palette, SimConfig, Swatch};
pub use grade::Grade;
pub use sim::{GameEvent, GamePhase, GameSimulation, Snapshot, TickInput, step};

/// Reference constants (defaults for [`SimConfig`])
pub mod consts {
    /// Fixed driver timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the driver will feed into the accumulator
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Scene dimensions
    pub const SCENE_WIDTH: f32 = 1200.0;
    pub const SCENE_HEIGHT: f32 = 800.0;

    /// Stick geometry
    pub const STICK_WIDTH: f32 = 90.0;
    pub const STICK_HEIGHT: f32 = 362.0;
    /// Gap between neighbouring sticks
    pub const STICK_MARGIN: f32 = 90.0;
    /// Sticks kept on the track at once
    pub const TRACK_CAPACITY: usize = 10;
    /// Seeded sticks sit lower than sticks spawned mid-run
    pub const INITIAL_STICK_Y: f32 = SCENE_HEIGHT - 252.0;
    pub const SPAWN_STICK_Y: f32 = SCENE_HEIGHT - STICK_HEIGHT;

    /// Ninja placement
    pub const NINJA_X: f32 = SCENE_WIDTH / 2.0;
    pub const NINJA_Y: f32 = SCENE_HEIGHT - 200.0;
    /// How far behind the ninja a stick can still be recolored
    pub const SWITCH_WINDOW_BEHIND: f32 = 150.0;

    /// Jump timeline (seconds / pixels)
    pub const JUMP_PERIOD: f32 = 1.0;
    pub const JUMP_HEIGHT: f32 = 100.0;

    /// Speed curve, in pixels per reference tick
    pub const BASE_SPEED: f32 = 2.0;
    pub const MAX_SPEED: f32 = 4.0;
    pub const SPEED_ACCEL: f32 = 0.02;
    /// Speed is recomputed on every multiple of this score
    pub const SPEED_STEP: u32 = 10;
    /// Tick rate the speed units are expressed against (16 ms frames)
    pub const REFERENCE_TICK_RATE: f32 = 62.5;
}
