//! Simulation configuration
//!
//! Geometry, timing, speed curve and palette for one [`GameSimulation`].
//! Handed to the simulation at construction and never mutated afterwards.
//!
//! [`GameSimulation`]: crate::sim::GameSimulation

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating a [`SimConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("palette must contain at least one color")]
    EmptyPalette,
    #[error("{field} must be positive and finite, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("track capacity must be non-zero")]
    ZeroCapacity,
    #[error("speed step must be non-zero")]
    ZeroSpeedStep,
    #[error("max speed {max} is below base speed {base}")]
    MaxBelowBase { base: f32, max: f32 },
}

/// One named palette color
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swatch {
    pub name: String,
    /// `#rrggbb`, passed through to the renderer untouched
    pub hex: String,
}

impl Swatch {
    pub fn new(name: &str, hex: &str) -> Self {
        Self {
            name: name.to_string(),
            hex: hex.to_string(),
        }
    }
}

/// Ordered color cycle shared by the ninja and the sticks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub colors: Vec<Swatch>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: vec![
                Swatch::new("Red", "#E42334"),
                Swatch::new("Green", "#009c46"),
                Swatch::new("Blue", "#0079c9"),
            ],
        }
    }
}

impl Palette {
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Swatch> {
        self.colors.get(index)
    }
}

/// Immutable simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Scene ===
    pub scene_width: f32,
    pub scene_height: f32,

    // === Sticks ===
    pub stick_width: f32,
    pub stick_height: f32,
    /// Gap between neighbouring sticks
    pub stick_margin: f32,
    /// Number of sticks the track keeps alive
    pub track_capacity: usize,
    /// Y for the sticks seeded by `start`
    pub initial_stick_y: f32,
    /// Y for sticks spawned while running
    pub spawn_stick_y: f32,

    // === Ninja ===
    pub ninja_x: f32,
    pub ninja_y: f32,
    /// Sticks whose right edge is further behind the ninja than this can't be recolored
    pub switch_window_behind: f32,
    /// Seconds per jump (rise + fall)
    pub jump_period: f32,
    /// Apex height of the jump in pixels
    pub jump_height: f32,

    // === Difficulty ===
    /// Starting speed (pixels per reference tick)
    pub base_speed: f32,
    pub max_speed: f32,
    /// Speed added per point of score
    pub speed_accel: f32,
    /// Speed is recomputed whenever score is a multiple of this
    pub speed_step: u32,
    /// Ticks per second the speed units refer to
    pub reference_tick_rate: f32,

    // === Presentation hints ===
    /// Seed for per-stick visual styles
    pub seed: u64,
    pub palette: Palette,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            scene_width: SCENE_WIDTH,
            scene_height: SCENE_HEIGHT,

            stick_width: STICK_WIDTH,
            stick_height: STICK_HEIGHT,
            stick_margin: STICK_MARGIN,
            track_capacity: TRACK_CAPACITY,
            initial_stick_y: INITIAL_STICK_Y,
            spawn_stick_y: SPAWN_STICK_Y,

            ninja_x: NINJA_X,
            ninja_y: NINJA_Y,
            switch_window_behind: SWITCH_WINDOW_BEHIND,
            jump_period: JUMP_PERIOD,
            jump_height: JUMP_HEIGHT,

            base_speed: BASE_SPEED,
            max_speed: MAX_SPEED,
            speed_accel: SPEED_ACCEL,
            speed_step: SPEED_STEP,
            reference_tick_rate: REFERENCE_TICK_RATE,

            seed: 0,
            palette: Palette::default(),
        }
    }
}

impl SimConfig {
    /// Distance between the left edges of neighbouring sticks
    pub fn spacing(&self) -> f32 {
        self.stick_width + self.stick_margin
    }

    /// Sticks left of this x are recycled
    pub fn removal_threshold(&self) -> f32 {
        -(self.stick_width + self.stick_margin)
    }

    /// Speed for a given score, clamped to `max_speed`
    pub fn speed_for_score(&self, score: u32) -> f32 {
        (self.base_speed + score as f32 * self.speed_accel).min(self.max_speed)
    }

    /// Parse a JSON config; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!(
            "Loaded config: {} colors, {} sticks",
            config.palette.len(),
            config.track_capacity
        );
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the values the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        if self.track_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.speed_step == 0 {
            return Err(ConfigError::ZeroSpeedStep);
        }

        let positive = [
            ("scene_width", self.scene_width),
            ("stick_width", self.stick_width),
            ("jump_period", self.jump_period),
            ("base_speed", self.base_speed),
            ("reference_tick_rate", self.reference_tick_rate),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        // Margin may be zero (sticks touching) but never negative
        if !(self.stick_margin.is_finite() && self.stick_margin >= 0.0) {
            return Err(ConfigError::NonPositive {
                field: "stick_margin",
                value: self.stick_margin,
            });
        }
        if !(self.speed_accel.is_finite() && self.speed_accel >= 0.0) {
            return Err(ConfigError::NonPositive {
                field: "speed_accel",
                value: self.speed_accel,
            });
        }
        if !self.max_speed.is_finite() || self.max_speed < self.base_speed {
            return Err(ConfigError::MaxBelowBase {
                base: self.base_speed,
                max: self.max_speed,
            });
        }

        Ok(())
    }
}
