//! Game state and render-facing views
//!
//! [`GameSimulation`] owns everything a run needs. Gameplay transitions live
//! in `tick.rs`; this file holds the state itself, `start`, and the queries a
//! renderer reads each frame.

use serde::{Deserialize, Serialize};

use super::ninja::{JumpPhase, NinjaCycle};
use super::stick::{EffectStyle, StickColor};
use super::track::StickTrack;
use crate::config::{ConfigError, SimConfig};
use crate::grade::Grade;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Never started
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Run ended on a mismatched landing
    GameOver,
}

/// Oldest events are dropped once this many are waiting
pub const MAX_QUEUED_EVENTS: usize = 256;

/// Outcome of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    pub final_score: u32,
    pub grade: Grade,
}

/// Things the renderer may want to animate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    StickColorChanged { id: u32, color: StickColor },
    /// Ninja touched down; `stick_id` is the stick beneath it, if any
    Landed { color_index: usize, stick_id: Option<u32> },
    Scored { score: u32 },
    SpeedChanged { speed: f32 },
    SticksRecycled { removed: Vec<u32>, spawned: Option<u32> },
    GameOver { final_score: u32, grade: Grade },
}

/// Render view of one stick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StickView {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub color: StickColor,
    pub style: EffectStyle,
}

/// Render view of the ninja
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NinjaView {
    pub x: f32,
    /// Ground position; subtract `vertical_offset` to draw mid-jump
    pub y: f32,
    pub color_index: usize,
    pub vertical_offset: f32,
    pub scale_y: f32,
    pub jump: JumpPhase,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u32,
    pub speed: f32,
    pub sticks: Vec<StickView>,
    pub ninja: NinjaView,
    pub result: Option<RunResult>,
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSimulation {
    pub config: SimConfig,
    pub phase: GamePhase,
    pub score: u32,
    /// Pixels per reference tick
    pub speed: f32,
    /// Last `score / speed_step` the speed was ramped for
    pub speed_tier: u32,
    pub track: StickTrack,
    pub ninja: NinjaCycle,
    /// Set when a run ends, cleared on `start`
    pub result: Option<RunResult>,
    /// Pending events for the renderer, capped at [`MAX_QUEUED_EVENTS`]
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameSimulation {
    /// Idle simulation for a trusted config
    pub fn new(config: SimConfig) -> Self {
        let track = StickTrack::new(&config);
        let ninja = NinjaCycle::new(config.jump_period, config.jump_height);
        Self {
            speed: config.base_speed,
            speed_tier: 0,
            config,
            phase: GamePhase::Idle,
            score: 0,
            track,
            ninja,
            result: None,
            events: Vec::new(),
        }
    }

    /// Validate `config` first
    pub fn try_new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Begin a fresh run. Legal from any phase; a run in progress is discarded.
    pub fn start(&mut self) {
        self.score = 0;
        self.speed = self.config.base_speed;
        self.speed_tier = 0;
        self.result = None;
        self.track.reset();
        self.ninja.start();
        self.phase = GamePhase::Running;
        self.push_event(GameEvent::Started);
        log::info!(
            "Run started: {} sticks, speed {}",
            self.track.len(),
            self.speed
        );
    }

    /// End the run with the current score
    pub(super) fn game_over(&mut self) {
        let result = RunResult {
            final_score: self.score,
            grade: Grade::from_score(self.score),
        };
        self.phase = GamePhase::GameOver;
        self.ninja.stop();
        self.result = Some(result);
        self.push_event(GameEvent::GameOver {
            final_score: result.final_score,
            grade: result.grade,
        });
        log::info!("Game over: score {} ({})", result.final_score, result.grade);
    }

    /// Queue an event, dropping the oldest when the caller never drains
    pub(super) fn push_event(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_QUEUED_EVENTS {
            let excess = self.events.len() + 1 - MAX_QUEUED_EVENTS;
            self.events.drain(..excess);
        }
        self.events.push(event);
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn ninja_color_index(&self) -> usize {
        self.ninja.color_index()
    }

    pub fn result(&self) -> Option<RunResult> {
        self.result
    }

    /// Final score, once the run has ended
    pub fn final_score(&self) -> Option<u32> {
        self.result.map(|r| r.final_score)
    }

    /// Grade label, once the run has ended
    pub fn grade(&self) -> Option<&'static str> {
        self.result.map(|r| r.grade.as_str())
    }

    /// Hand pending events to the caller
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            score: self.score,
            speed: self.speed,
            sticks: self
                .track
                .iter()
                .map(|s| StickView {
                    id: s.id,
                    x: s.pos.x,
                    y: s.pos.y,
                    color: s.color,
                    style: s.style,
                })
                .collect(),
            ninja: NinjaView {
                x: self.config.ninja_x,
                y: self.config.ninja_y,
                color_index: self.ninja.color_index(),
                vertical_offset: self.ninja.vertical_offset(),
                scale_y: self.ninja.scale_y(),
                jump: self.ninja.phase(),
            },
            result: self.result,
        }
    }
}

impl Default for GameSimulation {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}
