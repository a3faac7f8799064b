//! Fixed timestep simulation tick
//!
//! Core game loop: scroll the track, ramp speed, run the jump schedule and
//! score each landing.

use super::state::{GameEvent, GameSimulation};

/// Input commands for a single tick (one-shot flags are cleared by the driver)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Start (or restart) a run
    pub start: bool,
    /// Recolor the stick nearest the ninja
    pub switch_color: bool,
    /// Demo mode - autopilot recolors sticks
    pub demo_mode: bool,
}

/// Apply `input`, then advance the simulation by `dt` seconds
pub fn step(sim: &mut GameSimulation, input: &TickInput, dt: f32) {
    if input.start {
        sim.start();
    }

    if input.demo_mode && autopilot_wants_switch(sim) {
        sim.request_color_switch();
    }

    if input.switch_color {
        sim.request_color_switch();
    }

    sim.tick(dt);
}

/// Whether the stick the ninja will land on next is the current switch target
/// and still shows the wrong color
fn autopilot_wants_switch(sim: &GameSimulation) -> bool {
    if !sim.is_running() {
        return false;
    }
    let config = &sim.config;
    let palette_len = config.palette.len();
    if palette_len == 0 {
        return false;
    }

    let wanted = (sim.ninja.color_index() + 1) % palette_len;
    let travel = sim.speed * config.reference_tick_rate * sim.ninja.time_to_landing();
    let landing_x = config.ninja_x + travel;
    let width = config.stick_width;

    let Some(landing) = sim.track.iter().find(|s| s.span_contains(landing_x, width)) else {
        return false;
    };
    if landing.color_index() == Some(wanted) {
        return false;
    }

    sim.track
        .peek_closest_near(config.ninja_x, config.switch_window_behind)
        .is_some_and(|target| target.id == landing.id)
}

impl GameSimulation {
    /// Advance the run by `dt` seconds. Does nothing unless running.
    pub fn tick(&mut self, dt: f32) {
        if !self.is_running() || !dt.is_finite() || dt < 0.0 {
            return;
        }

        let report = self.track.advance(dt, self.speed);
        if !report.is_empty() {
            log::debug!("Recycled sticks {:?}, spawned {:?}", report.removed, report.spawned);
            self.push_event(GameEvent::SticksRecycled {
                removed: report.removed,
                spawned: report.spawned,
            });
        }

        self.ramp_speed();

        let landings = self.ninja.advance(dt);
        for _ in 0..landings {
            self.on_ninja_landed();
            if !self.is_running() {
                break;
            }
            self.ramp_speed();
        }
    }

    /// Speed ramps each time score reaches a new multiple of speed_step
    fn ramp_speed(&mut self) {
        let Some(tier) = self.score.checked_div(self.config.speed_step) else {
            return;
        };
        if tier <= self.speed_tier {
            return;
        }
        self.speed_tier = tier;
        let speed = self.config.speed_for_score(self.score).max(self.speed);
        if speed != self.speed {
            self.speed = speed;
            self.push_event(GameEvent::SpeedChanged { speed });
            log::info!("Speed up: {} at score {}", speed, self.score);
        }
    }

    /// Recolor the stick nearest the ninja. Does nothing unless running.
    pub fn request_color_switch(&mut self) {
        if !self.is_running() {
            return;
        }
        let palette_len = self.config.palette.len();
        let Some(stick) = self
            .track
            .closest_stick_near(self.config.ninja_x, self.config.switch_window_behind)
        else {
            return;
        };
        stick.switch_color(palette_len);
        let (id, color) = (stick.id, stick.color);
        self.push_event(GameEvent::StickColorChanged { id, color });
    }

    /// Score one landing: the ninja takes its next color, then is compared
    /// against the stick beneath it. A mismatch ends the run.
    pub fn on_ninja_landed(&mut self) {
        if !self.is_running() {
            return;
        }

        self.ninja.cycle_color(self.config.palette.len());
        let color_index = self.ninja.color_index();
        let under = self
            .track
            .stick_under(self.config.ninja_x)
            .map(|s| (s.id, s.color_index()));

        self.push_event(GameEvent::Landed {
            color_index,
            stick_id: under.map(|(id, _)| id),
        });

        match under {
            Some((id, Some(stick_color))) if stick_color == color_index => {
                self.score += 1;
                self.push_event(GameEvent::Scored { score: self.score });
                log::debug!("Landed on stick {}: score {}", id, self.score);
            }
            Some((id, stick_color)) => {
                log::debug!(
                    "Landed on stick {} with color {:?}, ninja is {}",
                    id,
                    stick_color,
                    color_index
                );
                self.game_over();
            }
            None => {
                log::debug!("Landed between sticks");
            }
        }
    }
}
