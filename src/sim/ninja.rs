//! Ninja jump cycle
//!
//! The ninja jumps on a fixed period: rising for the first half, falling for
//! the second. Each completed period is a landing. Time is accumulated from
//! ticks, so every period boundary is reported exactly once no matter how
//! the driver slices `dt`.

use serde::{Deserialize, Serialize};

/// Which half of the jump the ninja is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JumpPhase {
    Rising,
    Falling,
}

/// Squash/stretch keyframes for the renderer
const SCALE_GROUND: f32 = 1.0;
const SCALE_APEX: f32 = 1.1;
const SCALE_LANDING: f32 = 0.8;

/// Accumulated time this close to a boundary counts as having reached it
const BOUNDARY_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NinjaCycle {
    /// Seconds per jump
    period: f32,
    jump_height: f32,
    /// Time into the current jump, always in `[0, period)`
    elapsed: f32,
    color_index: usize,
    running: bool,
}

impl NinjaCycle {
    /// Stopped cycle on the first color
    pub fn new(period: f32, jump_height: f32) -> Self {
        Self {
            period,
            jump_height,
            elapsed: 0.0,
            color_index: 0,
            running: false,
        }
    }

    /// Restart from the ground on the first color
    pub fn start(&mut self) {
        self.elapsed = 0.0;
        self.color_index = 0;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Accumulate `dt` seconds; returns how many landings happened
    pub fn advance(&mut self, dt: f32) -> u32 {
        if !self.running || !dt.is_finite() || dt <= 0.0 {
            return 0;
        }
        self.elapsed += dt;
        if self.elapsed + BOUNDARY_EPSILON < self.period {
            return 0;
        }
        let landings = ((self.elapsed + BOUNDARY_EPSILON) / self.period).floor();
        self.elapsed = (self.elapsed - landings * self.period).max(0.0);
        landings as u32
    }

    /// Step to the next palette color
    pub fn cycle_color(&mut self, palette_len: usize) {
        if palette_len > 0 {
            self.color_index = (self.color_index + 1) % palette_len;
        }
    }

    pub fn color_index(&self) -> usize {
        self.color_index
    }

    /// Seconds until the next landing
    pub fn time_to_landing(&self) -> f32 {
        self.period - self.elapsed
    }

    /// Fraction of the current jump completed, `[0, 1)`
    pub fn progress(&self) -> f32 {
        self.elapsed / self.period
    }

    pub fn phase(&self) -> JumpPhase {
        if self.progress() < 0.5 {
            JumpPhase::Rising
        } else {
            JumpPhase::Falling
        }
    }

    /// Height above the ground (0 at takeoff and landing, `jump_height` at apex)
    pub fn vertical_offset(&self) -> f32 {
        let t = self.progress();
        match self.phase() {
            JumpPhase::Rising => self.jump_height * (t / 0.5),
            JumpPhase::Falling => self.jump_height * (1.0 - (t - 0.5) / 0.5),
        }
    }

    /// Vertical stretch: grows toward the apex, squashes into the landing
    pub fn scale_y(&self) -> f32 {
        let t = self.progress();
        match self.phase() {
            JumpPhase::Rising => SCALE_GROUND + (SCALE_APEX - SCALE_GROUND) * (t / 0.5),
            JumpPhase::Falling => SCALE_APEX + (SCALE_LANDING - SCALE_APEX) * ((t - 0.5) / 0.5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn running() -> NinjaCycle {
        let mut n = NinjaCycle::new(1.0, 100.0);
        n.start();
        n
    }

    #[test]
    fn test_stopped_until_started() {
        let mut n = NinjaCycle::new(1.0, 100.0);
        assert!(!n.is_running());
        assert_eq!(n.advance(5.0), 0);
        assert_eq!(n.color_index(), 0);
    }

    #[test]
    fn test_lands_once_per_period() {
        let mut n = running();
        let mut landings = 0;
        for _ in 0..59 {
            landings += n.advance(1.0 / 60.0);
        }
        assert_eq!(landings, 0);
        // Sixtieth tick lands, not the sixty-first
        assert_eq!(n.advance(1.0 / 60.0), 1);
        assert!(n.progress() < 1e-3);
    }

    #[test]
    fn test_every_sixtieth_tick_lands() {
        let mut n = running();
        for tick in 1..=600 {
            let landed = n.advance(1.0 / 60.0);
            let expected = u32::from(tick % 60 == 0);
            assert_eq!(landed, expected, "tick {}", tick);
        }
    }

    #[test]
    fn test_large_dt_reports_every_boundary() {
        let mut n = running();
        assert_eq!(n.advance(3.25), 3);
        assert!((n.progress() - 0.25).abs() < 1e-4);
    }

    #[test]
    fn test_stop_halts_landings() {
        let mut n = running();
        n.stop();
        assert_eq!(n.advance(2.0), 0);
    }

    #[test]
    fn test_rejects_bad_dt() {
        let mut n = running();
        assert_eq!(n.advance(-1.0), 0);
        assert_eq!(n.advance(f32::NAN), 0);
        assert_eq!(n.advance(f32::INFINITY), 0);
        assert_eq!(n.progress(), 0.0);
    }

    #[test]
    fn test_color_cycles_and_restart_resets() {
        let mut n = running();
        n.cycle_color(3);
        n.cycle_color(3);
        assert_eq!(n.color_index(), 2);
        n.cycle_color(3);
        assert_eq!(n.color_index(), 0);
        n.cycle_color(3);
        n.start();
        assert_eq!(n.color_index(), 0);
    }

    #[test]
    fn test_jump_arc() {
        let mut n = running();
        assert_eq!(n.vertical_offset(), 0.0);
        assert_eq!(n.phase(), JumpPhase::Rising);
        n.advance(0.25);
        assert!((n.vertical_offset() - 50.0).abs() < 1e-3);
        assert!((n.scale_y() - 1.05).abs() < 1e-4);
        n.advance(0.25);
        assert_eq!(n.phase(), JumpPhase::Falling);
        assert!((n.vertical_offset() - 100.0).abs() < 1e-3);
        assert!((n.scale_y() - 1.1).abs() < 1e-4);
        n.advance(0.4);
        assert!((n.vertical_offset() - 20.0).abs() < 1e-2);
        assert!((n.time_to_landing() - 0.1).abs() < 1e-4);
    }

    proptest! {
        #[test]
        fn prop_landings_match_elapsed_time(steps in proptest::collection::vec(0.001f32..0.1, 1..500)) {
            let mut n = running();
            let mut landings = 0u32;
            let mut total = 0.0f64;
            for dt in steps {
                landings += n.advance(dt);
                total += dt as f64;
                prop_assert!(n.progress() >= 0.0 && n.progress() < 1.0);
            }
            // Allow one boundary of slack for f32 accumulation
            let expected = total.floor() as i64;
            prop_assert!((landings as i64 - expected).abs() <= 1);
        }
    }
}
