//! Stick track
//!
//! Evenly spaced sticks scrolling right to left. Sticks that leave the screen
//! are dropped and a fresh one is appended behind the rightmost stick.

use serde::{Deserialize, Serialize};

use super::stick::{EffectStyle, Stick};
use crate::config::SimConfig;

/// Sticks removed and spawned by one [`StickTrack::advance`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecycleReport {
    pub removed: Vec<u32>,
    pub spawned: Option<u32>,
}

impl RecycleReport {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.spawned.is_none()
    }
}

/// Ordered sticks, leftmost (oldest) first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StickTrack {
    sticks: Vec<Stick>,
    capacity: usize,
    stick_width: f32,
    spacing: f32,
    removal_threshold: f32,
    scene_width: f32,
    initial_y: f32,
    spawn_y: f32,
    reference_tick_rate: f32,
    seed: u64,
    next_id: u32,
}

impl StickTrack {
    /// Empty track laid out from `config`; call [`reset`](Self::reset) to seed it
    pub fn new(config: &SimConfig) -> Self {
        Self {
            sticks: Vec::with_capacity(config.track_capacity),
            capacity: config.track_capacity,
            stick_width: config.stick_width,
            spacing: config.spacing(),
            removal_threshold: config.removal_threshold(),
            scene_width: config.scene_width,
            initial_y: config.initial_stick_y,
            spawn_y: config.spawn_stick_y,
            reference_tick_rate: config.reference_tick_rate,
            seed: config.seed,
            next_id: 1,
        }
    }

    fn spawn(&mut self, x: f32, y: f32) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        let style = EffectStyle::for_stick(self.seed, id);
        self.sticks.push(Stick::new(id, x, y, style));
        id
    }

    /// Drop all sticks and seed a full track just off the right edge
    pub fn reset(&mut self) {
        self.sticks.clear();
        self.next_id = 1;
        for i in 0..self.capacity {
            let x = self.scene_width + i as f32 * self.spacing;
            self.spawn(x, self.initial_y);
        }
    }

    /// Scroll every stick by `speed` (pixels per reference tick) over `dt` seconds,
    /// then recycle. At most one stick is spawned per call.
    pub fn advance(&mut self, dt: f32, speed: f32) -> RecycleReport {
        let distance = speed * self.reference_tick_rate * dt;
        for stick in &mut self.sticks {
            stick.move_left(distance);
        }

        let mut report = RecycleReport::default();
        let threshold = self.removal_threshold;
        self.sticks.retain(|s| {
            let keep = s.x() >= threshold;
            if !keep {
                report.removed.push(s.id);
            }
            keep
        });

        if self.sticks.len() < self.capacity {
            let last_x = self.sticks.last().map(|s| s.x()).unwrap_or(self.scene_width);
            report.spawned = Some(self.spawn(last_x + self.spacing, self.spawn_y));
        }

        report
    }

    fn closest_position(&self, x: f32, window_behind: f32) -> Option<usize> {
        let width = self.stick_width;
        let mut best: Option<(usize, f32)> = None;
        for (i, stick) in self.sticks.iter().enumerate() {
            if stick.x() + width <= x - window_behind {
                continue;
            }
            let distance = (stick.center_x(width) - x).abs();
            if best.is_none_or(|(_, d)| distance < d) {
                best = Some((i, distance));
            }
        }
        best.map(|(i, _)| i)
    }

    /// Stick whose center is nearest `x`, ignoring sticks whose right edge is
    /// more than `window_behind` behind `x`. Ties keep the leftmost stick.
    pub fn closest_stick_near(&mut self, x: f32, window_behind: f32) -> Option<&mut Stick> {
        self.closest_position(x, window_behind).map(|i| &mut self.sticks[i])
    }

    /// Read-only [`closest_stick_near`](Self::closest_stick_near)
    pub fn peek_closest_near(&self, x: f32, window_behind: f32) -> Option<&Stick> {
        self.closest_position(x, window_behind).map(|i| &self.sticks[i])
    }

    /// First stick whose top edge spans `x`
    pub fn stick_under(&self, x: f32) -> Option<&Stick> {
        self.sticks.iter().find(|s| s.span_contains(x, self.stick_width))
    }

    pub fn get(&self, id: u32) -> Option<&Stick> {
        self.sticks.iter().find(|s| s.id == id)
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut Stick> {
        self.sticks.iter_mut().find(|s| s.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Stick> {
        self.sticks.iter()
    }

    pub fn sticks(&self) -> &[Stick] {
        &self.sticks
    }

    pub fn len(&self) -> usize {
        self.sticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sticks.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn stick_width(&self) -> f32 {
        self.stick_width
    }

    /// Remove every stick; `reset` reseeds
    #[cfg(test)]
    pub(crate) fn clear(&mut self) {
        self.sticks.clear();
    }

    /// Append a stick at an explicit position, returning its id
    #[cfg(test)]
    pub(crate) fn push_at(&mut self, x: f32) -> u32 {
        self.spawn(x, self.spawn_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::REFERENCE_TICK_RATE;
    use proptest::prelude::*;

    /// dt that moves sticks exactly `speed` pixels
    const ONE_TICK: f32 = 1.0 / REFERENCE_TICK_RATE;

    fn track() -> StickTrack {
        let mut t = StickTrack::new(&SimConfig::default());
        t.reset();
        t
    }

    #[test]
    fn test_reset_seeds_full_track() {
        let t = track();
        assert_eq!(t.len(), 10);
        for (i, stick) in t.iter().enumerate() {
            assert_eq!(stick.x(), 1200.0 + i as f32 * 180.0);
            assert_eq!(stick.pos.y, 800.0 - 252.0);
            assert!(!stick.is_active());
        }
    }

    #[test]
    fn test_reset_discards_previous_sticks() {
        let mut t = track();
        t.advance(1.0, 2.0);
        t.get_mut(1).unwrap().switch_color(3);
        t.reset();
        assert_eq!(t.len(), 10);
        assert!(t.iter().all(|s| !s.is_active()));
        assert_eq!(t.sticks()[0].x(), 1200.0);
    }

    #[test]
    fn test_advance_moves_by_speed_per_reference_tick() {
        let mut t = track();
        let report = t.advance(ONE_TICK, 2.0);
        assert!(report.is_empty());
        assert!((t.sticks()[0].x() - 1198.0).abs() < 1e-3);
    }

    #[test]
    fn test_advance_is_frame_rate_independent() {
        let mut a = track();
        let mut b = track();
        a.advance(0.5, 2.0);
        for _ in 0..50 {
            b.advance(0.01, 2.0);
        }
        assert!((a.sticks()[0].x() - b.sticks()[0].x()).abs() < 1e-2);
    }

    #[test]
    fn test_offscreen_stick_is_replaced() {
        let mut t = track();
        let first = t.sticks()[0].id;
        // 1200 + 180 = 1380 to cross -180, plus a little
        let report = t.advance(ONE_TICK, 1381.0);
        assert_eq!(report.removed, vec![first]);
        assert_eq!(t.len(), 10);
        assert!(t.get(first).is_none());

        let spawned = report.spawned.unwrap();
        let last = t.sticks().last().unwrap();
        assert_eq!(last.id, spawned);
        let before_last = &t.sticks()[t.len() - 2];
        assert!((last.x() - before_last.x() - 180.0).abs() < 1e-3);
        assert_eq!(last.pos.y, 800.0 - 362.0);
    }

    #[test]
    fn test_spawns_at_most_one_per_advance() {
        let mut t = track();
        // Push the first three sticks past the threshold in one go
        let report = t.advance(ONE_TICK, 1200.0 + 2.0 * 180.0 + 181.0);
        assert_eq!(report.removed.len(), 3);
        assert!(report.spawned.is_some());
        assert_eq!(t.len(), 8);

        let report = t.advance(0.0, 0.0);
        assert!(report.removed.is_empty());
        assert_eq!(t.len(), 9);
    }

    #[test]
    fn test_empty_track_spawns_after_scene_width() {
        let mut t = StickTrack::new(&SimConfig::default());
        let report = t.advance(ONE_TICK, 2.0);
        assert_eq!(t.len(), 1);
        assert_eq!(report.spawned, Some(1));
        assert_eq!(t.sticks()[0].x(), 1380.0);
    }

    #[test]
    fn test_stick_under() {
        let mut t = StickTrack::new(&SimConfig::default());
        let a = t.push_at(520.0);
        let b = t.push_at(700.0);
        assert_eq!(t.stick_under(600.0).map(|s| s.id), Some(a));
        assert_eq!(t.stick_under(590.0).map(|s| s.id), Some(a));
        assert_eq!(t.stick_under(700.0).map(|s| s.id), Some(b));
        assert!(t.stick_under(620.0).is_none());
    }

    #[test]
    fn test_closest_stick_near_prefers_nearest_center() {
        let mut t = StickTrack::new(&SimConfig::default());
        t.push_at(400.0); // center 445
        let near = t.push_at(580.0); // center 625
        t.push_at(760.0); // center 805
        assert_eq!(t.closest_stick_near(600.0, 150.0).map(|s| s.id), Some(near));
    }

    #[test]
    fn test_closest_stick_near_ignores_sticks_behind_window() {
        let mut t = StickTrack::new(&SimConfig::default());
        // Right edge at 450 == 600 - 150: outside the window
        t.push_at(360.0);
        let ahead = t.push_at(900.0);
        assert_eq!(t.closest_stick_near(600.0, 150.0).map(|s| s.id), Some(ahead));

        let mut t = StickTrack::new(&SimConfig::default());
        t.push_at(-500.0);
        assert!(t.closest_stick_near(600.0, 150.0).is_none());
    }

    #[test]
    fn test_closest_stick_near_is_mutable_target() {
        let mut t = StickTrack::new(&SimConfig::default());
        let id = t.push_at(555.0);
        if let Some(stick) = t.closest_stick_near(600.0, 150.0) {
            stick.switch_color(3);
        }
        assert_eq!(t.get(id).unwrap().color_index(), Some(0));
    }

    proptest! {
        #[test]
        fn prop_track_bounded_and_grows_by_at_most_one(
            steps in proptest::collection::vec((0.0f32..0.2, 0.0f32..400.0), 1..200)
        ) {
            let mut t = track();
            for (dt, speed) in steps {
                let before = t.len();
                t.advance(dt, speed);
                prop_assert!(t.len() <= t.capacity());
                prop_assert!(t.len() <= before + 1);
            }
        }

        #[test]
        fn prop_track_stays_left_to_right(
            steps in proptest::collection::vec(0.0f32..0.5, 1..200)
        ) {
            let mut t = track();
            for dt in steps {
                t.advance(dt, 4.0);
                let xs: Vec<f32> = t.iter().map(|s| s.x()).collect();
                prop_assert!(xs.windows(2).all(|w| w[0] < w[1]));
                prop_assert!(xs.iter().all(|&x| x >= -180.0));
            }
        }
    }
}
