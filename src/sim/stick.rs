//! Stick entity
//!
//! One scrolling obstacle. Sticks start inactive and are recolored by the
//! player; the ninja scores when it lands on a stick of its own color.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Color state of a stick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StickColor {
    /// Never recolored since spawning
    #[default]
    Inactive,
    /// Index into the palette
    Active(usize),
}

impl StickColor {
    pub fn index(&self) -> Option<usize> {
        match self {
            StickColor::Inactive => None,
            StickColor::Active(i) => Some(*i),
        }
    }
}

/// Decorative effect the renderer draws around a stick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectStyle {
    Bubbles,
    Triangles,
    Blocks,
}

impl EffectStyle {
    pub const ALL: [EffectStyle; 3] = [EffectStyle::Bubbles, EffectStyle::Triangles, EffectStyle::Blocks];

    /// Deterministic style for a stick, stable for a given run seed and stick id
    pub fn for_stick(seed: u64, id: u32) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed ^ (id as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// A stick on the track
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stick {
    pub id: u32,
    /// Top-left corner; only `x` matters to the simulation
    pub pos: Vec2,
    pub color: StickColor,
    pub style: EffectStyle,
}

impl Stick {
    pub fn new(id: u32, x: f32, y: f32, style: EffectStyle) -> Self {
        Self {
            id,
            pos: Vec2::new(x, y),
            color: StickColor::Inactive,
            style,
        }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.pos.x
    }

    /// Scroll toward the ninja. Recycling is the track's job.
    #[inline]
    pub fn move_left(&mut self, distance: f32) {
        self.pos.x -= distance;
    }

    /// Advance to the next palette color (inactive sticks take the first one)
    pub fn switch_color(&mut self, palette_len: usize) {
        if palette_len == 0 {
            return;
        }
        self.color = match self.color {
            StickColor::Inactive => StickColor::Active(0),
            StickColor::Active(i) => StickColor::Active((i + 1) % palette_len),
        };
    }

    /// Palette index, `None` while inactive
    #[inline]
    pub fn color_index(&self) -> Option<usize> {
        self.color.index()
    }

    pub fn is_active(&self) -> bool {
        self.color != StickColor::Inactive
    }

    pub fn center_x(&self, width: f32) -> f32 {
        self.pos.x + width / 2.0
    }

    /// Whether `x` lies on the stick's top edge (both ends inclusive)
    pub fn span_contains(&self, x: f32, width: f32) -> bool {
        x >= self.pos.x && x <= self.pos.x + width
    }
}
