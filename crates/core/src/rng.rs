//! RNG module - uniform shape selection
//!
//! Each new piece is drawn uniformly from the five shapes. There is no bag
//! and no preview: one draw per spawn. The generator is a small LCG seeded
//! once at startup from whatever entropy the host has.

use crate::types::{Shape, SHAPE_COUNT};

/// 32-bit LCG with the Numerical Recipes multiplier and increment.
///
/// Small enough for a microcontroller and fully reproducible from its seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleRng {
    state: u32,
}

const LCG_MUL: u32 = 1_664_525;
const LCG_INC: u32 = 1_013_904_223;

impl SimpleRng {
    /// Seed 0 is remapped to 1.
    pub fn new(seed: u32) -> Self {
        Self {
            state: seed.max(1),
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(LCG_MUL).wrapping_add(LCG_INC);
        self.state
    }

    /// Value in `[0, max)`.
    ///
    /// Uses the high half of the state; the low bits of a power-of-two LCG
    /// have short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        (self.next_u32() >> 16) % max
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Uniform shape generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapePicker {
    rng: SimpleRng,
}

impl ShapePicker {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Draw the next shape
    pub fn next_shape(&mut self) -> Shape {
        Shape::from_index(self.rng.next_range(SHAPE_COUNT as u32) as usize)
    }

    /// Current generator state; a picker built from it replays the same shapes
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for ShapePicker {
    fn default() -> Self {
        Self::new(1)
    }
}
