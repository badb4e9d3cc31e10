//! Capabilities the engine consumes from, or produces to, its host.
//!
//! On the device these wrap GPIO/ADC reads and the display driver; on a
//! desktop they wrap the terminal. The engine never sees pixels or pins.

use crate::types::{CellValue, InputState};

/// Polled input, sampled once per tick
pub trait InputSource {
    fn poll(&mut self) -> InputState;
}

/// Receives every grid cell when the engine renders
pub trait CellRenderer {
    fn draw_cell(&mut self, row: usize, col: usize, cell: CellValue);
}

/// Read once at startup to seed shape selection
pub trait EntropySource {
    fn seed(&mut self) -> u32;
}

/// Fixed input, handy for scripted runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConstInput(pub InputState);

impl InputSource for ConstInput {
    fn poll(&mut self) -> InputState {
        self.0
    }
}

/// Fixed seed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedSeed(pub u32);

impl EntropySource for FixedSeed {
    fn seed(&mut self) -> u32 {
        self.0
    }
}
