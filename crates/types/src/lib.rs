//! Core types module - shared data structures and constants
//!
//! This crate defines the plain-data vocabulary shared by the engine and its
//! collaborators (input polling, rendering). It has no required dependencies and is
//! `no_std`, so it can be linked into the embedded build unchanged.
//!
//! # Grid Dimensions
//!
//! The playfield is a fixed 12x21 matrix including its border:
//!
//! - **Width**: 12 columns (column 0 and column 11 are walls, 1-10 interior)
//! - **Height**: 21 rows (row 20 is the wall floor, 0-19 interior)
//! - **Spawn anchor**: (5, 0), horizontal centre of the top row
//!
//! Each cell is stored in 2 bits, four cells per byte, so a row takes
//! [`ROW_UNITS`] bytes and the whole field [`GRID_BYTES`] bytes.
//!
//! # Tick Constants
//!
//! The engine is tick driven; pacing is the host's job. These are the
//! recommended defaults:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 150 | Tick interval at normal speed |
//! | `FAST_TICK_MS` | 50 | Tick interval while fast-drop is held |
//! | `FALL_RATE` | 2 | Ticks per one-row fall |
//! | `FAST_FALL_RATE` | 1 | Ticks per one-row fall while fast-dropping |
//! | `ROTATE_COOLDOWN_TICKS` | 2 | Ticks rotation is ignored after a rotate |
//! | `FAST_ROTATE_COOLDOWN_TICKS` | 6 | Same, while fast-dropping |
//!
//! Cooldowns are scaled with the tick interval so rotation cadence stays the
//! same in wall-clock time (2 x 150ms == 6 x 50ms).
//!
//! # Examples
//!
//! ```
//! use packtris_types::{CellValue, Mark, Shape, GRID_WIDTH, GRID_HEIGHT};
//!
//! assert_eq!(Shape::from_index(1), Shape::Bar);
//! assert_eq!(Shape::T.index(), 2);
//!
//! assert_eq!(CellValue::from_bits(0b11), CellValue::Wall);
//! assert_eq!(CellValue::Locked.mark(), Mark::Outline);
//!
//! assert_eq!(GRID_WIDTH, 12);
//! assert_eq!(GRID_HEIGHT, 21);
//! ```

#![cfg_attr(not(test), no_std)]

/// Grid width in cells, both side walls included
pub const GRID_WIDTH: usize = 12;

/// Grid height in cells, the floor wall row included
pub const GRID_HEIGHT: usize = 21;

/// Number of 2-bit cells packed into one storage byte
pub const CELLS_PER_UNIT: usize = 4;

/// Bytes per packed row
pub const ROW_UNITS: usize = GRID_WIDTH.div_ceil(CELLS_PER_UNIT);

/// Total bytes of packed playfield storage
pub const GRID_BYTES: usize = ROW_UNITS * GRID_HEIGHT;

/// Row index of the floor wall
pub const FLOOR_ROW: usize = GRID_HEIGHT - 1;

/// Column index of the right wall
pub const RIGHT_WALL_COL: usize = GRID_WIDTH - 1;

/// Spawn anchor column (horizontal centre)
pub const SPAWN_X: i8 = (GRID_WIDTH / 2) as i8 - 1;

/// Spawn anchor row (top row)
pub const SPAWN_Y: i8 = 0;

/// A piece locking with any cell in this row ends the round
pub const GAME_OVER_ROW: usize = 1;

/// Ticks between falls at normal speed
pub const FALL_RATE: u8 = 2;

/// Ticks between falls while fast-drop is held
pub const FAST_FALL_RATE: u8 = 1;

/// Ticks rotation stays disabled after a successful rotation
pub const ROTATE_COOLDOWN_TICKS: u8 = 2;

/// Rotation cooldown while fast-drop is held
pub const FAST_ROTATE_COOLDOWN_TICKS: u8 = 6;

/// Recommended tick interval in milliseconds
pub const TICK_MS: u32 = 150;

/// Recommended tick interval while fast-drop is held
pub const FAST_TICK_MS: u32 = 50;

/// Number of distinct shapes in the catalog
pub const SHAPE_COUNT: usize = 5;

/// Value stored in one grid cell.
///
/// The discriminant is the 2-bit pattern written into packed storage:
/// - **Empty** `0b00`
/// - **Locked** `0b01`
/// - **Falling** `0b10`
/// - **Wall** `0b11`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum CellValue {
    #[default]
    Empty = 0b00,
    Locked = 0b01,
    Falling = 0b10,
    Wall = 0b11,
}

impl CellValue {
    /// Decode a 2-bit field. Bits above the low two are ignored.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => CellValue::Empty,
            0b01 => CellValue::Locked,
            0b10 => CellValue::Falling,
            _ => CellValue::Wall,
        }
    }

    /// The 2-bit pattern for this value
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Walls and locked blocks stop a moving piece; falling cells and
    /// empty cells do not.
    pub const fn is_blocking(self) -> bool {
        matches!(self, CellValue::Wall | CellValue::Locked)
    }

    /// How a monochrome display should draw this cell
    pub const fn mark(self) -> Mark {
        match self {
            CellValue::Wall => Mark::Filled,
            CellValue::Locked | CellValue::Falling => Mark::Outline,
            CellValue::Empty => Mark::Blank,
        }
    }
}

/// Pixel treatment for a cell on a monochrome display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mark {
    Filled,
    Outline,
    Blank,
}

/// The five shape kinds
///
/// - **Square**: 2x2 block
/// - **Bar**: 4 in a row
/// - **T**: nub over a row of three
/// - **L**: corner over a row of three
/// - **Z**: two offset pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Shape {
    Square,
    Bar,
    T,
    L,
    Z,
}

impl Shape {
    /// All shapes, in catalog order
    pub const ALL: [Shape; SHAPE_COUNT] = [Shape::Square, Shape::Bar, Shape::T, Shape::L, Shape::Z];

    /// Map an index in `0..5` onto a shape; larger values wrap.
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % SHAPE_COUNT]
    }

    /// Position of this shape in [`Shape::ALL`]
    pub const fn index(self) -> usize {
        match self {
            Shape::Square => 0,
            Shape::Bar => 1,
            Shape::T => 2,
            Shape::L => 3,
            Shape::Z => 4,
        }
    }

    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::Square => "square",
            Shape::Bar => "bar",
            Shape::T => "t",
            Shape::L => "l",
            Shape::Z => "z",
        }
    }
}

/// The four polled input signals, sampled once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputState {
    pub shift_left: bool,
    pub shift_right: bool,
    pub rotate: bool,
    pub fast_drop: bool,
}

impl InputState {
    /// No signal asserted
    pub const IDLE: InputState = InputState {
        shift_left: false,
        shift_right: false,
        rotate: false,
        fast_drop: false,
    };

    /// Net horizontal direction: -1, +1, or 0 when neither or both are held
    pub fn shift_direction(&self) -> i8 {
        match (self.shift_left, self.shift_right) {
            (true, false) => -1,
            (false, true) => 1,
            _ => 0,
        }
    }
}

/// Round controller state.
///
/// The loop is `Spawning -> Falling -> Landed -> Clearing -> Spawning`;
/// `GameOver` is terminal until an explicit reset.
///
/// `Landed` and `Clearing` only exist inside a single tick: the tick that
/// detects landing also settles, clears and respawns, so callers between
/// ticks only ever observe `Spawning`, `Falling` or `GameOver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RoundPhase {
    Spawning,
    Falling,
    Landed,
    Clearing,
    GameOver,
}

impl RoundPhase {
    /// Short label for status displays
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundPhase::Spawning => "spawning",
            RoundPhase::Falling => "falling",
            RoundPhase::Landed => "landed",
            RoundPhase::Clearing => "clearing",
            RoundPhase::GameOver => "game_over",
        }
    }
}
