//! Engine module - the round controller
//!
//! [`GameEngine`] owns the packed grid, the single active piece and the shape
//! picker. The host calls [`GameEngine::tick`] once per tick with the input
//! sampled for that tick. A tick walks the round state machine:
//!
//! 1. `Spawning`: draw a shape and place it at the anchor.
//! 2. `Falling`: check for landing first. A resting piece is locked on the
//!    spot and the phase becomes `Landed`; input is not applied. Otherwise
//!    shift and rotation input is applied and every Nth tick the piece falls
//!    one row, unless the input just moved it onto something.
//! 3. `Landed`: a locked cell in the row below the top row ends the round.
//!    Otherwise full rows are cleared (`Clearing`) and the next piece spawns.
//!
//! `GameOver` is terminal: ticks and moves are ignored until
//! [`GameEngine::reset`].

use crate::config::EngineConfig;
use crate::grid::PackedGrid;
use crate::io::{CellRenderer, EntropySource, InputSource};
use crate::line_clear::{self, ClearedRows};
use crate::movement;
use crate::pieces::Piece;
use crate::rng::ShapePicker;
use crate::rotation;
use crate::types::{
    CellValue, InputState, RoundPhase, Shape, GAME_OVER_ROW, GRID_HEIGHT, GRID_WIDTH,
    RIGHT_WALL_COL, SPAWN_X, SPAWN_Y,
};

/// Complete engine state
#[derive(Debug, Clone)]
pub struct GameEngine {
    grid: PackedGrid,
    active: Option<Piece>,
    picker: ShapePicker,
    phase: RoundPhase,
    config: EngineConfig,
    /// Ticks since the last fall
    fall_ticks: u8,
    /// Ticks left before rotation input is honoured again
    rotate_cooldown: u8,
    /// Rows cleared after the most recent lock
    last_cleared: ClearedRows,
    lines_cleared: u32,
    pieces_locked: u32,
}

impl GameEngine {
    /// Create a new engine with the given shape seed
    pub fn new(seed: u32) -> Self {
        Self::with_config(seed, EngineConfig::default())
    }

    pub fn with_config(seed: u32, config: EngineConfig) -> Self {
        Self {
            grid: PackedGrid::new(),
            active: None,
            picker: ShapePicker::new(seed),
            phase: RoundPhase::Spawning,
            config,
            fall_ticks: 0,
            rotate_cooldown: 0,
            last_cleared: ClearedRows::new(),
            lines_cleared: 0,
            pieces_locked: 0,
        }
    }

    /// Seed from the host's entropy source (read exactly once)
    pub fn from_entropy(source: &mut impl EntropySource) -> Self {
        Self::new(source.seed())
    }

    /// Start from a prepared grid.
    ///
    /// Borders are rewritten and stray `Falling` cells are emptied, since no
    /// piece owns them yet. The first tick spawns as usual.
    pub fn from_grid(grid: PackedGrid, seed: u32) -> Self {
        let mut engine = Self::new(seed);
        engine.grid = grid;
        engine.grid.write_borders();
        for row in 0..GRID_HEIGHT {
            for col in 0..GRID_WIDTH {
                if engine.grid.get(row, col) == CellValue::Falling {
                    engine.grid.set(row, col, CellValue::Empty);
                }
            }
        }
        engine
    }

    /// Start a fresh round, keeping the configuration
    pub fn reset(&mut self, seed: u32) {
        *self = Self::with_config(seed, self.config);
        info!("engine reset, seed {}", seed);
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == RoundPhase::GameOver
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn grid(&self) -> &PackedGrid {
        &self.grid
    }

    pub fn cell(&self, row: usize, col: usize) -> CellValue {
        self.grid.get(row, col)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn last_cleared(&self) -> &[u8] {
        &self.last_cleared
    }

    pub fn rotate_cooldown(&self) -> u8 {
        self.rotate_cooldown
    }

    /// Recommended delay before the next tick
    pub fn tick_interval_ms(&self, fast_drop: bool) -> u32 {
        self.config.tick_interval_ms(fast_drop)
    }

    /// Check if the active piece is resting on something, without locking it
    pub fn would_land(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|piece| movement::would_land(&self.grid, piece))
    }

    /// Advance the round by one tick
    pub fn tick(&mut self, input: InputState) -> RoundPhase {
        if self.phase == RoundPhase::GameOver {
            return self.phase;
        }

        if self.phase == RoundPhase::Spawning {
            let shape = self.picker.next_shape();
            if !self.spawn(shape) {
                return self.phase;
            }
        }

        if self.phase == RoundPhase::Falling {
            self.step_fall(input);
        }

        if self.phase == RoundPhase::Landed {
            self.settle();
        }

        self.phase
    }

    /// Poll the input source and tick
    pub fn run_tick(&mut self, source: &mut impl InputSource) -> RoundPhase {
        let input = source.poll();
        self.tick(input)
    }

    /// Replace the active piece with `shape` at the spawn anchor.
    ///
    /// Returns false if the round is over, or ends it if the anchor is
    /// already occupied.
    pub fn spawn(&mut self, shape: Shape) -> bool {
        if self.phase == RoundPhase::GameOver {
            return false;
        }
        if let Some(old) = self.active.take() {
            self.grid.paint(&old.cells, CellValue::Empty);
        }

        let piece = Piece::spawn(shape, SPAWN_X, SPAWN_Y);
        if self.grid.any_blocked(&piece.cells) {
            self.phase = RoundPhase::GameOver;
            info!("spawn blocked, game over");
            return false;
        }

        self.grid.paint(&piece.cells, CellValue::Falling);
        self.active = Some(piece);
        self.phase = RoundPhase::Falling;
        self.fall_ticks = 0;
        self.rotate_cooldown = 0;
        debug!("spawned {}", shape);
        true
    }

    /// Shift the active piece one column; ignores cooldowns
    pub fn shift(&mut self, direction: i8) -> bool {
        let direction = direction.signum();
        if direction == 0 || self.phase != RoundPhase::Falling {
            return false;
        }
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        movement::shift(&mut self.grid, piece, direction)
    }

    /// Rotate the active piece one step; ignores cooldowns
    pub fn rotate(&mut self) -> bool {
        if self.phase != RoundPhase::Falling {
            return false;
        }
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        rotation::rotate(&mut self.grid, piece)
    }

    /// Hand every cell to the renderer, row by row
    pub fn render(&self, out: &mut impl CellRenderer) {
        self.for_each_cell(|row, col, cell| out.draw_cell(row, col, cell));
    }

    pub fn for_each_cell(&self, mut f: impl FnMut(usize, usize, CellValue)) {
        for row in 0..GRID_HEIGHT {
            for col in 0..GRID_WIDTH {
                f(row, col, self.grid.get(row, col));
            }
        }
    }

    fn apply_input(&mut self, input: InputState) {
        let Some(piece) = self.active.as_mut() else {
            return;
        };

        let direction = input.shift_direction();
        if direction != 0 {
            movement::shift(&mut self.grid, piece, direction);
        }

        if self.rotate_cooldown > 0 {
            self.rotate_cooldown -= 1;
        } else if input.rotate && rotation::rotate(&mut self.grid, piece) {
            self.rotate_cooldown = self.config.rotate_cooldown(input.fast_drop);
        }
    }

    /// Landing check first; a resting piece locks before input can move it.
    fn step_fall(&mut self, input: InputState) {
        let landed = match self.active.as_mut() {
            Some(piece) => movement::try_lock(&mut self.grid, piece),
            None => return,
        };
        if landed {
            self.phase = RoundPhase::Landed;
            return;
        }

        self.apply_input(input);

        self.fall_ticks = self.fall_ticks.saturating_add(1);
        if self.fall_ticks < self.config.fall_rate(input.fast_drop) {
            return;
        }
        self.fall_ticks = 0;
        if let Some(piece) = self.active.as_mut() {
            // Input may have pushed the piece onto a ledge; it locks next tick.
            if !movement::would_land(&self.grid, piece) {
                movement::fall(&mut self.grid, piece);
            }
        }
    }

    fn settle(&mut self) {
        if let Some(piece) = self.active.take() {
            debug!("locked {}", piece.shape);
        }
        self.pieces_locked = self.pieces_locked.wrapping_add(1);
        self.last_cleared.clear();

        if self.top_blocked() {
            self.phase = RoundPhase::GameOver;
            info!(
                "game over: {} pieces, {} lines",
                self.pieces_locked, self.lines_cleared
            );
            return;
        }

        self.phase = RoundPhase::Clearing;
        self.last_cleared = line_clear::clear_lines(&mut self.grid);
        self.lines_cleared += self.last_cleared.len() as u32;

        self.phase = RoundPhase::Spawning;
        let shape = self.picker.next_shape();
        self.spawn(shape);
    }

    fn top_blocked(&self) -> bool {
        (1..RIGHT_WALL_COL).any(|col| self.grid.get(GAME_OVER_ROW, col) == CellValue::Locked)
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(1)
    }
}
