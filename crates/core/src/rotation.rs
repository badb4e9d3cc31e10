//! Rotation module - per-shape delta tables
//!
//! Each shape owns a table of steps. A step moves every square of the piece
//! by a fixed `(dx, dy)` and advances the orientation index. The table length
//! is the shape's cycle length: Square has no steps, Bar and Z toggle
//! between orientations 0 and 2, T and L walk 0 -> 1 -> 2 -> 3 -> 0.
//!
//! Deltas are a clockwise quarter turn about one pivot square
//! (Bar: square 1, every other shape: square 2), listed per square in spawn
//! order. Over a full cycle every square's deltas sum to zero.
//!
//! There are no kicks: a candidate that overlaps a wall, a locked square, or
//! leaves the grid is rejected outright.

use crate::grid::PackedGrid;
use crate::pieces::{Piece, PieceCells};
use crate::types::{CellValue, Shape};

/// One transition of a shape's rotation cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationStep {
    pub from: u8,
    pub to: u8,
    pub deltas: PieceCells,
}

const fn step(from: u8, to: u8, deltas: PieceCells) -> RotationStep {
    RotationStep { from, to, deltas }
}

const SQUARE_STEPS: [RotationStep; 0] = [];

const BAR_STEPS: [RotationStep; 2] = [
    step(0, 2, [(1, -1), (0, 0), (-1, 1), (-2, 2)]),
    step(2, 0, [(-1, 1), (0, 0), (1, -1), (2, -2)]),
];

const T_STEPS: [RotationStep; 4] = [
    step(0, 1, [(1, 1), (1, -1), (0, 0), (-1, 1)]),
    step(1, 2, [(-1, 1), (1, 1), (0, 0), (-1, -1)]),
    step(2, 3, [(-1, -1), (-1, 1), (0, 0), (1, -1)]),
    step(3, 0, [(1, -1), (-1, -1), (0, 0), (1, 1)]),
];

const L_STEPS: [RotationStep; 4] = [
    step(0, 1, [(2, 0), (1, -1), (0, 0), (-1, 1)]),
    step(1, 2, [(0, 2), (1, 1), (0, 0), (-1, -1)]),
    step(2, 3, [(-2, 0), (-1, 1), (0, 0), (1, -1)]),
    step(3, 0, [(0, -2), (-1, -1), (0, 0), (1, 1)]),
];

const Z_STEPS: [RotationStep; 2] = [
    step(0, 2, [(2, 0), (1, 1), (0, 0), (-1, 1)]),
    step(2, 0, [(-2, 0), (-1, -1), (0, 0), (1, -1)]),
];

/// The rotation table for a shape
pub fn steps(shape: Shape) -> &'static [RotationStep] {
    match shape {
        Shape::Square => &SQUARE_STEPS,
        Shape::Bar => &BAR_STEPS,
        Shape::T => &T_STEPS,
        Shape::L => &L_STEPS,
        Shape::Z => &Z_STEPS,
    }
}

/// Number of distinct orientations the shape cycles through
pub fn cycle_len(shape: Shape) -> u8 {
    steps(shape).len().max(1) as u8
}

/// The step leaving `orientation`, if the shape rotates at all
pub fn step_from(shape: Shape, orientation: u8) -> Option<&'static RotationStep> {
    steps(shape).iter().find(|s| s.from == orientation)
}

/// Apply a step's deltas to a set of squares
pub fn apply(cells: &PieceCells, step: &RotationStep) -> PieceCells {
    let mut out = *cells;
    for (cell, &(dx, dy)) in out.iter_mut().zip(step.deltas.iter()) {
        cell.0 += dx;
        cell.1 += dy;
    }
    out
}

/// Rotate the piece one step through its cycle.
///
/// The piece's squares are lifted out of the grid, the candidate is checked,
/// and either the candidate or the original squares are written back as
/// `Falling`. Returns whether the rotation was accepted; a rejected call
/// leaves piece and grid exactly as they were. Square always succeeds
/// without moving.
pub fn rotate(grid: &mut PackedGrid, piece: &mut Piece) -> bool {
    let Some(step) = step_from(piece.shape, piece.orientation) else {
        return true;
    };

    let snapshot = *piece;
    grid.paint(&piece.cells, CellValue::Empty);

    let candidate = apply(&piece.cells, step);
    if grid.any_blocked(&candidate) {
        *piece = snapshot;
        grid.paint(&piece.cells, CellValue::Falling);
        debug!("rotate rejected: {} orientation {}", piece.shape, piece.orientation);
        return false;
    }

    piece.cells = candidate;
    piece.orientation = step.to;
    grid.paint(&piece.cells, CellValue::Falling);
    true
}
