//! Movement module - shifting, falling and landing
//!
//! Every mutation follows clear-then-write: the piece's squares are set to
//! `Empty`, the new coordinates are computed, then written as `Falling`.

use crate::grid::PackedGrid;
use crate::pieces::Piece;
use crate::types::CellValue;

/// Check if the piece could move one column in `direction` (-1 or +1)
pub fn can_shift(grid: &PackedGrid, piece: &Piece, direction: i8) -> bool {
    !grid.any_blocked(&piece.translated(direction, 0))
}

/// Move the piece one column left (-1) or right (+1).
///
/// Returns false with nothing changed when any target square is a wall or a
/// locked cell.
pub fn shift(grid: &mut PackedGrid, piece: &mut Piece, direction: i8) -> bool {
    debug_assert!(direction == -1 || direction == 1);
    if !can_shift(grid, piece, direction) {
        return false;
    }
    move_by(grid, piece, direction, 0);
    true
}

/// Drop the piece one row.
///
/// Unconditional: callers check [`would_land`] first.
pub fn fall(grid: &mut PackedGrid, piece: &mut Piece) {
    debug_assert!(!would_land(grid, piece));
    move_by(grid, piece, 0, 1);
}

/// Check if any square rests on a wall or locked cell. No side effects.
pub fn would_land(grid: &PackedGrid, piece: &Piece) -> bool {
    piece
        .cells
        .iter()
        .any(|&(x, y)| grid.is_blocked((x, y + 1)))
}

/// Landing detection fused with commit.
///
/// When the piece has landed its squares are written as `Locked` and its
/// `falling` flag drops. Returns whether the lock happened.
pub fn try_lock(grid: &mut PackedGrid, piece: &mut Piece) -> bool {
    if !would_land(grid, piece) {
        return false;
    }
    grid.paint(&piece.cells, CellValue::Locked);
    piece.falling = false;
    true
}

fn move_by(grid: &mut PackedGrid, piece: &mut Piece, dx: i8, dy: i8) {
    grid.paint(&piece.cells, CellValue::Empty);
    piece.cells = piece.translated(dx, dy);
    grid.paint(&piece.cells, CellValue::Falling);
}
