//! Line clear module - full-row detection and column compaction
//!
//! Rows are scanned bottom-up. A full row is emptied one interior column at
//! a time, and after each column is emptied the first locked cell above it
//! in that column drops to the deepest empty slot beneath it. Compaction can
//! complete new rows, so the scan restarts from the bottom after each clear
//! and stops once no full row remains.
//!
//! Everything goes through `get`/`set`; no scratch buffer.

use arrayvec::ArrayVec;

use crate::grid::PackedGrid;
use crate::types::{CellValue, FLOOR_ROW, GRID_HEIGHT, RIGHT_WALL_COL};

/// Rows cleared by one pass, in the order they were cleared
pub type ClearedRows = ArrayVec<u8, GRID_HEIGHT>;

/// Check if every interior cell of a row is occupied
pub fn is_row_full(grid: &PackedGrid, row: usize) -> bool {
    (1..RIGHT_WALL_COL).all(|col| grid.get(row, col) != CellValue::Empty)
}

/// Lowest full row above the floor, if any
pub fn lowest_full_row(grid: &PackedGrid) -> Option<usize> {
    (0..FLOOR_ROW).rev().find(|&row| is_row_full(grid, row))
}

/// Clear full rows until none remain, returning the rows cleared
pub fn clear_lines(grid: &mut PackedGrid) -> ClearedRows {
    let mut cleared = ClearedRows::new();

    while let Some(row) = lowest_full_row(grid) {
        for col in 1..RIGHT_WALL_COL {
            grid.set(row, col, CellValue::Empty);
            compact_column(grid, row, col);
        }
        trace!("cleared row {}", row);

        // Each clear removes a full row of occupied cells, so this never
        // overflows; stop rather than panic if it somehow does.
        if cleared.try_push(row as u8).is_err() {
            break;
        }
    }

    if !cleared.is_empty() {
        debug!("line clear: {} rows", cleared.len());
    }
    cleared
}

/// Drop the first locked cell above `from_row` in `col` as far as it can go.
///
/// Only that one cell moves; anything stacked above it stays put.
pub fn compact_column(grid: &mut PackedGrid, from_row: usize, col: usize) {
    let above = (0..from_row).rev().find(|&row| grid.get(row, col) == CellValue::Locked);
    if let Some(row) = above {
        drop_cell(grid, row, col);
    }
}

/// Slide one locked cell down until the cell below it is occupied.
/// Returns its final row.
fn drop_cell(grid: &mut PackedGrid, row: usize, col: usize) -> usize {
    let mut dest = row;
    // The floor row is all wall, so this stays inside the grid.
    while grid.get(dest + 1, col) == CellValue::Empty {
        dest += 1;
    }
    if dest != row {
        grid.set(row, col, CellValue::Empty);
        grid.set(dest, col, CellValue::Locked);
    }
    dest
}
