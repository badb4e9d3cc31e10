//! Grid module - the packed playfield
//!
//! The playfield is a 12x21 matrix stored at 2 bits per cell, four cells per
//! byte, 63 bytes in total. Within a byte the lowest-numbered column sits in
//! the most significant field.
//! Coordinates: `get(row, col)`, row 0 at the top, col 0 on the left.
//! Column 0, column 11 and row 20 are `Wall` for the grid's whole life.

use crate::types::{
    CellValue, CELLS_PER_UNIT, FLOOR_ROW, GRID_HEIGHT, GRID_WIDTH, RIGHT_WALL_COL, ROW_UNITS,
};

/// Cell position of a piece square, `(x, y)` = `(col, row)`.
pub type CellPos = (i8, i8);

/// The packed playfield
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackedGrid {
    /// One row of packed fields per entry
    units: [[u8; ROW_UNITS]; GRID_HEIGHT],
}

/// Locate a column's 2-bit field: byte index within the row and bit shift.
///
/// Shared by `get` and `set` so both sides agree on the layout.
#[inline(always)]
const fn field(col: usize) -> (usize, u32) {
    let unit = col / CELLS_PER_UNIT;
    let slot = col % CELLS_PER_UNIT;
    (unit, ((CELLS_PER_UNIT - 1 - slot) * 2) as u32)
}

impl PackedGrid {
    /// Create a grid with its wall border in place and an empty interior
    pub fn new() -> Self {
        let mut grid = Self {
            units: [[0; ROW_UNITS]; GRID_HEIGHT],
        };
        grid.write_borders();
        grid
    }

    /// Read a cell. Callers guarantee `row < GRID_HEIGHT` and `col < GRID_WIDTH`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> CellValue {
        debug_assert!(row < GRID_HEIGHT && col < GRID_WIDTH);
        let (unit, shift) = field(col);
        CellValue::from_bits(self.units[row][unit] >> shift)
    }

    /// Write a cell, touching only its own 2-bit field.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: CellValue) {
        debug_assert!(row < GRID_HEIGHT && col < GRID_WIDTH);
        let (unit, shift) = field(col);
        let byte = &mut self.units[row][unit];
        *byte = (*byte & !(0b11 << shift)) | (value.bits() << shift);
    }

    /// Empty the interior and rewrite the border
    pub fn reset(&mut self) {
        self.units = [[0; ROW_UNITS]; GRID_HEIGHT];
        self.write_borders();
    }

    /// Force every border cell back to `Wall`
    pub fn write_borders(&mut self) {
        for row in 0..GRID_HEIGHT {
            for col in 0..GRID_WIDTH {
                if Self::is_border(row, col) {
                    self.set(row, col, CellValue::Wall);
                }
            }
        }
    }

    /// Check if (row, col) is a permanent wall position
    pub fn is_border(row: usize, col: usize) -> bool {
        col == 0 || col == RIGHT_WALL_COL || row == FLOOR_ROW
    }

    /// Check if a piece square at `(x, y)` would collide.
    ///
    /// Positions off the grid count as blocked, so candidate positions
    /// produced by a rotation above row 0 are rejected instead of read.
    pub fn is_blocked(&self, (x, y): CellPos) -> bool {
        if x < 0 || y < 0 || x as usize >= GRID_WIDTH || y as usize >= GRID_HEIGHT {
            return true;
        }
        self.get(y as usize, x as usize).is_blocking()
    }

    /// Check if any of the given squares would collide
    pub fn any_blocked(&self, cells: &[CellPos]) -> bool {
        cells.iter().any(|&pos| self.is_blocked(pos))
    }

    /// Write the same value into every given square
    pub fn paint(&mut self, cells: &[CellPos], value: CellValue) {
        for &(x, y) in cells {
            self.set(y as usize, x as usize, value);
        }
    }

    /// Number of cells currently holding `value`
    pub fn count(&self, value: CellValue) -> usize {
        let mut n = 0;
        for row in 0..GRID_HEIGHT {
            for col in 0..GRID_WIDTH {
                if self.get(row, col) == value {
                    n += 1;
                }
            }
        }
        n
    }

    /// Raw packed rows, e.g. for dumping the 63-byte image
    pub fn units(&self) -> &[[u8; ROW_UNITS]; GRID_HEIGHT] {
        &self.units
    }
}

impl Default for PackedGrid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GRID_BYTES;

    #[test]
    fn test_field_addressing() {
        assert_eq!(field(0), (0, 6));
        assert_eq!(field(3), (0, 0));
        assert_eq!(field(4), (1, 6));
        assert_eq!(field(11), (2, 0));
    }

    #[test]
    fn test_storage_is_two_bits_per_cell() {
        assert_eq!(core::mem::size_of::<PackedGrid>(), GRID_BYTES);
    }

    #[test]
    fn test_new_grid_layout() {
        let grid = PackedGrid::new();

        // Row 0: wall, 10 empty, wall -> 11 00 00 00 | 00 00 00 00 | 00 00 00 11
        assert_eq!(grid.units()[0], [0b1100_0000, 0, 0b0000_0011]);
        assert_eq!(grid.units()[FLOOR_ROW], [0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn test_set_clears_both_bits() {
        let mut grid = PackedGrid::new();

        grid.set(5, 2, CellValue::Wall);
        grid.set(5, 2, CellValue::Locked);
        assert_eq!(grid.get(5, 2), CellValue::Locked);

        grid.set(5, 2, CellValue::Falling);
        assert_eq!(grid.get(5, 2), CellValue::Falling);

        grid.set(5, 2, CellValue::Empty);
        assert_eq!(grid.get(5, 2), CellValue::Empty);
    }

    #[test]
    fn test_set_leaves_neighbours_in_unit() {
        let mut grid = PackedGrid::new();
        grid.set(3, 4, CellValue::Locked);
        grid.set(3, 5, CellValue::Falling);
        grid.set(3, 6, CellValue::Wall);
        grid.set(3, 7, CellValue::Locked);

        grid.set(3, 5, CellValue::Empty);

        assert_eq!(grid.get(3, 4), CellValue::Locked);
        assert_eq!(grid.get(3, 5), CellValue::Empty);
        assert_eq!(grid.get(3, 6), CellValue::Wall);
        assert_eq!(grid.get(3, 7), CellValue::Locked);
    }

    #[test]
    fn test_is_blocked_off_grid() {
        let grid = PackedGrid::new();
        assert!(grid.is_blocked((5, -1)));
        assert!(grid.is_blocked((-1, 5)));
        assert!(grid.is_blocked((GRID_WIDTH as i8, 5)));
        assert!(grid.is_blocked((0, 5)));
        assert!(!grid.is_blocked((5, 5)));
    }

    #[test]
    fn test_reset_restores_borders() {
        let mut grid = PackedGrid::new();
        grid.paint(&[(3, 3), (4, 3)], CellValue::Locked);
        grid.reset();
        assert_eq!(grid, PackedGrid::new());
        assert_eq!(grid.count(CellValue::Locked), 0);
        assert_eq!(
            grid.count(CellValue::Wall),
            2 * GRID_HEIGHT + GRID_WIDTH - 2
        );
    }
}
