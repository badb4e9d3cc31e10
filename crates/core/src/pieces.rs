//! Pieces module - shape catalog and spawning
//!
//! Spawn offsets are `(dx, dy)` from the anchor, `dy` growing downward.

use crate::grid::CellPos;
use crate::types::Shape;

/// The four squares of a piece
pub type PieceCells = [CellPos; 4];

/// Offsets of each square from the spawn anchor
pub fn spawn_offsets(shape: Shape) -> PieceCells {
    match shape {
        Shape::Square => [(0, 0), (1, 0), (0, 1), (1, 1)],
        Shape::Bar => [(0, 0), (1, 0), (2, 0), (3, 0)],
        Shape::T => [(0, 0), (-1, 1), (0, 1), (1, 1)],
        Shape::L => [(0, 0), (0, 1), (1, 1), (2, 1)],
        Shape::Z => [(0, 0), (1, 0), (1, 1), (2, 1)],
    }
}

/// The active piece.
///
/// `cells` mirrors the grid's `Falling` cells while `falling` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Piece {
    pub cells: PieceCells,
    pub shape: Shape,
    pub orientation: u8,
    pub falling: bool,
}

impl Piece {
    /// Place a fresh piece at the anchor, orientation 0, falling
    pub fn spawn(shape: Shape, anchor_x: i8, anchor_y: i8) -> Self {
        let mut cells = spawn_offsets(shape);
        for cell in &mut cells {
            cell.0 += anchor_x;
            cell.1 += anchor_y;
        }
        Self {
            cells,
            shape,
            orientation: 0,
            falling: true,
        }
    }

    /// Squares shifted by (dx, dy)
    pub fn translated(&self, dx: i8, dy: i8) -> PieceCells {
        let mut cells = self.cells;
        for cell in &mut cells {
            cell.0 += dx;
            cell.1 += dy;
        }
        cells
    }

    /// Topmost row any square occupies
    pub fn top(&self) -> i8 {
        self.cells.iter().map(|&(_, y)| y).min().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_bar() {
        let piece = Piece::spawn(Shape::Bar, 4, 0);
        assert_eq!(piece.cells, [(4, 0), (5, 0), (6, 0), (7, 0)]);
        assert_eq!(piece.orientation, 0);
        assert!(piece.falling);
    }

    #[test]
    fn test_spawn_offsets_distinct() {
        for shape in Shape::ALL {
            let cells = spawn_offsets(shape);
            for i in 0..4 {
                for j in (i + 1)..4 {
                    assert_ne!(cells[i], cells[j], "{:?} repeats a square", shape);
                }
            }
        }
    }

    #[test]
    fn test_spawn_t_reaches_left_of_anchor() {
        let piece = Piece::spawn(Shape::T, 5, 0);
        assert_eq!(piece.cells, [(5, 0), (4, 1), (5, 1), (6, 1)]);
        assert_eq!(piece.top(), 0);
    }

    #[test]
    fn test_translated() {
        let piece = Piece::spawn(Shape::Square, 2, 3);
        assert_eq!(piece.translated(1, 2), [(3, 5), (4, 5), (3, 6), (4, 6)]);
        // Original untouched
        assert_eq!(piece.cells[0], (2, 3));
    }
}
