//! Property tests for the packed grid and the border invariant

use proptest::prelude::*;

use packtris::core::{GameEngine, PackedGrid};
use packtris::types::{CellValue, InputState, FLOOR_ROW, GRID_HEIGHT, GRID_WIDTH, RIGHT_WALL_COL};

fn cell_value() -> impl Strategy<Value = CellValue> {
    (0u8..4).prop_map(CellValue::from_bits)
}

fn input_state() -> impl Strategy<Value = InputState> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(shift_left, shift_right, rotate, fast_drop)| InputState {
            shift_left,
            shift_right,
            rotate,
            fast_drop,
        },
    )
}

fn assert_borders(engine: &GameEngine) {
    for row in 0..GRID_HEIGHT {
        for col in 0..GRID_WIDTH {
            if PackedGrid::is_border(row, col) {
                assert_eq!(engine.cell(row, col), CellValue::Wall, "({}, {})", row, col);
            } else {
                assert_ne!(engine.cell(row, col), CellValue::Wall, "({}, {})", row, col);
            }
        }
    }
}

#[test]
fn border_cells_are_walls_floor_and_sides() {
    assert!(PackedGrid::is_border(0, 0));
    assert!(PackedGrid::is_border(7, RIGHT_WALL_COL));
    assert!(PackedGrid::is_border(FLOOR_ROW, 5));
    assert!(!PackedGrid::is_border(0, 5));
    assert!(!PackedGrid::is_border(FLOOR_ROW - 1, 1));
}

proptest! {
    #[test]
    fn set_then_get_leaves_neighbours_alone(
        fill in proptest::collection::vec(cell_value(), GRID_WIDTH * GRID_HEIGHT),
        row in 0..GRID_HEIGHT,
        col in 0..GRID_WIDTH,
        value in cell_value(),
    ) {
        let mut grid = PackedGrid::new();
        for (i, v) in fill.iter().enumerate() {
            grid.set(i / GRID_WIDTH, i % GRID_WIDTH, *v);
        }
        let before = grid.clone();

        grid.set(row, col, value);
        prop_assert_eq!(grid.get(row, col), value);

        for r in 0..GRID_HEIGHT {
            for c in 0..GRID_WIDTH {
                if (r, c) != (row, col) {
                    prop_assert_eq!(grid.get(r, c), before.get(r, c));
                }
            }
        }
    }

    #[test]
    fn borders_survive_any_rollout(
        seed in any::<u32>(),
        inputs in proptest::collection::vec(input_state(), 0..400),
    ) {
        let mut engine = GameEngine::new(seed);
        assert_borders(&engine);
        for input in inputs {
            engine.tick(input);
            assert_borders(&engine);
        }
    }

    #[test]
    fn falling_cells_always_match_active_piece(
        seed in any::<u32>(),
        inputs in proptest::collection::vec(input_state(), 1..300),
    ) {
        let mut engine = GameEngine::new(seed);
        for input in inputs {
            engine.tick(input);
            let falling = engine.grid().count(CellValue::Falling);
            match engine.active() {
                Some(piece) => {
                    prop_assert_eq!(falling, 4);
                    for &(x, y) in piece.cells.iter() {
                        prop_assert_eq!(engine.cell(y as usize, x as usize), CellValue::Falling);
                    }
                }
                None => prop_assert_eq!(falling, 0),
            }
        }
    }
}
