//! Board tests - placement, locking, full rows and compaction

use proptest::prelude::*;

use tetris_sim::core::pieces::cells_at;
use tetris_sim::core::Board;
use tetris_sim::types::{CellState, PieceKind, Rotation, BOARD_COLS, BOARD_ROWS, INTERIOR_WIDTH};

const ROTATIONS: [Rotation; 4] = [
    Rotation::North,
    Rotation::East,
    Rotation::South,
    Rotation::West,
];

fn fill_row(board: &mut Board, y: i8) {
    for x in 1..=10 {
        board.set(x, y, CellState::Placed);
    }
}

#[test]
fn test_board_dimensions() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_COLS);
    assert_eq!(board.height(), BOARD_ROWS);
    assert_eq!(board.cells().len(), 12 * 21);
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_COLS as i8, 0), None);
    assert_eq!(board.get(0, BOARD_ROWS as i8), None);
}

#[test]
fn test_single_bottom_row_clear() {
    let mut board = Board::new();
    fill_row(&mut board, 19);
    board.set(3, 18, CellState::Placed);
    board.set(7, 0, CellState::Placed);
    let before = board.placed_count();

    let rows = board.find_full_rows();
    assert_eq!(rows.as_slice(), &[19]);

    board.compact(&rows);
    assert_eq!(board.placed_count(), before - INTERIOR_WIDTH);
    // Everything above moved down one row.
    assert!(board.is_occupied(3, 19));
    assert!(board.is_occupied(7, 1));
    // Row 0 is empty again.
    for x in 1..=10 {
        assert_eq!(board.get(x, 0), Some(CellState::Empty));
    }
}

#[test]
fn test_partial_row_is_not_full() {
    let mut board = Board::new();
    for x in 1..=9 {
        board.set(x, 19, CellState::Placed);
    }
    assert!(!board.is_row_full(19));
    assert!(board.find_full_rows().is_empty());
}

#[test]
fn test_floor_row_is_never_full() {
    // The floor is all walls, not placed cells.
    assert!(!Board::new().is_row_full(20));
}

#[test]
fn test_compact_four_rows() {
    let mut board = Board::new();
    for y in 16..=19 {
        fill_row(&mut board, y);
    }
    board.set(2, 15, CellState::Placed);

    let rows = board.find_full_rows();
    assert_eq!(rows.len(), 4);
    board.compact(&rows);

    assert_eq!(board.placed_count(), 1);
    assert!(board.is_occupied(2, 19));
}

#[test]
fn test_lock_then_clear_with_i_piece() {
    let mut board = Board::new();
    for x in [1, 2, 3, 8, 9, 10] {
        board.set(x, 19, CellState::Placed);
    }
    assert!(board.can_place(PieceKind::I, Rotation::North, 5, 19));
    board.lock_piece(PieceKind::I, Rotation::North, 5, 19);
    assert_eq!(board.find_full_rows().as_slice(), &[19]);
}

#[test]
fn test_can_place_above_top_but_not_through_walls() {
    let board = Board::new();
    // I east at row 0 has one cell at row -1.
    assert!(board.can_place(PieceKind::I, Rotation::East, 3, 0));
    // I north at x = 0 reaches column -1.
    assert!(!board.can_place(PieceKind::I, Rotation::North, 0, 0));
    assert!(!board.can_place(PieceKind::I, Rotation::North, 9, 0));
    assert!(board.can_place(PieceKind::I, Rotation::North, 8, 0));
}

proptest! {
    #[test]
    fn prop_can_place_rejects_cells_in_wall_columns(
        kind_idx in 0usize..7,
        rot_idx in 0usize..4,
        x in -4i8..16,
        y in -4i8..20,
    ) {
        let kind = PieceKind::ALL[kind_idx];
        let rotation = ROTATIONS[rot_idx];
        let board = Board::new();

        let touches_wall = cells_at(kind, rotation, x, y)
            .iter()
            .any(|&(gx, _)| gx <= 0 || gx >= BOARD_COLS as i8 - 1);
        if touches_wall {
            prop_assert!(!board.can_place(kind, rotation, x, y));
        }
    }

    #[test]
    fn prop_compaction_removes_exactly_the_full_rows(
        rows in proptest::collection::vec(proptest::collection::vec(any::<bool>(), 10), 20),
        full in proptest::collection::vec(0usize..20, 0..4),
    ) {
        let mut board = Board::new();
        for (y, row) in rows.iter().enumerate() {
            for (i, &placed) in row.iter().enumerate() {
                if placed || full.contains(&y) {
                    board.set(i as i8 + 1, y as i8, CellState::Placed);
                }
            }
        }

        let cleared = board.find_full_rows();
        let before = board.placed_count();
        board.compact(&cleared);

        prop_assert_eq!(board.placed_count(), before - cleared.len() * INTERIOR_WIDTH);
        prop_assert!(board.find_full_rows().is_empty() || cleared.len() == 4);
        // Walls are untouched.
        for y in 0..BOARD_ROWS as i8 {
            prop_assert_eq!(board.get(0, y), Some(CellState::Wall));
            prop_assert_eq!(board.get(11, y), Some(CellState::Wall));
        }
    }
}
