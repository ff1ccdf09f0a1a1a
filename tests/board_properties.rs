//! Property tests for the board model over random move sequences.
//!
//! Invariants covered:
//! - Discs stack contiguously from the bottom and are never overwritten.
//! - A full column rejects further moves and leaves the board unchanged.
//! - `apply_move` followed by `undo_move` restores the board exactly.
//! - `has_won` is symmetric under swapping the colours.
//! - `evaluate` is antisymmetric between the two sides.
use connect_four::ai::evaluate;
use connect_four::game::{Board, Cell, MoveError, Side, COLS};
use proptest::prelude::*;

/// Play `columns` alternately from Red, skipping full columns.
fn play(columns: &[usize]) -> Board {
    let mut board = Board::new();
    let mut side = Side::Red;
    for &col in columns {
        if board.apply_move(col, side).is_ok() {
            side = side.other();
        }
    }
    board
}

fn swap_colours(board: &Board) -> Board {
    let swapped: String = board
        .to_string()
        .chars()
        .map(|ch| match ch {
            'R' => 'Y',
            'Y' => 'R',
            other => other,
        })
        .collect();
    swapped.parse().expect("swapped board keeps its shape")
}

fn moves() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0..COLS, 0..60)
}

proptest! {
    #[test]
    fn discs_stack_without_overwrites(columns in moves()) {
        let mut board = Board::new();
        let mut side = Side::Red;
        let mut placed = 0;

        for col in columns {
            let before = board;
            match board.apply_move(col, side) {
                Ok(row) => {
                    prop_assert_eq!(before.get(row, col), Cell::Empty);
                    prop_assert_eq!(board.get(row, col), side.to_cell());
                    placed += 1;
                    side = side.other();
                }
                Err(err) => {
                    prop_assert_eq!(err, MoveError::ColumnFull);
                    prop_assert!(before.is_column_full(col));
                    prop_assert_eq!(board, before);
                }
            }
            prop_assert_eq!(board.disc_count(), placed);
        }

        // Text round trip rejects floating discs, so this checks contiguity.
        let reparsed: Board = board.to_string().parse().unwrap();
        prop_assert_eq!(reparsed, board);
    }

    #[test]
    fn undo_restores_board(columns in moves(), col in 0..COLS, red in any::<bool>()) {
        let mut board = play(&columns);
        let before = board;
        let side = if red { Side::Red } else { Side::Yellow };

        if let Ok(row) = board.apply_move(col, side) {
            board.undo_move(col, row);
        }
        prop_assert_eq!(board, before);
    }

    #[test]
    fn legal_columns_match_open_tops(columns in moves()) {
        let board = play(&columns);
        let legal = board.legal_columns();
        let expected: Vec<usize> = (0..COLS).filter(|&c| board.get(0, c) == Cell::Empty).collect();

        prop_assert_eq!(legal.as_slice(), expected.as_slice());
        prop_assert_eq!(board.is_draw(), legal.is_empty());
    }

    #[test]
    fn has_won_symmetric_under_colour_swap(columns in moves()) {
        let board = play(&columns);
        let swapped = swap_colours(&board);

        prop_assert_eq!(board.has_won(Side::Red), swapped.has_won(Side::Yellow));
        prop_assert_eq!(board.has_won(Side::Yellow), swapped.has_won(Side::Red));
    }

    #[test]
    fn evaluation_is_antisymmetric(columns in moves()) {
        let board = play(&columns);

        prop_assert_eq!(evaluate(&board, Side::Yellow), -evaluate(&board, Side::Red));
        prop_assert_eq!(evaluate(&swap_colours(&board), Side::Red), evaluate(&board, Side::Yellow));
    }
}
