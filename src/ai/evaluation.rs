use crate::game::{lines, Board, Side};

/// Score for a line holding two discs of one side and none of the other.
pub const OPEN_TWO: i32 = 10;
/// Score for a line holding three discs of one side and none of the other.
pub const OPEN_THREE: i32 = 50;
/// Score for a completed line of four.
pub const FOUR: i32 = 1000;

/// Trait for evaluating a board position from a side's perspective.
pub trait Heuristic: Send {
    fn evaluate(&self, board: &Board, side: Side) -> i32;
}

/// Default heuristic: scores every line of four that only one side occupies.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineHeuristic;

impl LineHeuristic {
    fn line_weight(discs: usize) -> i32 {
        match discs {
            2 => OPEN_TWO,
            3 => OPEN_THREE,
            4 => FOUR,
            _ => 0,
        }
    }

    fn score_line(own: usize, opp: usize) -> i32 {
        match (own, opp) {
            (own, 0) => Self::line_weight(own),
            (0, opp) => -Self::line_weight(opp),
            _ => 0,
        }
    }
}

impl Heuristic for LineHeuristic {
    fn evaluate(&self, board: &Board, side: Side) -> i32 {
        lines()
            .iter()
            .map(|line| {
                let mut own = 0;
                let mut opp = 0;
                for &(row, col) in line {
                    match board.get(row, col).side() {
                        Some(s) if s == side => own += 1,
                        Some(_) => opp += 1,
                        None => {}
                    }
                }
                Self::score_line(own, opp)
            })
            .sum()
    }
}

/// Static evaluation of `board` for `side` with the default line weights.
/// Positive favours `side`.
pub fn evaluate(board: &Board, side: Side) -> i32 {
    LineHeuristic.evaluate(board, side)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(text: &str) -> Board {
        text.parse().unwrap()
    }

    #[test]
    fn empty_board_is_zero() {
        let board = Board::new();
        assert_eq!(evaluate(&board, Side::Red), 0);
        assert_eq!(evaluate(&board, Side::Yellow), 0);
    }

    #[test]
    fn single_disc_scores_nothing() {
        let mut board = Board::new();
        board.apply_move(3, Side::Red).unwrap();
        assert_eq!(evaluate(&board, Side::Red), 0);
    }

    #[test]
    fn open_three_and_two() {
        // (5,0..3) holds three, (5,1..4) holds two, (5,2..5) one.
        let b = board(
            "
            .......
            .......
            .......
            .......
            .......
            YYY....",
        );
        assert_eq!(evaluate(&b, Side::Yellow), OPEN_THREE + OPEN_TWO);
        assert_eq!(evaluate(&b, Side::Red), -(OPEN_THREE + OPEN_TWO));
    }

    #[test]
    fn blocked_line_scores_zero() {
        let b = board(
            "
            .......
            .......
            .......
            .......
            .......
            YYR....",
        );
        // Only (5,0..3) could hold the pair and it is mixed; the lone R and
        // the pairs elsewhere contribute nothing.
        assert_eq!(evaluate(&b, Side::Yellow), 0);
    }

    #[test]
    fn four_in_a_row_is_still_scored() {
        let b = board(
            "
            .......
            .......
            .......
            .......
            .......
            RRRR...",
        );
        // Lines from col 0: four; col 1: three; col 2: two; col 3: one.
        assert_eq!(evaluate(&b, Side::Red), FOUR + OPEN_THREE + OPEN_TWO);
    }

    #[test]
    fn antisymmetric_between_sides() {
        let b = board(
            "
            .......
            .......
            ...Y...
            ..RYR..
            .YRRY..
            RYYRRY.",
        );
        assert_eq!(evaluate(&b, Side::Yellow), -evaluate(&b, Side::Red));
    }
}
