//! Fixed-depth minimax over the board model.
//!
//! The search plays hypothetical discs onto a scratch copy of the caller's
//! board with [`Board::apply_move`] and takes them back with
//! [`Board::undo_move`]. Columns are tried in ascending order and a score only
//! replaces the best so far when strictly better, so ties always resolve to
//! the lowest column.

use crate::game::{Board, GameState, LegalColumns, Side};

use super::agent::Agent;
use super::evaluation::{Heuristic, LineHeuristic};
use super::random::RandomAgent;

/// Result of a root search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Best column, `None` when the root position is terminal.
    pub column: Option<usize>,
    /// Minimax value of the position for the searching side.
    pub score: i32,
    /// Positions visited, root included.
    pub nodes: u64,
}

/// Pick Yellow's move on `board`, looking `depth` plies ahead.
///
/// Returns `None` when the board is full, already decided, or `depth` is 0
/// (static evaluation only). Callers fall back to any legal column.
pub fn select_move(board: &Board, depth: u32) -> Option<usize> {
    select_move_for(board, depth, Side::Yellow)
}

/// Pick a move for `side`, maximising its static evaluation.
pub fn select_move_for(board: &Board, depth: u32, side: Side) -> Option<usize> {
    search(board, depth, side, &LineHeuristic).column
}

/// Run a full minimax search rooted at `board` with `side` maximising.
///
/// A terminal root is scored statically and yields no column.
pub fn search(board: &Board, depth: u32, side: Side, heuristic: &dyn Heuristic) -> SearchOutcome {
    let mut scratch = *board;
    let mut searcher = Searcher {
        heuristic,
        side,
        nodes: 1,
    };

    let legal = scratch.legal_columns();
    if is_terminal(&scratch, depth, &legal) {
        return SearchOutcome {
            column: None,
            score: heuristic.evaluate(board, side),
            nodes: searcher.nodes,
        };
    }

    let mut best: Option<(usize, i32)> = None;
    for col in legal {
        let Ok(row) = scratch.apply_move(col, side) else {
            continue;
        };
        let score = searcher.minimax(&mut scratch, depth - 1, false);
        scratch.undo_move(col, row);

        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((col, score));
        }
    }

    match best {
        Some((col, score)) => SearchOutcome {
            column: Some(col),
            score,
            nodes: searcher.nodes,
        },
        None => SearchOutcome {
            column: None,
            score: heuristic.evaluate(board, side),
            nodes: searcher.nodes,
        },
    }
}

fn is_terminal(board: &Board, depth: u32, legal: &LegalColumns) -> bool {
    depth == 0 || legal.is_empty() || board.has_won(Side::Red) || board.has_won(Side::Yellow)
}

struct Searcher<'h> {
    heuristic: &'h dyn Heuristic,
    /// The maximising side.
    side: Side,
    nodes: u64,
}

impl Searcher<'_> {
    fn minimax(&mut self, board: &mut Board, depth: u32, maximizing: bool) -> i32 {
        self.nodes += 1;

        let legal = board.legal_columns();
        if is_terminal(board, depth, &legal) {
            return self.heuristic.evaluate(board, self.side);
        }

        let mover = if maximizing { self.side } else { self.side.other() };
        let mut best = if maximizing { i32::MIN } else { i32::MAX };

        for col in legal {
            let Ok(row) = board.apply_move(col, mover) else {
                continue;
            };
            let score = self.minimax(board, depth - 1, !maximizing);
            board.undo_move(col, row);

            if (maximizing && score > best) || (!maximizing && score < best) {
                best = score;
            }
        }

        best
    }
}

/// Minimax agent searching from the perspective of whichever side is to move.
///
/// When the search has nothing to say about a live game (depth 0) the agent
/// plays a uniformly random legal column instead.
pub struct MinimaxAgent {
    depth: u32,
    heuristic: Box<dyn Heuristic>,
    fallback: RandomAgent,
}

impl MinimaxAgent {
    pub fn new(depth: u32) -> Self {
        Self::with_heuristic(depth, Box::new(LineHeuristic))
    }

    pub fn with_heuristic(depth: u32, heuristic: Box<dyn Heuristic>) -> Self {
        MinimaxAgent {
            depth,
            heuristic,
            fallback: RandomAgent::new(),
        }
    }

    /// Seed the random fallback for reproducible games.
    pub fn with_fallback_seed(mut self, seed: u64) -> Self {
        self.fallback = RandomAgent::with_seed(seed);
        self
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }
}

impl Agent for MinimaxAgent {
    fn select_action(&mut self, state: &GameState) -> Option<usize> {
        if state.is_terminal() {
            return None;
        }

        let side = state.current_side();
        let outcome = search(state.board(), self.depth, side, self.heuristic.as_ref());
        log::debug!(
            "minimax depth {} for {}: column {:?}, score {}, {} nodes",
            self.depth,
            side.name(),
            outcome.column,
            outcome.score,
            outcome.nodes
        );
        outcome
            .column
            .or_else(|| self.fallback.select_action(state))
    }

    fn name(&self) -> &str {
        "Minimax"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::evaluate;
    use crate::game::{GameOutcome, COLS, ROWS};

    fn board(text: &str) -> Board {
        text.parse().unwrap()
    }

    // --- select_move tests ---

    #[test]
    fn takes_only_winning_column() {
        let b = board(
            "
            .......
            .......
            .......
            .......
            RR.....
            RR..YYY",
        );
        for depth in 1..=4 {
            assert_eq!(select_move(&b, depth), Some(3), "depth {depth}");
        }
    }

    #[test]
    fn blocks_single_threat() {
        let b = board(
            "
            .......
            .......
            .......
            .......
            YY....Y
            RRR...R",
        );
        for depth in 1..=4 {
            assert_eq!(select_move(&b, depth), Some(3), "depth {depth}");
        }
    }

    #[test]
    fn prefers_win_over_block() {
        // Red threatens col 3; Yellow completes the column-6 stack instead.
        let b = board(
            "
            .......
            .......
            .......
            ......Y
            ......Y
            RRR.R.Y",
        );
        for depth in 1..=3 {
            assert_eq!(select_move(&b, depth), Some(6), "depth {depth}");
        }
    }

    #[test]
    fn full_board_has_no_move() {
        let mut b = Board::new();
        for col in 0..COLS {
            for _ in 0..ROWS {
                b.apply_move(col, Side::Red).unwrap();
            }
        }
        assert_eq!(select_move(&b, 5), None);

        let outcome = search(&b, 5, Side::Yellow, &LineHeuristic);
        assert_eq!(outcome.column, None);
        assert_eq!(outcome.nodes, 1);
    }

    #[test]
    fn ties_resolve_to_lowest_column() {
        // Every first disc on an empty board scores 0 at shallow depth.
        let b = Board::new();
        assert_eq!(select_move(&b, 1), Some(0));
        assert_eq!(select_move(&b, 2), Some(0));
    }

    #[test]
    fn repeated_searches_agree() {
        let b = board(
            "
            .......
            .......
            .......
            ...R...
            ...Y...
            ..YRR..",
        );
        let first = search(&b, 3, Side::Yellow, &LineHeuristic);
        for _ in 0..3 {
            assert_eq!(search(&b, 3, Side::Yellow, &LineHeuristic), first);
        }
    }

    #[test]
    fn depth_zero_is_static_evaluation_only() {
        let b = board(
            "
            .......
            .......
            .......
            .......
            RR.....
            RR..YYY",
        );
        let outcome = search(&b, 0, Side::Yellow, &LineHeuristic);
        assert_eq!(outcome.column, None);
        assert_eq!(outcome.score, evaluate(&b, Side::Yellow));
        assert_eq!(outcome.nodes, 1);
        assert_eq!(select_move(&b, 0), None);
    }

    #[test]
    fn decided_board_is_not_expanded() {
        let b = board(
            "
            .......
            .......
            .......
            .......
            YYY....
            RRRR...",
        );
        let outcome = search(&b, 3, Side::Yellow, &LineHeuristic);
        assert_eq!(outcome.column, None);
        assert_eq!(outcome.score, evaluate(&b, Side::Yellow));
        assert_eq!(outcome.nodes, 1);
    }

    #[test]
    fn counts_every_node() {
        // Root, 7 replies, 49 leaves.
        let outcome = search(&Board::new(), 2, Side::Yellow, &LineHeuristic);
        assert_eq!(outcome.nodes, 1 + 7 + 49);
    }

    #[test]
    fn search_leaves_board_untouched() {
        let b = board(
            "
            .......
            .......
            .......
            .......
            ..Y....
            .RRY...",
        );
        let copy = b;
        let _ = select_move(&b, 4);
        assert_eq!(b, copy);
    }

    #[test]
    fn searches_for_red() {
        // Mirror of the single-win position with colours swapped.
        let b = board(
            "
            .......
            .......
            .......
            .......
            YY.....
            YY..RRR",
        );
        assert_eq!(select_move_for(&b, 2, Side::Red), Some(3));
    }

    // --- Agent tests ---

    #[test]
    fn agent_selects_legal_action() {
        let mut agent = MinimaxAgent::new(3);
        let state = GameState::initial();
        let action = agent.select_action(&state).unwrap();
        assert!(state.legal_columns().contains(&action));
    }

    #[test]
    fn agent_has_no_move_once_game_is_over() {
        let mut state = GameState::initial();
        for col in [0, 0, 1, 1, 2, 2, 3] {
            state.apply_move(col).unwrap();
        }
        assert!(state.is_terminal());
        assert_eq!(MinimaxAgent::new(3).select_action(&state), None);
    }

    #[test]
    fn depth_zero_agent_falls_back_to_legal_column() {
        let mut state = GameState::initial();
        for _ in 0..6 {
            state.apply_move(0).unwrap();
        }
        let mut agent = MinimaxAgent::new(0).with_fallback_seed(3);
        for _ in 0..50 {
            let column = agent.select_action(&state).unwrap();
            assert_ne!(column, 0, "column 0 is full");
            assert!(state.legal_columns().contains(&column));
        }
    }

    #[test]
    fn full_game_vs_self_completes() {
        let mut red = MinimaxAgent::new(2);
        let mut yellow = MinimaxAgent::new(3);
        let mut state = GameState::initial();

        while !state.is_terminal() {
            let action = match state.current_side() {
                Side::Red => red.select_action(&state),
                Side::Yellow => yellow.select_action(&state),
            }
            .expect("non-terminal game has a legal column");
            state.apply_move(action).unwrap();
        }

        assert!(state.outcome().is_some());
    }

    #[test]
    fn beats_random_agent_as_yellow() {
        let games = 10;
        let mut minimax_wins = 0;

        for seed in 0..games {
            let mut random = RandomAgent::with_seed(seed);
            let mut minimax = MinimaxAgent::new(3);
            let mut state = GameState::initial();

            while !state.is_terminal() {
                let action = match state.current_side() {
                    Side::Red => random.select_action(&state),
                    Side::Yellow => minimax.select_action(&state),
                }
                .unwrap();
                state.apply_move(action).unwrap();
            }

            if state.outcome() == Some(GameOutcome::Winner(Side::Yellow)) {
                minimax_wins += 1;
            }
        }

        assert!(
            minimax_wins >= 8,
            "Minimax should beat random, won {minimax_wins}/{games}"
        );
    }

    #[test]
    fn name_is_minimax() {
        let agent = MinimaxAgent::new(5);
        assert_eq!(agent.name(), "Minimax");
        assert_eq!(agent.depth(), 5);
    }
}
