use super::{Board, LegalColumns, MoveError, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Side),
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PlayError {
    #[error(transparent)]
    Move(#[from] MoveError),

    #[error("game is over")]
    GameOver,
}

/// Where a disc landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub row: usize,
    pub col: usize,
    pub side: Side,
}

/// A game in progress: the authoritative board, whose turn it is, and the
/// outcome once the game has ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameState {
    board: Board,
    current_side: Side,
    outcome: Option<GameOutcome>,
    move_count: usize,
}

impl GameState {
    /// Create initial game state
    pub fn initial() -> Self {
        GameState {
            board: Board::new(),
            current_side: Side::Red, // Red starts
            outcome: None,
            move_count: 0,
        }
    }

    /// Resume from an arbitrary board with `to_move` on turn.
    pub fn from_board(board: Board, to_move: Side) -> Self {
        let outcome = Side::ALL
            .into_iter()
            .find(|&side| board.has_won(side))
            .map(GameOutcome::Winner)
            .or_else(|| board.is_draw().then_some(GameOutcome::Draw));

        GameState {
            board,
            current_side: to_move,
            outcome,
            move_count: board.disc_count(),
        }
    }

    /// Start a new game in place.
    pub fn reset(&mut self) {
        *self = GameState::initial();
    }

    pub fn current_side(&self) -> Side {
        self.current_side
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Discs played so far.
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// Get list of legal columns (empty once the game is over)
    pub fn legal_columns(&self) -> LegalColumns {
        if self.is_terminal() {
            return LegalColumns::new();
        }
        self.board.legal_columns()
    }

    /// Play the current side's disc in `column`, then settle the outcome and
    /// pass the turn.
    pub fn apply_move(&mut self, column: usize) -> Result<Placement, PlayError> {
        if self.is_terminal() {
            return Err(PlayError::GameOver);
        }

        let side = self.current_side;
        let row = self.board.apply_move(column, side)?;
        self.move_count += 1;

        // A win on the last cell beats the draw.
        if self.board.has_won(side) {
            self.outcome = Some(GameOutcome::Winner(side));
        } else if self.board.is_draw() {
            self.outcome = Some(GameOutcome::Draw);
        }

        self.current_side = side.other();

        Ok(Placement {
            row,
            col: column,
            side,
        })
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}
