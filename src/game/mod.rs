//! Core Connect Four game logic: board representation, sides, game modes, and
//! the session state machine the drivers own.

mod board;
mod mode;
mod side;
mod state;

pub use board::{lines, Board, Cell, LegalColumns, Line, MoveError, COLS, CONNECT, ROWS};
pub use mode::{Controller, GameMode};
pub use side::Side;
pub use state::{GameOutcome, GameState, Placement, PlayError};
