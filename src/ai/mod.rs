//! Computer players: the minimax search, its static evaluator, and the agent
//! trait the drivers call through.

mod agent;
pub mod evaluation;
pub mod minimax;
mod random;

pub use agent::Agent;
pub use evaluation::{evaluate, Heuristic, LineHeuristic};
pub use minimax::{search, select_move, select_move_for, MinimaxAgent, SearchOutcome};
pub use random::RandomAgent;
