//! Terminal UI: the game screen, keyboard handling, and paced computer moves.

mod app;
mod game_view;

pub use app::App;
