use crate::game::GameState;

/// Anything that can choose a column for the side to move.
pub trait Agent {
    /// Select a column for `state.current_side()`. `None` means no move is
    /// available and the caller must not play one.
    fn select_action(&mut self, state: &GameState) -> Option<usize>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}
