use serde::{Deserialize, Serialize};

use super::Side;

/// Who plays which side.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum GameMode {
    #[default]
    #[serde(rename = "pvp")]
    #[value(name = "pvp")]
    HumanVsHuman,

    /// The computer plays Yellow.
    #[serde(rename = "pve")]
    #[value(name = "pve")]
    HumanVsComputer,

    #[serde(rename = "eve")]
    #[value(name = "eve")]
    ComputerVsComputer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Controller {
    Human,
    Computer,
}

impl GameMode {
    pub fn controller(self, side: Side) -> Controller {
        match (self, side) {
            (GameMode::HumanVsHuman, _) => Controller::Human,
            (GameMode::HumanVsComputer, Side::Red) => Controller::Human,
            (GameMode::HumanVsComputer, Side::Yellow) => Controller::Computer,
            (GameMode::ComputerVsComputer, _) => Controller::Computer,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GameMode::HumanVsHuman => "Human vs Human",
            GameMode::HumanVsComputer => "Human vs Computer",
            GameMode::ComputerVsComputer => "Computer vs Computer",
        }
    }

    /// Name shown for `side` when none is configured.
    pub fn default_player_name(self, side: Side) -> &'static str {
        match (self, side) {
            (_, Side::Red) => "Player 1",
            (GameMode::HumanVsComputer, Side::Yellow) => "Computer",
            (_, Side::Yellow) => "Player 2",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_computer_plays_yellow_against_human() {
        let mode = GameMode::HumanVsComputer;
        assert_eq!(mode.controller(Side::Red), Controller::Human);
        assert_eq!(mode.controller(Side::Yellow), Controller::Computer);
    }

    #[test]
    fn test_controllers_per_mode() {
        for side in Side::ALL {
            assert_eq!(GameMode::HumanVsHuman.controller(side), Controller::Human);
            assert_eq!(
                GameMode::ComputerVsComputer.controller(side),
                Controller::Computer
            );
        }
    }

    #[test]
    fn test_default_player_names() {
        assert_eq!(GameMode::HumanVsHuman.default_player_name(Side::Red), "Player 1");
        assert_eq!(GameMode::HumanVsHuman.default_player_name(Side::Yellow), "Player 2");
        assert_eq!(
            GameMode::HumanVsComputer.default_player_name(Side::Yellow),
            "Computer"
        );
    }
}
