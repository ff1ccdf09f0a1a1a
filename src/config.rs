use std::path::Path;

use crate::error::ConfigError;
use crate::game::{GameMode, Side};

/// Deepest search the config accepts. Node count grows as `7^depth`.
pub const MAX_SEARCH_DEPTH: u32 = 10;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub search: SearchConfig,
    pub ui: UiConfig,
}

/// Mode and player labels.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub mode: GameMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub red_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yellow_name: Option<String>,
}

impl GameConfig {
    /// Configured name for `side`, or the mode's default label.
    pub fn player_name(&self, side: Side) -> &str {
        let configured = match side {
            Side::Red => self.red_name.as_deref(),
            Side::Yellow => self.yellow_name.as_deref(),
        };
        configured.unwrap_or_else(|| self.mode.default_player_name(side))
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Plies of lookahead for computer moves.
    pub depth: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig { depth: 5 }
    }
}

/// Pacing for computer moves in the terminal UI.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Pause before the computer answers a human move.
    pub computer_delay_ms: u64,
    /// Pause between moves while the computer plays itself.
    pub autoplay_interval_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            computer_delay_ms: 200,
            autoplay_interval_ms: 300,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.depth > MAX_SEARCH_DEPTH {
            return Err(ConfigError::Validation(format!(
                "search.depth must be <= {MAX_SEARCH_DEPTH}"
            )));
        }
        if self.game.red_name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "game.red_name must not be empty".into(),
            ));
        }
        if self
            .game
            .yellow_name
            .as_deref()
            .is_some_and(|n| n.trim().is_empty())
        {
            return Err(ConfigError::Validation(
                "game.yellow_name must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
