use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::game::PlayerKind;
use crate::games::GameKind;

/// Deepest search the configuration accepts.
pub const MAX_DEPTH: u32 = 10;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub session: SessionConfig,
    pub players: PlayersConfig,
    pub ai: AiConfig,
    pub word: WordConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub game: GameKind,
    /// Fixed seed for reproducible sessions; OS entropy when absent.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            game: GameKind::Classic,
            seed: None,
        }
    }
}

/// One seat at the table.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SeatConfig {
    pub name: String,
    pub kind: PlayerKind,
}

impl SeatConfig {
    pub fn new(name: impl Into<String>, kind: PlayerKind) -> Self {
        SeatConfig {
            name: name.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlayersConfig {
    pub first: SeatConfig,
    pub second: SeatConfig,
}

impl Default for PlayersConfig {
    fn default() -> Self {
        PlayersConfig {
            first: SeatConfig::new("Player 1", PlayerKind::Human),
            second: SeatConfig::new("Computer", PlayerKind::Computer),
        }
    }
}

impl PlayersConfig {
    pub fn seats(&self) -> [SeatConfig; 2] {
        [self.first.clone(), self.second.clone()]
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Overrides the variant's default search depth.
    pub depth: Option<u32>,
    pub pruning: bool,
}

impl Default for AiConfig {
    fn default() -> Self {
        AiConfig {
            depth: None,
            pruning: true,
        }
    }
}

impl AiConfig {
    /// Depth to search for `game`.
    pub fn depth_for(&self, game: GameKind) -> u32 {
        self.depth.unwrap_or_else(|| game.default_depth())
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct WordConfig {
    pub dictionary: PathBuf,
}

impl Default for WordConfig {
    fn default() -> Self {
        WordConfig {
            dictionary: PathBuf::from("dic.txt"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` wins when set.
    pub filter: String,
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: "info".to_string(),
            file: None,
        }
    }
}

impl AppConfig {
    /// Default config file name, looked up in the working directory.
    pub const DEFAULT_PATH: &'static str = "grid-games.toml";

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
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(depth) = self.ai.depth {
            if depth == 0 || depth > MAX_DEPTH {
                return Err(ConfigError::Validation(format!(
                    "ai.depth must be in 1..={MAX_DEPTH}"
                )));
            }
        }
        for (seat, label) in [(&self.players.first, "first"), (&self.players.second, "second")] {
            if seat.name.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "players.{label}.name must not be empty"
                )));
            }
        }
        if self.logging.filter.trim().is_empty() {
            return Err(ConfigError::Validation(
                "logging.filter must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Render the default configuration as TOML.
    pub fn default_toml() -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(&AppConfig::default())?)
    }
}
