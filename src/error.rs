use std::path::PathBuf;

use crate::game::MoveError;

/// Errors that can occur when loading the word list.
#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("failed to read dictionary {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("dictionary contains no words")]
    Empty,
}

/// Errors raised by a user interface while talking to the player.
#[derive(Debug, thiserror::Error)]
pub enum UiError {
    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("input closed")]
    InputClosed,

    #[error("session aborted by the player")]
    Aborted,

    #[error("{0} has no move available")]
    NoMoveAvailable(String),
}

/// Malformed move input typed at the console.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseMoveError {
    #[error("expected {expected} values, got {found}")]
    WrongArity { expected: usize, found: usize },

    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("'{0}' is not a symbol you can write")]
    UnknownSymbol(String),
}

/// Errors that end a game session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("ui error: {0}")]
    Ui(#[from] UiError),

    #[error("dictionary error: {0}")]
    Dictionary(#[from] DictionaryError),

    #[error("{player} produced an illegal move {mv}: {source}")]
    ComputerMoveRejected {
        player: String,
        mv: String,
        source: MoveError,
    },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("failed to render TOML: {0}")]
    TomlRender(#[from] toml::ser::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
