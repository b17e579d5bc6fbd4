use std::path::PathBuf;

use crate::board::{Player, Pos};
use crate::game::GameStatus;

/// Contract violations when asking the scorer about a cell.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RulesError {
    #[error("position ({row}, {col}) is outside the 30x30 board")]
    OutOfBounds { row: i32, col: i32 },

    #[error("cell {pos} holds {found:?}, expected {expected}")]
    SymbolMismatch {
        pos: Pos,
        expected: Player,
        found: Option<Player>,
    },
}

/// Errors raised when applying a move to a match.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("match is not accepting moves (status: {0:?})")]
    NotPlaying(GameStatus),

    #[error("cell {0} is already occupied")]
    Occupied(Pos),

    #[error("rules error: {0}")]
    Rules(#[from] RulesError),
}

/// Errors reading serialized positions, sequences, boards and snapshots.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    #[error("malformed position key '{0}' (expected \"row,col\" inside the board)")]
    PositionKey(String),

    #[error("malformed sequence: {0}")]
    Sequence(String),

    #[error("malformed board: {0}")]
    BoardShape(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
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

    #[error("config validation error: {0}")]
    Validation(String),
}
