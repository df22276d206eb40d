//! Errors raised while bringing the game up.
//!
//! The simulation itself never fails; only startup and configuration do.

use thiserror::Error;

/// Fatal startup errors.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings error: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("invalid tuning: {0}")]
    InvalidTuning(String),

    #[error("level generation produced no obstacles")]
    EmptyLevel,
}

pub type Result<T> = std::result::Result<T, GameError>;
