//! Database error types.

use flipdeck_core::{SchedulerError, ValidationError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("corrupt collection: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Scheduler(#[from] SchedulerError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("card not found: {0}")]
    CardNotFound(String),

    #[error("deck not found: {0}")]
    DeckNotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("repository lock poisoned")]
    LockPoisoned,

    #[error("invalid configuration: {0}")]
    Config(String),
}
