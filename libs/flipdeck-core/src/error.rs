//! Error types for flipdeck-core.

use thiserror::Error;

/// Result type alias using SchedulerError.
pub type Result<T> = std::result::Result<T, SchedulerError>;

/// Errors raised by the review scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    #[error("invalid quality rating {0}, expected 0-3")]
    InvalidQuality(u8),
}

/// Errors raised when building decks and cards from user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("deck name must not be empty")]
    EmptyDeckName,

    #[error("card question must not be empty")]
    EmptyQuestion,

    #[error("card answer must not be empty")]
    EmptyAnswer,
}
