//! Core library for the flipdeck study application.
//!
//! Provides:
//! - Simplified SM-2 review scheduler
//! - Due-set selection over a card collection
//! - Append-only revision log and study statistics
//! - Shared types (Card, Deck, SchedulingState, Quality, etc.)

pub mod algorithm;
pub mod due;
pub mod error;
pub mod revision;
pub mod search;
pub mod session;
pub mod stats;
pub mod types;

pub use algorithm::{advance, sm2::Sm2, SpacedRepetitionAlgorithm};
pub use due::{count_due, due_cards, is_due, SchedulingStates};
pub use error::{Result, SchedulerError, ValidationError};
pub use revision::{RevisionEntry, RevisionLog};
pub use search::{search_cards, search_decks};
pub use session::SessionStats;
pub use stats::{DeckStatistics, StudyStatistics};
pub use types::{
    Attachment, AttachmentKind, Card, Deck, NewCard, NewDeck, Outcome, Quality, SchedulingState,
};
