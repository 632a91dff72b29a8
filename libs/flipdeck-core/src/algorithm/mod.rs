//! Spaced repetition scheduling.

pub mod sm2;

use crate::types::{Quality, SchedulingState};
use chrono::NaiveDate;

/// Trait for spaced repetition algorithms.
pub trait SpacedRepetitionAlgorithm: Send + Sync {
    /// Algorithm identifier.
    fn name(&self) -> &'static str;

    /// Initial state for a card that has never been reviewed.
    fn initial_state(&self, today: NaiveDate) -> SchedulingState;

    /// Calculate the next scheduling state after a review on `today`.
    ///
    /// `state` is `None` for a card that has never been reviewed.
    fn schedule(
        &self,
        state: Option<&SchedulingState>,
        quality: Quality,
        today: NaiveDate,
    ) -> SchedulingState;
}

/// Advance a card's scheduling state with the default SM-2 parameters.
pub fn advance(
    state: Option<&SchedulingState>,
    quality: Quality,
    today: NaiveDate,
) -> SchedulingState {
    sm2::Sm2::default().schedule(state, quality, today)
}
