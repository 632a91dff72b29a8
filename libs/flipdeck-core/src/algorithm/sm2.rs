//! Simplified SM-2 spaced repetition algorithm.
//!
//! Ratings run 0-3 instead of SuperMemo's 0-5. A failed review resets the
//! interval and repetition count but leaves the ease factor untouched.

use super::SpacedRepetitionAlgorithm;
use crate::types::{Quality, SchedulingState, INITIAL_EASE, MAXIMUM_INTERVAL, MINIMUM_EASE};
use chrono::NaiveDate;

/// SM-2 algorithm with configurable parameters.
#[derive(Debug, Clone)]
pub struct Sm2 {
    pub initial_ease: f64,
    pub minimum_ease: f64,
    pub first_interval: u32,
    pub second_interval: u32,
    pub maximum_interval: u32,
}

impl Default for Sm2 {
    fn default() -> Self {
        Self {
            initial_ease: INITIAL_EASE,
            minimum_ease: MINIMUM_EASE,
            first_interval: 1,
            second_interval: 6,
            maximum_interval: MAXIMUM_INTERVAL,
        }
    }
}

impl SpacedRepetitionAlgorithm for Sm2 {
    fn name(&self) -> &'static str {
        "sm2"
    }

    fn initial_state(&self, today: NaiveDate) -> SchedulingState {
        SchedulingState {
            ease_factor: self.initial_ease,
            ..SchedulingState::initial(today)
        }
    }

    fn schedule(
        &self,
        state: Option<&SchedulingState>,
        quality: Quality,
        today: NaiveDate,
    ) -> SchedulingState {
        let mut next = state
            .cloned()
            .unwrap_or_else(|| self.initial_state(today));

        if !quality.is_success() {
            next.interval = 1;
            next.repetitions = 0;
            next.next_review_date = today;
            return next;
        }

        next.ease_factor = self.next_ease(next.ease_factor, quality);
        let cap = self.maximum_interval.max(1);
        next.interval = match next.repetitions {
            0 => self.first_interval,
            1 => self.second_interval,
            _ => (f64::from(next.interval) * next.ease_factor)
                .round()
                .clamp(1.0, f64::from(cap)) as u32,
        }
        .min(cap);
        next.repetitions = next.repetitions.saturating_add(1);
        next.next_review_date = SchedulingState::due_after(today, next.interval);
        next
    }
}

impl Sm2 {
    /// Ease adjustment: +0.10 for easy, 0 for good, -0.14 for hard.
    fn next_ease(&self, ease: f64, quality: Quality) -> f64 {
        let miss = f64::from(3 - quality.to_value());
        let delta = 0.1 - miss * (0.08 + miss * 0.02);
        (ease + delta).max(self.minimum_ease)
    }
}
