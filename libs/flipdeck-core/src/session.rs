//! Running tally for a single study session.

use serde::{Deserialize, Serialize};

use crate::types::Quality;

/// Ratings given during one pass through a set of cards.
///
/// Hard and easy ratings also count as correct here, unlike the revision log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub correct: u32,
    pub incorrect: u32,
    pub hard: u32,
    pub easy: u32,
}

impl SessionStats {
    pub fn record(&mut self, quality: Quality) {
        match quality {
            Quality::Incorrect => self.incorrect += 1,
            Quality::Hard => {
                self.hard += 1;
                self.correct += 1;
            }
            Quality::Good => self.correct += 1,
            Quality::Easy => {
                self.easy += 1;
                self.correct += 1;
            }
        }
    }

    /// Cards rated so far.
    pub fn total(&self) -> u32 {
        self.correct + self.incorrect
    }

    /// Rounded percentage of correct ratings, 0 for an empty session.
    pub fn percentage(&self) -> u32 {
        percent(self.correct, self.total())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

pub(crate) fn percent(part: u32, total: u32) -> u32 {
    if total == 0 {
        0
    } else {
        (f64::from(part) / f64::from(total) * 100.0).round() as u32
    }
}
