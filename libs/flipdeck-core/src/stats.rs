//! Study statistics derived from the revision log.

use std::collections::{BTreeSet, HashSet};

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::revision::{RevisionEntry, RevisionLog};
use crate::session::percent;
use crate::types::{Card, Deck, Outcome};

/// Per-deck performance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeckStatistics {
    pub deck_id: String,
    pub name: String,
    pub card_count: usize,
    pub correct: u32,
    pub incorrect: u32,
    pub success_rate: u32,
}

/// Overall study statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudyStatistics {
    pub total_decks: usize,
    pub total_cards: usize,
    /// Distinct cards with at least one recorded review.
    pub total_sessions: usize,
    pub total_correct: u32,
    pub total_incorrect: u32,
    pub success_rate: u32,
    pub study_streak: u32,
    pub cards_today: usize,
    /// Distinct cards reviewed in the seven days ending today.
    pub cards_this_week: usize,
    pub deck_stats: Vec<DeckStatistics>,
}

impl StudyStatistics {
    pub fn compute(decks: &[Deck], cards: &[Card], log: &RevisionLog, today: NaiveDate) -> Self {
        let (total_correct, total_incorrect) = tally(log.iter().flat_map(|(_, e)| e));
        let week_ago = today - Duration::days(7);

        let deck_stats = decks
            .iter()
            .map(|deck| {
                let deck_cards: HashSet<&str> = cards
                    .iter()
                    .filter(|c| c.deck_id == deck.id)
                    .map(|c| c.id.as_str())
                    .collect();
                let (correct, incorrect) =
                    tally(deck_cards.iter().flat_map(|id| log.entries(id)));
                DeckStatistics {
                    deck_id: deck.id.clone(),
                    name: deck.name.clone(),
                    card_count: deck_cards.len(),
                    correct,
                    incorrect,
                    success_rate: percent(correct, correct + incorrect),
                }
            })
            .collect();

        Self {
            total_decks: decks.len(),
            total_cards: cards.len(),
            total_sessions: log.card_count(),
            total_correct,
            total_incorrect,
            success_rate: percent(total_correct, total_correct + total_incorrect),
            study_streak: study_streak(log, today),
            cards_today: cards_reviewed(log, |d| d == today),
            cards_this_week: cards_reviewed(log, |d| d > week_ago),
            deck_stats,
        }
    }
}

/// Consecutive days with at least one review, counting back from `today`.
///
/// No review today means no streak.
pub fn study_streak(log: &RevisionLog, today: NaiveDate) -> u32 {
    let dates: BTreeSet<NaiveDate> = log.iter().flat_map(|(_, e)| e).map(|e| e.date).collect();

    let mut streak = 0;
    let mut current = today;
    for date in dates.into_iter().rev() {
        if date == current {
            streak += 1;
            current -= Duration::days(1);
        } else if date < current {
            break;
        }
    }
    streak
}

fn cards_reviewed(log: &RevisionLog, on: impl Fn(NaiveDate) -> bool) -> usize {
    log.iter()
        .filter(|(_, entries)| entries.iter().any(|e| on(e.date)))
        .count()
}

fn tally<'a>(entries: impl Iterator<Item = &'a RevisionEntry>) -> (u32, u32) {
    entries.fold((0, 0), |(correct, incorrect), e| match e.result {
        Outcome::Correct => (correct + 1, incorrect),
        Outcome::Incorrect => (correct, incorrect + 1),
    })
}
