//! Due-set selection.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::types::{Card, SchedulingState};

/// Scheduling states keyed by card id.
pub type SchedulingStates = HashMap<String, SchedulingState>;

/// A card with no scheduling state has never been reviewed and is always due.
pub fn is_due(state: Option<&SchedulingState>, as_of: NaiveDate) -> bool {
    state.map_or(true, |s| s.next_review_date <= as_of)
}

/// Cards due on `as_of`, optionally restricted to one deck.
///
/// Input order is preserved.
pub fn due_cards(
    cards: &[Card],
    states: &SchedulingStates,
    as_of: NaiveDate,
    deck_id: Option<&str>,
) -> Vec<Card> {
    due_iter(cards, states, as_of, deck_id).cloned().collect()
}

/// Number of cards due on `as_of`, optionally restricted to one deck.
pub fn count_due(
    cards: &[Card],
    states: &SchedulingStates,
    as_of: NaiveDate,
    deck_id: Option<&str>,
) -> usize {
    due_iter(cards, states, as_of, deck_id).count()
}

fn due_iter<'a>(
    cards: &'a [Card],
    states: &'a SchedulingStates,
    as_of: NaiveDate,
    deck_id: Option<&'a str>,
) -> impl Iterator<Item = &'a Card> + 'a {
    cards
        .iter()
        .filter(move |card| deck_id.map_or(true, |d| card.deck_id == d))
        .filter(move |card| is_due(states.get(&card.id), as_of))
}
