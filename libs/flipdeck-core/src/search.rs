//! Case-insensitive text search over decks and cards.

use crate::types::{Card, Deck};

/// Cards whose question or answer contains `query`, ignoring case.
pub fn search_cards<'a>(cards: &'a [Card], query: &str) -> Vec<&'a Card> {
    let needle = query.to_lowercase();
    cards
        .iter()
        .filter(|c| {
            c.question.to_lowercase().contains(&needle) || c.answer.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Decks whose name contains `query`, ignoring case.
pub fn search_decks<'a>(decks: &'a [Deck], query: &str) -> Vec<&'a Deck> {
    let needle = query.to_lowercase();
    decks
        .iter()
        .filter(|d| d.name.to_lowercase().contains(&needle))
        .collect()
}
