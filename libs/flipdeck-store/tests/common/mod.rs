//! Common test utilities and fixtures for integration tests.

pub mod fixtures;

use flipdeck_core::{Card, Deck, NewCard, NewDeck};
use flipdeck_store::Store;

/// In-memory store with one seeded deck.
pub struct TestContext {
    pub store: Store,
    pub deck: Deck,
}

impl TestContext {
    pub fn new() -> Self {
        let store = Store::open_in_memory().expect("open in-memory store");
        let deck = store
            .create_deck(NewDeck::new("Capitals", "European capitals"))
            .expect("create deck");
        Self { store, deck }
    }

    /// Add a card to the seeded deck.
    pub fn add_card(&self, question: &str, answer: &str) -> Card {
        self.store
            .add_card(NewCard::new(&self.deck.id, question, answer))
            .expect("add card")
    }

    /// Add a second deck with `count` generated cards.
    pub fn add_deck_with_cards(&self, name: &str, count: usize) -> (Deck, Vec<Card>) {
        let deck = self
            .store
            .create_deck(NewDeck::new(name, ""))
            .expect("create deck");
        let cards = (0..count)
            .map(|i| {
                let (q, a) = fixtures::question(i);
                self.store
                    .add_card(NewCard::new(&deck.id, q, a))
                    .expect("add card")
            })
            .collect();
        (deck, cards)
    }
}
