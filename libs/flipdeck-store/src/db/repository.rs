//! Repository pattern for database access.

use std::collections::HashMap;
use std::path::Path;

use chrono::{NaiveDate, Utc};
use flipdeck_core::{Card, Deck, Outcome, RevisionLog, SchedulingState, SchedulingStates};
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::Result;
use super::schema::{CARDS_KEY, DECKS_KEY, REVISIONS_KEY, SCHEMA, SCHEMA_VERSION, STATES_KEY};

/// Repository for deck operations.
pub trait DeckRepository {
    fn load_decks(&self) -> Result<Vec<Deck>>;
    fn save_decks(&self, decks: &[Deck]) -> Result<()>;
    fn get_deck(&self, id: &str) -> Result<Option<Deck>>;
    fn upsert_deck(&self, deck: &Deck) -> Result<()>;
    /// Delete a deck with its cards and their scheduling states.
    /// Returns the number of cards removed.
    fn delete_deck(&self, id: &str) -> Result<usize>;
}

/// Repository for card operations.
pub trait CardRepository {
    fn load_cards(&self) -> Result<Vec<Card>>;
    fn save_cards(&self, cards: &[Card]) -> Result<()>;
    fn get_card(&self, id: &str) -> Result<Option<Card>>;
    fn list_by_deck(&self, deck_id: &str) -> Result<Vec<Card>>;
    fn upsert_card(&self, card: &Card) -> Result<()>;
    /// Delete a card and its scheduling state. Returns false if it did not exist.
    fn delete_card(&self, id: &str) -> Result<bool>;
}

/// Repository for card scheduling state.
pub trait StateRepository {
    fn load_states(&self) -> Result<SchedulingStates>;
    fn get_state(&self, card_id: &str) -> Result<Option<SchedulingState>>;
    fn save_state(&self, card_id: &str, state: &SchedulingState) -> Result<()>;
}

/// Repository for the append-only revision log.
pub trait RevisionRepository {
    fn load_revisions(&self) -> Result<RevisionLog>;
    fn save_revisions(&self, log: &RevisionLog) -> Result<()>;
    fn append_revision(&self, card_id: &str, date: NaiveDate, outcome: Outcome) -> Result<()>;
}

/// SQLite implementation of repositories.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Open database at path, creating if necessary.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let repo = Self { conn };
        repo.initialize()?;
        Ok(repo)
    }

    /// Open in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let repo = Self { conn };
        repo.initialize()?;
        Ok(repo)
    }

    fn initialize(&self) -> Result<()> {
        self.conn.execute_batch(SCHEMA)?;
        self.conn.execute(
            "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
            params![SCHEMA_VERSION],
        )?;
        Ok(())
    }

    /// Run `f` inside a transaction, committing only if it succeeds.
    ///
    /// Transactions do not nest; `f` must not call back into this method.
    pub fn in_transaction<T>(&self, f: impl FnOnce(&Self) -> Result<T>) -> Result<T> {
        let tx = self.conn.unchecked_transaction()?;
        let value = f(self)?;
        tx.commit()?;
        Ok(value)
    }

    fn read_blob(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM blobs WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    fn write_blob(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO blobs (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        tracing::debug!(key, bytes = value.len(), "collection saved");
        Ok(())
    }

    /// Missing collections load as their empty default.
    fn load<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T> {
        match self.read_blob(key)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(T::default()),
        }
    }

    fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.write_blob(key, &json)
    }

    fn save_states(&self, states: &SchedulingStates) -> Result<()> {
        self.save(STATES_KEY, states)
    }
}

impl DeckRepository for SqliteRepository {
    fn load_decks(&self) -> Result<Vec<Deck>> {
        self.load(DECKS_KEY)
    }

    fn save_decks(&self, decks: &[Deck]) -> Result<()> {
        self.save(DECKS_KEY, decks)
    }

    fn get_deck(&self, id: &str) -> Result<Option<Deck>> {
        Ok(self.load_decks()?.into_iter().find(|d| d.id == id))
    }

    fn upsert_deck(&self, deck: &Deck) -> Result<()> {
        let mut decks = self.load_decks()?;
        match decks.iter_mut().find(|d| d.id == deck.id) {
            Some(existing) => *existing = deck.clone(),
            None => decks.push(deck.clone()),
        }
        self.save_decks(&decks)
    }

    fn delete_deck(&self, id: &str) -> Result<usize> {
        self.in_transaction(|repo| {
            let mut decks = repo.load_decks()?;
            decks.retain(|d| d.id != id);
            repo.save_decks(&decks)?;

            let (removed, kept): (Vec<Card>, Vec<Card>) =
                repo.load_cards()?.into_iter().partition(|c| c.deck_id == id);
            repo.save_cards(&kept)?;

            let mut states = repo.load_states()?;
            for card in &removed {
                states.remove(&card.id);
            }
            repo.save_states(&states)?;

            Ok(removed.len())
        })
    }
}

impl CardRepository for SqliteRepository {
    fn load_cards(&self) -> Result<Vec<Card>> {
        self.load(CARDS_KEY)
    }

    fn save_cards(&self, cards: &[Card]) -> Result<()> {
        self.save(CARDS_KEY, cards)
    }

    fn get_card(&self, id: &str) -> Result<Option<Card>> {
        Ok(self.load_cards()?.into_iter().find(|c| c.id == id))
    }

    fn list_by_deck(&self, deck_id: &str) -> Result<Vec<Card>> {
        let mut cards = self.load_cards()?;
        cards.retain(|c| c.deck_id == deck_id);
        Ok(cards)
    }

    fn upsert_card(&self, card: &Card) -> Result<()> {
        let mut cards = self.load_cards()?;
        match cards.iter_mut().find(|c| c.id == card.id) {
            Some(existing) => *existing = card.clone(),
            None => cards.push(card.clone()),
        }
        self.save_cards(&cards)
    }

    fn delete_card(&self, id: &str) -> Result<bool> {
        self.in_transaction(|repo| {
            let mut cards = repo.load_cards()?;
            let before = cards.len();
            cards.retain(|c| c.id != id);
            if cards.len() == before {
                return Ok(false);
            }
            repo.save_cards(&cards)?;

            let mut states = repo.load_states()?;
            if states.remove(id).is_some() {
                repo.save_states(&states)?;
            }
            Ok(true)
        })
    }
}

impl StateRepository for SqliteRepository {
    /// Entries that fail to decode or break the ease/interval bounds are
    /// dropped, leaving the card as never reviewed.
    fn load_states(&self) -> Result<SchedulingStates> {
        let raw: HashMap<String, serde_json::Value> = self.load(STATES_KEY)?;
        let mut states = SchedulingStates::with_capacity(raw.len());
        for (card_id, value) in raw {
            match serde_json::from_value::<SchedulingState>(value) {
                Ok(state) if state.is_valid() => {
                    states.insert(card_id, state);
                }
                Ok(state) => {
                    tracing::warn!(%card_id, ?state, "dropping out-of-range scheduling state");
                }
                Err(e) => {
                    tracing::warn!(%card_id, error = %e, "dropping malformed scheduling state");
                }
            }
        }
        Ok(states)
    }

    fn get_state(&self, card_id: &str) -> Result<Option<SchedulingState>> {
        Ok(self.load_states()?.remove(card_id))
    }

    fn save_state(&self, card_id: &str, state: &SchedulingState) -> Result<()> {
        let mut states = self.load_states()?;
        states.insert(card_id.to_string(), state.clone());
        self.save_states(&states)
    }
}

impl RevisionRepository for SqliteRepository {
    fn load_revisions(&self) -> Result<RevisionLog> {
        self.load(REVISIONS_KEY)
    }

    fn save_revisions(&self, log: &RevisionLog) -> Result<()> {
        self.save(REVISIONS_KEY, log)
    }

    fn append_revision(&self, card_id: &str, date: NaiveDate, outcome: Outcome) -> Result<()> {
        let mut log = self.load_revisions()?;
        log.record(card_id, date, outcome);
        self.save_revisions(&log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbError;
    use flipdeck_core::{NewCard, NewDeck};
    use pretty_assertions::assert_eq;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn state(ease_factor: f64, interval: u32) -> SchedulingState {
        SchedulingState {
            ease_factor,
            interval,
            repetitions: 1,
            next_review_date: day(10),
        }
    }

    #[test]
    fn empty_database_loads_empty_collections() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        assert!(repo.load_decks().unwrap().is_empty());
        assert!(repo.load_cards().unwrap().is_empty());
        assert!(repo.load_states().unwrap().is_empty());
        assert!(repo.load_revisions().unwrap().is_empty());
    }

    #[test]
    fn upsert_replaces_existing_card() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        let mut card = NewCard::new("d1", "q", "a").build().unwrap();
        repo.upsert_card(&card).unwrap();

        card.edit("q2", "a2", Vec::new()).unwrap();
        repo.upsert_card(&card).unwrap();

        let cards = repo.load_cards().unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(repo.get_card(&card.id).unwrap(), Some(card));
    }

    #[test]
    fn list_by_deck_filters() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        let a = NewCard::new("d1", "q1", "a").build().unwrap();
        let b = NewCard::new("d2", "q2", "a").build().unwrap();
        repo.save_cards(&[a.clone(), b]).unwrap();
        assert_eq!(repo.list_by_deck("d1").unwrap(), vec![a]);
    }

    #[test]
    fn delete_deck_cascades_to_cards_and_states() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        let deck = NewDeck::new("Spanish", "").build().unwrap();
        let other = NewDeck::new("French", "").build().unwrap();
        repo.upsert_deck(&deck).unwrap();
        repo.upsert_deck(&other).unwrap();

        let c1 = NewCard::new(&deck.id, "q1", "a").build().unwrap();
        let c2 = NewCard::new(&other.id, "q2", "a").build().unwrap();
        repo.save_cards(&[c1.clone(), c2.clone()]).unwrap();
        repo.save_state(&c1.id, &state(2.5, 1)).unwrap();
        repo.save_state(&c2.id, &state(2.5, 1)).unwrap();
        repo.append_revision(&c1.id, day(9), Outcome::Correct).unwrap();

        assert_eq!(repo.delete_deck(&deck.id).unwrap(), 1);
        assert_eq!(repo.load_decks().unwrap(), vec![other]);
        assert_eq!(repo.load_cards().unwrap(), vec![c2.clone()]);
        assert!(repo.get_state(&c1.id).unwrap().is_none());
        assert!(repo.get_state(&c2.id).unwrap().is_some());
        assert_eq!(repo.load_revisions().unwrap().entries(&c1.id).len(), 1);
    }

    #[test]
    fn delete_missing_card_is_noop() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        assert!(!repo.delete_card("nope").unwrap());
    }

    #[test]
    fn malformed_state_entries_are_dropped() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        repo.write_blob(
            STATES_KEY,
            r#"{
                "good": {"easeFactor": 2.5, "interval": 1, "repetitions": 0,
                         "nextReviewDate": "2024-06-10"},
                "garbled": {"easeFactor": "high"},
                "low_ease": {"easeFactor": 1.0, "interval": 1, "repetitions": 0,
                             "nextReviewDate": "2024-06-10"}
            }"#,
        )
        .unwrap();

        let states = repo.load_states().unwrap();
        let expected = SchedulingState {
            repetitions: 0,
            ..state(2.5, 1)
        };
        assert_eq!(states.len(), 1);
        assert_eq!(states.get("good"), Some(&expected));
    }

    #[test]
    fn corrupt_collection_is_an_error() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        repo.write_blob(CARDS_KEY, "not json").unwrap();
        assert!(matches!(repo.load_cards(), Err(DbError::Json(_))));
    }

    #[test]
    fn revisions_append() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        repo.append_revision("c1", day(1), Outcome::Correct).unwrap();
        repo.append_revision("c1", day(2), Outcome::Incorrect).unwrap();
        let log = repo.load_revisions().unwrap();
        let outcomes: Vec<_> = log.entries("c1").iter().map(|e| e.result).collect();
        assert_eq!(outcomes, vec![Outcome::Correct, Outcome::Incorrect]);
    }

    #[test]
    fn failed_transaction_rolls_back() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        let deck = NewDeck::new("Spanish", "").build().unwrap();
        let result: Result<()> = repo.in_transaction(|r| {
            r.upsert_deck(&deck)?;
            Err(DbError::DeckNotFound("boom".into()))
        });
        assert!(result.is_err());
        assert!(repo.load_decks().unwrap().is_empty());
    }
}
