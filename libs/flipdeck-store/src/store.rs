//! Study flow on top of the repositories.

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use flipdeck_core::{
    advance, count_due, due_cards, Attachment, Card, Deck, NewCard, NewDeck, Outcome, Quality,
    SchedulingState, StudyStatistics,
};
use serde::Serialize;

use crate::config::StoreConfig;
use crate::db::date_utils::get_adjusted_today;
use crate::db::{
    CardRepository, DbError, DeckRepository, Result, RevisionRepository, SqliteRepository,
    StateRepository,
};

/// Outcome of rating a card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewResult {
    pub card_id: String,
    pub previous: Option<SchedulingState>,
    pub state: SchedulingState,
    pub outcome: Outcome,
}

/// Deck with card and due counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeckOverview {
    pub deck: Deck,
    pub card_count: usize,
    pub due_count: usize,
}

/// Shared handle to the local database.
///
/// Cloning is cheap. All operations take the repository lock, so concurrent
/// reviews of the same card are applied one after the other.
#[derive(Clone)]
pub struct Store {
    repository: Arc<Mutex<SqliteRepository>>,
    daily_reset_hour: u32,
}

impl Store {
    pub fn new(repository: SqliteRepository, daily_reset_hour: u32) -> Self {
        Self {
            repository: Arc::new(Mutex::new(repository)),
            daily_reset_hour,
        }
    }

    /// Open the database named by `config`, creating its directory if needed.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        if let Some(parent) = config.db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        tracing::info!(path = %config.db_path.display(), "opening database");
        let repository = SqliteRepository::open(&config.db_path)?;
        Ok(Self::new(repository, config.daily_reset_hour))
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::new(SqliteRepository::open_in_memory()?, 0))
    }

    /// Current study day.
    pub fn today(&self) -> NaiveDate {
        get_adjusted_today(self.daily_reset_hour)
    }

    fn with_repo<T>(&self, f: impl FnOnce(&SqliteRepository) -> Result<T>) -> Result<T> {
        let repo = self.repository.lock().map_err(|_| DbError::LockPoisoned)?;
        f(&repo)
    }

    // Decks

    pub fn create_deck(&self, new: NewDeck) -> Result<Deck> {
        let deck = new.build()?;
        self.with_repo(|repo| repo.upsert_deck(&deck))?;
        tracing::debug!(deck_id = %deck.id, name = %deck.name, "deck created");
        Ok(deck)
    }

    pub fn update_deck(&self, id: &str, name: &str, description: &str) -> Result<Deck> {
        self.with_repo(|repo| {
            let mut deck = repo
                .get_deck(id)?
                .ok_or_else(|| DbError::DeckNotFound(id.to_string()))?;
            deck.edit(name, description)?;
            repo.upsert_deck(&deck)?;
            Ok(deck)
        })
    }

    /// Delete a deck and all of its cards. Returns the number of cards removed.
    pub fn delete_deck(&self, id: &str) -> Result<usize> {
        self.with_repo(|repo| {
            if repo.get_deck(id)?.is_none() {
                return Err(DbError::DeckNotFound(id.to_string()));
            }
            let removed = repo.delete_deck(id)?;
            tracing::info!(deck_id = id, cards = removed, "deck deleted");
            Ok(removed)
        })
    }

    pub fn decks(&self) -> Result<Vec<Deck>> {
        self.with_repo(|repo| repo.load_decks())
    }

    /// Every deck with its card count and the number of cards due on `as_of`.
    pub fn deck_overviews(&self, as_of: NaiveDate) -> Result<Vec<DeckOverview>> {
        self.with_repo(|repo| {
            let cards = repo.load_cards()?;
            let states = repo.load_states()?;
            let overviews = repo
                .load_decks()?
                .into_iter()
                .map(|deck| {
                    let card_count = cards.iter().filter(|c| c.deck_id == deck.id).count();
                    let due_count = count_due(&cards, &states, as_of, Some(&deck.id));
                    DeckOverview {
                        deck,
                        card_count,
                        due_count,
                    }
                })
                .collect();
            Ok(overviews)
        })
    }

    // Cards

    pub fn add_card(&self, new: NewCard) -> Result<Card> {
        let card = new.build()?;
        self.with_repo(|repo| {
            if repo.get_deck(&card.deck_id)?.is_none() {
                return Err(DbError::DeckNotFound(card.deck_id.clone()));
            }
            repo.upsert_card(&card)
        })?;
        Ok(card)
    }

    pub fn update_card(
        &self,
        id: &str,
        question: &str,
        answer: &str,
        attachments: Vec<Attachment>,
    ) -> Result<Card> {
        self.with_repo(|repo| {
            let mut card = repo
                .get_card(id)?
                .ok_or_else(|| DbError::CardNotFound(id.to_string()))?;
            card.edit(question, answer, attachments)?;
            repo.upsert_card(&card)?;
            Ok(card)
        })
    }

    pub fn delete_card(&self, id: &str) -> Result<()> {
        self.with_repo(|repo| {
            if repo.delete_card(id)? {
                Ok(())
            } else {
                Err(DbError::CardNotFound(id.to_string()))
            }
        })
    }

    /// All cards, or only those of one deck.
    pub fn cards(&self, deck_id: Option<&str>) -> Result<Vec<Card>> {
        self.with_repo(|repo| match deck_id {
            Some(id) => repo.list_by_deck(id),
            None => repo.load_cards(),
        })
    }

    pub fn card_state(&self, card_id: &str) -> Result<Option<SchedulingState>> {
        self.with_repo(|repo| repo.get_state(card_id))
    }

    // Study

    /// Rate a card on the current study day.
    pub fn record_review(&self, card_id: &str, quality: u8) -> Result<ReviewResult> {
        self.record_review_on(card_id, quality, self.today())
    }

    /// Rate a card as of `today`: advance its schedule, persist it and append
    /// to the revision log in one transaction.
    ///
    /// An out-of-range rating is rejected before anything is read or written.
    pub fn record_review_on(
        &self,
        card_id: &str,
        quality: u8,
        today: NaiveDate,
    ) -> Result<ReviewResult> {
        let quality = Quality::from_value(quality)?;

        let result = self.with_repo(|repo| {
            repo.in_transaction(|repo| {
                if repo.get_card(card_id)?.is_none() {
                    return Err(DbError::CardNotFound(card_id.to_string()));
                }

                let previous = repo.get_state(card_id)?;
                let state = advance(previous.as_ref(), quality, today);
                let outcome = Outcome::from_quality(quality);

                repo.save_state(card_id, &state)?;
                repo.append_revision(card_id, today, outcome)?;

                Ok(ReviewResult {
                    card_id: card_id.to_string(),
                    previous,
                    state,
                    outcome,
                })
            })
        })?;

        tracing::info!(
            card_id,
            quality = quality.to_value(),
            interval = result.state.interval,
            next_review = %result.state.next_review_date,
            "review recorded"
        );
        Ok(result)
    }

    /// Cards due on the current study day.
    pub fn due_cards(&self, deck_id: Option<&str>) -> Result<Vec<Card>> {
        self.due_cards_as_of(deck_id, self.today())
    }

    pub fn due_cards_as_of(&self, deck_id: Option<&str>, as_of: NaiveDate) -> Result<Vec<Card>> {
        self.with_repo(|repo| {
            let cards = repo.load_cards()?;
            let states = repo.load_states()?;
            Ok(due_cards(&cards, &states, as_of, deck_id))
        })
    }

    // Statistics

    pub fn statistics(&self) -> Result<StudyStatistics> {
        self.statistics_as_of(self.today())
    }

    pub fn statistics_as_of(&self, today: NaiveDate) -> Result<StudyStatistics> {
        self.with_repo(|repo| {
            let decks = repo.load_decks()?;
            let cards = repo.load_cards()?;
            let log = repo.load_revisions()?;
            Ok(StudyStatistics::compute(&decks, &cards, &log, today))
        })
    }
}
