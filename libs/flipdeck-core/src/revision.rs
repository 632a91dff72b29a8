//! Append-only log of review outcomes.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::Outcome;

/// One rating event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionEntry {
    pub date: NaiveDate,
    pub result: Outcome,
}

/// Revision history keyed by card id.
///
/// Serializes as a JSON object mapping each card id to its entries in the
/// order they were recorded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevisionLog {
    entries: BTreeMap<String, Vec<RevisionEntry>>,
}

impl RevisionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry for `card_id`.
    pub fn record(&mut self, card_id: &str, date: NaiveDate, result: Outcome) {
        self.entries
            .entry(card_id.to_string())
            .or_default()
            .push(RevisionEntry { date, result });
    }

    /// Entries recorded for a card, oldest first.
    pub fn entries(&self, card_id: &str) -> &[RevisionEntry] {
        self.entries.get(card_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate over card ids and their entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[RevisionEntry])> {
        self.entries.iter().map(|(id, e)| (id.as_str(), e.as_slice()))
    }

    /// Number of cards with at least one entry.
    pub fn card_count(&self) -> usize {
        self.entries.values().filter(|e| !e.is_empty()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.card_count() == 0
    }
}
