//! Core types for the flipdeck study application.

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{SchedulerError, ValidationError};

/// Lowest ease factor the scheduler will ever produce.
pub const MINIMUM_EASE: f64 = 1.3;

/// Ease factor given to a card on its first review.
pub const INITIAL_EASE: f64 = 2.5;

/// Longest interval the scheduler will ever produce, in days.
pub const MAXIMUM_INTERVAL: u32 = 36_500;

/// Rating given after seeing a card's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quality {
    Incorrect,
    Hard,
    Good,
    Easy,
}

impl Quality {
    /// Convert to numeric value (0-3).
    pub fn to_value(self) -> u8 {
        match self {
            Self::Incorrect => 0,
            Self::Hard => 1,
            Self::Good => 2,
            Self::Easy => 3,
        }
    }

    /// Create from numeric value. Anything outside 0-3 is rejected, never clamped.
    pub fn from_value(value: u8) -> Result<Self, SchedulerError> {
        match value {
            0 => Ok(Self::Incorrect),
            1 => Ok(Self::Hard),
            2 => Ok(Self::Good),
            3 => Ok(Self::Easy),
            other => Err(SchedulerError::InvalidQuality(other)),
        }
    }

    /// Whether the rating counts as a successful repetition.
    pub fn is_success(self) -> bool {
        self != Self::Incorrect
    }
}

impl TryFrom<u8> for Quality {
    type Error = SchedulerError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

/// Outcome stored in the revision log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Correct,
    Incorrect,
}

impl Outcome {
    /// Only Good and Easy are logged as correct. Hard still advances the
    /// interval but is recorded as incorrect.
    pub fn from_quality(quality: Quality) -> Self {
        if quality >= Quality::Good {
            Self::Correct
        } else {
            Self::Incorrect
        }
    }
}

/// Scheduling state of a card, created on its first review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingState {
    pub ease_factor: f64,
    pub interval: u32,
    pub repetitions: u32,
    pub next_review_date: NaiveDate,
}

impl SchedulingState {
    /// State of a card that has never been reviewed.
    pub fn initial(today: NaiveDate) -> Self {
        Self {
            ease_factor: INITIAL_EASE,
            interval: 1,
            repetitions: 0,
            next_review_date: today,
        }
    }

    /// Check the ease and interval lower bounds.
    pub fn is_valid(&self) -> bool {
        self.ease_factor.is_finite() && self.ease_factor >= MINIMUM_EASE && self.interval >= 1
    }

    /// Date `interval` days after `today`, saturating at the last
    /// representable date.
    pub(crate) fn due_after(today: NaiveDate, interval: u32) -> NaiveDate {
        today
            .checked_add_days(Days::new(u64::from(interval)))
            .unwrap_or(NaiveDate::MAX)
    }
}

/// Kind of file attached to a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentKind {
    Image,
    Pdf,
    Document,
}

impl AttachmentKind {
    /// Classify a picked file by its mime type.
    pub fn from_mime_type(mime_type: Option<&str>) -> Self {
        match mime_type {
            Some(m) if m.starts_with("image/") => Self::Image,
            Some(m) if m.contains("pdf") => Self::Pdf,
            _ => Self::Document,
        }
    }
}

/// Attachment metadata. The file itself lives wherever `uri` points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: AttachmentKind,
    pub uri: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl Attachment {
    /// Create attachment metadata with a fresh id.
    pub fn new(uri: String, name: String, mime_type: Option<String>, size: Option<u64>) -> Self {
        Self {
            id: new_id(),
            kind: AttachmentKind::from_mime_type(mime_type.as_deref()),
            uri,
            name,
            mime_type,
            size,
        }
    }
}

/// Deck of cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Deck {
    /// Rename the deck, keeping its id and creation time.
    pub fn edit(&mut self, name: &str, description: &str) -> Result<(), ValidationError> {
        self.name = non_empty(name, ValidationError::EmptyDeckName)?;
        self.description = description.trim().to_string();
        Ok(())
    }
}

/// Question/answer card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub deck_id: String,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    pub created_at: DateTime<Utc>,
}

impl Card {
    /// Replace the card's content, keeping its id, deck and creation time.
    pub fn edit(
        &mut self,
        question: &str,
        answer: &str,
        attachments: Vec<Attachment>,
    ) -> Result<(), ValidationError> {
        let question = non_empty(question, ValidationError::EmptyQuestion)?;
        let answer = non_empty(answer, ValidationError::EmptyAnswer)?;
        self.question = question;
        self.answer = answer;
        self.attachments = attachments;
        Ok(())
    }
}

/// User input for a new deck.
#[derive(Debug, Clone, Default)]
pub struct NewDeck {
    pub name: String,
    pub description: String,
}

impl NewDeck {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Validate and assign an id.
    pub fn build(self) -> Result<Deck, ValidationError> {
        Ok(Deck {
            id: new_id(),
            name: non_empty(&self.name, ValidationError::EmptyDeckName)?,
            description: self.description.trim().to_string(),
            created_at: Utc::now(),
        })
    }
}

/// User input for a new card.
#[derive(Debug, Clone, Default)]
pub struct NewCard {
    pub deck_id: String,
    pub question: String,
    pub answer: String,
    pub attachments: Vec<Attachment>,
}

impl NewCard {
    pub fn new(
        deck_id: impl Into<String>,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            deck_id: deck_id.into(),
            question: question.into(),
            answer: answer.into(),
            attachments: Vec::new(),
        }
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Validate and assign an id.
    pub fn build(self) -> Result<Card, ValidationError> {
        Ok(Card {
            id: new_id(),
            deck_id: self.deck_id,
            question: non_empty(&self.question, ValidationError::EmptyQuestion)?,
            answer: non_empty(&self.answer, ValidationError::EmptyAnswer)?,
            attachments: self.attachments,
            created_at: Utc::now(),
        })
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn non_empty(value: &str, err: ValidationError) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(err)
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn quality_rejects_out_of_range() {
        assert_eq!(Quality::from_value(4), Err(SchedulerError::InvalidQuality(4)));
        assert_eq!(Quality::try_from(255), Err(SchedulerError::InvalidQuality(255)));
    }

    #[test]
    fn quality_value_round_trip() {
        for v in 0..=3 {
            assert_eq!(Quality::from_value(v).unwrap().to_value(), v);
        }
    }

    #[test]
    fn hard_is_logged_incorrect() {
        assert_eq!(Outcome::from_quality(Quality::Incorrect), Outcome::Incorrect);
        assert_eq!(Outcome::from_quality(Quality::Hard), Outcome::Incorrect);
        assert_eq!(Outcome::from_quality(Quality::Good), Outcome::Correct);
        assert_eq!(Outcome::from_quality(Quality::Easy), Outcome::Correct);
    }

    #[test]
    fn state_serializes_camel_case_with_plain_date() {
        let state = SchedulingState {
            ease_factor: 2.6,
            interval: 6,
            repetitions: 2,
            next_review_date: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
        };
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["easeFactor"], 2.6);
        assert_eq!(json["nextReviewDate"], "2024-06-10");
    }

    #[test]
    fn state_validity_bounds() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        assert!(SchedulingState::initial(today).is_valid());

        let low_ease = SchedulingState {
            ease_factor: 1.2,
            ..SchedulingState::initial(today)
        };
        assert!(!low_ease.is_valid());

        let zero_interval = SchedulingState {
            interval: 0,
            ..SchedulingState::initial(today)
        };
        assert!(!zero_interval.is_valid());
    }

    #[test]
    fn due_after_saturates_at_max_date() {
        let near_end = NaiveDate::MAX - Days::new(3);
        assert_eq!(SchedulingState::due_after(near_end, 10), NaiveDate::MAX);
        assert_eq!(
            SchedulingState::due_after(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(), 21),
            NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
        );
    }

    #[test]
    fn new_card_trims_and_validates() {
        let card = NewCard::new("deck", "  What is 2+2? ", " 4 ").build().unwrap();
        assert_eq!(card.question, "What is 2+2?");
        assert_eq!(card.answer, "4");

        let err = NewCard::new("deck", "   ", "4").build().unwrap_err();
        assert_eq!(err, ValidationError::EmptyQuestion);

        let err = NewCard::new("deck", "q", "").build().unwrap_err();
        assert_eq!(err, ValidationError::EmptyAnswer);
    }

    #[test]
    fn new_deck_requires_name() {
        assert_eq!(
            NewDeck::new(" ", "desc").build().unwrap_err(),
            ValidationError::EmptyDeckName
        );
        let deck = NewDeck::new(" Spanish ", " verbs ").build().unwrap();
        assert_eq!(deck.name, "Spanish");
        assert_eq!(deck.description, "verbs");
    }

    #[test]
    fn attachment_kind_from_mime() {
        assert_eq!(AttachmentKind::from_mime_type(Some("image/png")), AttachmentKind::Image);
        assert_eq!(AttachmentKind::from_mime_type(Some("application/pdf")), AttachmentKind::Pdf);
        assert_eq!(AttachmentKind::from_mime_type(Some("text/plain")), AttachmentKind::Document);
        assert_eq!(AttachmentKind::from_mime_type(None), AttachmentKind::Document);
    }

    #[test]
    fn attachment_uses_type_key() {
        let att = Attachment::new(
            "file:///a.pdf".into(),
            "a.pdf".into(),
            Some("application/pdf".into()),
            Some(10),
        );
        let json = serde_json::to_value(&att).unwrap();
        assert_eq!(json["type"], "pdf");
        assert_eq!(json["mimeType"], "application/pdf");
    }
}
