//! Local storage and study flow for flipdeck.
//!
//! Collections (decks, cards, scheduling states, revision log) are stored as
//! JSON blobs in a SQLite key/value table. [`Store`] serializes every
//! read-modify-write cycle behind a mutex.

pub mod config;
pub mod db;
pub mod logging;
pub mod store;

pub use config::StoreConfig;
pub use db::{DbError, Result, SqliteRepository};
pub use store::{DeckOverview, ReviewResult, Store};
