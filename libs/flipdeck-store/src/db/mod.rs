//! Local SQLite database operations.

pub mod date_utils;
pub mod error;
pub mod repository;
pub mod schema;

pub use error::{DbError, Result};
pub use repository::{
    CardRepository, DeckRepository, RevisionRepository, SqliteRepository, StateRepository,
};
