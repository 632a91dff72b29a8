//! Store configuration.
//!
//! ## Environment Variables
//!
//! - `FLIPDECK_DB_PATH`: database file (default: `<local data dir>/flipdeck/flipdeck.db`)
//! - `FLIPDECK_DAILY_RESET_HOUR`: hour (0-23) at which a new study day starts (default: 0)

use std::path::PathBuf;

use crate::db::{DbError, Result};

pub const DB_PATH_VAR: &str = "FLIPDECK_DB_PATH";
pub const DAILY_RESET_HOUR_VAR: &str = "FLIPDECK_DAILY_RESET_HOUR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub db_path: PathBuf,
    pub daily_reset_hour: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            daily_reset_hour: 0,
        }
    }
}

impl StoreConfig {
    /// Load from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let db_path = lookup(DB_PATH_VAR)
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_db_path);

        let daily_reset_hour = match lookup(DAILY_RESET_HOUR_VAR) {
            Some(raw) => parse_reset_hour(&raw)?,
            None => 0,
        };

        Ok(Self {
            db_path,
            daily_reset_hour,
        })
    }
}

fn parse_reset_hour(raw: &str) -> Result<u32> {
    match raw.trim().parse::<u32>() {
        Ok(hour) if hour < 24 => Ok(hour),
        _ => Err(DbError::Config(format!(
            "{DAILY_RESET_HOUR_VAR} must be an hour between 0 and 23, got {raw:?}"
        ))),
    }
}

fn default_db_path() -> PathBuf {
    // Use the platform data directory, falling back to the current dir
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("flipdeck")
        .join("flipdeck.db")
}
