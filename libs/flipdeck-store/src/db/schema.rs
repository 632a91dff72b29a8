//! SQLite schema definitions.

/// Current schema version for migrations.
pub const SCHEMA_VERSION: i32 = 1;

/// Each collection is a single JSON document replaced as a whole.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS blobs (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY
);
"#;

pub const DECKS_KEY: &str = "decks";
pub const CARDS_KEY: &str = "cards";
pub const STATES_KEY: &str = "card_states";
pub const REVISIONS_KEY: &str = "revisions";
