//! Test data.

#![allow(dead_code)]

use chrono::NaiveDate;

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

/// Generated question/answer pair.
pub fn question(i: usize) -> (String, String) {
    (format!("What is {i} + {i}?"), format!("{}", i * 2))
}

/// Unique database path under the system temp dir.
pub fn temp_db_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir()
        .join(format!("flipdeck-{}-{}", name, std::process::id()))
        .join("flipdeck.db")
}
