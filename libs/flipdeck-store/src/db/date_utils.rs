//! Date utilities for daily reset hour handling.

use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone, Timelike};

/// Get adjusted "today" based on daily_reset_hour.
///
/// Before the reset hour the study day is still yesterday, so a late-night
/// session counts towards the previous day.
pub fn get_adjusted_today(daily_reset_hour: u32) -> NaiveDate {
    adjusted_date(Local::now(), daily_reset_hour)
}

fn adjusted_date<Tz: TimeZone>(now: DateTime<Tz>, daily_reset_hour: u32) -> NaiveDate {
    if now.hour() < daily_reset_hour {
        (now - Duration::days(1)).date_naive()
    } else {
        now.date_naive()
    }
}
