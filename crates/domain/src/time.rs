//! Time and timestamp helpers.

use chrono::{DateTime, Utc};

/// UTC timestamp used for `last_controlled`, forecast points, decision
/// records, etc.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Weekday index of a timestamp, Monday = 0 through Sunday = 6.
///
/// This is the numbering schedules are expressed in.
#[must_use]
pub fn weekday_index(ts: Timestamp) -> u8 {
    use chrono::Datelike;
    u8::try_from(ts.weekday().num_days_from_monday()).unwrap_or(0)
}

/// Time of day of a timestamp as a zero-padded `HH:MM` string.
///
/// Fixed-width formatting keeps lexicographic comparison equivalent to
/// chronological comparison within one day.
#[must_use]
pub fn time_of_day(ts: Timestamp) -> String {
    ts.format("%H:%M").to_string()
}
