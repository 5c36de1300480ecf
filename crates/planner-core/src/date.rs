//! Calendar helpers shared by the week bucketer and the task filter.
//!
//! All handling is timezone-naive: a timestamp carrying an offset is read as
//! the wall-clock time in that offset, never converted to another zone.
//!
//! Week arithmetic is checked. A date whose Monday-to-Sunday window falls
//! outside chrono's calendar range has no week; the parsers reject it.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime};

pub const WEEK_KEY_FORMAT: &str = "%Y-%m-%d";

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a task `dateTime` into a naive date-time.
///
/// Accepts RFC 3339, ISO-8601 without offset (seconds optional, `T` or space
/// separator) and a bare `YYYY-MM-DD`, which resolves to midnight. Dates
/// without a representable week are rejected.
pub fn parse_date_time(raw: &str) -> Option<NaiveDateTime> {
    parse_any(raw.trim()).filter(|dt| week_window(dt.date()).is_some())
}

fn parse_any(s: &str) -> Option<NaiveDateTime> {
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, WEEK_KEY_FORMAT)
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

/// The Monday that starts the week containing `date`.
///
/// Offsets are computed from a Sunday-based weekday number so that Monday
/// maps to 0 and Sunday to 6.
pub fn week_start(date: NaiveDate) -> Option<NaiveDate> {
    let offset = (date.weekday().num_days_from_sunday() + 6) % 7;
    date.checked_sub_days(Days::new(u64::from(offset)))
}

/// Last day (Sunday) of the week starting at `start`.
pub fn week_end(start: NaiveDate) -> Option<NaiveDate> {
    start.checked_add_days(Days::new(6))
}

/// Monday and Sunday of the week containing `date`, both inclusive.
pub fn week_window(date: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let start = week_start(date)?;
    Some((start, week_end(start)?))
}

/// Canonical `YYYY-MM-DD` key for the week containing `date`.
pub fn week_key(date: NaiveDate) -> Option<String> {
    week_start(date).map(|start| start.format(WEEK_KEY_FORMAT).to_string())
}

/// Parse a week key. Any date is accepted and normalised to its Monday.
pub fn parse_week_key(key: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(key.trim(), WEEK_KEY_FORMAT).ok()?;
    week_window(date).map(|(start, _)| start)
}

pub fn current_week_start(today: NaiveDate) -> Option<NaiveDate> {
    week_start(today)
}
