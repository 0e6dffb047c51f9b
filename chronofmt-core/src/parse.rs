//! Timestamp parsing.
//!
//! Parsing is total: malformed input yields `None`, never a panic or error.

use crate::zone::Zone;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// A time as handed to the formatter: already an instant, or still text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawTime {
    Instant(DateTime<Utc>),
    Text(String),
}

impl From<DateTime<Utc>> for RawTime {
    fn from(instant: DateTime<Utc>) -> Self {
        RawTime::Instant(instant)
    }
}

impl From<&str> for RawTime {
    fn from(text: &str) -> Self {
        RawTime::Text(text.to_string())
    }
}

impl From<String> for RawTime {
    fn from(text: String) -> Self {
        RawTime::Text(text)
    }
}

impl From<&String> for RawTime {
    fn from(text: &String) -> Self {
        RawTime::Text(text.clone())
    }
}

/// Naive date-time layouts, tried in order after RFC 3339.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Resolve a raw time to an instant.
///
/// Strings with an explicit offset are absolute. Strings without one are
/// wall-clock time in `zone`; a bare date means midnight in `zone`.
pub fn parse(input: &RawTime, zone: &Zone) -> Option<DateTime<Utc>> {
    match input {
        RawTime::Instant(instant) => Some(*instant),
        RawTime::Text(text) => parse_str(text, zone),
    }
}

fn parse_str(text: &str, zone: &Zone) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    // RFC 3339 permits a space separator; chrono's parser does not.
    if let Some(dt) = with_t_separator(text)
        .and_then(|t| DateTime::parse_from_rfc3339(&t).ok())
    {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, fmt) {
            return zone.from_local(&naive);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return zone.from_local(&date.and_hms_opt(0, 0, 0)?);
    }

    None
}

fn with_t_separator(text: &str) -> Option<String> {
    let idx = text.find(' ')?;
    if idx != 10 {
        return None;
    }
    let mut owned = text.to_string();
    owned.replace_range(idx..idx + 1, "T");
    Some(owned)
}
