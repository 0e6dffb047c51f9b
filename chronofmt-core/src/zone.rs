//! Viewer timezone used to resolve calendar fields.

use crate::error::{Error, Result};
use chrono::{DateTime, FixedOffset, Local, LocalResult, NaiveDateTime, Offset, TimeZone, Utc};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;

/// The zone in which an instant's year/month/day/hour are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Zone {
    /// Host timezone, DST rules included.
    #[default]
    Local,
    /// Fixed offset from UTC.
    Fixed(FixedOffset),
}

impl Zone {
    /// UTC as a fixed zone.
    pub fn utc() -> Self {
        Zone::Fixed(Utc.fix())
    }

    /// Resolve an instant to wall-clock fields in this zone.
    ///
    /// Returns `None` when the local reading falls outside chrono's
    /// representable range (instants within a day of `MIN_UTC`/`MAX_UTC`).
    pub fn resolve(&self, instant: DateTime<Utc>) -> Option<NaiveDateTime> {
        let utc = instant.naive_utc();
        let offset = match self {
            Zone::Local => Local.offset_from_utc_datetime(&utc),
            Zone::Fixed(offset) => *offset,
        };
        utc.checked_add_offset(offset)
    }

    /// Interpret a wall-clock reading in this zone.
    ///
    /// Returns `None` for times skipped by a DST transition. Ambiguous times
    /// (the repeated hour) resolve to the earlier instant.
    pub fn from_local(&self, naive: &NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            Zone::Local => pick(Local.from_local_datetime(naive)),
            Zone::Fixed(offset) => pick(offset.from_local_datetime(naive)),
        }
    }
}

fn pick<Tz: TimeZone>(result: LocalResult<DateTime<Tz>>) -> Option<DateTime<Utc>> {
    result.earliest().map(|dt| dt.with_timezone(&Utc))
}

impl FromStr for Zone {
    type Err = Error;

    /// Accepts `local`, `utc`/`z`, or an offset like `+05:30`, `-0800`, `+09`.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "local" => return Ok(Zone::Local),
            "utc" | "z" => return Ok(Zone::utc()),
            _ => {}
        }

        parse_offset(trimmed)
            .map(Zone::Fixed)
            .ok_or_else(|| Error::InvalidZone(s.to_string()))
    }
}

fn parse_offset(s: &str) -> Option<FixedOffset> {
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };

    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        1 | 2 => (digits.parse::<i32>().ok()?, 0),
        4 => (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?),
        _ => return None,
    };
    if hours > 23 || minutes > 59 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::Local => f.write_str("local"),
            Zone::Fixed(offset) => write!(f, "{}", offset),
        }
    }
}

impl<'de> Deserialize<'de> for Zone {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
