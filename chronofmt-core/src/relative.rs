//! Bucketing of elapsed time for the `relative` format.
//!
//! Buckets, by absolute distance `d` from now (each count truncated):
//!
//! | distance                          | phrase            |
//! |-----------------------------------|-------------------|
//! | `d < just_now_secs`               | just now          |
//! | `d < 60s`                         | N seconds         |
//! | `d < 60m`                         | N minutes         |
//! | `d < 24h`                         | N hours           |
//! | `d < fallback_after_days`         | N days            |
//! | otherwise                         | absolute date     |

use crate::error::{Error, Result};
use crate::locale::{Direction, RelativeUnit};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Tunable bucket edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Thresholds {
    /// Below this many seconds either side of now, say "just now"
    #[serde(default = "default_just_now_secs")]
    pub just_now_secs: i64,

    /// At or beyond this many days, render an absolute date instead
    #[serde(default = "default_fallback_after_days")]
    pub fallback_after_days: i64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            just_now_secs: default_just_now_secs(),
            fallback_after_days: default_fallback_after_days(),
        }
    }
}

fn default_just_now_secs() -> i64 {
    10
}

fn default_fallback_after_days() -> i64 {
    7
}

impl Thresholds {
    /// Reject edges that would make buckets overlap or run backwards.
    pub fn validate(&self) -> Result<()> {
        if self.just_now_secs < 1 || self.just_now_secs > 60 {
            return Err(Error::Config(
                "relative.just_now_secs must be between 1 and 60".to_string(),
            ));
        }
        if self.fallback_after_days < 1 {
            return Err(Error::Config(
                "relative.fallback_after_days must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Result of bucketing one instant against now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    JustNow,
    Span {
        unit: RelativeUnit,
        count: i64,
        direction: Direction,
    },
    /// Too far away for a relative phrase.
    Absolute,
}

/// Place `instant` into a bucket relative to `now`.
pub fn classify(instant: DateTime<Utc>, now: DateTime<Utc>, thresholds: &Thresholds) -> Bucket {
    let delta = now.signed_duration_since(instant);
    let direction = if delta < chrono::Duration::zero() {
        Direction::Future
    } else {
        Direction::Past
    };
    let distance = delta.abs();

    let secs = distance.num_seconds();
    if secs < thresholds.just_now_secs {
        return Bucket::JustNow;
    }

    let (unit, count) = if secs < 60 {
        (RelativeUnit::Second, secs)
    } else if distance.num_minutes() < 60 {
        (RelativeUnit::Minute, distance.num_minutes())
    } else if distance.num_hours() < 24 {
        (RelativeUnit::Hour, distance.num_hours())
    } else if distance.num_days() < thresholds.fallback_after_days {
        (RelativeUnit::Day, distance.num_days())
    } else {
        return Bucket::Absolute;
    };

    Bucket::Span {
        unit,
        count,
        direction,
    }
}
