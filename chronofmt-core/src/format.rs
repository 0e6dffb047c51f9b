//! Timestamp display formats.
//!
//! A [`Formatter`] resolves a raw time against its clock and zone, then
//! renders it with one of the closed set of [`FormatKind`]s.

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::locale::{English, Locale, RelativeDay};
use crate::parse::{parse, RawTime};
use crate::relative::{classify, Bucket, Thresholds};
use crate::zone::Zone;
use chrono::{DateTime, Datelike, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rendered in place of any timestamp that fails to parse.
pub const INVALID_DATE: &str = "Invalid date";

/// Named rendering strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormatKind {
    /// "Today", "Yesterday", "Tomorrow", else short date
    RelativeDay,
    /// "5 minutes ago", "in 2 hours", else short date
    Relative,
    /// "Jan 5" or "Jan 5, 2023"
    ShortDate,
    /// "Jan 5, 3:45pm"
    ShortDateWithTime,
    /// "3:45pm"
    TimeOnly,
    /// "Today" etc., else "Mon, Jan 5"
    ShortDateWithWeekdayRelative,
    /// "January 5th" or "January 5th, 2023"
    LongDate,
}

impl FormatKind {
    pub const ALL: [FormatKind; 7] = [
        FormatKind::RelativeDay,
        FormatKind::Relative,
        FormatKind::ShortDate,
        FormatKind::ShortDateWithTime,
        FormatKind::TimeOnly,
        FormatKind::ShortDateWithWeekdayRelative,
        FormatKind::LongDate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormatKind::RelativeDay => "relative-day",
            FormatKind::Relative => "relative",
            FormatKind::ShortDate => "short-date",
            FormatKind::ShortDateWithTime => "short-date-with-time",
            FormatKind::TimeOnly => "time-only",
            FormatKind::ShortDateWithWeekdayRelative => "short-date-with-weekday-relative",
            FormatKind::LongDate => "long-date",
        }
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        FormatKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::UnknownFormat(s.to_string()))
    }
}

/// Renders timestamps against an injected clock, zone and locale.
///
/// Holds no mutable state: "now" and today's date are read fresh on every
/// call, so a shared `Formatter` can be used from any thread.
pub struct Formatter {
    clock: Box<dyn Clock>,
    locale: Box<dyn Locale>,
    zone: Zone,
    thresholds: Thresholds,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Formatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Formatter")
            .field("zone", &self.zone)
            .field("thresholds", &self.thresholds)
            .finish_non_exhaustive()
    }
}

impl Formatter {
    /// System clock, host zone, English.
    pub fn new() -> Self {
        Self {
            clock: Box::new(SystemClock),
            locale: Box::new(English),
            zone: Zone::Local,
            thresholds: Thresholds::default(),
        }
    }

    /// Build from loaded configuration, validating it first.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self::new()
            .with_zone(config.display.timezone)
            .with_thresholds(config.relative))
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_locale(mut self, locale: impl Locale + 'static) -> Self {
        self.locale = Box::new(locale);
        self
    }

    pub fn with_zone(mut self, zone: Zone) -> Self {
        self.zone = zone;
        self
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    /// Parse `input` in this formatter's zone.
    pub fn parse(&self, input: &RawTime) -> Option<DateTime<Utc>> {
        parse(input, &self.zone)
    }

    /// Render `input` as `kind`, or [`INVALID_DATE`] if it does not parse.
    pub fn format(&self, input: impl Into<RawTime>, kind: FormatKind) -> String {
        let raw = input.into();
        let Some(instant) = self.parse(&raw) else {
            tracing::debug!(input = ?raw, format = %kind, "unparseable timestamp");
            return INVALID_DATE.to_string();
        };

        let now = self.clock.now();
        let (Some(time), Some(local_now)) = (self.zone.resolve(instant), self.zone.resolve(now))
        else {
            tracing::debug!(input = ?raw, zone = %self.zone, "timestamp outside local range");
            return INVALID_DATE.to_string();
        };
        let view = View {
            instant,
            now,
            time,
            local_now,
        };

        match kind {
            FormatKind::RelativeDay => self.relative_day(&view),
            FormatKind::Relative => self.relative(&view),
            FormatKind::ShortDate => self.short_date(&view, false),
            FormatKind::ShortDateWithTime => {
                format!("{}, {}", self.short_date(&view, false), self.time_only(&view))
            }
            FormatKind::TimeOnly => self.time_only(&view),
            FormatKind::ShortDateWithWeekdayRelative => match self.adjacent_day(&view) {
                Some(day) => self.locale.relative_day(day).to_string(),
                None => self.short_date(&view, true),
            },
            FormatKind::LongDate => self.long_date(&view),
        }
    }

    /// Render by format name. Unknown names are a caller bug and are
    /// returned as [`Error::UnknownFormat`], never defaulted.
    pub fn format_named(&self, input: impl Into<RawTime>, name: &str) -> Result<String> {
        let kind = name.parse::<FormatKind>()?;
        Ok(self.format(input, kind))
    }

    /// Render `input` with every format kind, in declaration order.
    pub fn format_all(&self, input: impl Into<RawTime>) -> Vec<(FormatKind, String)> {
        let raw = input.into();
        FormatKind::ALL
            .into_iter()
            .map(|kind| (kind, self.format(raw.clone(), kind)))
            .collect()
    }

    fn relative(&self, view: &View) -> String {
        match classify(view.instant, view.now, &self.thresholds) {
            Bucket::JustNow => self.locale.just_now().to_string(),
            Bucket::Span {
                unit,
                count,
                direction,
            } => self.locale.relative_phrase(unit, count, direction),
            Bucket::Absolute => self.short_date(view, false),
        }
    }

    fn relative_day(&self, view: &View) -> String {
        match self.adjacent_day(view) {
            Some(day) => self.locale.relative_day(day).to_string(),
            None => self.short_date(view, false),
        }
    }

    /// Compare calendar dates in the viewer's zone, not 24h distance.
    fn adjacent_day(&self, view: &View) -> Option<RelativeDay> {
        let days = view
            .time
            .date()
            .signed_duration_since(view.local_now.date())
            .num_days();
        match days {
            -1 => Some(RelativeDay::Yesterday),
            0 => Some(RelativeDay::Today),
            1 => Some(RelativeDay::Tomorrow),
            _ => None,
        }
    }

    fn short_date(&self, view: &View, weekday: bool) -> String {
        let time = &view.time;
        let mut out = String::new();
        if weekday {
            out.push_str(&self.locale.weekday_short(time.weekday()));
            out.push_str(", ");
        }
        out.push_str(&format!(
            "{} {}",
            self.locale.month_short(time.month()),
            time.day()
        ));
        if !view.is_current_year() {
            out.push_str(&format!(", {}", time.year()));
        }
        out
    }

    fn time_only(&self, view: &View) -> String {
        let (pm, hour) = view.time.hour12();
        format!(
            "{}:{:02}{}",
            hour,
            view.time.minute(),
            self.locale.meridiem(pm)
        )
    }

    fn long_date(&self, view: &View) -> String {
        let time = &view.time;
        let day = time.day();
        let mut out = format!(
            "{} {}{}",
            self.locale.month_long(time.month()),
            day,
            self.locale.ordinal_suffix(day)
        );
        if !view.is_current_year() {
            out.push_str(&format!(", {}", time.year()));
        }
        out
    }
}

/// The instant and "now", absolute and as wall-clock readings in the
/// viewer's zone.
struct View {
    instant: DateTime<Utc>,
    now: DateTime<Utc>,
    time: NaiveDateTime,
    local_now: NaiveDateTime,
}

impl View {
    fn is_current_year(&self) -> bool {
        self.time.year() == self.local_now.year()
    }
}

/// Render with the system clock, host zone and English names.
pub fn format(input: impl Into<RawTime>, kind: FormatKind) -> String {
    Formatter::new().format(input, kind)
}
