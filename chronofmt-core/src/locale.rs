//! Calendar names and phrases.
//!
//! The formatter never hard-codes display words; it asks a [`Locale`].

use chrono::{Month, Weekday};

/// Unit of a relative-time phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeUnit {
    Second,
    Minute,
    Hour,
    Day,
}

/// Which side of "now" a relative phrase points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Past,
    Future,
}

/// A calendar day adjacent to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeDay {
    Yesterday,
    Today,
    Tomorrow,
}

/// Locale-sensitive rendering primitives.
///
/// `month` is 1-based (January = 1).
pub trait Locale: Send + Sync {
    fn month_short(&self, month: u32) -> &str;
    fn month_long(&self, month: u32) -> &str;
    fn weekday_short(&self, weekday: Weekday) -> String;
    fn meridiem(&self, pm: bool) -> &str;
    fn ordinal_suffix(&self, day: u32) -> &str;
    fn relative_day(&self, day: RelativeDay) -> &str;
    fn just_now(&self) -> &str;
    fn relative_phrase(&self, unit: RelativeUnit, count: i64, direction: Direction) -> String;
}

/// en-US names and English ordinal rules.
///
/// Month and weekday names come from chrono.
#[derive(Debug, Clone, Copy, Default)]
pub struct English;

impl Locale for English {
    fn month_short(&self, month: u32) -> &str {
        // Every English month abbreviates to its first three letters.
        let name = self.month_long(month);
        &name[..name.len().min(3)]
    }

    fn month_long(&self, month: u32) -> &str {
        u8::try_from(month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map_or("", |m| m.name())
    }

    fn weekday_short(&self, weekday: Weekday) -> String {
        weekday.to_string()
    }

    fn meridiem(&self, pm: bool) -> &str {
        if pm {
            "pm"
        } else {
            "am"
        }
    }

    fn ordinal_suffix(&self, day: u32) -> &str {
        if (11..=13).contains(&(day % 100)) {
            return "th";
        }
        match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        }
    }

    fn relative_day(&self, day: RelativeDay) -> &str {
        match day {
            RelativeDay::Yesterday => "Yesterday",
            RelativeDay::Today => "Today",
            RelativeDay::Tomorrow => "Tomorrow",
        }
    }

    fn just_now(&self) -> &str {
        "just now"
    }

    fn relative_phrase(&self, unit: RelativeUnit, count: i64, direction: Direction) -> String {
        let noun = match unit {
            RelativeUnit::Second => "second",
            RelativeUnit::Minute => "minute",
            RelativeUnit::Hour => "hour",
            RelativeUnit::Day => "day",
        };
        let plural = if count == 1 { "" } else { "s" };

        match direction {
            Direction::Past => format!("{} {}{} ago", count, noun, plural),
            Direction::Future => format!("in {} {}{}", count, noun, plural),
        }
    }
}
