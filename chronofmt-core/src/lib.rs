//! # chronofmt-core
//!
//! Core library for chronofmt - renders timestamps for people.
//!
//! This library provides:
//! - A closed set of display formats ([`FormatKind`])
//! - A [`Formatter`] with injectable clock, timezone and locale
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Formats
//!
//! | kind                               | example                 |
//! |------------------------------------|-------------------------|
//! | `relative`                         | `5 minutes ago`         |
//! | `relative-day`                     | `Yesterday`             |
//! | `short-date`                       | `Jan 5`, `Jan 5, 2023`  |
//! | `short-date-with-time`             | `Jan 5, 3:45pm`         |
//! | `time-only`                        | `3:45pm`                |
//! | `short-date-with-weekday-relative` | `Mon, Jan 5`            |
//! | `long-date`                        | `January 5th`           |
//!
//! Input that does not parse always renders as `"Invalid date"`.
//!
//! ## Example
//!
//! ```rust
//! use chronofmt_core::{FixedClock, FormatKind, Formatter, Zone};
//! use chrono::{TimeZone, Utc};
//!
//! let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
//! let formatter = Formatter::new()
//!     .with_clock(FixedClock(now))
//!     .with_zone(Zone::utc());
//!
//! assert_eq!(formatter.format("2024-06-15T11:55:00Z", FormatKind::Relative), "5 minutes ago");
//! assert_eq!(formatter.format("2024-03-11", FormatKind::LongDate), "March 11th");
//! assert_eq!(formatter.format("garbage", FormatKind::TimeOnly), "Invalid date");
//! ```

// Re-export commonly used items at the crate root
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use error::{Error, Result};
pub use format::{format, FormatKind, Formatter, INVALID_DATE};
pub use locale::{English, Locale};
pub use parse::{parse, RawTime};
pub use relative::Thresholds;
pub use zone::Zone;

// Public modules
pub mod clock;
pub mod config;
pub mod error;
pub mod format;
pub mod locale;
pub mod logging;
pub mod parse;
pub mod relative;
pub mod zone;
