//! Error types for chronofmt-core

use thiserror::Error;

/// Main error type for the chronofmt-core library
///
/// Unparseable timestamps are not errors: they render as `"Invalid date"`.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Format name outside the closed set of format kinds
    #[error("unknown format: {0}")]
    UnknownFormat(String),

    /// Timezone spec that is neither `local`, `utc`, nor a UTC offset
    #[error("invalid timezone: {0}")]
    InvalidZone(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for chronofmt-core
pub type Result<T> = std::result::Result<T, Error>;
