//! Error types for calgrid.

use thiserror::Error;

/// Errors that can occur while building calendar views.
#[derive(Error, Debug)]
pub enum CalGridError {
    #[error("Invalid value ({0}) given for recurs on. Can only be year or month.")]
    InvalidRecurrenceMode(String),

    #[error("Unknown date formatter: {0}")]
    UnknownDateFormatter(String),

    #[error("Invalid date format pattern: {0}")]
    Format(String),

    #[error("Time parse error: {0}")]
    TimeParse(#[from] chrono::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("ICS parse error: {0}")]
    IcsParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for calgrid operations.
pub type CalGridResult<T> = Result<T, CalGridError>;
