//! Error types for iCalendar decoding.

use thiserror::Error;

/// Errors that can occur while decoding a calendar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The input is not valid iCalendar data.
    #[error("invalid iCalendar data: {0}")]
    Parse(String),

    /// The display timezone name is not a known IANA zone.
    #[error("unknown timezone: {0}")]
    UnknownTimezone(String),
}

/// Result type for decoding.
pub type DecodeResult<T> = Result<T, DecodeError>;
