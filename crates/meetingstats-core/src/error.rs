//! Error types for pipeline configuration.
//!
//! The pipeline itself never fails: malformed events are filtered out or
//! carried through with degraded fields. Only building a configuration can be
//! rejected.

use chrono::NaiveDate;
use thiserror::Error;

/// An invalid pipeline configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The annual salary is negative, NaN or infinite.
    #[error("annual salary must be a finite, non-negative number (got {0})")]
    InvalidSalary(f64),

    /// The date window ends before it starts.
    #[error("date window start {start} is after its end {end}")]
    InvertedWindow {
        /// First day of the window.
        start: NaiveDate,
        /// Last day of the window.
        end: NaiveDate,
    },

    /// The viewer email is empty.
    #[error("viewer email must not be empty")]
    MissingViewer,
}

/// A specialized Result type for configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;
