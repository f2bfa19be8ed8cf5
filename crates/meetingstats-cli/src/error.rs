//! CLI error types.

use std::fmt;

use meetingstats_core::ConfigError;
use meetingstats_ics::DecodeError;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI.
#[derive(Debug)]
pub enum CliError {
    /// Configuration file could not be read, parsed or written.
    Config(String),
    /// Settings were read but are not usable.
    Invalid(ConfigError),
    /// Decoder settings are not usable.
    Decode(DecodeError),
    /// IO error.
    Io(std::io::Error),
    /// Report could not be rendered.
    Output(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
            Self::Invalid(err) => write!(f, "invalid settings: {}", err),
            Self::Decode(err) => write!(f, "decoder error: {}", err),
            Self::Io(err) => write!(f, "IO error: {}", err),
            Self::Output(msg) => write!(f, "output error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Invalid(err) => Some(err),
            Self::Decode(err) => Some(err),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Invalid(err)
    }
}

impl From<DecodeError> for CliError {
    fn from(err: DecodeError) -> Self {
        Self::Decode(err)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Output(err.to_string())
    }
}
