//! Tracing setup for meetingstats
//!
//! The library crates only emit events through `tracing` macros; binaries pick
//! a subscriber here.
//!
//! # Usage
//!
//! ```ignore
//! use meetingstats_core::tracing::{init_tracing, TracingConfig};
//!
//! let config = if debug { TracingConfig::cli_debug() } else { TracingConfig::quiet() };
//! init_tracing(config)?;
//! ```

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum TracingError {
    #[error("failed to set global tracing subscriber: {0}")]
    SetGlobalSubscriber(#[from] tracing::subscriber::SetGlobalDefaultError),

    #[error("failed to parse env filter: {0}")]
    EnvFilter(#[from] tracing_subscriber::filter::ParseError),
}

/// How log lines are laid out on stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TracingOutputFormat {
    /// Multi-line, for reading a single run closely
    #[default]
    Pretty,
    /// One line per event
    Compact,
    /// One JSON object per line
    Json,
}

/// Subscriber settings for the `meetingstats` binary.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Level for the `meetingstats` crates when RUST_LOG is not set
    pub default_level: Level,
    pub output_format: TracingOutputFormat,
    /// Print source file and line
    pub include_location: bool,
    /// Print the emitting module
    pub include_target: bool,
    pub include_timestamp: bool,
    /// Explicit filter directive; wins over both RUST_LOG and `default_level`
    pub env_filter: Option<String>,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            default_level: Level::INFO,
            output_format: TracingOutputFormat::Pretty,
            include_location: false,
            include_target: true,
            include_timestamp: true,
            env_filter: None,
        }
    }
}

impl TracingConfig {
    /// Every decoded and rejected event, one line each, for `--debug` runs.
    #[must_use]
    pub fn cli_debug() -> Self {
        Self {
            default_level: Level::DEBUG,
            output_format: TracingOutputFormat::Compact,
            include_location: true,
            include_timestamp: false,
            ..Self::default()
        }
    }

    /// Warnings only, so logs stay out of the report.
    #[must_use]
    pub fn quiet() -> Self {
        Self {
            default_level: Level::WARN,
            output_format: TracingOutputFormat::Compact,
            include_target: false,
            include_timestamp: false,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.default_level = level;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: TracingOutputFormat) -> Self {
        self.output_format = format;
        self
    }

    #[must_use]
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Returns the filter directive used when neither `env_filter` nor
    /// `RUST_LOG` is set.
    pub fn default_directive(&self) -> String {
        format!("meetingstats={}", self.default_level)
    }

    /// Builds the event filter: `env_filter`, then `RUST_LOG`, then the
    /// default directive.
    pub fn build_filter(&self) -> Result<EnvFilter, TracingError> {
        match self.env_filter {
            Some(ref directive) => Ok(EnvFilter::try_new(directive)?),
            None => Ok(EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(self.default_directive()))),
        }
    }

    fn build_layer(&self) -> Box<dyn Layer<Registry> + Send + Sync> {
        let base = fmt::layer()
            .with_writer(std::io::stderr)
            .with_file(self.include_location)
            .with_line_number(self.include_location)
            .with_target(self.include_target);

        match (self.output_format, self.include_timestamp) {
            (TracingOutputFormat::Pretty, _) => base.pretty().boxed(),
            (TracingOutputFormat::Compact, true) => base.compact().boxed(),
            (TracingOutputFormat::Compact, false) => base.compact().without_time().boxed(),
            (TracingOutputFormat::Json, _) => base.json().boxed(),
        }
    }
}

/// Installs the global subscriber. Logs go to stderr so stdout stays clean
/// for the report or JSON output.
///
/// # Errors
///
/// Fails if a global subscriber is already set or the filter directive does
/// not parse.
pub fn init_tracing(config: TracingConfig) -> Result<(), TracingError> {
    let filter = config.build_filter()?;
    let subscriber = tracing_subscriber::registry()
        .with(config.build_layer())
        .with(filter);
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    mod presets {
        use super::*;

        #[test]
        fn debug_run_is_verbose_and_located() {
            let config = TracingConfig::cli_debug();
            assert_eq!(config.default_level, Level::DEBUG);
            assert_eq!(config.output_format, TracingOutputFormat::Compact);
            assert!(config.include_location);
            assert!(!config.include_timestamp);
        }

        #[test]
        fn quiet_run_only_warns() {
            let config = TracingConfig::quiet();
            assert_eq!(config.default_directive(), "meetingstats=WARN");
            assert!(!config.include_target);
        }

        #[test]
        fn builders_override_preset() {
            let config = TracingConfig::quiet()
                .with_level(Level::TRACE)
                .with_format(TracingOutputFormat::Json)
                .with_env_filter("meetingstats_ics=trace");

            assert_eq!(config.default_level, Level::TRACE);
            assert_eq!(config.output_format, TracingOutputFormat::Json);
            assert_eq!(config.env_filter.as_deref(), Some("meetingstats_ics=trace"));
        }
    }

    mod filters {
        use super::*;

        #[test]
        fn explicit_directive_is_used() {
            let filter = TracingConfig::default()
                .with_env_filter("meetingstats_core=debug")
                .build_filter()
                .unwrap();
            assert_eq!(filter.to_string(), "meetingstats_core=debug");
        }

        #[test]
        fn bad_directive_is_an_error() {
            let config = TracingConfig::default().with_env_filter("meetingstats=loud");
            assert!(matches!(config.build_filter(), Err(TracingError::EnvFilter(_))));
            assert!(matches!(init_tracing(config), Err(TracingError::EnvFilter(_))));
        }
    }
}
