//! CLI configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/meetingstats/config.toml` by default:
//!
//! ```toml
//! [viewer]
//! email = "me@corp.com"
//! annual_salary = 130000
//!
//! [filters]
//! exclude_recurring = true
//! from = "2025-01-01"
//! to = "2025-12-31"
//!
//! [decode]
//! timezone = "Europe/Paris"
//! resource_markers = ["resource.calendar.google", "team", "ovrsalle"]
//!
//! [report]
//! top_colleagues = 10
//! max_title_length = 40
//! ```
//!
//! Dates are quoted strings. Command-line flags override the file.

use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use meetingstats_core::{DateWindow, PipelineConfig, ReportOptions};
use meetingstats_ics::{DEFAULT_RESOURCE_MARKERS, DecodeOptions};

use crate::cli::Cli;
use crate::error::CliResult;

/// Configuration for the meetingstats CLI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Who the statistics are about.
    pub viewer: ViewerSettings,

    /// Which meetings are counted.
    pub filters: FilterSettings,

    /// How the calendar export is read.
    pub decode: DecodeSettings,

    /// How the report is rendered.
    pub report: ReportOptions,
}

/// Viewer settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    /// The calendar owner's email address.
    pub email: Option<String>,

    /// Annual salary used to price meeting time.
    pub annual_salary: Option<f64>,
}

/// Filter settings for meeting selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    /// Skip meetings whose title looks recurring.
    pub exclude_recurring: bool,

    /// First day to analyze.
    pub from: Option<NaiveDate>,

    /// Last day to analyze.
    pub to: Option<NaiveDate>,
}

impl FilterSettings {
    /// Resolves the analysis window.
    ///
    /// A missing bound is filled from the calendar year of the other one, or
    /// the current year when neither is set.
    pub fn window(&self) -> CliResult<DateWindow> {
        let (start, end) = match (self.from, self.to) {
            (Some(from), Some(to)) => (from, to),
            (Some(from), None) => (from, DateWindow::calendar_year(from.year()).end),
            (None, Some(to)) => (DateWindow::calendar_year(to.year()).start, to),
            (None, None) => return Ok(DateWindow::current_year()),
        };
        Ok(DateWindow::new(start, end)?)
    }
}

/// Calendar decoding settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeSettings {
    /// IANA timezone used to place events, UTC when unset.
    pub timezone: Option<String>,

    /// Attendee address fragments that mark rooms and shared resources.
    pub resource_markers: Vec<String>,
}

impl Default for DecodeSettings {
    fn default() -> Self {
        Self {
            timezone: None,
            resource_markers: DEFAULT_RESOURCE_MARKERS
                .iter()
                .map(|m| m.to_string())
                .collect(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from the default path.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("failed to read config: {}", e))?;
        toml::from_str(&content).map_err(|e| format!("failed to parse config: {}", e))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("meetingstats")
    }

    /// Applies command-line overrides on top of the file settings.
    #[must_use]
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(ref email) = cli.email {
            self.viewer.email = Some(email.clone());
        }
        if let Some(salary) = cli.salary {
            self.viewer.annual_salary = Some(salary);
        }
        if cli.exclude_recurring {
            self.filters.exclude_recurring = true;
        }
        if cli.from.is_some() {
            self.filters.from = cli.from;
        }
        if cli.to.is_some() {
            self.filters.to = cli.to;
        }
        if let Some(ref timezone) = cli.timezone {
            self.decode.timezone = Some(timezone.clone());
        }
        if let Some(top) = cli.top {
            self.report.top_colleagues = top;
        }
        if let Some(max) = cli.max_title_length {
            self.report.max_title_length = max;
        }
        self
    }

    /// Builds and validates the pipeline configuration.
    ///
    /// # Errors
    ///
    /// Fails without a viewer email, with a negative salary or with an
    /// inverted window.
    pub fn pipeline_config(&self) -> CliResult<PipelineConfig> {
        let mut config = PipelineConfig::new(self.viewer.email.clone().unwrap_or_default())
            .with_exclude_recurring(self.filters.exclude_recurring)
            .with_window(self.filters.window()?);
        config.annual_salary = self.viewer.annual_salary;
        config.validate()?;
        Ok(config)
    }

    /// Builds the decoder options.
    ///
    /// # Errors
    ///
    /// Fails on an unknown timezone name.
    pub fn decode_options(&self) -> CliResult<DecodeOptions> {
        let mut options =
            DecodeOptions::default().with_resource_markers(self.decode.resource_markers.clone());
        if let Some(ref timezone) = self.decode.timezone {
            options = options.with_timezone_name(timezone)?;
        }
        if let Some(ref email) = self.viewer.email {
            options = options.with_viewer(email);
        }
        Ok(options)
    }
}
