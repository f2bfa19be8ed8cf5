//! Date windows for selecting which events are analyzed.
//!
//! A [`DateWindow`] is a closed interval of calendar days. An event belongs to
//! the window when the local day it starts on falls inside it, both bounds
//! included.

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// An inclusive range of calendar days.
///
/// Deserializing goes through [`DateWindow::new`], so an inverted window is
/// rejected there as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawWindow")]
pub struct DateWindow {
    /// First day of the window (inclusive).
    pub start: NaiveDate,
    /// Last day of the window (inclusive).
    pub end: NaiveDate,
}

impl DateWindow {
    /// Creates a new window.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvertedWindow`] if `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> ConfigResult<Self> {
        if start > end {
            return Err(ConfigError::InvertedWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates a window spanning January 1st to December 31st of `year`.
    ///
    /// Years outside chrono's supported range fall back to a single-day window
    /// at chrono's minimum date.
    pub fn calendar_year(year: i32) -> Self {
        let start = NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(NaiveDate::MIN);
        let end = NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(start);
        Self { start, end }
    }

    /// Creates a window for the current calendar year in the local timezone.
    pub fn current_year() -> Self {
        Self::calendar_year(Local::now().year())
    }

    /// Returns true if `date` lies inside the window, bounds included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Returns a window stretched to cover both `self` and `other`.
    pub fn union(&self, other: &DateWindow) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Returns the number of days in the window.
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

#[derive(Deserialize)]
struct RawWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawWindow> for DateWindow {
    type Error = ConfigError;

    fn try_from(raw: RawWindow) -> ConfigResult<Self> {
        Self::new(raw.start, raw.end)
    }
}

impl Default for DateWindow {
    fn default() -> Self {
        Self::current_year()
    }
}
