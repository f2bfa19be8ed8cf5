//! Event types for calendar analysis.
//!
//! This module provides the two event shapes the pipeline works with:
//! - [`CalendarEvent`]: a decoded event as handed over by a calendar decoder
//! - [`EventRecord`]: an accepted event enriched with duration and cost
//!
//! Times are `DateTime<FixedOffset>`. The offset is whatever the decoder placed
//! the event in, and it defines the "local" hour and day used for filtering and
//! grouping. No timezone conversion happens past this point.

use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::identity::Identity;

/// The viewer's response status for an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    /// The attendee has accepted the invitation.
    Accepted,
    /// The attendee has declined the invitation.
    Declined,
    /// The attendee has tentatively accepted.
    Tentative,
    /// The attendee has delegated the invitation.
    Delegated,
    /// The attendee has not responded.
    #[default]
    NeedsAction,
    /// Any other status string.
    Unknown,
}

impl ResponseStatus {
    /// Parses an iCalendar `PARTSTAT` value, case-insensitively.
    ///
    /// Unrecognized values map to [`ResponseStatus::Unknown`].
    pub fn from_partstat(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "ACCEPTED" => Self::Accepted,
            "DECLINED" => Self::Declined,
            "TENTATIVE" => Self::Tentative,
            "DELEGATED" => Self::Delegated,
            "NEEDS-ACTION" => Self::NeedsAction,
            _ => Self::Unknown,
        }
    }

    /// Returns the iCalendar spelling of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accepted => "ACCEPTED",
            Self::Declined => "DECLINED",
            Self::Tentative => "TENTATIVE",
            Self::Delegated => "DELEGATED",
            Self::NeedsAction => "NEEDS-ACTION",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Returns true if the attendee declined.
    pub fn is_declined(&self) -> bool {
        matches!(self, Self::Declined)
    }
}

impl FromStr for ResponseStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_partstat(s))
    }
}

/// A decoded calendar event.
///
/// Attendees are a set of normalized identities, so duplicates in the source
/// (the same person invited twice) count once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// The event title/summary.
    pub summary: String,
    /// When the event starts.
    pub start: DateTime<FixedOffset>,
    /// When the event ends.
    pub end: DateTime<FixedOffset>,
    /// Normalized identities of all attendees, the viewer included.
    pub attendees: BTreeSet<Identity>,
    /// The viewer's response status.
    pub status: ResponseStatus,
}

impl CalendarEvent {
    /// Creates a new event with no attendees and a `NeedsAction` status.
    pub fn new(
        summary: impl Into<String>,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            summary: summary.into(),
            start,
            end,
            attendees: BTreeSet::new(),
            status: ResponseStatus::default(),
        }
    }

    /// Builder method to add one attendee (normalized on the way in).
    pub fn with_attendee(mut self, raw: impl AsRef<str>) -> Self {
        self.attendees.insert(Identity::new(raw));
        self
    }

    /// Builder method to replace the attendee set (normalized on the way in).
    pub fn with_attendees<I, S>(mut self, raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.attendees = raw.into_iter().map(Identity::new).collect();
        self
    }

    /// Builder method to set the response status.
    pub fn with_status(mut self, status: ResponseStatus) -> Self {
        self.status = status;
        self
    }

    /// Returns the number of distinct attendees.
    pub fn attendee_count(&self) -> usize {
        self.attendees.len()
    }

    /// Returns true if the given identity attends this event.
    pub fn has_attendee(&self, identity: &Identity) -> bool {
        self.attendees.contains(identity)
    }

    /// Returns the local calendar day the event starts on.
    pub fn start_date(&self) -> NaiveDate {
        self.start.date_naive()
    }

    /// Returns the event duration in hours.
    ///
    /// Not clamped: an end before the start yields a negative value.
    pub fn duration_hours(&self) -> f64 {
        hours_between(self.start, self.end)
    }
}

/// An accepted event with its derived duration and cost.
///
/// Built once per accepted event by the enricher and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// The source event.
    #[serde(flatten)]
    pub event: CalendarEvent,
    /// Duration in hours.
    pub duration: f64,
    /// Number of attendees, always at least 2 for accepted events.
    pub attendee_count: usize,
    /// Cost of the whole meeting across all attendees, if a rate is known.
    pub total_cost: Option<f64>,
}

impl EventRecord {
    /// Returns the event summary.
    pub fn summary(&self) -> &str {
        &self.event.summary
    }

    /// Returns the start instant.
    pub fn start(&self) -> DateTime<FixedOffset> {
        self.event.start
    }

    /// Returns the end instant.
    pub fn end(&self) -> DateTime<FixedOffset> {
        self.event.end
    }

    /// Returns the local calendar day the record starts on.
    pub fn date(&self) -> NaiveDate {
        self.event.start_date()
    }

    /// Returns true if this is a meeting between exactly two people.
    pub fn is_one_on_one(&self) -> bool {
        self.attendee_count == 2
    }

    /// Returns one attendee's share of the meeting cost.
    pub fn cost_share(&self) -> Option<f64> {
        self.total_cost
            .map(|cost| cost / self.attendee_count.max(1) as f64)
    }
}

/// Returns the signed number of hours from `start` to `end`.
pub fn hours_between(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> f64 {
    (end - start).num_milliseconds() as f64 / 3_600_000.0
}
