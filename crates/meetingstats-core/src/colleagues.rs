//! Per-collaborator aggregation.
//!
//! Every identity other than the viewer that shows up in an accepted record
//! gets a [`ColleagueStats`]. Costs are prorated by the full attendee count of
//! each meeting, so the shares of all attendees add back up to the meeting
//! cost.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::daily::{HeatmapPoint, sum_hours, sum_known};
use crate::event::EventRecord;
use crate::identity::Identity;

/// One meeting in a colleague's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColleagueMeeting {
    /// The meeting title.
    pub summary: String,
    /// Local day of the meeting.
    pub date: NaiveDate,
    /// When the meeting starts.
    pub start: DateTime<FixedOffset>,
    /// When the meeting ends.
    pub end: DateTime<FixedOffset>,
    /// Duration in hours.
    pub duration: f64,
    /// This colleague's share of the meeting cost.
    pub cost_share: Option<f64>,
    /// Cost of the whole meeting.
    pub total_cost: Option<f64>,
    /// Whether the meeting was between the viewer and this colleague alone.
    pub is_one_on_one: bool,
    /// Number of attendees.
    pub attendee_count: usize,
}

impl ColleagueMeeting {
    fn from_record(record: &EventRecord) -> Self {
        Self {
            summary: record.summary().to_string(),
            date: record.date(),
            start: record.start(),
            end: record.end(),
            duration: record.duration,
            cost_share: record.cost_share(),
            total_cost: record.total_cost,
            is_one_on_one: record.is_one_on_one(),
            attendee_count: record.attendee_count,
        }
    }
}

/// A point of a colleague's running total of shared meeting hours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CumulativePoint {
    /// Start of the meeting that brought the total to `hours`.
    pub date: DateTime<FixedOffset>,
    /// Running total in hours.
    pub hours: f64,
}

/// Everything known about time spent with one colleague.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColleagueStats {
    /// The colleague's identity.
    pub identity: Identity,
    /// Hours spent in meetings together.
    pub total_hours: f64,
    /// Hours spent in meetings with exactly two attendees.
    pub one_on_one_hours: f64,
    /// Number of shared meetings.
    pub meeting_count: usize,
    /// Sum of this colleague's cost shares, `None` if no meeting had a cost.
    pub total_cost: Option<f64>,
    /// Shared meetings ordered by start time.
    pub meetings: Vec<ColleagueMeeting>,
    /// Running total of shared hours, one point per meeting.
    pub cumulative: Vec<CumulativePoint>,
    /// Shared hours per day, in date order.
    pub heatmap: Vec<HeatmapPoint>,
}

impl ColleagueStats {
    fn from_records(identity: Identity, records: &[&EventRecord]) -> Self {
        let mut sorted: Vec<&EventRecord> = records.to_vec();
        sorted.sort_by_key(|r| r.start());

        let meetings: Vec<ColleagueMeeting> =
            sorted.iter().map(|r| ColleagueMeeting::from_record(r)).collect();

        let mut running = 0.0;
        let cumulative = sorted
            .iter()
            .map(|r| {
                running += r.duration;
                CumulativePoint {
                    date: r.start(),
                    hours: running,
                }
            })
            .collect();

        let mut per_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for record in &sorted {
            *per_day.entry(record.date()).or_default() += record.duration;
        }
        let heatmap = per_day
            .into_iter()
            .map(|(date, meeting_hours)| HeatmapPoint {
                date,
                meeting_hours,
            })
            .collect();

        Self {
            identity,
            total_hours: sum_hours(sorted.iter().map(|r| r.duration)),
            one_on_one_hours: sum_hours(
                sorted
                    .iter()
                    .filter(|r| r.is_one_on_one())
                    .map(|r| r.duration),
            ),
            meeting_count: sorted.len(),
            total_cost: sum_known(sorted.iter().map(|r| r.cost_share())),
            meetings,
            cumulative,
            heatmap,
        }
    }
}

/// Folds records into per-colleague statistics, keyed and ordered by identity.
///
/// The viewer is never included.
pub fn aggregate_colleagues(
    records: &[EventRecord],
    viewer: &Identity,
) -> BTreeMap<Identity, ColleagueStats> {
    let mut by_identity: BTreeMap<&Identity, Vec<&EventRecord>> = BTreeMap::new();

    for record in records {
        for attendee in record.event.attendees.iter().filter(|a| *a != viewer) {
            by_identity.entry(attendee).or_default().push(record);
        }
    }

    by_identity
        .into_iter()
        .map(|(identity, shared)| {
            (
                identity.clone(),
                ColleagueStats::from_records(identity.clone(), &shared),
            )
        })
        .collect()
}

/// Picks the colleague with the most one-on-one hours.
///
/// Only colleagues with some one-on-one time qualify. Identities are scanned in
/// ascending order and only a strictly larger value wins, so ties go to the
/// smallest identity.
pub fn find_bestie(colleagues: &BTreeMap<Identity, ColleagueStats>) -> Option<&ColleagueStats> {
    let mut best: Option<&ColleagueStats> = None;
    for candidate in colleagues.values().filter(|c| c.one_on_one_hours > 0.0) {
        if best.is_none_or(|current| candidate.one_on_one_hours > current.one_on_one_hours) {
            best = Some(candidate);
        }
    }
    best
}
