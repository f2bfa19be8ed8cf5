//! Per-day grouping of event records.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::event::EventRecord;

/// Number of days reported in the busiest and freest rankings.
pub const DAY_RANKING_LIMIT: usize = 5;

/// All records starting on one local calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayBucket {
    /// The calendar day.
    pub date: NaiveDate,
    /// Records starting on this day, in input order.
    pub events: Vec<EventRecord>,
    /// Sum of record durations.
    pub total_hours: f64,
    /// Sum of known record costs, `None` if no record has a cost.
    pub total_cost: Option<f64>,
}

impl DayBucket {
    fn from_records(date: NaiveDate, events: Vec<EventRecord>) -> Self {
        let total_hours = sum_hours(events.iter().map(|e| e.duration));
        let total_cost = sum_known(events.iter().map(|e| e.total_cost));
        Self {
            date,
            events,
            total_hours,
            total_cost,
        }
    }

    /// Returns the number of meetings on this day.
    pub fn meeting_count(&self) -> usize {
        self.events.len()
    }
}

/// One point of a per-day heatmap series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatmapPoint {
    /// The calendar day.
    pub date: NaiveDate,
    /// Meeting hours on that day.
    pub meeting_hours: f64,
}

/// Sums hour values starting from `+0.0`, so an empty input is a plain zero.
pub fn sum_hours(values: impl IntoIterator<Item = f64>) -> f64 {
    values.into_iter().fold(0.0, |acc, v| acc + v)
}

/// Sums the known values, returning `None` if every value is unknown.
pub fn sum_known(values: impl IntoIterator<Item = Option<f64>>) -> Option<f64> {
    values
        .into_iter()
        .flatten()
        .fold(None, |acc, v| Some(acc.unwrap_or(0.0) + v))
}

/// Groups records by the local day they start on.
///
/// Buckets come out in the order their day was first seen. A record spanning
/// midnight stays whole in its start day.
pub fn group_by_day(records: &[EventRecord]) -> Vec<DayBucket> {
    let mut order: Vec<NaiveDate> = Vec::new();
    let mut grouped: HashMap<NaiveDate, Vec<EventRecord>> = HashMap::new();

    for record in records {
        let date = record.date();
        grouped
            .entry(date)
            .or_insert_with(|| {
                order.push(date);
                Vec::new()
            })
            .push(record.clone());
    }

    order
        .into_iter()
        .filter_map(|date| {
            grouped
                .remove(&date)
                .map(|events| DayBucket::from_records(date, events))
        })
        .collect()
}

/// Returns the days with the most meeting hours, highest first.
///
/// Ties keep grouping order.
pub fn busiest_days(days: &[DayBucket], limit: usize) -> Vec<DayBucket> {
    let mut sorted = days.to_vec();
    sorted.sort_by(|a, b| b.total_hours.total_cmp(&a.total_hours));
    sorted.truncate(limit);
    sorted
}

/// Returns the days with the fewest meeting hours, lowest first.
///
/// Ties keep grouping order.
pub fn freest_days(days: &[DayBucket], limit: usize) -> Vec<DayBucket> {
    let mut sorted = days.to_vec();
    sorted.sort_by(|a, b| a.total_hours.total_cmp(&b.total_hours));
    sorted.truncate(limit);
    sorted
}

/// Builds the per-day heatmap series in date order.
pub fn heatmap(days: &[DayBucket]) -> Vec<HeatmapPoint> {
    let mut points: Vec<HeatmapPoint> = days
        .iter()
        .map(|day| HeatmapPoint {
            date: day.date,
            meeting_hours: day.total_hours,
        })
        .collect();
    points.sort_by_key(|p| p.date);
    points
}
