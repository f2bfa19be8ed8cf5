//! Weekday load patterns.
//!
//! Each observed day contributes one daily total to its weekday. Days without
//! meetings are never observed, so they do not drag averages down.

use std::collections::BTreeMap;

use chrono::{Datelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::daily::{DayBucket, sum_hours};

/// Meeting load statistics for one weekday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekdayPattern {
    /// Weekday index, 0 = Sunday through 6 = Saturday.
    pub day_of_week: u32,
    /// Mean of the daily totals.
    pub average_hours: f64,
    /// Median of the daily totals.
    pub median_hours: f64,
    /// Smallest daily total.
    pub min_hours: f64,
    /// Largest daily total.
    pub max_hours: f64,
    /// Number of meetings across all observed days.
    pub total_meetings: usize,
    /// Number of observed days.
    pub days_observed: usize,
}

impl WeekdayPattern {
    /// Returns the chrono weekday for this pattern.
    pub fn weekday(&self) -> Weekday {
        match self.day_of_week {
            0 => Weekday::Sun,
            1 => Weekday::Mon,
            2 => Weekday::Tue,
            3 => Weekday::Wed,
            4 => Weekday::Thu,
            5 => Weekday::Fri,
            _ => Weekday::Sat,
        }
    }
}

/// Returns the median of a list of values, or `None` if it is empty.
///
/// Even-sized inputs average the two middle values.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Computes one pattern per observed weekday, in weekday index order.
pub fn weekday_patterns(days: &[DayBucket]) -> Vec<WeekdayPattern> {
    let mut by_weekday: BTreeMap<u32, (Vec<f64>, usize)> = BTreeMap::new();

    for day in days {
        let index = day.date.weekday().num_days_from_sunday();
        let entry = by_weekday.entry(index).or_default();
        entry.0.push(day.total_hours);
        entry.1 += day.meeting_count();
    }

    by_weekday
        .into_iter()
        .filter_map(|(day_of_week, (daily_hours, total_meetings))| {
            let median_hours = median(&daily_hours)?;
            let sum = sum_hours(daily_hours.iter().copied());
            Some(WeekdayPattern {
                day_of_week,
                average_hours: sum / daily_hours.len() as f64,
                median_hours,
                min_hours: daily_hours.iter().copied().fold(f64::INFINITY, f64::min),
                max_hours: daily_hours.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                total_meetings,
                days_observed: daily_hours.len(),
            })
        })
        .collect()
}
