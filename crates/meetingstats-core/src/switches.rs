//! Back-to-back meeting detection.
//!
//! A context switch is a transition between two meetings on the same day with
//! a gap too short to do focused work in between: strictly more than zero and
//! strictly less than half an hour. Overlapping or touching meetings are not
//! switches.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::daily::DayBucket;
use crate::event::{EventRecord, hours_between};

/// Gaps at or above this many hours are not context switches.
pub const CONTEXT_SWITCH_MAX_GAP_HOURS: f64 = 0.5;

/// Two same-day meetings separated by a short gap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextSwitch {
    /// The day both meetings start on.
    pub date: NaiveDate,
    /// The earlier meeting.
    pub first_meeting: EventRecord,
    /// The meeting that follows it.
    pub second_meeting: EventRecord,
    /// Hours between the end of the first and the start of the second.
    pub time_between: f64,
}

/// Returns true if a gap (in hours) counts as a context switch.
pub fn is_context_switch_gap(gap: f64) -> bool {
    gap > 0.0 && gap < CONTEXT_SWITCH_MAX_GAP_HOURS
}

/// Finds context switches within one day.
pub fn day_context_switches(day: &DayBucket) -> Vec<ContextSwitch> {
    let mut sorted: Vec<&EventRecord> = day.events.iter().collect();
    sorted.sort_by_key(|r| r.start());

    sorted
        .windows(2)
        .filter_map(|pair| {
            let (first, second) = (pair[0], pair[1]);
            let gap = hours_between(first.end(), second.start());
            is_context_switch_gap(gap).then(|| ContextSwitch {
                date: day.date,
                first_meeting: first.clone(),
                second_meeting: second.clone(),
                time_between: gap,
            })
        })
        .collect()
}

/// Finds context switches across all days, day by day in the given order.
pub fn context_switches(days: &[DayBucket]) -> Vec<ContextSwitch> {
    days.iter().flat_map(day_context_switches).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::daily::group_by_day;
    use crate::enrich::enrich;
    use crate::event::CalendarEvent;
    use chrono::{DateTime, FixedOffset, TimeZone};

    fn at(d: u32, h: u32, min: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2025, 3, d, h, min, 0)
            .unwrap()
    }

    fn record(summary: &str, start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> EventRecord {
        let event = CalendarEvent::new(summary, start, end).with_attendees(["me", "bob"]);
        enrich(&event, None)
    }

    #[test]
    fn twenty_minute_gap_is_a_switch() {
        let days = group_by_day(&[
            record("first", at(3, 9, 0), at(3, 10, 0)),
            record("second", at(3, 10, 20), at(3, 11, 0)),
        ]);
        let switches = context_switches(&days);

        assert_eq!(switches.len(), 1);
        assert_eq!(switches[0].first_meeting.summary(), "first");
        assert_eq!(switches[0].second_meeting.summary(), "second");
        assert!((switches[0].time_between - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn thirty_five_minute_gap_is_not_a_switch() {
        let days = group_by_day(&[
            record("first", at(3, 9, 0), at(3, 10, 0)),
            record("second", at(3, 10, 35), at(3, 11, 0)),
        ]);
        assert!(context_switches(&days).is_empty());
    }

    #[test]
    fn exactly_half_an_hour_is_not_a_switch() {
        let days = group_by_day(&[
            record("first", at(3, 9, 0), at(3, 10, 0)),
            record("second", at(3, 10, 30), at(3, 11, 0)),
        ]);
        assert!(context_switches(&days).is_empty());
    }

    #[test]
    fn touching_and_overlapping_meetings_are_not_switches() {
        let days = group_by_day(&[
            record("a", at(3, 9, 0), at(3, 10, 0)),
            record("b", at(3, 10, 0), at(3, 11, 0)),
            record("c", at(3, 10, 45), at(3, 12, 0)),
        ]);
        assert!(context_switches(&days).is_empty());
    }

    #[test]
    fn records_are_sorted_before_pairing() {
        let days = group_by_day(&[
            record("late", at(3, 11, 10), at(3, 12, 0)),
            record("early", at(3, 9, 0), at(3, 11, 0)),
        ]);
        let switches = context_switches(&days);
        assert_eq!(switches.len(), 1);
        assert_eq!(switches[0].first_meeting.summary(), "early");
    }

    #[test]
    fn different_days_never_pair() {
        let days = group_by_day(&[
            record("mon", at(3, 17, 0), at(3, 17, 50)),
            record("tue", at(4, 8, 0), at(4, 9, 0)),
        ]);
        assert!(context_switches(&days).is_empty());
    }

    #[test]
    fn gap_bounds() {
        assert!(!is_context_switch_gap(0.0));
        assert!(is_context_switch_gap(0.01));
        assert!(is_context_switch_gap(0.49));
        assert!(!is_context_switch_gap(0.5));
        assert!(!is_context_switch_gap(-0.25));
    }
}
