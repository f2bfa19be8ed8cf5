//! Rankings derived from colleague statistics and event records.
//!
//! All orderings are total: hours descending with identity ascending as the
//! tie-break, costs descending with start time ascending.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::colleagues::ColleagueStats;
use crate::daily::sum_hours;
use crate::event::EventRecord;
use crate::identity::Identity;

/// Number of collaborators in the top list.
pub const TOP_COLLEAGUES_LIMIT: usize = 10;
/// Number of collaborators in the time distribution.
pub const TIME_DISTRIBUTION_LIMIT: usize = 15;
/// Number of meetings in the most-expensive list.
pub const EXPENSIVE_MEETINGS_LIMIT: usize = 5;

/// A compact view of one collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColleagueSummary {
    /// The colleague's identity.
    pub identity: Identity,
    /// Hours spent in meetings together.
    pub total_hours: f64,
    /// Number of shared meetings.
    pub meeting_count: usize,
    /// Prorated cost of the shared meetings.
    pub total_cost: Option<f64>,
}

impl From<&ColleagueStats> for ColleagueSummary {
    fn from(stats: &ColleagueStats) -> Self {
        Self {
            identity: stats.identity.clone(),
            total_hours: stats.total_hours,
            meeting_count: stats.meeting_count,
            total_cost: stats.total_cost,
        }
    }
}

/// The collaborator with the most one-on-one time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bestie {
    /// The colleague's identity.
    pub identity: Identity,
    /// Hours spent one-on-one.
    pub one_on_one_hours: f64,
    /// Number of shared meetings of any size.
    pub meeting_count: usize,
    /// Prorated cost of all shared meetings.
    pub total_cost: Option<f64>,
}

impl From<&ColleagueStats> for Bestie {
    fn from(stats: &ColleagueStats) -> Self {
        Self {
            identity: stats.identity.clone(),
            one_on_one_hours: stats.one_on_one_hours,
            meeting_count: stats.meeting_count,
            total_cost: stats.total_cost,
        }
    }
}

/// One collaborator's share of all colleague-attributed hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionEntry {
    /// The colleague's identity.
    pub identity: Identity,
    /// Hours spent in meetings together.
    pub hours: f64,
    /// Share of colleague-attributed hours, `None` when there are none.
    pub percentage: Option<f64>,
}

/// Returns `part / whole × 100`, or `None` when `whole` is zero.
pub fn percentage(part: f64, whole: f64) -> Option<f64> {
    (whole != 0.0).then(|| part / whole * 100.0)
}

fn by_hours_then_identity(a: &ColleagueStats, b: &ColleagueStats) -> Ordering {
    b.total_hours
        .total_cmp(&a.total_hours)
        .then_with(|| a.identity.cmp(&b.identity))
}

/// Returns every colleague ordered by hours descending, identity ascending.
pub fn rank_colleagues(colleagues: &BTreeMap<Identity, ColleagueStats>) -> Vec<&ColleagueStats> {
    let mut ranked: Vec<&ColleagueStats> = colleagues.values().collect();
    ranked.sort_by(|a, b| by_hours_then_identity(a, b));
    ranked
}

/// Returns the top collaborators by shared hours.
pub fn top_colleagues(
    colleagues: &BTreeMap<Identity, ColleagueStats>,
    limit: usize,
) -> Vec<ColleagueSummary> {
    rank_colleagues(colleagues)
        .into_iter()
        .take(limit)
        .map(ColleagueSummary::from)
        .collect()
}

/// Returns how colleague-attributed time is split among the top collaborators.
///
/// The denominator is the sum of every colleague's hours, not the viewer's
/// meeting hours: one meeting with three colleagues counts three times.
pub fn time_distribution(
    colleagues: &BTreeMap<Identity, ColleagueStats>,
    limit: usize,
) -> Vec<DistributionEntry> {
    let attributed = sum_hours(colleagues.values().map(|c| c.total_hours));

    rank_colleagues(colleagues)
        .into_iter()
        .take(limit)
        .map(|c| DistributionEntry {
            identity: c.identity.clone(),
            hours: c.total_hours,
            percentage: percentage(c.total_hours, attributed),
        })
        .collect()
}

/// Returns the most expensive meetings among records with a known cost.
///
/// Ties are broken by earlier start first.
pub fn most_expensive_meetings(records: &[EventRecord], limit: usize) -> Vec<EventRecord> {
    let mut priced: Vec<(f64, &EventRecord)> = records
        .iter()
        .filter_map(|r| r.total_cost.map(|cost| (cost, r)))
        .collect();

    priced.sort_by(|(cost_a, a), (cost_b, b)| {
        cost_b
            .total_cmp(cost_a)
            .then_with(|| a.start().cmp(&b.start()))
    });

    priced
        .into_iter()
        .take(limit)
        .map(|(_, r)| r.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colleagues::aggregate_colleagues;
    use crate::enrich::enrich;
    use crate::event::CalendarEvent;
    use chrono::{DateTime, FixedOffset, TimeZone};

    fn at(d: u32, h: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2025, 3, d, h, 0, 0)
            .unwrap()
    }

    fn record(d: u32, h: u32, hours: i64, attendees: &[&str], rate: Option<f64>) -> EventRecord {
        let event = CalendarEvent::new(format!("m{d}-{h}"), at(d, h), at(d, h + hours as u32))
            .with_attendees(attendees.iter().copied());
        enrich(&event, rate)
    }

    fn viewer() -> Identity {
        Identity::new("me")
    }

    mod percentages {
        use super::*;

        #[test]
        fn zero_denominator_is_none() {
            assert_eq!(percentage(3.0, 0.0), None);
            assert_eq!(percentage(0.0, 0.0), None);
        }

        #[test]
        fn regular_percentage() {
            assert_eq!(percentage(1.0, 4.0), Some(25.0));
            assert_eq!(percentage(0.0, 4.0), Some(0.0));
        }
    }

    mod colleagues {
        use super::*;

        #[test]
        fn top_colleagues_breaks_ties_by_identity() {
            let records = vec![
                record(3, 9, 2, &["me", "zed"], None),
                record(4, 9, 2, &["me", "amy"], None),
                record(5, 9, 3, &["me", "kim"], None),
            ];
            let colleagues = aggregate_colleagues(&records, &viewer());
            let top = top_colleagues(&colleagues, TOP_COLLEAGUES_LIMIT);
            let names: Vec<_> = top.iter().map(|c| c.identity.as_str()).collect();
            assert_eq!(names, vec!["kim", "amy", "zed"]);
        }

        #[test]
        fn top_colleagues_respects_limit() {
            let names = ["a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l"];
            let records: Vec<_> = names
                .iter()
                .map(|n| record(3, 9, 1, &["me", *n], None))
                .collect();
            let colleagues = aggregate_colleagues(&records, &viewer());
            let top = top_colleagues(&colleagues, TOP_COLLEAGUES_LIMIT);
            assert_eq!(top.len(), 10);
            assert_eq!(top[0].identity.as_str(), "a");
            assert_eq!(top[9].identity.as_str(), "j");
        }

        #[test]
        fn distribution_respects_limit() {
            let names: Vec<String> = (0..18).map(|i| format!("c{i:02}")).collect();
            let records: Vec<_> = names
                .iter()
                .map(|n| record(3, 9, 1, &["me", n.as_str()], None))
                .collect();
            let colleagues = aggregate_colleagues(&records, &viewer());
            let distribution = time_distribution(&colleagues, TIME_DISTRIBUTION_LIMIT);

            assert_eq!(distribution.len(), 15);
            assert_eq!(distribution[0].identity.as_str(), "c00");
            assert_eq!(distribution[14].identity.as_str(), "c14");

            // Colleagues past the cutoff still count in the denominator.
            let shown: f64 = distribution.iter().filter_map(|e| e.percentage).sum();
            assert!((shown - 15.0 / 18.0 * 100.0).abs() < 1e-9);
        }

        #[test]
        fn distribution_uses_colleague_attributed_hours() {
            // One 2h meeting with two colleagues attributes 4h in total.
            let records = vec![record(3, 9, 2, &["me", "amy", "bob"], None)];
            let colleagues = aggregate_colleagues(&records, &viewer());
            let distribution = time_distribution(&colleagues, TIME_DISTRIBUTION_LIMIT);

            assert_eq!(distribution.len(), 2);
            for entry in &distribution {
                assert_eq!(entry.percentage, Some(50.0));
            }
        }

        #[test]
        fn distribution_with_zero_hours_has_no_percentages() {
            let event = CalendarEvent::new("Zero", at(3, 9), at(3, 9)).with_attendees(["me", "amy"]);
            let records = vec![enrich(&event, None)];
            let colleagues = aggregate_colleagues(&records, &viewer());
            let distribution = time_distribution(&colleagues, TIME_DISTRIBUTION_LIMIT);
            assert_eq!(distribution[0].percentage, None);
        }
    }

    mod expensive {
        use super::*;

        #[test]
        fn ranks_by_cost_then_start() {
            let records = vec![
                record(5, 9, 1, &["me", "a"], Some(100.0)),
                record(3, 9, 1, &["me", "a"], Some(100.0)),
                record(4, 9, 2, &["me", "a", "b"], Some(100.0)),
            ];
            let top = most_expensive_meetings(&records, EXPENSIVE_MEETINGS_LIMIT);
            let starts: Vec<_> = top.iter().map(|r| r.start()).collect();
            assert_eq!(starts, vec![at(4, 9), at(3, 9), at(5, 9)]);
        }

        #[test]
        fn unknown_costs_are_skipped() {
            let records = vec![
                record(3, 9, 1, &["me", "a"], None),
                record(4, 9, 1, &["me", "a"], Some(10.0)),
            ];
            let top = most_expensive_meetings(&records, EXPENSIVE_MEETINGS_LIMIT);
            assert_eq!(top.len(), 1);
            assert_eq!(top[0].start(), at(4, 9));
        }

        #[test]
        fn limit_applies() {
            let records: Vec<_> = (1..=8)
                .map(|d| record(d, 9, 1, &["me", "a"], Some(10.0 * d as f64)))
                .collect();
            let top = most_expensive_meetings(&records, EXPENSIVE_MEETINGS_LIMIT);
            assert_eq!(top.len(), 5);
            assert_eq!(top[0].start(), at(8, 9));
        }
    }
}
