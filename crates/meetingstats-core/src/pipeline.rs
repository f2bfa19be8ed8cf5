//! The aggregation pipeline.
//!
//! [`process_events`] is the single entry point: it filters the decoded events,
//! enriches the accepted ones into records, and derives every statistic from
//! those records. Nothing is cached or shared between calls.
//!
//! ```text
//! CalendarEvent ──filter──▶ accepted ──enrich──▶ EventRecord
//!                                                   │
//!          ┌──────────────┬──────────────┬──────────┴─────┐
//!          ▼              ▼              ▼                ▼
//!     DayBucket     WeekdayPattern  ContextSwitch   ColleagueStats
//!          │                                              │
//!          └─────────────────────┬────────────────────────┘
//!                                ▼
//!                         ProcessedStats
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::colleagues::{ColleagueStats, aggregate_colleagues, find_bestie};
use crate::daily::{
    DAY_RANKING_LIMIT, DayBucket, HeatmapPoint, busiest_days, freest_days, group_by_day, heatmap,
    sum_hours, sum_known,
};
use crate::enrich::{NOMINAL_WORKING_HOURS, enrich, hourly_rate};
use crate::error::{ConfigError, ConfigResult};
use crate::event::{CalendarEvent, EventRecord};
use crate::filter::EventFilter;
use crate::identity::Identity;
use crate::ranking::{
    Bestie, ColleagueSummary, DistributionEntry, EXPENSIVE_MEETINGS_LIMIT, TIME_DISTRIBUTION_LIMIT,
    TOP_COLLEAGUES_LIMIT, most_expensive_meetings, percentage, rank_colleagues, time_distribution,
    top_colleagues,
};
use crate::switches::{ContextSwitch, context_switches};
use crate::weekday::{WeekdayPattern, weekday_patterns};
use crate::window::DateWindow;

/// Parameters of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// The calendar owner's email (or identity).
    pub viewer_email: String,
    /// Annual salary used to price meetings.
    pub annual_salary: Option<f64>,
    /// Drop meetings whose title looks recurring.
    pub exclude_recurring: bool,
    /// Days to analyze, both ends included.
    pub window: DateWindow,
}

impl PipelineConfig {
    /// Creates a config for the given viewer covering the current calendar year.
    pub fn new(viewer_email: impl Into<String>) -> Self {
        Self {
            viewer_email: viewer_email.into(),
            annual_salary: None,
            exclude_recurring: false,
            window: DateWindow::current_year(),
        }
    }

    /// Builder method to set the annual salary.
    pub fn with_salary(mut self, annual_salary: f64) -> Self {
        self.annual_salary = Some(annual_salary);
        self
    }

    /// Builder method to exclude recurring meetings.
    pub fn with_exclude_recurring(mut self, exclude: bool) -> Self {
        self.exclude_recurring = exclude;
        self
    }

    /// Builder method to set the date window.
    pub fn with_window(mut self, window: DateWindow) -> Self {
        self.window = window;
        self
    }

    /// Returns the viewer's normalized identity.
    pub fn viewer(&self) -> Identity {
        Identity::new(&self.viewer_email)
    }

    /// Returns the hourly meeting rate, if a salary is set.
    pub fn hourly_rate(&self) -> Option<f64> {
        self.annual_salary.map(hourly_rate)
    }

    /// Checks the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty viewer, a negative or non-finite salary,
    /// or an inverted window.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.viewer_email.trim().is_empty() {
            return Err(ConfigError::MissingViewer);
        }
        if let Some(salary) = self.annual_salary
            && (!salary.is_finite() || salary < 0.0)
        {
            return Err(ConfigError::InvalidSalary(salary));
        }
        DateWindow::new(self.window.start, self.window.end)?;
        Ok(())
    }
}

/// The complete, immutable result of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedStats {
    /// The viewer the statistics are about.
    pub viewer: Identity,
    /// The analyzed window.
    pub window: DateWindow,
    /// Number of accepted meetings.
    pub meeting_count: usize,
    /// Sum of accepted meeting durations.
    pub total_meeting_hours: f64,
    /// Nominal working hours in a year.
    pub total_working_hours: f64,
    /// Meeting hours as a share of nominal working hours.
    pub meeting_time_percentage: Option<f64>,
    /// The hourly meeting rate, if a salary was given.
    pub hourly_rate: Option<f64>,
    /// Cost of the viewer's own meeting time.
    pub total_meeting_cost: Option<f64>,
    /// Cost of the accepted meetings across all attendees.
    pub total_attendee_cost: Option<f64>,
    /// Collaborators with the most shared hours.
    pub top_colleagues: Vec<ColleagueSummary>,
    /// Collaborator with the most one-on-one time.
    pub bestie: Option<Bestie>,
    /// Meetings with the highest known cost.
    pub most_expensive_meetings: Vec<EventRecord>,
    /// Split of colleague-attributed time among the top collaborators.
    pub colleague_time_distribution: Vec<DistributionEntry>,
    /// Days with the most meeting hours.
    pub busiest_days: Vec<DayBucket>,
    /// Days with the fewest meeting hours.
    pub freest_days: Vec<DayBucket>,
    /// Load per weekday.
    pub weekday_patterns: Vec<WeekdayPattern>,
    /// Short gaps between back-to-back meetings.
    pub context_switches: Vec<ContextSwitch>,
    /// Meeting hours per day.
    pub heatmap: Vec<HeatmapPoint>,
    /// Full statistics per collaborator, ordered by identity.
    pub colleague_stats: BTreeMap<Identity, ColleagueStats>,
    /// Every collaborator ranked by shared hours.
    pub all_colleagues: Vec<ColleagueSummary>,
}

impl ProcessedStats {
    /// Returns true if no meeting was accepted.
    pub fn is_empty(&self) -> bool {
        self.meeting_count == 0
    }
}

/// Filters events and enriches the accepted ones.
pub fn accepted_records(events: &[CalendarEvent], config: &PipelineConfig) -> Vec<EventRecord> {
    let viewer = config.viewer();
    let filter = EventFilter::new(&viewer, config.window, config.exclude_recurring);
    let rate = config.hourly_rate();

    events
        .iter()
        .filter(|event| match filter.check(event) {
            Ok(()) => true,
            Err(reason) => {
                debug!(summary = %event.summary, start = %event.start, %reason, "Rejected event");
                false
            }
        })
        .map(|event| enrich(event, rate))
        .collect()
}

/// Runs the full pipeline over a list of decoded events.
///
/// An empty input (including a failed decode upstream) produces a
/// well-formed result with zero totals and empty collections.
pub fn process_events(events: &[CalendarEvent], config: &PipelineConfig) -> ProcessedStats {
    let viewer = config.viewer();
    let rate = config.hourly_rate();
    let records = accepted_records(events, config);

    let total_meeting_hours = sum_hours(records.iter().map(|r| r.duration));
    let total_meeting_cost = rate.map(|rate| total_meeting_hours * rate);
    let total_attendee_cost = sum_known(records.iter().map(|r| r.total_cost));

    let days = group_by_day(&records);
    let colleague_stats = aggregate_colleagues(&records, &viewer);
    let bestie = find_bestie(&colleague_stats).map(Bestie::from);
    let all_colleagues = rank_colleagues(&colleague_stats)
        .into_iter()
        .map(ColleagueSummary::from)
        .collect();

    info!(
        viewer = %viewer,
        input = events.len(),
        accepted = records.len(),
        days = days.len(),
        colleagues = colleague_stats.len(),
        total_meeting_hours,
        "Processed calendar events"
    );

    ProcessedStats {
        viewer,
        window: config.window,
        meeting_count: records.len(),
        total_meeting_hours,
        total_working_hours: NOMINAL_WORKING_HOURS,
        meeting_time_percentage: percentage(total_meeting_hours, NOMINAL_WORKING_HOURS),
        hourly_rate: rate,
        total_meeting_cost,
        total_attendee_cost,
        top_colleagues: top_colleagues(&colleague_stats, TOP_COLLEAGUES_LIMIT),
        bestie,
        most_expensive_meetings: most_expensive_meetings(&records, EXPENSIVE_MEETINGS_LIMIT),
        colleague_time_distribution: time_distribution(&colleague_stats, TIME_DISTRIBUTION_LIMIT),
        busiest_days: busiest_days(&days, DAY_RANKING_LIMIT),
        freest_days: freest_days(&days, DAY_RANKING_LIMIT),
        weekday_patterns: weekday_patterns(&days),
        context_switches: context_switches(&days),
        heatmap: heatmap(&days),
        colleague_stats,
        all_colleagues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    mod config {
        use super::*;

        #[test]
        fn builder_methods() {
            let window = DateWindow::new(date(1, 1), date(6, 30)).unwrap();
            let config = PipelineConfig::new("me@corp.com")
                .with_salary(130_000.0)
                .with_exclude_recurring(true)
                .with_window(window);

            assert_eq!(config.viewer().as_str(), "me");
            assert_eq!(config.annual_salary, Some(130_000.0));
            assert!(config.exclude_recurring);
            assert_eq!(config.window, window);
            assert!((config.hourly_rate().unwrap() - 100.0).abs() < 1e-9);
        }

        #[test]
        fn defaults() {
            let config = PipelineConfig::new("me");
            assert_eq!(config.annual_salary, None);
            assert_eq!(config.hourly_rate(), None);
            assert!(!config.exclude_recurring);
            assert_eq!(config.window, DateWindow::current_year());
        }

        #[test]
        fn validate_rejects_bad_values() {
            assert_eq!(
                PipelineConfig::new("  ").validate(),
                Err(ConfigError::MissingViewer)
            );
            assert!(matches!(
                PipelineConfig::new("me").with_salary(-1.0).validate(),
                Err(ConfigError::InvalidSalary(_))
            ));
            assert!(matches!(
                PipelineConfig::new("me").with_salary(f64::NAN).validate(),
                Err(ConfigError::InvalidSalary(_))
            ));

            let mut inverted = PipelineConfig::new("me");
            inverted.window = DateWindow {
                start: date(6, 1),
                end: date(1, 1),
            };
            assert!(matches!(
                inverted.validate(),
                Err(ConfigError::InvertedWindow { .. })
            ));
        }

        #[test]
        fn validate_accepts_zero_salary() {
            assert_eq!(PipelineConfig::new("me").with_salary(0.0).validate(), Ok(()));
        }
    }

    #[test]
    fn empty_input_produces_empty_stats() {
        let config = PipelineConfig::new("me").with_salary(100_000.0);
        let stats = process_events(&[], &config);

        assert!(stats.is_empty());
        assert_eq!(stats.total_meeting_hours, 0.0);
        assert_eq!(stats.meeting_time_percentage, Some(0.0));
        assert_eq!(stats.total_meeting_cost, Some(0.0));
        assert_eq!(stats.total_attendee_cost, None);
        assert!(stats.top_colleagues.is_empty());
        assert!(stats.bestie.is_none());
        assert!(stats.most_expensive_meetings.is_empty());
        assert!(stats.colleague_time_distribution.is_empty());
        assert!(stats.busiest_days.is_empty());
        assert!(stats.freest_days.is_empty());
        assert!(stats.weekday_patterns.is_empty());
        assert!(stats.context_switches.is_empty());
        assert!(stats.heatmap.is_empty());
        assert!(stats.colleague_stats.is_empty());
        assert!(stats.all_colleagues.is_empty());
    }

    #[test]
    fn empty_totals_are_positive_zero() {
        let stats = process_events(&[], &PipelineConfig::new("me").with_salary(100_000.0));

        assert!(!stats.total_meeting_hours.is_sign_negative());
        assert!(stats.meeting_time_percentage.is_some_and(|p| !p.is_sign_negative()));
        assert!(stats.total_meeting_cost.is_some_and(|c| !c.is_sign_negative()));

        let json = serde_json::to_string(&stats).unwrap();
        assert!(!json.contains("-0.0"));
    }
}
