//! Text formatting for meeting statistics.
//!
//! Small helpers turn identities, costs, hours and percentages into display
//! strings; [`ReportFormatter`] assembles them into the terminal report.
//!
//! # Example
//!
//! ```rust
//! use meetingstats_core::format::{format_cost, format_hours, format_name};
//!
//! assert_eq!(format_name("john.doe"), "John Doe");
//! assert_eq!(format_cost(Some(1234.5)), "$1,234.50");
//! assert_eq!(format_hours(1.25), "1.3 hours");
//! ```

use std::borrow::Cow;

use chrono::{Datelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::daily::DayBucket;
use crate::pipeline::ProcessedStats;
use crate::ranking::TOP_COLLEAGUES_LIMIT;

const DEFAULT_MAX_TITLE_LENGTH: usize = 40;

/// Options for the terminal report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportOptions {
    /// Number of colleagues listed in the top colleagues section.
    pub top_colleagues: usize,
    /// Meeting titles longer than this are truncated.
    pub max_title_length: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            top_colleagues: TOP_COLLEAGUES_LIMIT,
            max_title_length: DEFAULT_MAX_TITLE_LENGTH,
        }
    }
}

/// Renders [`ProcessedStats`] as a plain-text report.
#[derive(Debug, Clone)]
pub struct ReportFormatter {
    options: ReportOptions,
}

impl ReportFormatter {
    /// Creates a new ReportFormatter with the given options.
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    /// Creates a new ReportFormatter with default options.
    pub fn with_defaults() -> Self {
        Self::new(ReportOptions::default())
    }

    /// Renders the full report.
    ///
    /// The overview is always present; other sections are skipped when they
    /// have nothing to show.
    pub fn render(&self, stats: &ProcessedStats) -> String {
        let mut sections = vec![self.overview(stats)];

        if stats.is_empty() {
            sections.push(vec!["No meetings found.".to_string()]);
            return join_sections(sections);
        }

        sections.extend(
            [
                self.top_colleagues(stats),
                self.bestie(stats),
                self.expensive_meetings(stats),
                self.days("Busiest days", &stats.busiest_days),
                self.days("Freest days", &stats.freest_days),
                self.weekday_patterns(stats),
                self.context_switches(stats),
            ]
            .into_iter()
            .filter(|section| !section.is_empty()),
        );

        join_sections(sections)
    }

    /// Renders the header and scalar totals.
    pub fn overview(&self, stats: &ProcessedStats) -> Vec<String> {
        vec![
            format!(
                "Meeting statistics for {} ({} to {})",
                stats.viewer, stats.window.start, stats.window.end
            ),
            String::new(),
            "Overview".to_string(),
            format!("  Meetings: {}", stats.meeting_count),
            format!(
                "  Meeting time: {} ({} of {:.0} working hours)",
                format_hours(stats.total_meeting_hours),
                format_percentage(stats.meeting_time_percentage),
                stats.total_working_hours
            ),
            format!("  Hourly rate: {}", format_cost(stats.hourly_rate)),
            format!("  Your meeting cost: {}", format_cost(stats.total_meeting_cost)),
            format!("  Attendee cost: {}", format_cost(stats.total_attendee_cost)),
        ]
    }

    /// Renders the top colleagues section.
    pub fn top_colleagues(&self, stats: &ProcessedStats) -> Vec<String> {
        section(
            "Top colleagues",
            stats
                .top_colleagues
                .iter()
                .take(self.options.top_colleagues)
                .enumerate()
                .map(|(i, c)| {
                    format!(
                        "{}. {}: {}, {}, {}",
                        i + 1,
                        format_name(c.identity.as_str()),
                        format_hours(c.total_hours),
                        count_noun(c.meeting_count, "meeting"),
                        format_cost(c.total_cost)
                    )
                }),
        )
    }

    /// Renders the bestie section.
    pub fn bestie(&self, stats: &ProcessedStats) -> Vec<String> {
        section(
            "Bestie",
            stats.bestie.iter().map(|b| {
                format!(
                    "{}: {} one-on-one ({}, {})",
                    format_name(b.identity.as_str()),
                    format_hours(b.one_on_one_hours),
                    count_noun(b.meeting_count, "meeting"),
                    format_cost(b.total_cost)
                )
            }),
        )
    }

    /// Renders the most expensive meetings section.
    pub fn expensive_meetings(&self, stats: &ProcessedStats) -> Vec<String> {
        section(
            "Most expensive meetings",
            stats
                .most_expensive_meetings
                .iter()
                .enumerate()
                .map(|(i, r)| {
                    format!(
                        "{}. {} ({}): {}, {}, {}",
                        i + 1,
                        ellipsis(r.summary(), self.options.max_title_length),
                        r.date(),
                        format_cost(r.total_cost),
                        format_hours(r.duration),
                        count_noun(r.attendee_count, "attendee")
                    )
                }),
        )
    }

    fn days(&self, title: &str, days: &[DayBucket]) -> Vec<String> {
        section(
            title,
            days.iter().map(|day| {
                format!(
                    "{} ({}): {}, {}",
                    day.date,
                    weekday_name(day.date.weekday()),
                    format_hours(day.total_hours),
                    count_noun(day.meeting_count(), "meeting")
                )
            }),
        )
    }

    /// Renders the weekday patterns section, Sunday first.
    pub fn weekday_patterns(&self, stats: &ProcessedStats) -> Vec<String> {
        section(
            "Weekday patterns",
            stats.weekday_patterns.iter().map(|p| {
                format!(
                    "{}: {} avg (median {}, min {}, max {}), {} over {}",
                    weekday_name(p.weekday()),
                    format_hours(p.average_hours),
                    one_decimal(p.median_hours),
                    one_decimal(p.min_hours),
                    one_decimal(p.max_hours),
                    count_noun(p.total_meetings, "meeting"),
                    count_noun(p.days_observed, "day")
                )
            }),
        )
    }

    /// Renders the context switches section.
    pub fn context_switches(&self, stats: &ProcessedStats) -> Vec<String> {
        let mut lines = section(
            "Context switches",
            stats.context_switches.iter().map(|s| {
                format!(
                    "{}: {} -> {} ({} min gap)",
                    s.date,
                    ellipsis(s.first_meeting.summary(), self.options.max_title_length),
                    ellipsis(s.second_meeting.summary(), self.options.max_title_length),
                    (s.time_between * 60.0).round() as i64
                )
            }),
        );
        if !lines.is_empty() {
            lines.push(format!("  Total: {}", stats.context_switches.len()));
        }
        lines
    }
}

fn section(title: &str, rows: impl Iterator<Item = String>) -> Vec<String> {
    let rows: Vec<String> = rows.map(|row| format!("  {row}")).collect();
    if rows.is_empty() {
        return rows;
    }
    std::iter::once(title.to_string()).chain(rows).collect()
}

fn join_sections(sections: Vec<Vec<String>>) -> String {
    sections
        .into_iter()
        .map(|lines| lines.join("\n"))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn count_noun(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Rounds half away from zero to one decimal.
fn one_decimal(value: f64) -> String {
    // Adding +0.0 turns a negative zero into a plain one.
    format!("{:.1}", (value * 10.0).round() / 10.0 + 0.0)
}

/// Returns the English name of a weekday.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Turns an identity like `first.last` into `First Last`.
pub fn format_name(identity: &str) -> String {
    identity
        .split('.')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Formats a cost in dollars with thousands separators; unknown is `-`.
pub fn format_cost(cost: Option<f64>) -> String {
    let Some(cost) = cost else {
        return "-".to_string();
    };

    let cents = (cost.abs() * 100.0).round() as u64;
    let digits = (cents / 100).to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if cost < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{:02}", cents % 100)
}

/// Formats hours with one decimal place.
pub fn format_hours(hours: f64) -> String {
    format!("{} hours", one_decimal(hours))
}

/// Formats a percentage with one decimal place; unknown is `n/a`.
pub fn format_percentage(percentage: Option<f64>) -> String {
    match percentage {
        Some(p) => format!("{}%", one_decimal(p)),
        None => "n/a".to_string(),
    }
}

/// Truncates a string with ellipsis if it exceeds the given length.
pub fn ellipsis(s: &str, max_len: usize) -> Cow<'_, str> {
    if max_len == 0 {
        return Cow::Borrowed("");
    }

    if s.chars().count() <= max_len {
        return Cow::Borrowed(s);
    }

    let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
    Cow::Owned(format!("{}...", truncated))
}
