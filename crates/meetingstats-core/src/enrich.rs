//! Duration and cost derivation for accepted events.
//!
//! The hourly rate is a fixed policy, not an accounting figure: a nominal
//! working year of 10-hour days, 5 days a week, 52 weeks, with meeting time
//! valued at twice the salary it displaces.

use crate::event::{CalendarEvent, EventRecord};

/// Nominal hours in a working day.
pub const NOMINAL_HOURS_PER_DAY: f64 = 10.0;
/// Nominal working days in a week.
pub const NOMINAL_DAYS_PER_WEEK: f64 = 5.0;
/// Weeks in a year.
pub const WEEKS_PER_YEAR: f64 = 52.0;
/// Multiplier applied to salary when valuing meeting time.
pub const MEETING_COST_MULTIPLIER: f64 = 2.0;

/// Total nominal working hours in a year (2600).
pub const NOMINAL_WORKING_HOURS: f64 = NOMINAL_HOURS_PER_DAY * NOMINAL_DAYS_PER_WEEK * WEEKS_PER_YEAR;

/// Derives the hourly meeting rate from an annual salary.
///
/// `(2 × salary) / (10 × 5 × 52)`, so a salary of 130 000 gives 100 per hour.
pub fn hourly_rate(annual_salary: f64) -> f64 {
    (MEETING_COST_MULTIPLIER * annual_salary) / NOMINAL_WORKING_HOURS
}

/// Computes the cost of a meeting across all attendees.
pub fn event_cost(duration: f64, attendee_count: usize, hourly_rate: f64) -> f64 {
    duration * hourly_rate * attendee_count as f64
}

/// Builds an [`EventRecord`] from an accepted event.
///
/// With no rate, the cost stays unknown rather than zero.
pub fn enrich(event: &CalendarEvent, hourly_rate: Option<f64>) -> EventRecord {
    let duration = event.duration_hours();
    let attendee_count = event.attendee_count();
    let total_cost = hourly_rate.map(|rate| event_cost(duration, attendee_count, rate));

    EventRecord {
        event: event.clone(),
        duration,
        attendee_count,
        total_cost,
    }
}
