//! Event acceptance rules.
//!
//! An event is analyzed only if it is a real meeting the viewer attended
//! during working hours inside the date window. [`EventFilter::check`] reports
//! the first rule an event breaks, [`EventFilter::accepts`] is the boolean form.

use std::fmt;
use std::sync::LazyLock;

use chrono::Timelike;
use regex::Regex;

use crate::event::CalendarEvent;
use crate::identity::Identity;
use crate::window::DateWindow;

/// First hour of the working day (inclusive).
pub const WORKDAY_START_HOUR: u32 = 8;
/// Last hour of the working day (exclusive).
pub const WORKDAY_END_HOUR: u32 = 18;

/// Title keywords marking a recurring meeting, matched after hyphens are removed.
static RECURRING_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"weekly|daily|recurring|biweekly|monthly|retro").expect("Invalid recurring regex")
});

/// Why an event was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// The start day lies outside the date window.
    OutsideWindow,
    /// The local start hour is outside working hours.
    OutsideWorkingHours,
    /// The viewer is alone (or nobody is) in the event.
    TooFewAttendees,
    /// The viewer is not an attendee.
    ViewerNotInvited,
    /// The viewer declined.
    Declined,
    /// The event looks recurring and recurring meetings are excluded.
    Recurring,
}

impl Rejection {
    /// Returns a short machine-friendly name for this reason.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OutsideWindow => "outside_window",
            Self::OutsideWorkingHours => "outside_working_hours",
            Self::TooFewAttendees => "too_few_attendees",
            Self::ViewerNotInvited => "viewer_not_invited",
            Self::Declined => "declined",
            Self::Recurring => "recurring",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns true if `hour` (0-23) falls inside working hours.
pub fn is_working_hour(hour: u32) -> bool {
    (WORKDAY_START_HOUR..WORKDAY_END_HOUR).contains(&hour)
}

/// Returns true if a title looks like a recurring meeting.
///
/// The check is case-insensitive and ignores hyphens, so "Bi-Weekly Sync" and
/// "Sprint re-tro" both match.
pub fn is_recurring_meeting(summary: &str) -> bool {
    let cleaned = summary.to_lowercase().replace('-', "");
    RECURRING_REGEX.is_match(&cleaned)
}

/// Acceptance rules bound to one viewer and one set of options.
#[derive(Debug, Clone, Copy)]
pub struct EventFilter<'a> {
    viewer: &'a Identity,
    window: DateWindow,
    exclude_recurring: bool,
}

impl<'a> EventFilter<'a> {
    /// Creates a filter for the given viewer and window.
    pub fn new(viewer: &'a Identity, window: DateWindow, exclude_recurring: bool) -> Self {
        Self {
            viewer,
            window,
            exclude_recurring,
        }
    }

    /// Checks an event against every rule.
    ///
    /// # Errors
    ///
    /// Returns the first [`Rejection`] the event triggers.
    pub fn check(&self, event: &CalendarEvent) -> Result<(), Rejection> {
        if !self.window.contains(event.start_date()) {
            return Err(Rejection::OutsideWindow);
        }

        if !is_working_hour(event.start.hour()) {
            return Err(Rejection::OutsideWorkingHours);
        }

        if event.attendee_count() <= 1 {
            return Err(Rejection::TooFewAttendees);
        }

        if !event.has_attendee(self.viewer) {
            return Err(Rejection::ViewerNotInvited);
        }

        if event.status.is_declined() {
            return Err(Rejection::Declined);
        }

        if self.exclude_recurring && is_recurring_meeting(&event.summary) {
            return Err(Rejection::Recurring);
        }

        Ok(())
    }

    /// Returns true if the event passes every rule.
    pub fn accepts(&self, event: &CalendarEvent) -> bool {
        self.check(event).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::ResponseStatus;
    use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};

    fn at(m: u32, d: u32, h: u32, min: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2025, m, d, h, min, 0)
            .unwrap()
    }

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    fn year() -> DateWindow {
        DateWindow::calendar_year(2025)
    }

    fn meeting(summary: &str, start: DateTime<FixedOffset>) -> CalendarEvent {
        CalendarEvent::new(summary, start, start + chrono::Duration::hours(1))
            .with_attendees(["me@corp.com", "alice.smith@corp.com"])
            .with_status(ResponseStatus::Accepted)
    }

    mod helpers {
        use super::*;

        #[test]
        fn working_hours_are_half_open() {
            assert!(!is_working_hour(7));
            assert!(is_working_hour(8));
            assert!(is_working_hour(17));
            assert!(!is_working_hour(18));
            assert!(!is_working_hour(23));
        }

        #[test]
        fn recurring_keywords() {
            assert!(is_recurring_meeting("Weekly sync"));
            assert!(is_recurring_meeting("DAILY standup"));
            assert!(is_recurring_meeting("Monthly review"));
            assert!(is_recurring_meeting("Sprint Retro"));
            assert!(is_recurring_meeting("Recurring check-in"));
            assert!(!is_recurring_meeting("Design review"));
            assert!(!is_recurring_meeting(""));
        }

        #[test]
        fn recurring_ignores_every_hyphen() {
            assert!(is_recurring_meeting("Bi-Weekly planning"));
            assert!(is_recurring_meeting("x-y re-tro"));
            assert!(is_recurring_meeting("Da-i-ly"));
        }
    }

    mod rules {
        use super::*;

        #[test]
        fn accepts_valid_meeting() {
            let viewer = Identity::new("me@corp.com");
            let filter = EventFilter::new(&viewer, year(), false);
            assert_eq!(filter.check(&meeting("Design review", at(3, 4, 9, 0))), Ok(()));
        }

        #[test]
        fn window_is_inclusive_on_both_ends() {
            let viewer = Identity::new("me");
            let window = DateWindow::new(date(3, 4), date(3, 6)).unwrap();
            let filter = EventFilter::new(&viewer, window, false);

            assert!(filter.accepts(&meeting("a", at(3, 4, 8, 0))));
            assert!(filter.accepts(&meeting("b", at(3, 6, 17, 59))));
            assert_eq!(
                filter.check(&meeting("c", at(3, 3, 10, 0))),
                Err(Rejection::OutsideWindow)
            );
            assert_eq!(
                filter.check(&meeting("d", at(3, 7, 10, 0))),
                Err(Rejection::OutsideWindow)
            );
        }

        #[test]
        fn rejects_outside_working_hours() {
            let viewer = Identity::new("me");
            let filter = EventFilter::new(&viewer, year(), false);
            assert_eq!(
                filter.check(&meeting("Late", at(3, 4, 19, 0))),
                Err(Rejection::OutsideWorkingHours)
            );
            assert_eq!(
                filter.check(&meeting("Early", at(3, 4, 7, 59))),
                Err(Rejection::OutsideWorkingHours)
            );
            assert_eq!(
                filter.check(&meeting("Edge", at(3, 4, 18, 0))),
                Err(Rejection::OutsideWorkingHours)
            );
        }

        #[test]
        fn working_hour_uses_event_offset() {
            let viewer = Identity::new("me");
            let filter = EventFilter::new(&viewer, year(), false);
            // 07:30 UTC is 09:30 at +02:00
            let start = chrono::Utc
                .with_ymd_and_hms(2025, 3, 4, 7, 30, 0)
                .unwrap()
                .with_timezone(&FixedOffset::east_opt(7200).unwrap());
            assert!(filter.accepts(&meeting("Morning", start)));
        }

        #[test]
        fn rejects_solo_events() {
            let viewer = Identity::new("me");
            let filter = EventFilter::new(&viewer, year(), false);
            let solo = CalendarEvent::new("Focus", at(3, 4, 9, 0), at(3, 4, 10, 0))
                .with_attendee("me@corp.com");
            assert_eq!(filter.check(&solo), Err(Rejection::TooFewAttendees));
        }

        #[test]
        fn rejects_events_without_viewer() {
            let viewer = Identity::new("me");
            let filter = EventFilter::new(&viewer, year(), false);
            let other = CalendarEvent::new("Not mine", at(3, 4, 9, 0), at(3, 4, 10, 0))
                .with_attendees(["alice.smith", "bob"]);
            assert_eq!(filter.check(&other), Err(Rejection::ViewerNotInvited));
        }

        #[test]
        fn rejects_declined_only() {
            let viewer = Identity::new("me");
            let filter = EventFilter::new(&viewer, year(), false);
            let base = meeting("Sync", at(3, 4, 9, 0));

            assert_eq!(
                filter.check(&base.clone().with_status(ResponseStatus::Declined)),
                Err(Rejection::Declined)
            );
            for status in [
                ResponseStatus::Tentative,
                ResponseStatus::NeedsAction,
                ResponseStatus::Unknown,
            ] {
                assert!(filter.accepts(&base.clone().with_status(status)));
            }
        }

        #[test]
        fn recurring_rule_only_applies_when_enabled() {
            let viewer = Identity::new("me");
            let weekly = meeting("Weekly sync", at(3, 4, 9, 0));

            assert!(EventFilter::new(&viewer, year(), false).accepts(&weekly));
            assert_eq!(
                EventFilter::new(&viewer, year(), true).check(&weekly),
                Err(Rejection::Recurring)
            );
        }

        #[test]
        fn widening_window_never_drops_events() {
            let viewer = Identity::new("me");
            let narrow = DateWindow::new(date(3, 10), date(3, 20)).unwrap();
            let wide = narrow.union(&DateWindow::new(date(2, 1), date(4, 30)).unwrap());

            let events: Vec<_> = (1..=31)
                .map(|d| meeting("Sync", at(3, d, 9 + d % 10, 0)))
                .collect();

            let narrow_filter = EventFilter::new(&viewer, narrow, false);
            let wide_filter = EventFilter::new(&viewer, wide, false);
            for event in events.iter().filter(|e| narrow_filter.accepts(e)) {
                assert!(wide_filter.accepts(event));
            }
        }
    }
}
