//! iCalendar (RFC 5545) decoding into [`CalendarEvent`]s.
//!
//! Each `VEVENT` becomes one event placed on the display timezone's clock:
//!
//! - UTC instants are converted into the display timezone;
//! - `TZID` datetimes are resolved in their own zone, then converted;
//! - floating datetimes and all-day dates are read as display wall-clock time.
//!
//! Room and resource attendees are dropped, the rest are normalized into
//! identities.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use icalendar::{
    Calendar, CalendarComponent, CalendarDateTime, Component, DatePerhapsTime, Event, EventLike,
    Property,
};
use tracing::{debug, warn};

use meetingstats_core::{CalendarEvent, Identity, ResponseStatus};

use crate::error::{DecodeError, DecodeResult};
use crate::options::DecodeOptions;

const MAILTO: &str = "mailto:";

/// Decodes iCalendar text into events.
///
/// Events without a start are skipped; a missing end is taken to be the
/// start.
///
/// # Errors
///
/// Returns [`DecodeError::Parse`] if the text is not valid iCalendar data.
pub fn decode_calendar(ics: &str, options: &DecodeOptions) -> DecodeResult<Vec<CalendarEvent>> {
    let calendar = ics
        .parse::<Calendar>()
        .map_err(|e| DecodeError::Parse(e.to_string()))?;

    let events: Vec<CalendarEvent> = calendar
        .iter()
        .filter_map(|component| match component {
            CalendarComponent::Event(event) => decode_event(event, options),
            _ => None,
        })
        .collect();

    debug!(count = events.len(), timezone = %options.timezone, "Decoded calendar");
    Ok(events)
}

/// Decodes iCalendar text, logging a failure and returning no events.
pub fn decode_calendar_lossy(ics: &str, options: &DecodeOptions) -> Vec<CalendarEvent> {
    match decode_calendar(ics, options) {
        Ok(events) => events,
        Err(e) => {
            warn!(error = %e, "Failed to parse ICS content");
            Vec::new()
        }
    }
}

fn decode_event(event: &Event, options: &DecodeOptions) -> Option<CalendarEvent> {
    let Some(start) = event.get_start() else {
        debug!(summary = ?event.get_summary(), "Skipping event without DTSTART");
        return None;
    };
    let start = place(start, &options.timezone);
    let end = event
        .get_end()
        .map(|end| place(end, &options.timezone))
        .unwrap_or(start);

    let attendees = attendee_properties(event);
    let addresses: Vec<&str> = attendees
        .iter()
        .filter(|prop| !is_resource_type(prop))
        .map(|prop| strip_mailto(prop.value()))
        .filter(|address| !address.is_empty() && !options.is_resource_address(address))
        .collect();

    let status = response_status(&attendees, options.viewer.as_ref());
    let summary = event.get_summary().unwrap_or_default();

    debug!(
        summary,
        %start,
        %end,
        attendees = addresses.len(),
        status = status.as_str(),
        "Parsed event from ICS"
    );

    Some(
        CalendarEvent::new(summary, start, end)
            .with_attendees(addresses)
            .with_status(status),
    )
}

/// Returns every `ATTENDEE` property in file order.
fn attendee_properties(event: &Event) -> Vec<&Property> {
    event
        .multi_properties()
        .get("ATTENDEE")
        .into_iter()
        .flatten()
        .chain(event.properties().get("ATTENDEE"))
        .collect()
}

fn param<'a>(prop: &'a Property, name: &str) -> Option<&'a str> {
    prop.params()
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.value())
}

fn is_resource_type(prop: &Property) -> bool {
    param(prop, "CUTYPE").is_some_and(|cutype| {
        cutype.eq_ignore_ascii_case("RESOURCE") || cutype.eq_ignore_ascii_case("ROOM")
    })
}

/// Strips a leading `mailto:`, ignoring case.
pub fn strip_mailto(value: &str) -> &str {
    let value = value.trim();
    match value.get(..MAILTO.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(MAILTO) => &value[MAILTO.len()..],
        _ => value,
    }
}

/// Picks the event status from the attendees' `PARTSTAT`s.
///
/// The viewer's own response wins; without one, the last response seen on
/// any attendee is used.
fn response_status(attendees: &[&Property], viewer: Option<&Identity>) -> ResponseStatus {
    let mut last_seen = None;
    let mut own = None;

    for prop in attendees {
        let Some(partstat) = param(prop, "PARTSTAT") else {
            continue;
        };
        let status = ResponseStatus::from_partstat(partstat);
        if viewer.is_some_and(|v| *v == Identity::new(strip_mailto(prop.value()))) {
            own = Some(status);
        }
        last_seen = Some(status);
    }

    own.or(last_seen).unwrap_or_default()
}

/// Places an iCalendar date or datetime on the display timezone's clock.
fn place(value: DatePerhapsTime, display: &Tz) -> DateTime<FixedOffset> {
    match value {
        DatePerhapsTime::Date(date) => wall_clock(date.and_time(chrono::NaiveTime::MIN), display),
        DatePerhapsTime::DateTime(CalendarDateTime::Utc(utc)) => {
            utc.with_timezone(display).fixed_offset()
        }
        DatePerhapsTime::DateTime(CalendarDateTime::Floating(naive)) => wall_clock(naive, display),
        DatePerhapsTime::DateTime(CalendarDateTime::WithTimezone { date_time, tzid }) => {
            match tzid.trim_matches('"').parse::<Tz>() {
                Ok(zone) => wall_clock(date_time, &zone)
                    .with_timezone(display)
                    .fixed_offset(),
                Err(_) => {
                    debug!(%tzid, "Unknown TZID, reading as display wall-clock time");
                    wall_clock(date_time, display)
                }
            }
        }
    }
}

/// Reads a naive datetime as wall-clock time in `zone`.
///
/// A time skipped by a DST change is read as UTC instead.
fn wall_clock(naive: NaiveDateTime, zone: &Tz) -> DateTime<FixedOffset> {
    zone.from_local_datetime(&naive)
        .earliest()
        .unwrap_or_else(|| zone.from_utc_datetime(&naive))
        .fixed_offset()
}
