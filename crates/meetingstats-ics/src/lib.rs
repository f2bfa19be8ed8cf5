//! iCalendar decoding for meetingstats
//!
//! Turns an `.ics` export into [`meetingstats_core::CalendarEvent`]s: room and
//! resource attendees are dropped, addresses are normalized into identities and
//! times are placed on the display timezone's clock.

pub mod decode;
pub mod error;
pub mod options;

pub use decode::{decode_calendar, decode_calendar_lossy, strip_mailto};
pub use error::{DecodeError, DecodeResult};
pub use options::{DEFAULT_RESOURCE_MARKERS, DecodeOptions, parse_timezone};
