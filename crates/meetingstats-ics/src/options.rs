//! Decoder options.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use meetingstats_core::Identity;

use crate::error::{DecodeError, DecodeResult};

/// Address fragments that mark an attendee as a room or shared resource.
pub const DEFAULT_RESOURCE_MARKERS: &[&str] = &["resource.calendar.google", "team", "ovrsalle"];

/// Options controlling how a calendar is decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodeOptions {
    /// Zone used to place events on the local clock.
    pub timezone: Tz,
    /// Attendees whose address contains one of these are dropped.
    pub resource_markers: Vec<String>,
    /// When set, the event status is this attendee's response.
    pub viewer: Option<Identity>,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            timezone: Tz::UTC,
            resource_markers: DEFAULT_RESOURCE_MARKERS
                .iter()
                .map(|m| m.to_string())
                .collect(),
            viewer: None,
        }
    }
}

impl DecodeOptions {
    /// Builder method to set the display timezone.
    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    /// Builder method to set the display timezone from an IANA name.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::UnknownTimezone`] for an unknown name.
    pub fn with_timezone_name(self, name: &str) -> DecodeResult<Self> {
        let timezone = parse_timezone(name)?;
        Ok(self.with_timezone(timezone))
    }

    /// Builder method to replace the resource markers.
    pub fn with_resource_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.resource_markers = markers.into_iter().map(Into::into).collect();
        self
    }

    /// Builder method to set the viewer whose response becomes the status.
    pub fn with_viewer(mut self, viewer: impl AsRef<str>) -> Self {
        self.viewer = Some(Identity::new(viewer));
        self
    }

    /// Returns true if the address belongs to a room or shared resource.
    pub fn is_resource_address(&self, address: &str) -> bool {
        let address = address.to_lowercase();
        self.resource_markers
            .iter()
            .filter(|m| !m.is_empty())
            .any(|m| address.contains(&m.to_lowercase()))
    }
}

/// Parses an IANA timezone name.
///
/// # Errors
///
/// Returns [`DecodeError::UnknownTimezone`] for an unknown name.
pub fn parse_timezone(name: &str) -> DecodeResult<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| DecodeError::UnknownTimezone(name.to_string()))
}
