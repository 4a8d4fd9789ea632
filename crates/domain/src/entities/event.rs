//! Calendar event entities
//!
//! A `RawEvent` is what a feed yields; a `LocalizedEvent` is the same event
//! with its times rendered on the wall clock of the configured zone.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Timezone;

/// An event as decoded from a calendar feed
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawEvent {
    /// Event title (iCalendar SUMMARY)
    pub title: String,
    /// Start instant
    pub start: DateTime<Utc>,
    /// End instant
    pub end: DateTime<Utc>,
}

impl RawEvent {
    /// Create a new raw event
    pub fn new(title: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            start,
            end,
        }
    }

    /// Identity used for deduplication
    #[must_use]
    pub fn key(&self) -> EventKey {
        EventKey {
            title: self.title.clone(),
            start: self.start,
            end: self.end,
        }
    }
}

/// Deduplication identity: `(title, start, end)`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventKey {
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{} - {}]",
            self.title,
            self.start.to_rfc3339(),
            self.end.to_rfc3339()
        )
    }
}

/// A raw event with its start and end rendered in a fixed timezone
///
/// Serialises flat: `{"title", "start", "end", "local_start", "local_end"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedEvent {
    #[serde(flatten)]
    event: RawEvent,
    local_start: String,
    local_end: String,
}

impl LocalizedEvent {
    /// Attach wall-clock renderings of `event` in `tz`
    #[must_use]
    pub fn localize(event: RawEvent, tz: &Timezone) -> Self {
        let local_start = tz.format_local(event.start);
        let local_end = tz.format_local(event.end);
        Self {
            event,
            local_start,
            local_end,
        }
    }

    /// The underlying feed event
    #[must_use]
    pub const fn event(&self) -> &RawEvent {
        &self.event
    }

    /// Give back the underlying feed event
    #[must_use]
    pub fn into_event(self) -> RawEvent {
        self.event
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.event.title
    }

    #[must_use]
    pub fn local_start(&self) -> &str {
        &self.local_start
    }

    #[must_use]
    pub fn local_end(&self) -> &str {
        &self.local_end
    }

    /// Identity used for deduplication
    #[must_use]
    pub fn key(&self) -> EventKey {
        self.event.key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn standup() -> RawEvent {
        RawEvent::new(
            "Standup",
            utc("2025-03-10T06:00:00Z"),
            utc("2025-03-10T06:30:00Z"),
        )
    }

    #[test]
    fn key_matches_for_identical_events() {
        assert_eq!(standup().key(), standup().key());
    }

    #[test]
    fn key_differs_when_end_differs() {
        let mut longer = standup();
        longer.end = utc("2025-03-10T07:00:00Z");
        assert_ne!(standup().key(), longer.key());
    }

    #[test]
    fn key_display_is_readable() {
        let key = standup().key();
        assert_eq!(
            key.to_string(),
            "Standup [2025-03-10T06:00:00+00:00 - 2025-03-10T06:30:00+00:00]"
        );
    }

    #[test]
    fn localize_renders_wall_clock() {
        let tz = Timezone::parse("Africa/Nairobi").unwrap();
        let event = LocalizedEvent::localize(standup(), &tz);
        assert_eq!(event.local_start(), "2025-03-10 09:00:00");
        assert_eq!(event.local_end(), "2025-03-10 09:30:00");
        assert_eq!(event.title(), "Standup");
        assert_eq!(event.key(), standup().key());
    }

    #[test]
    fn localized_serializes_flat() {
        let tz = Timezone::parse("Africa/Nairobi").unwrap();
        let event = LocalizedEvent::localize(standup(), &tz);
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["title"], "Standup");
        assert_eq!(json["start"], "2025-03-10T06:00:00Z");
        assert_eq!(json["end"], "2025-03-10T06:30:00Z");
        assert_eq!(json["local_start"], "2025-03-10 09:00:00");
        assert_eq!(json["local_end"], "2025-03-10 09:30:00");
    }

    #[test]
    fn into_event_returns_original() {
        let tz = Timezone::default();
        let event = LocalizedEvent::localize(standup(), &tz);
        assert_eq!(event.into_event(), standup());
    }
}
