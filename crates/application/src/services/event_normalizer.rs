//! Event normalizer
//!
//! Three pure steps applied to the merged feed output:
//! 1. day filter: keep events whose start falls on today's date in the
//!    configured zone, attaching wall-clock renderings;
//! 2. dedupe: keep the first occurrence of each `(title, start, end)`;
//! 3. group: partition by title, preserving insertion order.

use std::{collections::HashSet, time::Duration};

use chrono::{DateTime, Utc};
use domain::{EventGroup, LocalizedEvent, RawEvent, Timezone};

use crate::error::ApplicationError;

/// Drop repeated `(title, start, end)` keys, keeping the first occurrence
///
/// Order-preserving: the output is a subsequence of the input.
#[must_use]
pub fn dedupe(events: Vec<LocalizedEvent>) -> Vec<LocalizedEvent> {
    let mut seen = HashSet::with_capacity(events.len());
    events
        .into_iter()
        .filter(|event| seen.insert(event.key()))
        .collect()
}

/// Partition events by title
#[must_use]
pub fn group(events: Vec<LocalizedEvent>) -> EventGroup {
    events.into_iter().collect()
}

/// Today-in-a-fixed-zone view of a merged event list
#[derive(Debug, Clone, Copy)]
pub struct EventNormalizer {
    timezone: Timezone,
}

impl EventNormalizer {
    #[must_use]
    pub const fn new(timezone: Timezone) -> Self {
        Self { timezone }
    }

    #[must_use]
    pub const fn timezone(&self) -> Timezone {
        self.timezone
    }

    /// Whether `start` lies on the same local calendar day as `now`
    #[must_use]
    pub fn is_today(&self, start: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        let day_start = self.timezone.start_of_day(self.timezone.local_date(now));
        start >= day_start && self.timezone.local_date(start) == self.timezone.local_date(now)
    }

    /// Keep today's events and render their local times
    #[must_use]
    pub fn filter_today(&self, events: Vec<RawEvent>, now: DateTime<Utc>) -> Vec<LocalizedEvent> {
        events
            .into_iter()
            .filter(|event| self.is_today(event.start, now))
            .map(|event| LocalizedEvent::localize(event, &self.timezone))
            .collect()
    }

    /// Day filter, then dedupe, then group
    #[must_use]
    pub fn normalize(&self, events: Vec<RawEvent>, now: DateTime<Utc>) -> EventGroup {
        group(dedupe(self.filter_today(events, now)))
    }

    /// Time-to-live that makes a value published at `now` expire at local midnight
    pub fn ttl_until_midnight(&self, now: DateTime<Utc>) -> Result<Duration, ApplicationError> {
        Ok(self.timezone.until_next_midnight(now)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn nairobi() -> EventNormalizer {
        EventNormalizer::new(Timezone::parse("Africa/Nairobi").unwrap())
    }

    /// 12:00 local on 2025-03-10 in Nairobi
    fn noon() -> DateTime<Utc> {
        utc("2025-03-10T09:00:00Z")
    }

    fn raw(title: &str, start: &str, end: &str) -> RawEvent {
        RawEvent::new(title, utc(start), utc(end))
    }

    #[test]
    fn keeps_events_starting_today_in_zone() {
        let events = vec![
            // 00:30 local today
            raw("Early", "2025-03-09T21:30:00Z", "2025-03-09T22:00:00Z"),
            // 23:59 local yesterday
            raw("Late yesterday", "2025-03-09T20:59:00Z", "2025-03-09T21:30:00Z"),
            // 00:00 local tomorrow
            raw("Tomorrow", "2025-03-10T21:00:00Z", "2025-03-10T22:00:00Z"),
        ];

        let today = nairobi().filter_today(events, noon());

        assert_eq!(today.len(), 1);
        assert_eq!(today[0].title(), "Early");
        assert_eq!(today[0].local_start(), "2025-03-10 00:30:00");
    }

    #[test]
    fn event_spanning_into_today_is_excluded() {
        // Starts yesterday, ends today: selection is by start only
        let events = vec![raw(
            "Overnight",
            "2025-03-09T18:00:00Z",
            "2025-03-10T03:00:00Z",
        )];
        assert!(nairobi().filter_today(events, noon()).is_empty());
    }

    #[test]
    fn dedupe_keeps_first_occurrence() {
        let tz = Timezone::default();
        let first = LocalizedEvent::localize(
            raw("Standup", "2025-03-10T06:00:00Z", "2025-03-10T06:30:00Z"),
            &tz,
        );
        let other = LocalizedEvent::localize(
            raw("Standup", "2025-03-10T07:00:00Z", "2025-03-10T07:30:00Z"),
            &tz,
        );

        let result = dedupe(vec![first.clone(), other.clone(), first.clone()]);

        assert_eq!(result, vec![first, other]);
    }

    #[test]
    fn empty_input_yields_empty_group() {
        let grouped = nairobi().normalize(Vec::new(), noon());
        assert!(grouped.is_empty());
    }

    #[test]
    fn same_title_different_times_share_group() {
        let events = vec![
            raw("Focus", "2025-03-10T05:00:00Z", "2025-03-10T06:00:00Z"),
            raw("Focus", "2025-03-10T12:00:00Z", "2025-03-10T13:00:00Z"),
        ];

        let grouped = nairobi().normalize(events, noon());

        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped.get("Focus").unwrap().len(), 2);
    }

    #[test]
    fn two_feed_scenario() {
        // Feed A: Standup today 09:00-09:30 local, and an event yesterday
        let feed_a = vec![
            raw("Standup", "2025-03-10T06:00:00Z", "2025-03-10T06:30:00Z"),
            raw("Retro", "2025-03-09T10:00:00Z", "2025-03-09T11:00:00Z"),
        ];
        // Feed B: duplicate Standup plus Review 14:00-15:00 local
        let feed_b = vec![
            raw("Standup", "2025-03-10T06:00:00Z", "2025-03-10T06:30:00Z"),
            raw("Review", "2025-03-10T11:00:00Z", "2025-03-10T12:00:00Z"),
        ];
        let merged: Vec<RawEvent> = feed_a.into_iter().chain(feed_b).collect();

        let grouped = nairobi().normalize(merged, noon());

        let titles: Vec<&str> = grouped.titles().collect();
        assert_eq!(titles, ["Standup", "Review"]);
        assert_eq!(grouped.get("Standup").unwrap().len(), 1);
        assert_eq!(grouped.get("Review").unwrap().len(), 1);
        assert_eq!(
            grouped.get("Review").unwrap()[0].local_start(),
            "2025-03-10 14:00:00"
        );
        assert!(grouped.get("Retro").is_none());
    }

    #[test]
    fn ttl_runs_to_local_midnight() {
        // noon local leaves twelve hours
        let ttl = nairobi().ttl_until_midnight(noon()).unwrap();
        assert_eq!(ttl, Duration::from_secs(12 * 3600));
    }
}
