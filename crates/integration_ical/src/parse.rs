//! iCalendar payload decoding
//!
//! Turns the body of a `.ics` feed into a flat list of [`FeedEvent`]s with
//! absolute start and end instants.

use chrono::{DateTime, Days, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use domain::Timezone;
use icalendar::parser::{self, Component, Property};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::FeedError;

/// Title used when a `VEVENT` carries no `SUMMARY`
pub const UNTITLED_EVENT: &str = "(No title)";

/// One `VEVENT` with its times resolved to UTC
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEvent {
    pub uid: Option<String>,
    pub summary: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// `DTSTART` was a `VALUE=DATE`
    pub all_day: bool,
}

/// A decoded `DTSTART`/`DTEND` value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IcalTime {
    Date(NaiveDate),
    Instant(DateTime<Utc>),
}

/// Decode every occurring `VEVENT` of a feed body
///
/// Floating date-times, all-day dates and unknown `TZID`s are read on the
/// wall clock of `floating_zone`.
pub fn parse_feed(ics: &str, floating_zone: Timezone) -> Result<Vec<FeedEvent>, FeedError> {
    let body = ics.trim_start_matches('\u{feff}').trim_start();
    if !body.starts_with("BEGIN:VCALENDAR") {
        return Err(FeedError::Parse("payload is not an iCalendar document".into()));
    }

    let unfolded = parser::unfold(body);
    let calendar = parser::read_calendar(&unfolded)
        .map_err(|e| FeedError::Parse(format!("iCalendar parse error: {e}")))?;

    let events = calendar
        .components
        .iter()
        .filter(|component| component.name == "VEVENT")
        .filter_map(|component| parse_event(component, floating_zone))
        .collect();

    Ok(events)
}

fn parse_event(vevent: &Component<'_>, zone: Timezone) -> Option<FeedEvent> {
    let uid = find_prop(vevent, "UID").map(|p| p.val.to_string());

    let cancelled = find_prop(vevent, "STATUS")
        .is_some_and(|p| p.val.to_string().eq_ignore_ascii_case("CANCELLED"));
    if cancelled {
        debug!(uid = ?uid, "Skipping cancelled event");
        return None;
    }

    let Some(start) = find_prop(vevent, "DTSTART").and_then(|p| parse_time(p, zone)) else {
        debug!(uid = ?uid, "Skipping event without a usable DTSTART");
        return None;
    };

    // TEXT values come back from the parser already unescaped
    let summary = find_prop(vevent, "SUMMARY")
        .map(|p| p.val.to_string())
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| UNTITLED_EVENT.to_string());

    let end = find_prop(vevent, "DTEND").and_then(|p| parse_time(p, zone));

    let (start_instant, end_instant, all_day) = match (start, end) {
        (IcalTime::Date(date), end) => {
            let start_instant = zone.start_of_day(date);
            let end_instant = match end {
                Some(end) => resolve(end, zone),
                None => date
                    .checked_add_days(Days::new(1))
                    .map_or(start_instant, |next| zone.start_of_day(next)),
            };
            (start_instant, end_instant, true)
        },
        (IcalTime::Instant(start), end) => (start, end.map_or(start, |e| resolve(e, zone)), false),
    };

    Some(FeedEvent {
        uid,
        summary,
        start: start_instant,
        end: end_instant,
        all_day,
    })
}

fn resolve(time: IcalTime, zone: Timezone) -> DateTime<Utc> {
    match time {
        IcalTime::Date(date) => zone.start_of_day(date),
        IcalTime::Instant(instant) => instant,
    }
}

fn find_prop<'a, 'c>(component: &'a Component<'c>, name: &str) -> Option<&'a Property<'c>> {
    component.properties.iter().find(|p| p.name == name)
}

fn param(prop: &Property<'_>, key: &str) -> Option<String> {
    prop.params
        .iter()
        .find(|p| p.key == key)
        .and_then(|p| p.val.as_ref().map(|v| v.to_string().trim_matches('"').to_string()))
}

fn parse_time(prop: &Property<'_>, zone: Timezone) -> Option<IcalTime> {
    let raw = prop.val.to_string();
    let value = raw.trim();
    let is_date = param(prop, "VALUE").is_some_and(|v| v.eq_ignore_ascii_case("DATE"))
        || value.len() == 8;

    if is_date {
        return NaiveDate::parse_from_str(value, "%Y%m%d").ok().map(IcalTime::Date);
    }

    if let Some(utc) = value.strip_suffix('Z') {
        let naive = NaiveDateTime::parse_from_str(utc, "%Y%m%dT%H%M%S").ok()?;
        return Some(IcalTime::Instant(Utc.from_utc_datetime(&naive)));
    }

    let naive = NaiveDateTime::parse_from_str(value, "%Y%m%dT%H%M%S").ok()?;
    let tz = param(prop, "TZID")
        .and_then(|tzid| tzid.parse::<Tz>().ok())
        .unwrap_or_else(|| zone.tz());
    Some(IcalTime::Instant(local_to_utc(tz, naive)))
}

/// Place a wall-clock time in `tz`, taking the earlier reading of a repeated
/// hour and skipping forward over a DST gap
fn local_to_utc(tz: Tz, naive: NaiveDateTime) -> DateTime<Utc> {
    (0..=180)
        .find_map(|minutes| {
            tz.from_local_datetime(&(naive + Duration::minutes(minutes)))
                .earliest()
        })
        .map_or_else(|| naive.and_utc(), |dt| dt.with_timezone(&Utc))
}
