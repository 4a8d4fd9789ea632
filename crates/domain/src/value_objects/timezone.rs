//! Timezone value object
//!
//! The single fixed zone used for every "today" and wall-clock computation,
//! independent of server or client locale.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Days, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::DomainError;

/// Wall-clock rendering used for localized event times
pub const LOCAL_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Longest DST jump we search across when local midnight does not exist
const MAX_MIDNIGHT_GAP_MINUTES: i64 = 180;

/// A validated IANA timezone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timezone(Tz);

impl Timezone {
    /// Parse an IANA timezone identifier (e.g. `Africa/Nairobi`)
    pub fn parse(name: &str) -> Result<Self, DomainError> {
        name.trim()
            .parse::<Tz>()
            .map(Self)
            .map_err(|_| DomainError::InvalidTimezone(name.to_string()))
    }

    /// The underlying chrono-tz zone
    #[must_use]
    pub const fn tz(&self) -> Tz {
        self.0
    }

    /// IANA name of the zone
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    /// Calendar date of `instant` as seen on a wall clock in this zone
    #[must_use]
    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.0).date_naive()
    }

    /// Render `instant` as local wall-clock time (`yyyy-MM-dd HH:mm:ss`)
    #[must_use]
    pub fn format_local(&self, instant: DateTime<Utc>) -> String {
        instant
            .with_timezone(&self.0)
            .format(LOCAL_TIME_FORMAT)
            .to_string()
    }

    /// First instant of `date` in this zone
    ///
    /// When a DST transition skips local midnight, the day starts at the first
    /// wall-clock minute that exists.
    #[must_use]
    pub fn start_of_day(&self, date: NaiveDate) -> DateTime<Utc> {
        let midnight = date.and_time(NaiveTime::MIN);
        match self.0.from_local_datetime(&midnight) {
            LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.with_timezone(&Utc),
            LocalResult::None => (1..=MAX_MIDNIGHT_GAP_MINUTES)
                .find_map(|minutes| {
                    self.0
                        .from_local_datetime(&(midnight + Duration::minutes(minutes)))
                        .earliest()
                })
                .map_or_else(|| midnight.and_utc(), |dt| dt.with_timezone(&Utc)),
        }
    }

    /// The next local midnight strictly after `now`
    pub fn next_midnight(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>, DomainError> {
        let today = self.local_date(now);
        let tomorrow = today.checked_add_days(Days::new(1)).ok_or_else(|| {
            DomainError::InvalidDateTime(format!("no calendar day after {today}"))
        })?;
        Ok(self.start_of_day(tomorrow))
    }

    /// Time left until the next local midnight, never negative
    pub fn until_next_midnight(
        &self,
        now: DateTime<Utc>,
    ) -> Result<std::time::Duration, DomainError> {
        let remaining = self.next_midnight(now)? - now;
        Ok(remaining.to_std().unwrap_or_default())
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self(Tz::UTC)
    }
}

impl fmt::Display for Timezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Timezone {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Tz> for Timezone {
    fn from(tz: Tz) -> Self {
        Self(tz)
    }
}

impl Serialize for Timezone {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Timezone {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Self::parse(&name).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn parses_known_zone() {
        let tz = Timezone::parse("Africa/Nairobi").unwrap();
        assert_eq!(tz.name(), "Africa/Nairobi");
    }

    #[test]
    fn rejects_unknown_zone() {
        let err = Timezone::parse("Mars/Olympus_Mons").unwrap_err();
        assert!(matches!(err, DomainError::InvalidTimezone(_)));
    }

    #[test]
    fn default_is_utc() {
        assert_eq!(Timezone::default().name(), "UTC");
    }

    #[test]
    fn local_date_crosses_day_boundary() {
        // 22:30 UTC is 01:30 the next day in Nairobi (UTC+3)
        let tz = Timezone::parse("Africa/Nairobi").unwrap();
        let date = tz.local_date(utc("2025-03-10T22:30:00Z"));
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 3, 11).unwrap());
    }

    #[test]
    fn format_local_uses_wall_clock() {
        let tz = Timezone::parse("Africa/Nairobi").unwrap();
        assert_eq!(
            tz.format_local(utc("2025-03-10T06:00:00Z")),
            "2025-03-10 09:00:00"
        );
    }

    #[test]
    fn start_of_day_in_zone() {
        let tz = Timezone::parse("Africa/Nairobi").unwrap();
        let start = tz.start_of_day(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
        assert_eq!(start, utc("2025-03-09T21:00:00Z"));
    }

    #[test]
    fn start_of_day_when_midnight_is_skipped() {
        // Santiago springs forward at local midnight in September
        let tz = Timezone::parse("America/Santiago").unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 9, 8).unwrap();
        let start = tz.start_of_day(date);
        assert_eq!(tz.local_date(start), date);
        assert_eq!(tz.format_local(start), "2024-09-08 01:00:00");
    }

    #[test]
    fn until_next_midnight_counts_remaining_seconds() {
        let tz = Timezone::parse("Africa/Nairobi").unwrap();
        // 23:00 local
        let remaining = tz.until_next_midnight(utc("2025-03-10T20:00:00Z")).unwrap();
        assert_eq!(remaining.as_secs(), 3600);
    }

    #[test]
    fn next_midnight_is_strictly_after_now_at_midnight() {
        let tz = Timezone::parse("Africa/Nairobi").unwrap();
        let midnight = utc("2025-03-09T21:00:00Z");
        assert_eq!(
            tz.next_midnight(midnight).unwrap(),
            utc("2025-03-10T21:00:00Z")
        );
    }

    #[test]
    fn serializes_as_name() {
        let tz = Timezone::parse("Europe/Berlin").unwrap();
        let json = serde_json::to_string(&tz).unwrap();
        assert_eq!(json, "\"Europe/Berlin\"");

        let back: Timezone = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tz);
    }

    #[test]
    fn deserialize_rejects_unknown_zone() {
        let result: Result<Timezone, _> = serde_json::from_str("\"Nowhere/Land\"");
        assert!(result.is_err());
    }
}
