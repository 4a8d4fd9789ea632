//! Calendar feed configuration.

use serde::{Deserialize, Serialize};

/// Zone used for "today" and wall-clock rendering unless configured
pub const DEFAULT_TIMEZONE: &str = "Africa/Nairobi";

/// Which feeds to aggregate and in which zone to view them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// ICS feed URLs, merged in this order
    #[serde(default)]
    pub feeds: Vec<String>,

    /// IANA timezone identifier
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

impl CalendarConfig {
    /// Feed URLs that are neither `http://` nor `https://`
    pub fn invalid_feeds(&self) -> impl Iterator<Item = &str> {
        self.feeds
            .iter()
            .map(String::as_str)
            .filter(|url| !is_http_url(url))
    }
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            feeds: Vec::new(),
            timezone: default_timezone(),
        }
    }
}

fn is_http_url(url: &str) -> bool {
    let lower = url.trim().to_ascii_lowercase();
    ["http://", "https://"]
        .iter()
        .any(|scheme| lower.strip_prefix(scheme).is_some_and(|rest| !rest.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_zone_is_nairobi() {
        let config = CalendarConfig::default();
        assert_eq!(config.timezone, "Africa/Nairobi");
        assert!(config.feeds.is_empty());
    }

    #[test]
    fn flags_non_http_feeds() {
        let config = CalendarConfig {
            feeds: vec![
                "https://calendar.example/team.ics".into(),
                "HTTP://calendar.example/ops.ics".into(),
                "webcal://calendar.example/x.ics".into(),
                "https://".into(),
                "/etc/passwd".into(),
            ],
            ..Default::default()
        };

        let invalid: Vec<&str> = config.invalid_feeds().collect();
        assert_eq!(
            invalid,
            ["webcal://calendar.example/x.ics", "https://", "/etc/passwd"]
        );
    }
}
