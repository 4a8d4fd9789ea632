//! Background refresh configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How often feeds are polled and how long each may take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshConfig {
    /// Seconds between refresh cycles (default: 96)
    #[serde(default = "default_interval")]
    pub interval_secs: u64,

    /// Per-feed fetch timeout in seconds (default: 5)
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,
}

const fn default_interval() -> u64 {
    96
}

const fn default_fetch_timeout() -> u64 {
    5
}

impl RefreshConfig {
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    #[must_use]
    pub const fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval(),
            fetch_timeout_secs: default_fetch_timeout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = RefreshConfig::default();
        assert_eq!(config.interval(), Duration::from_secs(96));
        assert_eq!(config.fetch_timeout(), Duration::from_secs(5));
    }
}
