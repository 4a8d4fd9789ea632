//! ICS feed client
//!
//! HTTP client that downloads a published calendar and decodes its events.

use std::time::Duration;

use async_trait::async_trait;
use domain::Timezone;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::parse::{FeedEvent, parse_feed};

/// Feed client errors
#[derive(Debug, Error)]
pub enum FeedError {
    /// The feed answered with a non-success status
    #[error("Feed returned HTTP {0}")]
    HttpStatus(u16),

    /// Connection to the feed host failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The feed did not answer within the configured timeout
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The body is not a readable iCalendar document
    #[error("Parse error: {0}")]
    Parse(String),
}

impl FeedError {
    fn from_reqwest(e: &reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout(e.to_string())
        } else {
            Self::ConnectionFailed(e.to_string())
        }
    }
}

/// Feed client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedClientConfig {
    /// Whole-request timeout in seconds (default: 5)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// `User-Agent` header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Zone for floating times and all-day dates (default: UTC)
    #[serde(default)]
    pub floating_timezone: Timezone,
}

const fn default_timeout() -> u64 {
    5
}

fn default_user_agent() -> String {
    format!("dayboard/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for FeedClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
            floating_timezone: Timezone::default(),
        }
    }
}

/// Fetches and decodes calendar feeds
#[async_trait]
pub trait FeedClient: Send + Sync {
    /// Download `url` and decode its events
    async fn fetch_feed(&self, url: &str) -> Result<Vec<FeedEvent>, FeedError>;
}

/// reqwest-backed feed client
#[derive(Debug)]
pub struct HttpFeedClient {
    client: Client,
    config: FeedClientConfig,
}

impl HttpFeedClient {
    /// Create a new feed client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: FeedClientConfig) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| FeedError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a new client with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, FeedError> {
        Self::new(FeedClientConfig::default())
    }

    #[must_use]
    pub const fn config(&self) -> &FeedClientConfig {
        &self.config
    }
}

#[async_trait]
impl FeedClient for HttpFeedClient {
    #[instrument(skip(self))]
    async fn fetch_feed(&self, url: &str) -> Result<Vec<FeedEvent>, FeedError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "text/calendar, */*;q=0.5")
            .send()
            .await
            .map_err(|e| FeedError::from_reqwest(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::HttpStatus(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FeedError::from_reqwest(&e))?;

        let events = parse_feed(&body, self.config.floating_timezone)?;
        debug!(events = events.len(), bytes = body.len(), "Decoded feed");
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = FeedClientConfig::default();
        assert_eq!(config.timeout_secs, 5);
        assert!(config.user_agent.starts_with("dayboard/"));
        assert_eq!(config.floating_timezone, Timezone::default());
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: FeedClientConfig =
            serde_json::from_str(r#"{"floating_timezone": "Africa/Nairobi"}"#).unwrap();
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.floating_timezone.name(), "Africa/Nairobi");
    }

    #[test]
    fn config_rejects_unknown_zone() {
        let result: Result<FeedClientConfig, _> =
            serde_json::from_str(r#"{"floating_timezone": "Nowhere/City"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn client_builds() {
        assert!(HttpFeedClient::with_defaults().is_ok());
    }

    #[test]
    fn error_display() {
        assert_eq!(FeedError::HttpStatus(503).to_string(), "Feed returned HTTP 503");
        assert!(FeedError::Parse("bad".into()).to_string().contains("bad"));
    }
}
