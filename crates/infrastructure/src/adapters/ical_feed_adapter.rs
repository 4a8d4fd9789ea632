//! ICS feed adapter - Implements FeedPort using integration_ical

use std::sync::Arc;

use application::{error::ApplicationError, ports::FeedPort};
use async_trait::async_trait;
use domain::RawEvent;
use integration_ical::{FeedClient, FeedClientConfig, FeedError, FeedEvent, HttpFeedClient};
use tracing::{debug, instrument};

/// Adapter for published iCalendar feeds
pub struct IcalFeedAdapter {
    client: Arc<dyn FeedClient>,
}

impl std::fmt::Debug for IcalFeedAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IcalFeedAdapter")
            .field("client", &"FeedClient")
            .finish()
    }
}

impl IcalFeedAdapter {
    /// Create an adapter backed by the HTTP feed client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new(config: FeedClientConfig) -> Result<Self, ApplicationError> {
        let client = HttpFeedClient::new(config)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self::with_client(Arc::new(client)))
    }

    /// Create an adapter around any feed client
    #[must_use]
    pub fn with_client(client: Arc<dyn FeedClient>) -> Self {
        Self { client }
    }

    /// Map integration feed error to application error
    fn map_error(err: FeedError) -> ApplicationError {
        match err {
            FeedError::HttpStatus(status) => {
                ApplicationError::ExternalService(format!("feed returned HTTP {status}"))
            },
            FeedError::ConnectionFailed(e) => ApplicationError::ExternalService(e),
            FeedError::Timeout(e) => ApplicationError::Timeout(e),
            FeedError::Parse(e) => ApplicationError::ExternalService(format!("unreadable feed: {e}")),
        }
    }

    fn to_raw_event(event: FeedEvent) -> RawEvent {
        RawEvent::new(event.summary, event.start, event.end)
    }
}

#[async_trait]
impl FeedPort for IcalFeedAdapter {
    #[instrument(skip(self))]
    async fn fetch_events(&self, url: &str) -> Result<Vec<RawEvent>, ApplicationError> {
        let events = self
            .client
            .fetch_feed(url)
            .await
            .map_err(Self::map_error)?;

        debug!(count = events.len(), "Fetched feed events");
        Ok(events.into_iter().map(Self::to_raw_event).collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};

    use super::*;

    struct StubClient(fn() -> Result<Vec<FeedEvent>, FeedError>);

    #[async_trait]
    impl FeedClient for StubClient {
        async fn fetch_feed(&self, _url: &str) -> Result<Vec<FeedEvent>, FeedError> {
            (self.0)()
        }
    }

    fn standup() -> FeedEvent {
        let start = DateTime::parse_from_rfc3339("2025-03-10T06:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        FeedEvent {
            uid: Some("standup@example.com".into()),
            summary: "Standup".into(),
            start,
            end: start + chrono::Duration::minutes(30),
            all_day: false,
        }
    }

    #[test]
    fn new_creates_adapter() {
        assert!(IcalFeedAdapter::new(FeedClientConfig::default()).is_ok());
    }

    #[test]
    fn debug_impl() {
        let adapter = IcalFeedAdapter::new(FeedClientConfig::default()).unwrap();
        assert!(format!("{adapter:?}").contains("IcalFeedAdapter"));
    }

    #[tokio::test]
    async fn maps_feed_events_to_raw_events() {
        let adapter = IcalFeedAdapter::with_client(Arc::new(StubClient(|| Ok(vec![standup()]))));

        let events = adapter.fetch_events("https://a.example/cal.ics").await.unwrap();

        let expected = standup();
        assert_eq!(
            events,
            vec![RawEvent::new("Standup", expected.start, expected.end)]
        );
    }

    #[tokio::test]
    async fn timeout_maps_to_timeout() {
        let adapter = IcalFeedAdapter::with_client(Arc::new(StubClient(|| {
            Err(FeedError::Timeout("5s".into()))
        })));

        let err = adapter.fetch_events("https://a.example").await.unwrap_err();
        assert!(matches!(err, ApplicationError::Timeout(_)));
    }

    #[test]
    fn map_error_http_status() {
        let err = IcalFeedAdapter::map_error(FeedError::HttpStatus(503));
        assert!(matches!(err, ApplicationError::ExternalService(msg) if msg.contains("503")));
    }

    #[test]
    fn map_error_parse() {
        let err = IcalFeedAdapter::map_error(FeedError::Parse("no VCALENDAR".into()));
        assert!(matches!(err, ApplicationError::ExternalService(_)));
    }
}
