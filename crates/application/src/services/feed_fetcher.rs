//! Feed fetcher
//!
//! Wraps a [`FeedPort`] with a per-call time budget and fail-soft semantics:
//! a feed that errors or times out contributes no events, it never fails the
//! caller. `fetch_all` fans out one task per feed and joins them back in
//! configured order.

use std::{fmt, sync::Arc, time::Duration};

use domain::RawEvent;
use serde::Serialize;
use tracing::{debug, error, instrument, warn};

use crate::{error::ApplicationError, ports::FeedPort};

/// Default per-feed time budget
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// How a single feed fared in one cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedStatus {
    Fetched,
    Failed,
}

/// What one feed added to a refresh cycle
#[derive(Debug, Clone)]
pub struct FeedContribution {
    pub url: String,
    pub events: Vec<RawEvent>,
    pub status: FeedStatus,
}

impl FeedContribution {
    fn fetched(url: &str, events: Vec<RawEvent>) -> Self {
        Self {
            url: url.to_string(),
            events,
            status: FeedStatus::Fetched,
        }
    }

    fn failed(url: &str) -> Self {
        Self {
            url: url.to_string(),
            events: Vec::new(),
            status: FeedStatus::Failed,
        }
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.status == FeedStatus::Failed
    }
}

/// Concatenate contributions in the order given
#[must_use]
pub fn merge(contributions: Vec<FeedContribution>) -> Vec<RawEvent> {
    contributions
        .into_iter()
        .flat_map(|contribution| contribution.events)
        .collect()
}

/// Fail-soft, time-bounded access to calendar feeds
#[derive(Clone)]
pub struct FeedFetcher {
    port: Arc<dyn FeedPort>,
    timeout: Duration,
}

impl fmt::Debug for FeedFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedFetcher")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl FeedFetcher {
    pub fn new(port: Arc<dyn FeedPort>, timeout: Duration) -> Self {
        Self { port, timeout }
    }

    /// Per-feed time budget
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Events of one feed, or an empty list on any failure
    pub async fn fetch(&self, url: &str) -> Vec<RawEvent> {
        Self::fetch_one(Arc::clone(&self.port), url.to_string(), self.timeout)
            .await
            .events
    }

    /// Fetch every feed concurrently
    ///
    /// The result has one entry per URL, at the URL's index, regardless of
    /// which feed answered first.
    #[instrument(skip(self, urls), fields(feeds = urls.len()))]
    pub async fn fetch_all(&self, urls: &[String]) -> Vec<FeedContribution> {
        let handles: Vec<_> = urls
            .iter()
            .map(|url| {
                tokio::spawn(Self::fetch_one(
                    Arc::clone(&self.port),
                    url.clone(),
                    self.timeout,
                ))
            })
            .collect();

        let mut contributions = Vec::with_capacity(handles.len());
        for (url, handle) in urls.iter().zip(handles) {
            let contribution = match handle.await {
                Ok(contribution) => contribution,
                Err(e) => {
                    error!(feed_url = %url, error = %e, "Feed task aborted");
                    FeedContribution::failed(url)
                },
            };
            contributions.push(contribution);
        }
        contributions
    }

    async fn fetch_one(
        port: Arc<dyn FeedPort>,
        url: String,
        timeout: Duration,
    ) -> FeedContribution {
        debug!(feed_url = %url, "Fetching feed");

        let result = match tokio::time::timeout(timeout, port.fetch_events(&url)).await {
            Ok(result) => result,
            Err(_) => Err(ApplicationError::Timeout(format!(
                "feed did not answer within {}ms",
                timeout.as_millis()
            ))),
        };

        match result {
            Ok(events) => {
                debug!(feed_url = %url, events = events.len(), "Fetched feed");
                FeedContribution::fetched(&url, events)
            },
            Err(e) => {
                warn!(feed_url = %url, error = %e, "Feed fetch failed, contributing no events");
                FeedContribution::failed(&url)
            },
        }
    }
}
