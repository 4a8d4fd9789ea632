//! Refresh service
//!
//! One refresh cycle: fetch every configured feed concurrently, merge in feed
//! order, normalize, and publish into the event cache with a TTL that ends at
//! local midnight. A cycle where every feed fails still publishes (an empty
//! view); a cycle that fails after fetching leaves the cache untouched.

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use chrono::{DateTime, Utc};
use domain::Timezone;
use parking_lot::RwLock;
use serde::Serialize;
use tracing::{error, info, instrument};

use crate::{
    error::ApplicationError,
    ports::{Clock, EVENTS_CACHE_KEY, EventCachePort},
    services::{
        event_normalizer::EventNormalizer,
        feed_fetcher::{FeedFetcher, merge},
    },
};

/// Summary of a completed refresh cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshReport {
    pub completed_at: DateTime<Utc>,
    pub feeds_total: usize,
    pub feeds_failed: usize,
    /// Events returned by all feeds, before filtering
    pub events_fetched: usize,
    /// Events in the published view
    pub events_published: usize,
    /// Distinct titles in the published view
    pub groups: usize,
    pub ttl_secs: u64,
}

/// Runs refresh cycles and remembers how the last one went
pub struct RefreshService {
    fetcher: FeedFetcher,
    normalizer: EventNormalizer,
    cache: Arc<dyn EventCachePort>,
    clock: Arc<dyn Clock>,
    feeds: Vec<String>,
    last_report: RwLock<Option<RefreshReport>>,
    failed_cycles: AtomicU64,
}

impl fmt::Debug for RefreshService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshService")
            .field("feeds", &self.feeds.len())
            .field("timezone", &self.normalizer.timezone())
            .field("failed_cycles", &self.failed_cycles.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl RefreshService {
    pub fn new(
        fetcher: FeedFetcher,
        normalizer: EventNormalizer,
        cache: Arc<dyn EventCachePort>,
        clock: Arc<dyn Clock>,
        feeds: Vec<String>,
    ) -> Self {
        Self {
            fetcher,
            normalizer,
            cache,
            clock,
            feeds,
            last_report: RwLock::new(None),
            failed_cycles: AtomicU64::new(0),
        }
    }

    /// Configured feed URLs, in merge order
    #[must_use]
    pub fn feeds(&self) -> &[String] {
        &self.feeds
    }

    #[must_use]
    pub const fn timezone(&self) -> Timezone {
        self.normalizer.timezone()
    }

    /// Report of the most recent successful cycle
    #[must_use]
    pub fn last_report(&self) -> Option<RefreshReport> {
        self.last_report.read().clone()
    }

    /// Cycles abandoned after fetching
    #[must_use]
    pub fn failed_cycles(&self) -> u64 {
        self.failed_cycles.load(Ordering::Relaxed)
    }

    /// Run one fetch-merge-normalize-publish cycle
    #[instrument(skip(self), fields(feeds = self.feeds.len()))]
    pub async fn refresh(&self) -> Result<RefreshReport, ApplicationError> {
        let contributions = self.fetcher.fetch_all(&self.feeds).await;
        let feeds_failed = contributions.iter().filter(|c| c.is_failed()).count();
        let merged = merge(contributions);
        let events_fetched = merged.len();

        let now = self.clock.now();
        match self.publish(merged, now) {
            Ok((events_published, groups, ttl_secs)) => {
                let report = RefreshReport {
                    completed_at: now,
                    feeds_total: self.feeds.len(),
                    feeds_failed,
                    events_fetched,
                    events_published,
                    groups,
                    ttl_secs,
                };
                info!(
                    feeds_failed,
                    events_fetched,
                    events = events_published,
                    ttl_secs,
                    "Published refreshed events"
                );
                *self.last_report.write() = Some(report.clone());
                Ok(report)
            },
            Err(e) => {
                self.failed_cycles.fetch_add(1, Ordering::Relaxed);
                error!(error = %e, "Refresh cycle abandoned, keeping previous view");
                Err(e)
            },
        }
    }

    fn publish(
        &self,
        merged: Vec<domain::RawEvent>,
        now: DateTime<Utc>,
    ) -> Result<(usize, usize, u64), ApplicationError> {
        let ttl = self.normalizer.ttl_until_midnight(now)?;
        let view = self.normalizer.normalize(merged, now);
        let counts = (view.event_count(), view.len(), ttl.as_secs());

        self.cache.set(view, ttl);
        tracing::debug!(key = EVENTS_CACHE_KEY, ttl_secs = counts.2, "Cache entry replaced");
        Ok(counts)
    }
}
