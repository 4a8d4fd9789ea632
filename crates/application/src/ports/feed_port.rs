//! Calendar feed port
//!
//! Retrieves one remote calendar and decodes it into raw events. Adapters
//! report failures as errors; turning them into an empty contribution is the
//! fetcher's job, not the adapter's.

use async_trait::async_trait;
use domain::RawEvent;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for reading events from a remote calendar feed
#[cfg_attr(test, automock)]
#[async_trait]
pub trait FeedPort: Send + Sync {
    /// Fetch and decode every event the feed at `url` currently publishes
    async fn fetch_events(&self, url: &str) -> Result<Vec<RawEvent>, ApplicationError>;
}
