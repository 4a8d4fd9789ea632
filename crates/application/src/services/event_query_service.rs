//! Event query service
//!
//! The read path behind the HTTP handlers. Only ever reads the cache; it
//! never triggers or waits for a refresh.

use std::sync::Arc;

use domain::EventGroup;
use tracing::debug;

use crate::ports::EventCachePort;

/// Serves the currently published event view
#[derive(Debug, Clone)]
pub struct EventQueryService {
    cache: Arc<dyn EventCachePort>,
}

impl EventQueryService {
    pub fn new(cache: Arc<dyn EventCachePort>) -> Self {
        Self { cache }
    }

    /// The live view, or an empty one if nothing is published or it expired
    #[must_use]
    pub fn current_events(&self) -> Arc<EventGroup> {
        self.cache.get().unwrap_or_else(|| {
            debug!("No live event view, serving empty");
            Arc::new(EventGroup::new())
        })
    }

    /// Whether a published, unexpired view exists
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.cache.get().is_some()
    }

    /// The cache being read
    #[must_use]
    pub fn cache(&self) -> &Arc<dyn EventCachePort> {
        &self.cache
    }
}
