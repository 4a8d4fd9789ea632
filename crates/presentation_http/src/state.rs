//! Application state shared across handlers

use std::{fmt, sync::Arc};

use application::{EventQueryService, RefreshService};
use infrastructure::AppConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Read path over the published event view
    pub events: Arc<EventQueryService>,
    /// Refresh pipeline, read here for status reporting only
    pub refresh: Arc<RefreshService>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("refresh", &self.refresh)
            .finish_non_exhaustive()
    }
}
