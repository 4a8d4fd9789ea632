//! Refresh pipeline status

use application::{CacheStats, RefreshReport};
use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::state::AppState;

/// Status response
///
/// Feed URLs are reported as a count only; published calendar URLs often
/// embed private access tokens.
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub timezone: String,
    pub feeds: usize,
    pub refresh_interval_secs: u64,
    pub cache_live: bool,
    pub cache_expires_at: Option<DateTime<Utc>>,
    pub cache: CacheStatsResponse,
    pub last_refresh: Option<RefreshReport>,
    pub failed_cycles: u64,
}

/// Read counters of the event cache
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub writes: u64,
    pub hit_rate: f64,
}

impl From<CacheStats> for CacheStatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            writes: stats.writes,
        }
    }
}

pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let cache = state.events.cache();
    // Snapshot before the liveness probe below adds a read of its own
    let stats = cache.stats();

    Json(StatusResponse {
        timezone: state.refresh.timezone().to_string(),
        feeds: state.refresh.feeds().len(),
        refresh_interval_secs: state.config.refresh.interval_secs,
        cache_live: state.events.is_live(),
        cache_expires_at: cache.expires_at(),
        cache: stats.into(),
        last_refresh: state.refresh.last_report(),
        failed_cycles: state.refresh.failed_cycles(),
    })
}
