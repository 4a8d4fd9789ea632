//! Event cache port
//!
//! Single-entry store for the most recently published grouped view. The
//! refresh pipeline is the only writer; request handlers only read.

use std::{fmt, sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use domain::EventGroup;

/// Logical key of the one entry the store holds
pub const EVENTS_CACHE_KEY: &str = "events";

/// Store for the published event view
///
/// Implementations replace the entry wholesale on `set` and must be safe for
/// any number of concurrent `get` calls overlapping a `set`.
pub trait EventCachePort: Send + Sync + fmt::Debug {
    /// The live value, or `None` if nothing was published or it has expired
    fn get(&self) -> Option<Arc<EventGroup>>;

    /// Replace the entry with `value`, expiring `ttl` from now
    fn set(&self, value: EventGroup, ttl: Duration);

    /// Expiry of the current entry, live or not
    fn expires_at(&self) -> Option<DateTime<Utc>>;

    /// Read statistics
    fn stats(&self) -> CacheStats;
}

/// Cache statistics for monitoring
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    /// Reads that found a live entry
    pub hits: u64,
    /// Reads that found nothing or an expired entry
    pub misses: u64,
    /// Number of `set` calls
    pub writes: u64,
}

impl CacheStats {
    /// Calculate the hit rate as a fraction (0.0 - 1.0)
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_rate_without_reads_is_zero() {
        assert!(CacheStats::default().hit_rate().abs() < f64::EPSILON);
    }

    #[test]
    fn hit_rate_fraction() {
        let stats = CacheStats {
            hits: 3,
            misses: 1,
            writes: 1,
        };
        assert!((stats.hit_rate() - 0.75).abs() < f64::EPSILON);
    }
}
