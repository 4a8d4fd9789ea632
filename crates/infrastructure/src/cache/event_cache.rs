//! Single-entry event cache
//!
//! Holds the one published [`EventGroup`] behind an `ArcSwapOption`, so a
//! reader never observes a half-written entry and never blocks the writer.
//! Expiry is judged against an injected [`Clock`].

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use application::ports::{CacheStats, Clock, EVENTS_CACHE_KEY, EventCachePort, SystemClock};
use arc_swap::ArcSwapOption;
use chrono::{DateTime, Utc};
use domain::EventGroup;
use tracing::{debug, trace};

/// A published value and its expiry
#[derive(Debug)]
struct CacheEntry {
    value: Arc<EventGroup>,
    published_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl CacheEntry {
    fn is_live(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// In-memory store for the published event view
pub struct EventCache {
    entry: ArcSwapOption<CacheEntry>,
    clock: Arc<dyn Clock>,
    hits: AtomicU64,
    misses: AtomicU64,
    writes: AtomicU64,
}

impl fmt::Debug for EventCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventCache")
            .field("expires_at", &self.expires_at())
            .field("hits", &self.hits.load(Ordering::Relaxed))
            .field("misses", &self.misses.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl Default for EventCache {
    fn default() -> Self {
        Self::new()
    }
}

impl EventCache {
    /// Create an empty cache on the system clock
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an empty cache on a caller-supplied clock
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entry: ArcSwapOption::empty(),
            clock,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            writes: AtomicU64::new(0),
        }
    }

    /// When the current entry was written
    #[must_use]
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.entry.load().as_ref().map(|entry| entry.published_at)
    }
}

impl EventCachePort for EventCache {
    fn get(&self) -> Option<Arc<EventGroup>> {
        let now = self.clock.now();
        let live = self
            .entry
            .load()
            .as_ref()
            .filter(|entry| entry.is_live(now))
            .map(|entry| Arc::clone(&entry.value));

        if live.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(key = EVENTS_CACHE_KEY, "Cache hit");
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            trace!(key = EVENTS_CACHE_KEY, "Cache miss");
        }
        live
    }

    /// Expiry counts from this store's own clock reading, so it trails any
    /// instant the caller derived `ttl` from by the time spent in between
    fn set(&self, value: EventGroup, ttl: Duration) {
        let published_at = self.clock.now();
        let expires_at = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| published_at.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        self.entry.store(Some(Arc::new(CacheEntry {
            value: Arc::new(value),
            published_at,
            expires_at,
        })));
        self.writes.fetch_add(1, Ordering::Relaxed);
        debug!(key = EVENTS_CACHE_KEY, expires_at = %expires_at, "Cache entry stored");
    }

    fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.entry.load().as_ref().map(|entry| entry.expires_at)
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            writes: self.writes.load(Ordering::Relaxed),
        }
    }
}
