//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod clock;
mod event_cache_port;
mod feed_port;

pub use clock::{Clock, ManualClock, SystemClock};
pub use event_cache_port::{CacheStats, EVENTS_CACHE_KEY, EventCachePort};
#[cfg(test)]
pub use feed_port::MockFeedPort;
pub use feed_port::FeedPort;
