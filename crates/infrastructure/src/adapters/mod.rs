//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod ical_feed_adapter;

pub use ical_feed_adapter::IcalFeedAdapter;
