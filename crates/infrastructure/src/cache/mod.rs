//! Cache implementations
//!
//! - `EventCache`: the single published event view, with clock-driven expiry

mod event_cache;

pub use event_cache::EventCache;
