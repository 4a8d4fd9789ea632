//! Application services

pub mod event_normalizer;
pub mod event_query_service;
pub mod feed_fetcher;
pub mod refresh_service;

pub use event_normalizer::{EventNormalizer, dedupe, group};
pub use event_query_service::EventQueryService;
pub use feed_fetcher::{
    DEFAULT_FETCH_TIMEOUT, FeedContribution, FeedFetcher, FeedStatus, merge,
};
pub use refresh_service::{RefreshReport, RefreshService};
