//! iCalendar feed integration
//!
//! Downloads published `.ics` calendars over HTTP and decodes their `VEVENT`s
//! into absolute start/end instants.

pub mod client;
mod parse;

pub use client::{FeedClient, FeedClientConfig, FeedError, HttpFeedClient};
pub use parse::{FeedEvent, UNTITLED_EVENT, parse_feed};
