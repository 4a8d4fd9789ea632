//! Domain entities

mod event;
mod event_group;

pub use event::{EventKey, LocalizedEvent, RawEvent};
pub use event_group::EventGroup;
