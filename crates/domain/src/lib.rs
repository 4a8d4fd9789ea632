//! Domain layer for dayboard
//!
//! Calendar events as they move through the refresh pipeline: raw events from
//! feeds, events localized to the configured zone, and the grouped view that
//! gets published to readers.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
