//! Application layer - Use cases and orchestration
//!
//! Contains the refresh pipeline (fetch, normalize, publish), the read path
//! used by request handlers, and the port definitions adapters implement.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
