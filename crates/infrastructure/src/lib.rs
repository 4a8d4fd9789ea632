//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: the ICS feed adapter,
//! the in-memory event cache, the refresh scheduler, configuration loading
//! and logging setup.

pub mod adapters;
pub mod cache;
pub mod config;
pub mod scheduler;
pub mod telemetry;

pub use adapters::*;
pub use cache::EventCache;
pub use config::{AppConfig, CalendarConfig, ConfigError, RefreshConfig, ServerConfig};
pub use scheduler::{RefreshScheduler, SchedulerHandle, SchedulerState};
pub use telemetry::{LogConfig, LogFormat, init_tracing};
