//! Dayboard HTTP presentation layer
//!
//! Serves the published view of today's calendar events, plus liveness,
//! readiness and refresh status endpoints.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::{create_app, create_router};
pub use state::AppState;
