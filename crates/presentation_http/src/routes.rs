//! Route definitions

use axum::{
    Router,
    http::{HeaderValue, Method, Uri},
    routing::get,
};
use infrastructure::ServerConfig;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::{
    error::{ApiError, panic_response},
    handlers,
    state::AppState,
};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Liveness banner
        .route("/", get(handlers::root::root))
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Events API
        .route("/api/events", get(handlers::events::list_events))
        .route("/api/status", get(handlers::status::status))
        .fallback(|uri: Uri| async move { ApiError::NotFound(uri.path().to_string()) })
        // Attach state
        .with_state(state)
}

/// Router plus the middleware stack used by the server
pub fn create_app(state: AppState, server: &ServerConfig) -> Router {
    // Order matters: last added = outermost
    create_router(state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&server.allowed_origins))
}

/// CORS: any origin unless specific origins are configured
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring unparseable CORS origin");
                None
            },
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any)
}
