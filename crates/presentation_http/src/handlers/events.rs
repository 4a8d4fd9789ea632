//! Today's events, grouped by title

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use tracing::{debug, instrument};

use crate::{error::ApiError, state::AppState};

/// Serve the published view, or `{}` when none is live
///
/// Never waits on a refresh; upstream feed trouble has already been absorbed
/// by the time a view is published.
#[instrument(skip(state))]
pub async fn list_events(State(state): State<AppState>) -> Result<Response, ApiError> {
    let events = state.events.current_events();
    let body = serde_json::to_vec(events.as_ref())
        .map_err(|e| ApiError::Internal(format!("failed to encode events: {e}")))?;

    debug!(groups = events.len(), bytes = body.len(), "Serving events");
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}
