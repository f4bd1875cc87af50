use axum::{extract::State, http::StatusCode, response::IntoResponse};

use crate::state::AppState;

/// Health check endpoint: OK while the database answers
#[tracing::instrument(skip(state))]
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.health_check().await {
        Ok(()) => (StatusCode::OK, "OK"),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "Database unavailable")
        }
    }
}
