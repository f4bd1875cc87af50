use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::ErrorResponse;
use crate::state::AppState;

/// Prometheus metrics endpoint
#[tracing::instrument(skip(state))]
pub async fn metrics_handler(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()).into_response(),
        None => ErrorResponse::not_found("Metrics are disabled").into_response(),
    }
}
