use axum::{http::StatusCode, response::Html};

use super::{home_page, ErrorResponse};

/// Home page with the venue and artist search boxes
#[tracing::instrument]
pub async fn index() -> Result<Html<String>, ErrorResponse> {
    let (_, html) = home_page(StatusCode::OK, None)?;
    Ok(html)
}

/// Fallback for every unknown route
#[tracing::instrument]
pub async fn not_found() -> ErrorResponse {
    ErrorResponse::not_found("Page not found")
}
