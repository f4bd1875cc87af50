pub mod artists;
pub mod health;
pub mod home;
pub mod metrics;
pub mod shows;
pub mod venues;

// Common response types
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use common::errors::{BookingError, DatabaseError};
use common::forms::{GENRES, STATES};
use serde::Serialize;
use tera::Context;

use crate::templates::TEMPLATES;

/// Error page response
///
/// `error` selects the status and page: `not_found` renders the 404 page,
/// everything else the 500 page.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub trace_id: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            trace_id: uuid::Uuid::new_v4().to_string(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("not_found", message)
    }

    fn status(&self) -> StatusCode {
        match self.error.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "validation_error" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status = self.status();
        let template = if status == StatusCode::NOT_FOUND {
            "errors/404.html"
        } else {
            tracing::error!(
                error = %self.error,
                message = %self.message,
                trace_id = %self.trace_id,
                "Request failed"
            );
            "errors/500.html"
        };

        let mut context = page_context("");
        context.insert("error", &self);

        match TEMPLATES.render(template, &context) {
            Ok(html) => (status, Html(html)).into_response(),
            Err(e) => {
                tracing::error!(error = %e, template = template, "Error page rendering failed");
                (status, self.message).into_response()
            }
        }
    }
}

/// Message shown at the top of the next rendered page
#[derive(Debug, Clone, Serialize)]
pub struct Flash {
    pub level: &'static str,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: "success",
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: "danger",
            message: message.into(),
        }
    }
}

/// Context pre-filled with the navigation marker
pub fn page_context(active_page: &str) -> Context {
    let mut context = Context::new();
    context.insert("active_page", active_page);
    context
}

/// Context for the venue/artist forms, with the state and genre choices
pub fn form_context(active_page: &str) -> Context {
    let mut context = page_context(active_page);
    context.insert("states", STATES);
    context.insert("genres", GENRES);
    context
}

pub fn render(template: &str, context: &Context) -> Result<Html<String>, ErrorResponse> {
    TEMPLATES.render(template, context).map(Html).map_err(|e| {
        tracing::error!(error = %e, template = template, "Template rendering failed");
        ErrorResponse::new(
            "template_error",
            format!("Failed to render '{}': {}", template, e),
        )
    })
}

/// Home page carrying an optional flash message, with the given status
pub fn home_page(
    status: StatusCode,
    flash: Option<Flash>,
) -> Result<(StatusCode, Html<String>), ErrorResponse> {
    let mut context = page_context("home");
    if let Some(flash) = flash {
        context.insert("flash", &flash);
    }
    Ok((status, render("pages/home.html", &context)?))
}

/// Status for a rejected or failed submission
pub fn failure_status(err: &BookingError) -> StatusCode {
    match err {
        BookingError::Validation(_) => StatusCode::BAD_REQUEST,
        BookingError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Convert database error to ErrorResponse
pub fn db_error(e: DatabaseError) -> ErrorResponse {
    ErrorResponse::new("database_error", format!("Database error: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::errors::ValidationError;

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(ErrorResponse::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorResponse::new("validation_error", "x").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorResponse::new("database_error", "x").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_failure_status() {
        let err: BookingError = ValidationError::MissingField("name".into()).into();
        assert_eq!(failure_status(&err), StatusCode::BAD_REQUEST);

        let err: BookingError = DatabaseError::ForeignKeyViolation("fk".into()).into();
        assert_eq!(failure_status(&err), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_home_page_renders_flash() {
        let (status, Html(body)) = home_page(
            StatusCode::OK,
            Some(Flash::success("Venue The Musical Hop was successfully listed!")),
        )
        .unwrap();

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Venue The Musical Hop was successfully listed!"));
    }
}
