// Show listing and booking

use axum::{extract::State, http::StatusCode, response::Html, Form};
use chrono::Utc;
use common::errors::BookingError;
use common::forms::ShowForm;
use common::storage::BookingStore;
use common::telemetry;

use super::{db_error, failure_status, home_page, page_context, render, ErrorResponse, Flash};
use crate::state::AppState;

/// Prefill layout for the start time field
const START_TIME_PREFILL: &str = "%Y-%m-%d %H:%M:%S";

#[tracing::instrument(skip(state))]
pub async fn list_shows(State(state): State<AppState>) -> Result<Html<String>, ErrorResponse> {
    let shows = state.store.list_shows().await.map_err(db_error)?;

    let mut context = page_context("shows");
    context.insert("shows", &shows);
    render("pages/shows.html", &context)
}

/// Booking form, start time prefilled with the current time
pub async fn create_show_form() -> Result<Html<String>, ErrorResponse> {
    let form = ShowForm {
        start_time: Utc::now().format(START_TIME_PREFILL).to_string(),
        ..ShowForm::default()
    };

    let mut context = page_context("shows");
    context.insert("show", &form);
    render("forms/new_show.html", &context)
}

#[tracing::instrument(skip(state, form), fields(artist_id = %form.artist_id, venue_id = %form.venue_id))]
pub async fn create_show_submission(
    State(state): State<AppState>,
    Form(form): Form<ShowForm>,
) -> Result<(StatusCode, Html<String>), ErrorResponse> {
    match submit_show(state.store.as_ref(), form).await {
        Ok(id) => {
            telemetry::record_created("show");
            tracing::info!(show_id = id, "Show listed");
            home_page(
                StatusCode::OK,
                Some(Flash::success("Show was successfully listed!")),
            )
        }
        Err(e) => {
            telemetry::record_create_failure("show", e.reason());
            tracing::error!(error = %e, "Show could not be listed");
            home_page(
                failure_status(&e),
                Some(Flash::error("An error occurred. Show could not be listed.")),
            )
        }
    }
}

async fn submit_show(store: &dyn BookingStore, form: ShowForm) -> Result<i32, BookingError> {
    let show = form.validate()?;
    Ok(store.create_show(show).await?)
}
