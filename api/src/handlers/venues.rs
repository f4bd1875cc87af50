// Venue pages: listing by area, search, detail, create, edit, delete

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::Form as MultiForm;
use chrono::Utc;
use common::errors::BookingError;
use common::forms::{SearchForm, VenueForm};
use common::storage::BookingStore;
use common::telemetry;

use super::{
    db_error, failure_status, form_context, home_page, page_context, render, ErrorResponse, Flash,
};
use crate::state::AppState;

/// Venues grouped by city and state
#[tracing::instrument(skip(state))]
pub async fn list_venues(State(state): State<AppState>) -> Result<Html<String>, ErrorResponse> {
    let areas = state.store.venue_areas(Utc::now()).await.map_err(db_error)?;

    let mut context = page_context("venues");
    context.insert("areas", &areas);
    render("pages/venues.html", &context)
}

/// Search submitted from the search box
#[tracing::instrument(skip(state))]
pub async fn search_venues(
    State(state): State<AppState>,
    Form(search): Form<SearchForm>,
) -> Result<Html<String>, ErrorResponse> {
    render_search(&state, search).await
}

/// Same search through `?search_term=` so result pages can be linked
#[tracing::instrument(skip(state))]
pub async fn search_venues_query(
    State(state): State<AppState>,
    Query(search): Query<SearchForm>,
) -> Result<Html<String>, ErrorResponse> {
    render_search(&state, search).await
}

async fn render_search(state: &AppState, search: SearchForm) -> Result<Html<String>, ErrorResponse> {
    let results = state
        .store
        .search_venues(&search.search_term)
        .await
        .map_err(db_error)?;

    tracing::debug!(term = %search.search_term, count = results.count, "Venue search");

    let mut context = page_context("venues");
    context.insert("results", &results);
    context.insert("search_term", &search.search_term);
    render("pages/search_venues.html", &context)
}

/// Venue detail with past and upcoming shows
#[tracing::instrument(skip(state))]
pub async fn show_venue(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Html<String>, ErrorResponse> {
    let venue = state
        .store
        .venue_detail(id, Utc::now())
        .await
        .map_err(db_error)?
        .ok_or_else(|| ErrorResponse::not_found(format!("Venue not found: {}", id)))?;

    let mut context = page_context("venues");
    context.insert("venue", &venue);
    render("pages/show_venue.html", &context)
}

#[tracing::instrument]
pub async fn create_venue_form() -> Result<Html<String>, ErrorResponse> {
    let mut context = form_context("venues");
    context.insert("venue", &VenueForm::default());
    render("forms/new_venue.html", &context)
}

/// Create a venue; the outcome is reported on the home page
#[tracing::instrument(skip(state, form), fields(venue_name = %form.name))]
pub async fn create_venue_submission(
    State(state): State<AppState>,
    MultiForm(form): MultiForm<VenueForm>,
) -> Result<(StatusCode, Html<String>), ErrorResponse> {
    let name = form.name.trim().to_string();

    match submit_venue(state.store.as_ref(), form).await {
        Ok(id) => {
            telemetry::record_created("venue");
            tracing::info!(venue_id = id, "Venue listed");
            home_page(
                StatusCode::OK,
                Some(Flash::success(format!("Venue {} was successfully listed!", name))),
            )
        }
        Err(e) => {
            telemetry::record_create_failure("venue", e.reason());
            tracing::error!(error = %e, "Venue could not be listed");
            home_page(
                failure_status(&e),
                Some(Flash::error(format!(
                    "An error occurred. Venue {} could not be listed.",
                    name
                ))),
            )
        }
    }
}

async fn submit_venue(store: &dyn BookingStore, form: VenueForm) -> Result<i32, BookingError> {
    let venue = form.validate()?;
    Ok(store.create_venue(venue).await?)
}

/// Edit form prefilled with the stored venue
#[tracing::instrument(skip(state))]
pub async fn edit_venue(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Html<String>, ErrorResponse> {
    let venue = state
        .store
        .find_venue(id)
        .await
        .map_err(db_error)?
        .ok_or_else(|| ErrorResponse::not_found(format!("Venue not found: {}", id)))?;

    let mut context = form_context("venues");
    context.insert("venue_id", &id);
    context.insert("venue", &VenueForm::from(&venue));
    render("forms/edit_venue.html", &context)
}

/// Persist an edited venue and go back to its page
#[tracing::instrument(skip(state, form))]
pub async fn edit_venue_submission(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    MultiForm(form): MultiForm<VenueForm>,
) -> Result<Response, ErrorResponse> {
    let name = form.name.trim().to_string();

    match update_venue(state.store.as_ref(), id, form).await {
        Ok(true) => {
            tracing::info!(venue_id = id, "Venue updated");
            Ok(Redirect::to(&format!("/venues/{}", id)).into_response())
        }
        Ok(false) => Err(ErrorResponse::not_found(format!("Venue not found: {}", id))),
        Err(e) => {
            telemetry::record_update_failure("venue", e.reason());
            tracing::error!(error = %e, venue_id = id, "Venue could not be updated");
            let page = home_page(
                failure_status(&e),
                Some(Flash::error(format!(
                    "An error occurred. Venue {} could not be updated.",
                    name
                ))),
            )?;
            Ok(page.into_response())
        }
    }
}

async fn update_venue(
    store: &dyn BookingStore,
    id: i32,
    form: VenueForm,
) -> Result<bool, BookingError> {
    let venue = form.validate()?;
    Ok(store.update_venue(id, venue).await?)
}

/// Best-effort delete: failures are logged and otherwise ignored
#[tracing::instrument(skip(state))]
pub async fn delete_venue(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<(StatusCode, Html<String>), ErrorResponse> {
    let flash = match state.store.delete_venue(id).await {
        Ok(true) => {
            telemetry::record_deleted("venue");
            Some(Flash::success("Venue was successfully deleted."))
        }
        Ok(false) => {
            tracing::debug!(venue_id = id, "Nothing to delete");
            None
        }
        Err(e) => {
            tracing::warn!(error = %e, venue_id = id, "Venue delete rolled back");
            None
        }
    };

    home_page(StatusCode::OK, flash)
}
