// Artist pages

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::Form as MultiForm;
use chrono::Utc;
use common::errors::BookingError;
use common::forms::{ArtistForm, SearchForm};
use common::storage::BookingStore;
use common::telemetry;

use super::{
    db_error, failure_status, form_context, home_page, page_context, render, ErrorResponse, Flash,
};
use crate::state::AppState;

#[tracing::instrument(skip(state))]
pub async fn list_artists(State(state): State<AppState>) -> Result<Html<String>, ErrorResponse> {
    let artists = state.store.list_artists().await.map_err(db_error)?;

    let mut context = page_context("artists");
    context.insert("artists", &artists);
    render("pages/artists.html", &context)
}

#[tracing::instrument(skip(state))]
pub async fn search_artists(
    State(state): State<AppState>,
    Form(search): Form<SearchForm>,
) -> Result<Html<String>, ErrorResponse> {
    render_search(&state, search).await
}

#[tracing::instrument(skip(state))]
pub async fn search_artists_query(
    State(state): State<AppState>,
    Query(search): Query<SearchForm>,
) -> Result<Html<String>, ErrorResponse> {
    render_search(&state, search).await
}

async fn render_search(state: &AppState, search: SearchForm) -> Result<Html<String>, ErrorResponse> {
    let results = state
        .store
        .search_artists(&search.search_term)
        .await
        .map_err(db_error)?;

    let mut context = page_context("artists");
    context.insert("results", &results);
    context.insert("search_term", &search.search_term);
    render("pages/search_artists.html", &context)
}

/// Artist detail with past and upcoming shows
#[tracing::instrument(skip(state))]
pub async fn show_artist(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Html<String>, ErrorResponse> {
    let artist = state
        .store
        .artist_detail(id, Utc::now())
        .await
        .map_err(db_error)?
        .ok_or_else(|| ErrorResponse::not_found(format!("Artist not found: {}", id)))?;

    let mut context = page_context("artists");
    context.insert("artist", &artist);
    render("pages/show_artist.html", &context)
}

pub async fn create_artist_form() -> Result<Html<String>, ErrorResponse> {
    let mut context = form_context("artists");
    context.insert("artist", &ArtistForm::default());
    render("forms/new_artist.html", &context)
}

#[tracing::instrument(skip(state, form), fields(artist_name = %form.name))]
pub async fn create_artist_submission(
    State(state): State<AppState>,
    MultiForm(form): MultiForm<ArtistForm>,
) -> Result<(StatusCode, Html<String>), ErrorResponse> {
    let name = form.name.trim().to_string();

    match submit_artist(state.store.as_ref(), form).await {
        Ok(id) => {
            telemetry::record_created("artist");
            tracing::info!(artist_id = id, "Artist listed");
            home_page(
                StatusCode::OK,
                Some(Flash::success(format!("Artist {} was successfully listed!", name))),
            )
        }
        Err(e) => {
            telemetry::record_create_failure("artist", e.reason());
            tracing::error!(error = %e, "Artist could not be listed");
            home_page(
                failure_status(&e),
                Some(Flash::error(format!(
                    "An error occurred. Artist {} could not be listed.",
                    name
                ))),
            )
        }
    }
}

async fn submit_artist(store: &dyn BookingStore, form: ArtistForm) -> Result<i32, BookingError> {
    let artist = form.validate()?;
    Ok(store.create_artist(artist).await?)
}

#[tracing::instrument(skip(state))]
pub async fn edit_artist(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Html<String>, ErrorResponse> {
    let artist = state
        .store
        .find_artist(id)
        .await
        .map_err(db_error)?
        .ok_or_else(|| ErrorResponse::not_found(format!("Artist not found: {}", id)))?;

    let mut context = form_context("artists");
    context.insert("artist_id", &id);
    context.insert("artist", &ArtistForm::from(&artist));
    render("forms/edit_artist.html", &context)
}

#[tracing::instrument(skip(state, form))]
pub async fn edit_artist_submission(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    MultiForm(form): MultiForm<ArtistForm>,
) -> Result<Response, ErrorResponse> {
    let name = form.name.trim().to_string();

    match update_artist(state.store.as_ref(), id, form).await {
        Ok(true) => {
            tracing::info!(artist_id = id, "Artist updated");
            Ok(Redirect::to(&format!("/artists/{}", id)).into_response())
        }
        Ok(false) => Err(ErrorResponse::not_found(format!("Artist not found: {}", id))),
        Err(e) => {
            telemetry::record_update_failure("artist", e.reason());
            tracing::error!(error = %e, artist_id = id, "Artist could not be updated");
            let page = home_page(
                failure_status(&e),
                Some(Flash::error(format!(
                    "An error occurred. Artist {} could not be updated.",
                    name
                ))),
            )?;
            Ok(page.into_response())
        }
    }
}

async fn update_artist(
    store: &dyn BookingStore,
    id: i32,
    form: ArtistForm,
) -> Result<bool, BookingError> {
    let artist = form.validate()?;
    Ok(store.update_artist(id, artist).await?)
}

/// Best-effort delete, mirroring venues
#[tracing::instrument(skip(state))]
pub async fn delete_artist(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<(StatusCode, Html<String>), ErrorResponse> {
    let flash = match state.store.delete_artist(id).await {
        Ok(true) => {
            telemetry::record_deleted("artist");
            Some(Flash::success("Artist was successfully deleted."))
        }
        Ok(false) => None,
        Err(e) => {
            tracing::warn!(error = %e, artist_id = id, "Artist delete rolled back");
            None
        }
    };

    home_page(StatusCode::OK, flash)
}
