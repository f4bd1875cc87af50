use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the main application router with all routes and middleware
#[tracing::instrument(skip(state))]
pub fn create_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);

    let venue_routes = Router::new()
        .route("/venues", get(handlers::venues::list_venues))
        .route(
            "/venues/search",
            post(handlers::venues::search_venues).get(handlers::venues::search_venues_query),
        )
        .route(
            "/venues/create",
            get(handlers::venues::create_venue_form).post(handlers::venues::create_venue_submission),
        )
        .route(
            "/venues/:id",
            get(handlers::venues::show_venue).delete(handlers::venues::delete_venue),
        )
        .route(
            "/venues/:id/edit",
            get(handlers::venues::edit_venue).post(handlers::venues::edit_venue_submission),
        );

    let artist_routes = Router::new()
        .route("/artists", get(handlers::artists::list_artists))
        .route(
            "/artists/search",
            post(handlers::artists::search_artists).get(handlers::artists::search_artists_query),
        )
        .route(
            "/artists/create",
            get(handlers::artists::create_artist_form)
                .post(handlers::artists::create_artist_submission),
        )
        .route(
            "/artists/:id",
            get(handlers::artists::show_artist).delete(handlers::artists::delete_artist),
        )
        .route(
            "/artists/:id/edit",
            get(handlers::artists::edit_artist).post(handlers::artists::edit_artist_submission),
        );

    let show_routes = Router::new()
        .route("/shows", get(handlers::shows::list_shows))
        .route(
            "/shows/create",
            get(handlers::shows::create_show_form).post(handlers::shows::create_show_submission),
        );

    // Operational endpoints
    let ops_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics::metrics_handler));

    Router::new()
        .route("/", get(handlers::home::index))
        .merge(venue_routes)
        .merge(artist_routes)
        .merge(show_routes)
        .merge(ops_routes)
        .fallback(handlers::home::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(timeout)),
        )
        .with_state(state)
}
