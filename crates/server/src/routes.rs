use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{warn, Level};

use common::types::Health;

use crate::errors::PageError;
use crate::state::AppState;

pub mod entries;

/// Liveness plus a round trip to the pool.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Health>) {
    match state.db.ping().await {
        Ok(()) => (StatusCode::OK, Json(Health { status: "ok" })),
        Err(e) => {
            warn!(error = %e, "health check could not reach the database");
            (StatusCode::SERVICE_UNAVAILABLE, Json(Health { status: "unavailable" }))
        }
    }
}

async fn fallback() -> PageError {
    PageError::NotFound
}

/// Build the full application router: pages, HTMX fragments, health and static assets.
pub fn build_router(state: AppState) -> Router {
    let static_dir = ServeDir::new(&state.config.app.static_dir);

    Router::new()
        .route("/", get(entries::index))
        .route("/health", get(health))
        .route("/entries", get(entries::list).post(entries::create))
        .route("/entries/autocomplete", get(entries::autocomplete))
        .route("/:id", get(entries::show).delete(entries::delete))
        .route("/:id/edit", get(entries::edit_form))
        .route("/:id/update", post(entries::update))
        .nest_service("/static", static_dir)
        .fallback(fallback)
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
