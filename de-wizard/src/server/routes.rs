use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::services::{ServeDir, ServeFile};

use super::AppState;
use super::handlers;

/// All routes: the two API passthroughs, a health probe, and the static
/// bundle with `index.html` as fallback for client-side routes
pub fn build_router(state: AppState) -> Router {
    let static_dir = state.config.server.static_dir.clone();
    let body_limit = state.config.server.body_limit_bytes;

    let bundle = ServeDir::new(&static_dir)
        .fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/connect", post(handlers::connect))
        .route("/api/dataextensions", post(handlers::create_data_extensions))
        .layer(DefaultBodyLimit::max(body_limit))
        .fallback_service(bundle)
        .with_state(state)
}
