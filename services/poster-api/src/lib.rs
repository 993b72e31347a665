//! Weather Poster API Service Library
//!
//! HTTP boundary around the [`renderer`] crate: accepts weather records as
//! JSON and answers with PNG posters, either inline or persisted under the
//! static directory.

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod state;
pub mod storage;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::state::AppState;

/// Build the service router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        // Landing
        .route("/", get(handlers::landing::landing_handler))
        // Posters
        .route(
            "/api/v1/weather/poster",
            post(handlers::poster::poster_handler),
        )
        .route(
            "/api/v1/weather/poster/url",
            post(handlers::poster::poster_url_handler),
        )
        // Health and metrics
        .route("/health", get(handlers::health::health_handler))
        .route("/metrics", get(handlers::health::metrics_handler))
        .route("/api/metrics", get(handlers::health::api_metrics_handler))
        // Static files, including persisted posters
        .nest_service("/static", static_files)
        // Middleware
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}
