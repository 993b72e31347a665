//! Poster rendering handlers.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use poster_common::{PosterError, WeatherRecord};
use renderer::RenderedPoster;

use crate::error::{ApiEnvelope, ApiError};
use crate::metrics::Timer;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DownloadData {
    pub download_url: String,
}

/// POST /api/v1/weather/poster - Render a poster and return the PNG
pub async fn poster_handler(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<WeatherRecord>, JsonRejection>,
) -> Result<Response, ApiError> {
    let poster = render(&state, payload).await?;

    Ok((
        [(header::CONTENT_TYPE, RenderedPoster::CONTENT_TYPE)],
        poster.into_bytes(),
    )
        .into_response())
}

/// POST /api/v1/weather/poster/url - Render, persist and return a download URL
pub async fn poster_url_handler(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<WeatherRecord>, JsonRejection>,
) -> Result<Json<ApiEnvelope<DownloadData>>, ApiError> {
    let poster = render(&state, payload).await?;

    let today = chrono::Local::now().date_naive();
    let file_name = state.storage.persist(poster.as_bytes(), today).await?;
    state.metrics.record_persisted(poster.len());

    Ok(Json(ApiEnvelope::success(
        "Poster generated",
        DownloadData {
            download_url: state.config.download_url(&file_name),
        },
    )))
}

/// Shared path of both poster routes.
async fn render(
    state: &Arc<AppState>,
    payload: Result<Json<WeatherRecord>, JsonRejection>,
) -> Result<RenderedPoster, ApiError> {
    state.metrics.record_request();

    let record = match payload {
        Ok(Json(record)) => record,
        Err(rejection) => {
            state.metrics.record_invalid_request();
            return Err(rejection.into());
        }
    };

    let renderer = Arc::clone(&state.renderer);
    let timer = Timer::start();
    let result = tokio::task::spawn_blocking(move || renderer.render_with_diagnostics(&record))
        .await
        .map_err(|e| ApiError::Internal(format!("render task failed: {}", e)))?;

    match result {
        Ok((poster, diagnostics)) => {
            state.metrics.record_render(timer.elapsed_us(), true).await;
            state.metrics.record_diagnostics(&diagnostics);
            Ok(poster)
        }
        Err(e @ PosterError::InvalidInput(_)) => {
            state.metrics.record_invalid_request();
            Err(e.into())
        }
        Err(e) => {
            state.metrics.record_render(timer.elapsed_us(), false).await;
            Err(e.into())
        }
    }
}
