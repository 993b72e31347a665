//! Landing page handler.

use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct LandingResponse {
    pub message: &'static str,
}

/// GET / - Welcome message
pub async fn landing_handler() -> Json<LandingResponse> {
    Json(LandingResponse {
        message: "Welcome to Weather Poster API",
    })
}
