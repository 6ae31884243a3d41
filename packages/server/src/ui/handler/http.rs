//! HTTP endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::Html};

use crate::{infrastructure::dto::http::HealthDto, ui::state::AppState};

/// Embedded browser client served at `/`
const LANDING_PAGE: &str = include_str!("../../../static/index.html");

/// Landing page used when no `--landing-page` file is configured
pub async fn landing_page() -> Html<&'static str> {
    Html(LANDING_PAGE)
}

/// Health check endpoint
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HealthDto>, StatusCode> {
    match state.hub.stats().await {
        Ok(stats) => Ok(Json(stats.into())),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}
