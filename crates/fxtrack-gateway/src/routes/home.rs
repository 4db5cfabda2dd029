//! Root route: a static informational redirect, bypassing the core.

use axum::extract::State;
use axum::response::IntoResponse;

use crate::render;
use crate::state::AppState;

/// Serve the root info page.
pub async fn home_page(State(state): State<AppState>) -> impl IntoResponse {
    render::info_page(&state.config.info_url)
}
