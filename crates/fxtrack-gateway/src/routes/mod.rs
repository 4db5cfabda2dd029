//! Route definitions for the gateway.
//!
//! ## Routes
//!
//! - `GET /` - Info redirect page (bypasses the resolution engine)
//! - `GET /health` - Health check (JSON)
//! - `GET /robots.txt` - Crawler instructions
//! - `GET /{any supported path}` - Preview page (fallback handler)

mod health;
mod home;
pub mod preview;

use axum::Router;
use axum::response::IntoResponse;
use axum::routing::get;

use crate::state::AppState;

/// Build the complete gateway router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home::home_page))
        .route("/health", get(health::health_check))
        .route("/robots.txt", get(robots_txt))
        .fallback(preview::preview_handler)
        .with_state(state)
}

/// Serve robots.txt allowing all crawlers.
///
/// Crawlers must be able to fetch these pages for link previews to work.
async fn robots_txt() -> impl IntoResponse {
    (
        [("content-type", "text/plain; charset=utf-8")],
        "User-agent: *\nAllow: /\n",
    )
}
