//! Health check endpoint.

use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;

use crate::state::AppState;

/// Report service liveness and queue depth.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let mut queue = state.queue.clone();
    match queue.depth().await {
        Ok(depth) => Json(serde_json::json!({
            "status": "ok",
            "queue_depth": depth,
        }))
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "health check queue probe failed");
            Json(serde_json::json!({
                "status": "degraded",
                "error": e.to_string(),
            }))
            .into_response()
        }
    }
}
