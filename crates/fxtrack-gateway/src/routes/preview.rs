//! Main preview route handler.
//!
//! Catches every path not matched by a static route, submits it to the
//! resolution queue, and renders the completed preview. Completion is
//! correlated by job id, never by arrival order, so out-of-order worker
//! completions are fine.

use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};

use fxtrack_core::PreviewResult;

use crate::error::GatewayError;
use crate::render;
use crate::state::AppState;

/// Path prefixes the gateway forwards to the resolution engine.
const ALLOWED_PREFIXES: &[&str] = &["/p", "/user", "/index"];

/// Handle a preview request for any site path.
///
/// This is the main entry point. It:
/// 1. Rejects paths outside the supported prefix allow-list (404)
/// 2. Submits a resolution job and awaits its completion with a timeout
/// 3. Maps an error result to a 5xx page (the worker never caches those)
/// 4. Renders the meta/redirect page with cache headers and an ETag
pub async fn preview_handler(
    State(state): State<AppState>,
    uri: Uri,
) -> Result<Response, GatewayError> {
    let path = uri.path();

    if !is_allowed(path) {
        return Err(GatewayError::UnsupportedPath(path.to_string()));
    }

    let mut queue = state.queue.clone();
    let result = queue
        .submit_and_wait(path, state.config.job_timeout)
        .await
        .map_err(GatewayError::Timeout)?;

    if !result.is_ok() {
        return Err(GatewayError::ResolutionFailed(
            result
                .message
                .unwrap_or_else(|| "No metadata found".to_string()),
        ));
    }

    tracing::debug!(path = %path, canonical = %result.canonical_url, "preview resolved");
    Ok(build_response(&result))
}

/// True when the path starts with one of the supported prefixes.
fn is_allowed(path: &str) -> bool {
    ALLOWED_PREFIXES.iter().any(|p| path.starts_with(p))
}

/// Build the HTML response with cache headers and an ETag.
fn build_response(result: &PreviewResult) -> Response {
    let html = render::preview_page(result).into_string();

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );

    // The worker caches results for 24h; let CDNs do the same while
    // browsers revalidate more often.
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("public, max-age=300, s-maxage=86400"),
    );

    // ETag (xxHash of content)
    let hash = xxhash_rust::xxh3::xxh3_64(html.as_bytes());
    let etag = format!("\"{}\"", hex_fmt::HexFmt(&hash.to_be_bytes()));
    if let Ok(val) = HeaderValue::from_str(&etag) {
        headers.insert(header::ETAG, val);
    }

    (StatusCode::OK, headers, html).into_response()
}
