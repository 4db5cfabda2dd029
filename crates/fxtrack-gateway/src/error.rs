//! Error types for the gateway.
//!
//! Errors are rendered as simple HTML error pages rather than JSON, since
//! this is a user-facing (and crawler-facing) HTML service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use fxtrack_core::QueueError;
use thiserror::Error;

use crate::render;

/// Gateway error type.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The path is outside the supported prefix allow-list; no job is
    /// submitted for it.
    #[error("unsupported path: {0}")]
    UnsupportedPath(String),

    /// The worker reported a resolution failure for this path.
    #[error("resolution failed: {0}")]
    ResolutionFailed(String),

    /// The wait for the job's completion exceeded the configured bound.
    #[error("queue timeout: {0}")]
    Timeout(#[from] QueueError),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, title, message) = match &self {
            Self::UnsupportedPath(path) => {
                tracing::debug!(path = %path, "rejected unsupported path");
                (
                    StatusCode::NOT_FOUND,
                    "Invalid URL",
                    "This is not a previewable furtrack.com path.".to_string(),
                )
            }
            Self::ResolutionFailed(msg) => {
                tracing::warn!(error = %msg, "worker reported resolution failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    "No preview could be generated for this page.".to_string(),
                )
            }
            Self::Timeout(QueueError::Timeout(job_id)) => {
                tracing::error!(job_id = %job_id, "timed out waiting for preview job");
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    "Timed Out",
                    "The preview took too long to resolve. Please try again later.".to_string(),
                )
            }
            Self::Timeout(err) => {
                tracing::error!(error = %err, "queue error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Service Unavailable",
                    "The preview service is temporarily unavailable.".to_string(),
                )
            }
        };

        (status, render::error_page(title, &message)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn unsupported_path_is_not_found() {
        let response = GatewayError::UnsupportedPath("/about".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn resolution_failure_is_internal_error() {
        let response =
            GatewayError::ResolutionFailed("No metadata found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn queue_timeout_is_gateway_timeout() {
        let response =
            GatewayError::Timeout(QueueError::Timeout(Uuid::new_v4())).into_response();
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    }
}
