//! Error types for the resolution worker.
//!
//! Every variant is caught at the job boundary and converted to a
//! structured error result; nothing here may take the worker process down
//! once it is past startup.

use fxtrack_core::{ClassifyError, PreviewResult, StoreError};
use thiserror::Error;

/// Resolution failure for a single job.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The path failed classification.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] ClassifyError),

    /// Upstream returned a non-success status or was missing a required
    /// record. Never cached; future requests retry upstream.
    #[error("no metadata found: {0}")]
    NoData(String),

    /// Transport-level upstream failure.
    #[error("upstream error: {0}")]
    Upstream(#[from] reqwest::Error),

    /// The rendered page never reached its ready signal within the bound.
    #[error("render timed out after {0}ms")]
    RenderTimeout(u64),

    /// Headless browser failure outside the timeout path.
    #[error("browser error: {0}")]
    Browser(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl ResolveError {
    /// Convert to the structured error result handed back to the gateway.
    ///
    /// Classification failures keep their distinct message; everything else
    /// collapses to the generic not-found wording the site has always used.
    pub fn into_result(self) -> PreviewResult {
        match self {
            Self::InvalidUrl(_) => PreviewResult::error("Invalid URL"),
            _ => PreviewResult::error("No metadata found"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fxtrack_core::classify;

    #[test]
    fn invalid_url_keeps_its_message() {
        let err = ResolveError::from(classify("/about").unwrap_err());
        let result = err.into_result();
        assert_eq!(result.message.as_deref(), Some("Invalid URL"));
        assert!(!result.is_ok());
    }

    #[test]
    fn no_data_maps_to_generic_message() {
        let result = ResolveError::NoData("post 7".to_string()).into_result();
        assert_eq!(result.message.as_deref(), Some("No metadata found"));
    }

    #[test]
    fn render_timeout_maps_to_generic_message() {
        let result = ResolveError::RenderTimeout(5000).into_result();
        assert_eq!(result.message.as_deref(), Some("No metadata found"));
        assert!(!result.is_ok());
    }

    #[test]
    fn display_includes_timeout_bound() {
        let err = ResolveError::RenderTimeout(5000);
        assert!(err.to_string().contains("5000"));
    }
}
