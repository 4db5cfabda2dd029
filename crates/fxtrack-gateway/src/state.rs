//! Application state shared across all request handlers.

use std::sync::Arc;

use fxtrack_core::PreviewQueue;

use crate::config::Config;

/// Shared application state available to all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Handle to the shared job queue; cloned per request.
    pub queue: PreviewQueue,

    /// Application configuration.
    pub config: Arc<Config>,
}

impl AppState {
    /// Create application state from configuration and a connected queue.
    pub fn new(config: Config, queue: PreviewQueue) -> Self {
        Self {
            queue,
            config: Arc::new(config),
        }
    }
}
