//! Worker configuration loaded from environment variables.

use anyhow::bail;

/// Which extraction strategy this worker runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Classifier + structured solar API (default).
    Api,
    /// Headless-browser scraping of the rendered site.
    Browser,
}

/// Worker configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Redis connection URL (queue and cache).
    pub redis_url: String,

    /// Base URL of the solar data API.
    pub upstream_url: String,

    /// Public site base, rendered by the browser strategy.
    pub site_url: String,

    /// Bearer token for the solar API. Required for the API strategy.
    pub token: Option<String>,

    pub strategy: Strategy,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional (with defaults):
    /// - `FXTRACK_REDIS_URL`: Redis URL (default: "redis://127.0.0.1:6379")
    /// - `FXTRACK_UPSTREAM_URL`: solar API base (default: "https://solar.furtrack.com")
    /// - `FXTRACK_SITE_URL`: rendered-site base (default: "https://www.furtrack.com")
    /// - `FXTRACK_STRATEGY`: "api" or "browser" (default: "api")
    ///
    /// Required:
    /// - `FXTRACK_TOKEN`: solar API bearer token — startup-fatal when the
    ///   API strategy is selected, unused by the browser strategy.
    pub fn from_env() -> anyhow::Result<Self> {
        let redis_url = std::env::var("FXTRACK_REDIS_URL")
            .unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());

        let upstream_url = std::env::var("FXTRACK_UPSTREAM_URL")
            .unwrap_or_else(|_| "https://solar.furtrack.com".to_string())
            .trim_end_matches('/')
            .to_string();

        let site_url = std::env::var("FXTRACK_SITE_URL")
            .unwrap_or_else(|_| "https://www.furtrack.com".to_string())
            .trim_end_matches('/')
            .to_string();

        let strategy = match std::env::var("FXTRACK_STRATEGY").as_deref() {
            Ok("browser") => Strategy::Browser,
            Ok("api") | Err(_) => Strategy::Api,
            Ok(other) => bail!("unknown FXTRACK_STRATEGY '{other}' (expected api or browser)"),
        };

        let token = std::env::var("FXTRACK_TOKEN").ok().filter(|t| !t.is_empty());
        if strategy == Strategy::Api && token.is_none() {
            bail!("missing FXTRACK_TOKEN environment variable, required for the api strategy");
        }

        tracing::info!(
            redis_url = %redis_url,
            upstream_url = %upstream_url,
            site_url = %site_url,
            strategy = ?strategy,
            "worker configuration loaded"
        );

        Ok(Self {
            redis_url,
            upstream_url,
            site_url,
            token,
            strategy,
        })
    }
}
