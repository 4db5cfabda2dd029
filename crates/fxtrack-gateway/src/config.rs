//! Gateway configuration loaded from environment variables.

use std::time::Duration;

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:3000").
    pub bind_addr: String,

    /// Redis connection URL (job queue).
    pub redis_url: String,

    /// How long to wait for a job's completion before answering with a
    /// generic failure. The job itself is abandoned, not cancelled.
    pub job_timeout: Duration,

    /// Where the root path redirects to.
    pub info_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// All optional with local-development defaults:
    /// - `FXTRACK_BIND_ADDR`: bind address (default: "0.0.0.0:3000")
    /// - `FXTRACK_REDIS_URL`: Redis URL (default: "redis://127.0.0.1:6379")
    /// - `FXTRACK_JOB_TIMEOUT_SECS`: completion wait bound (default: 10)
    /// - `FXTRACK_INFO_URL`: root redirect target (default: the site itself)
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr =
            std::env::var("FXTRACK_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let redis_url = std::env::var("FXTRACK_REDIS_URL")
            .unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());

        let job_timeout_secs: u64 = std::env::var("FXTRACK_JOB_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        let info_url = std::env::var("FXTRACK_INFO_URL")
            .unwrap_or_else(|_| "https://www.furtrack.com".to_string());

        tracing::info!(
            bind_addr = %bind_addr,
            redis_url = %redis_url,
            job_timeout_secs,
            "gateway configuration loaded"
        );

        Ok(Self {
            bind_addr,
            redis_url,
            job_timeout: Duration::from_secs(job_timeout_secs),
            info_url,
        })
    }
}
