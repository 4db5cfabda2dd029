//! The queue-driven resolution engine.
//!
//! One engine instance owns one extractor strategy and loops on the shared
//! queue. Every failure inside a job is converted to a structured error
//! result at the job boundary — a bad job must never take the process down.
//! Error results are never cached, so a retry hits upstream again instead
//! of pinning a negative entry.

use std::time::Duration;

use fxtrack_core::{PreviewQueue, PreviewResult, PreviewStore, normalize_path};

use crate::error::ResolveError;
use crate::resolve::Extractor;

/// How long one queue poll blocks before reporting the queue drained.
const QUEUE_POLL: Duration = Duration::from_secs(5);

/// The resolution engine for one worker process.
pub struct Engine<E: Extractor> {
    queue: PreviewQueue,
    store: PreviewStore,
    extractor: E,
}

impl<E: Extractor> Engine<E> {
    pub fn new(queue: PreviewQueue, store: PreviewStore, extractor: E) -> Self {
        Self {
            queue,
            store,
            extractor,
        }
    }

    /// Run until ctrl-c.
    ///
    /// An empty poll is the queue-drained signal and triggers the
    /// extractor's idle hook (browser shutdown in the scraping strategy).
    pub async fn run(mut self) -> anyhow::Result<()> {
        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        tracing::info!("resolution engine started");
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("shutdown signal received");
                    break;
                }
                popped = self.queue.next_job(QUEUE_POLL) => {
                    match popped {
                        Ok(Some(job)) => {
                            let result = self.resolve(&job.url).await;
                            if let Err(e) = self.queue.complete(&job, &result).await {
                                tracing::error!(job_id = %job.id, error = %e, "failed to deliver completion");
                            }
                        }
                        Ok(None) => self.extractor.on_idle().await,
                        Err(e) => {
                            tracing::error!(error = %e, "queue poll failed");
                            tokio::time::sleep(Duration::from_secs(1)).await;
                        }
                    }
                }
            }
        }

        self.extractor.on_idle().await;
        Ok(())
    }

    /// Resolve one request path, fail-closed.
    pub async fn resolve(&mut self, url: &str) -> PreviewResult {
        let path = normalize_path(url);
        tracing::info!(path = %path, "processing job");

        // Cache first; hits are always successful results because errors
        // are never written.
        match self.store.get(&path).await {
            Ok(Some(cached)) => return cached,
            Ok(None) => {}
            // A broken cache read degrades to a recompute, not a failure.
            Err(e) => tracing::warn!(path = %path, error = %e, "cache read failed"),
        }

        match self.extractor.extract(&path).await {
            Ok(result) => {
                if should_cache(&result) {
                    if let Err(e) = self.store.put(&path, &result).await {
                        tracing::warn!(path = %path, error = %e, "cache write failed");
                    }
                }
                result
            }
            Err(e) => {
                log_failure(&path, &e);
                e.into_result()
            }
        }
    }
}

/// Only successful results may enter the cache.
fn should_cache(result: &PreviewResult) -> bool {
    result.is_ok()
}

fn log_failure(path: &str, error: &ResolveError) {
    match error {
        ResolveError::InvalidUrl(_) | ResolveError::NoData(_) => {
            tracing::info!(path = %path, error = %error, "resolution produced no preview");
        }
        _ => tracing::error!(path = %path, error = %error, "resolution failed"),
    }
}
