//! Shared preview result cache over Redis.
//!
//! Keys are normalized request paths, values are serialized
//! [`PreviewResult`]s, and every entry carries the same fixed 24h TTL.
//! Entries are immutable blobs overwritten whole; last-writer-wins is
//! acceptable because any two writers computed the same resource. Error
//! results are never written (the engine enforces this), so a hit always
//! deserializes to a successful result.

use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use thiserror::Error;

use crate::preview::PreviewResult;

/// Cache lifetime for a resolved preview.
pub const RESULT_TTL_SECS: u64 = 24 * 60 * 60;

/// Store failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("cache entry error: {0}")]
    Entry(#[from] serde_json::Error),
}

/// Handle to the shared preview cache.
#[derive(Clone)]
pub struct PreviewStore {
    conn: ConnectionManager,
}

impl PreviewStore {
    /// Connect to Redis at `url`.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let client = redis::Client::open(url)?;
        let conn = client.get_connection_manager().await?;
        Ok(Self { conn })
    }

    /// Look up a cached result by normalized path.
    ///
    /// A corrupt entry is logged and reported as a miss so the caller
    /// recomputes and overwrites it.
    pub async fn get(&mut self, path: &str) -> Result<Option<PreviewResult>, StoreError> {
        let raw: Option<String> = self.conn.get(path).await?;
        let Some(raw) = raw else {
            tracing::debug!(key = %path, "cache miss");
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(result) => {
                tracing::debug!(key = %path, "cache hit");
                Ok(Some(result))
            }
            Err(e) => {
                tracing::warn!(key = %path, error = %e, "failed to deserialize cached entry");
                Ok(None)
            }
        }
    }

    /// Write a result under the normalized path with the fixed TTL.
    pub async fn put(&mut self, path: &str, result: &PreviewResult) -> Result<(), StoreError> {
        let json = serde_json::to_string(result)?;
        let _: () = self.conn.set_ex(path, json, RESULT_TTL_SECS).await?;
        tracing::debug!(key = %path, ttl_secs = RESULT_TTL_SECS, "cached result");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::{CardType, PageMeta, build_result};

    fn sample_result() -> PreviewResult {
        build_result(&PageMeta {
            title: "alice's profile",
            description: "Check out alice's photography gallery on Furtrack",
            image: None,
            canonical_path: "/user/alice/photography",
            card: CardType::Summary,
            dimensions: None,
        })
    }

    #[tokio::test]
    #[ignore = "requires a running Redis instance"]
    async fn put_then_get_round_trips() {
        let mut store = PreviewStore::connect("redis://127.0.0.1:6379")
            .await
            .unwrap();
        let result = sample_result();
        store.put("/user/alice/photography", &result).await.unwrap();
        let cached = store.get("/user/alice/photography").await.unwrap();
        assert_eq!(cached, Some(result));
    }

    #[tokio::test]
    #[ignore = "requires a running Redis instance"]
    async fn unknown_key_is_a_miss() {
        let mut store = PreviewStore::connect("redis://127.0.0.1:6379")
            .await
            .unwrap();
        let cached = store.get("/p/999999999").await.unwrap();
        assert!(cached.is_none());
    }
}
