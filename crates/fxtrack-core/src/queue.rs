//! Redis-backed job queue between the gateway and resolution workers.
//!
//! Jobs are JSON blobs on a Redis list; completions are delivered on a
//! per-job reply list keyed by the job's UUID. The gateway blocks on the
//! reply key with a bounded timeout; the worker blocks on the pending list
//! with a short poll timeout, and an empty poll doubles as the
//! queue-drained signal for idle resource shutdown.
//!
//! Jobs may complete out of submission order; correlation is by job id
//! only. An abandoned reply (gateway timed out first) expires on its own.

use std::time::Duration;

use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::preview::PreviewResult;

/// Pending-job list key.
const JOBS_KEY: &str = "fxtrack:jobs";

/// Reply-list key prefix; the job id completes the key.
const RESULT_KEY_PREFIX: &str = "fxtrack:result:";

/// How long an unclaimed completion lingers before Redis drops it.
const RESULT_RETENTION_SECS: i64 = 300;

/// Queue failure.
#[derive(Debug, Error)]
pub enum QueueError {
    /// The wait for a job's completion exceeded the caller's bound.
    /// The job itself is abandoned, not cancelled.
    #[error("timed out waiting for job {0}")]
    Timeout(Uuid),

    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("job payload error: {0}")]
    Payload(#[from] serde_json::Error),
}

/// A unit of resolution work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Queue-assigned identity; completions are correlated by this id.
    pub id: Uuid,
    /// The original request path.
    pub url: String,
}

/// Handle to the shared work queue.
///
/// Cheap to clone; all clones share one auto-reconnecting connection for
/// ordinary commands. Completion waits each get a dedicated connection,
/// because a blocking pop would stall every other command multiplexed onto
/// the shared one.
#[derive(Clone)]
pub struct PreviewQueue {
    client: redis::Client,
    conn: ConnectionManager,
}

impl PreviewQueue {
    /// Connect to Redis at `url`.
    pub async fn connect(url: &str) -> Result<Self, QueueError> {
        let client = redis::Client::open(url)?;
        let conn = client.get_connection_manager().await?;
        Ok(Self { client, conn })
    }

    fn result_key(id: Uuid) -> String {
        format!("{RESULT_KEY_PREFIX}{id}")
    }

    /// Submit a job and block until its completion arrives or `timeout`
    /// elapses.
    ///
    /// On timeout the job keeps running in whichever worker picked it up;
    /// its eventual completion expires unread.
    pub async fn submit_and_wait(
        &mut self,
        url: &str,
        timeout: Duration,
    ) -> Result<PreviewResult, QueueError> {
        let job = Job {
            id: Uuid::new_v4(),
            url: url.to_string(),
        };
        let payload = serde_json::to_string(&job)?;
        let depth: i64 = self.conn.rpush(JOBS_KEY, payload).await?;
        tracing::debug!(job_id = %job.id, url = %job.url, depth, "job submitted");

        let mut waiter = self.client.get_multiplexed_async_connection().await?;
        let reply: Option<(String, String)> = waiter
            .blpop(Self::result_key(job.id), timeout.as_secs_f64())
            .await?;
        match reply {
            Some((_, raw)) => Ok(serde_json::from_str(&raw)?),
            None => Err(QueueError::Timeout(job.id)),
        }
    }

    /// Pop the next pending job, blocking up to `poll`.
    ///
    /// `Ok(None)` means the queue stayed empty for the whole poll window —
    /// the drained signal.
    pub async fn next_job(&mut self, poll: Duration) -> Result<Option<Job>, QueueError> {
        let popped: Option<(String, String)> =
            self.conn.blpop(JOBS_KEY, poll.as_secs_f64()).await?;
        match popped {
            Some((_, raw)) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Deliver a job's completion to whoever is waiting on it.
    pub async fn complete(&mut self, job: &Job, result: &PreviewResult) -> Result<(), QueueError> {
        let payload = serde_json::to_string(result)?;
        let key = Self::result_key(job.id);
        redis::pipe()
            .lpush(&key, payload)
            .ignore()
            .expire(&key, RESULT_RETENTION_SECS)
            .ignore()
            .query_async::<()>(&mut self.conn)
            .await?;
        Ok(())
    }

    /// Number of jobs waiting to be picked up.
    pub async fn depth(&mut self) -> Result<u64, QueueError> {
        Ok(self.conn.llen(JOBS_KEY).await?)
    }
}
