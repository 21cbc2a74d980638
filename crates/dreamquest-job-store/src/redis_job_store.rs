//! Redis implementation of the `JobStore` trait.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use tracing::{debug, info};
use uuid::Uuid;

use dreamquest_core::error::DomainError;
use dreamquest_core::job::JobRecord;
use dreamquest_core::store::{JobStore, job_key};

/// Redis-backed job store.
///
/// Cloning is cheap; every clone shares the same multiplexed connection.
#[derive(Clone)]
pub struct RedisJobStore {
    conn: ConnectionManager,
}

impl fmt::Debug for RedisJobStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisJobStore")
            .field("connection", &"ConnectionManager")
            .finish()
    }
}

impl RedisJobStore {
    /// Wraps an existing connection.
    #[must_use]
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }

    /// Connects to the Redis server at `redis_url`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the URL is invalid or the
    /// server cannot be reached.
    pub async fn connect(redis_url: &str) -> Result<Self, DomainError> {
        let client = redis::Client::open(redis_url)
            .map_err(|e| DomainError::Infrastructure(format!("invalid Redis URL: {e}")))?;

        let conn = ConnectionManager::new(client)
            .await
            .map_err(|e| DomainError::Infrastructure(format!("failed to connect to Redis: {e}")))?;

        info!("connected to Redis job store");
        Ok(Self::new(conn))
    }
}

#[async_trait]
impl JobStore for RedisJobStore {
    async fn get(&self, job_id: Uuid) -> Result<Option<JobRecord>, DomainError> {
        let key = job_key(job_id);
        let mut conn = self.conn.clone();

        let data: Option<String> = conn
            .get(key.as_str())
            .await
            .map_err(|e| DomainError::Infrastructure(format!("Redis GET failed: {e}")))?;

        let Some(json) = data else {
            debug!(%key, "job record absent");
            return Ok(None);
        };

        serde_json::from_str(&json).map(Some).map_err(|e| {
            DomainError::Infrastructure(format!("job record deserialization failed: {e}"))
        })
    }

    async fn set(&self, record: &JobRecord, ttl: Duration) -> Result<(), DomainError> {
        let key = job_key(record.job_id());
        let json = serde_json::to_string(record).map_err(|e| {
            DomainError::Infrastructure(format!("job record serialization failed: {e}"))
        })?;
        let mut conn = self.conn.clone();

        conn.set_ex::<_, _, ()>(key.as_str(), json, ttl.as_secs())
            .await
            .map_err(|e| DomainError::Infrastructure(format!("Redis SETEX failed: {e}")))?;

        debug!(%key, stage = %record.stage(), ttl_secs = ttl.as_secs(), "job record written");
        Ok(())
    }
}
