//! In-memory implementation of the `JobStore` trait.
//!
//! Mirrors the Redis backend: records are held as JSON strings under the
//! same keys, and a record is gone once its TTL has elapsed on the injected
//! clock. Used when no Redis URL is configured, and in tests.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use dreamquest_core::clock::Clock;
use dreamquest_core::error::DomainError;
use dreamquest_core::job::JobRecord;
use dreamquest_core::store::{JobStore, job_key};

#[derive(Debug)]
struct Entry {
    json: String,
    expires_at: DateTime<Utc>,
}

/// Process-local job store with per-key expiry.
pub struct InMemoryJobStore {
    clock: Arc<dyn Clock>,
    entries: RwLock<HashMap<String, Entry>>,
}

impl fmt::Debug for InMemoryJobStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryJobStore").finish_non_exhaustive()
    }
}

impl InMemoryJobStore {
    /// Creates an empty store that reads time from `clock`.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            entries: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl JobStore for InMemoryJobStore {
    async fn get(&self, job_id: Uuid) -> Result<Option<JobRecord>, DomainError> {
        let key = job_key(job_id);
        let now = self.clock.now();

        let json = {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            match entries.get(&key) {
                Some(entry) if entry.expires_at > now => Some(entry.json.clone()),
                Some(_) => None,
                None => return Ok(None),
            }
        };

        let Some(json) = json else {
            debug!(%key, "job record expired");
            let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
            if entries.get(&key).is_some_and(|entry| entry.expires_at <= now) {
                entries.remove(&key);
            }
            return Ok(None);
        };

        serde_json::from_str(&json).map(Some).map_err(|e| {
            DomainError::Infrastructure(format!("job record deserialization failed: {e}"))
        })
    }

    async fn set(&self, record: &JobRecord, ttl: Duration) -> Result<(), DomainError> {
        let expires_at = self
            .clock
            .expires_at(ttl)
            .ok_or_else(|| DomainError::Infrastructure(format!("invalid TTL: {ttl:?}")))?;
        let json = serde_json::to_string(record).map_err(|e| {
            DomainError::Infrastructure(format!("job record serialization failed: {e}"))
        })?;

        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(job_key(record.job_id()), Entry { json, expires_at });
        Ok(())
    }
}
