//! Mock `JobStore` implementations for tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use dreamquest_core::error::DomainError;
use dreamquest_core::job::JobRecord;
use dreamquest_core::store::JobStore;
use uuid::Uuid;

/// A job store that keeps the latest record per job in memory and records
/// every `set` call, so tests can observe each intermediate write.
#[derive(Debug, Default)]
pub struct RecordingJobStore {
    records: Mutex<HashMap<Uuid, JobRecord>>,
    writes: Mutex<Vec<(JobRecord, Duration)>>,
}

impl RecordingJobStore {
    /// Create an empty recording store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with `record`. The seed does not count as a write.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn with_record(record: JobRecord) -> Self {
        let store = Self::default();
        store
            .records
            .lock()
            .unwrap()
            .insert(record.job_id(), record);
        store
    }

    /// Returns a snapshot of every record written, in write order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn writes(&self) -> Vec<JobRecord> {
        self.writes
            .lock()
            .unwrap()
            .iter()
            .map(|(record, _)| record.clone())
            .collect()
    }

    /// Returns the TTL passed with every write, in write order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn ttls(&self) -> Vec<Duration> {
        self.writes.lock().unwrap().iter().map(|(_, ttl)| *ttl).collect()
    }

    /// Returns the latest record for `job_id`, if any.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn latest(&self, job_id: Uuid) -> Option<JobRecord> {
        self.records.lock().unwrap().get(&job_id).cloned()
    }
}

#[async_trait]
impl JobStore for RecordingJobStore {
    async fn get(&self, job_id: Uuid) -> Result<Option<JobRecord>, DomainError> {
        Ok(self.records.lock().unwrap().get(&job_id).cloned())
    }

    async fn set(&self, record: &JobRecord, ttl: Duration) -> Result<(), DomainError> {
        self.records
            .lock()
            .unwrap()
            .insert(record.job_id(), record.clone());
        self.writes.lock().unwrap().push((record.clone(), ttl));
        Ok(())
    }
}

/// A job store that never finds anything and silently accepts writes.
/// Useful for testing "job not found" scenarios.
#[derive(Debug)]
pub struct EmptyJobStore;

#[async_trait]
impl JobStore for EmptyJobStore {
    async fn get(&self, _job_id: Uuid) -> Result<Option<JobRecord>, DomainError> {
        Ok(None)
    }

    async fn set(&self, _record: &JobRecord, _ttl: Duration) -> Result<(), DomainError> {
        Ok(())
    }
}

/// A job store that always returns an infrastructure error. Useful for
/// testing error-handling paths.
#[derive(Debug)]
pub struct FailingJobStore;

#[async_trait]
impl JobStore for FailingJobStore {
    async fn get(&self, _job_id: Uuid) -> Result<Option<JobRecord>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn set(&self, _record: &JobRecord, _ttl: Duration) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}
