//! Job store abstraction.
//!
//! A key-value backend holding one full record per job under
//! [`job_key`], with per-key expiry. Every write overwrites the whole record
//! and re-applies the TTL; there is no partial update.

use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::DomainError;
use crate::job::JobRecord;

/// Retention window applied on every write.
pub const JOB_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Store key for a job record.
#[must_use]
pub fn job_key(job_id: Uuid) -> String {
    format!("job:{job_id}")
}

/// Repository trait for reading and overwriting job records.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Loads the record for `job_id`, or `None` if it is absent or expired.
    async fn get(&self, job_id: Uuid) -> Result<Option<JobRecord>, DomainError>;

    /// Overwrites the record stored under its job id, resetting its expiry to `ttl`.
    async fn set(&self, record: &JobRecord, ttl: Duration) -> Result<(), DomainError>;
}
