//! Work dispatch abstraction.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::DomainError;

/// Hands a job identifier to whatever will later run the pipeline for it.
///
/// Delivery is at-least-once; ordering across distinct jobs is not guaranteed.
#[async_trait]
pub trait JobDispatcher: Send + Sync {
    /// Enqueues `job_id` for processing.
    async fn dispatch(&self, job_id: Uuid) -> Result<(), DomainError>;
}
