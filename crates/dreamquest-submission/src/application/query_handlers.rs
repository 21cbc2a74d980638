//! Query handlers for the Job Submission context.
//!
//! Read-only views over the latest job snapshot in the store.

use dreamquest_core::blueprint::Blueprint;
use dreamquest_core::error::DomainError;
use dreamquest_core::job::{JobResult, JobStage};
use dreamquest_core::store::JobStore;
use serde::Serialize;
use uuid::Uuid;

/// Read-only view of a job's progress.
///
/// `result` only appears once the job is ready and `error` only once it
/// has failed.
#[derive(Debug, Serialize)]
pub struct JobStatusView {
    /// The job identifier.
    pub job_id: Uuid,
    /// The current stage.
    pub status: JobStage,
    /// Progress checkpoint, 0-100.
    pub progress: u8,
    /// The final output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<JobResult>,
    /// Why the job failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Retrieves the status of a job.
///
/// # Errors
///
/// Returns `DomainError::JobNotFound` if no record exists or it has expired.
pub async fn get_job_status(
    job_id: Uuid,
    store: &dyn JobStore,
) -> Result<JobStatusView, DomainError> {
    let record = store
        .get(job_id)
        .await?
        .ok_or(DomainError::JobNotFound(job_id))?;

    Ok(JobStatusView {
        job_id,
        status: record.stage(),
        progress: record.progress(),
        result: record
            .result()
            .filter(|_| record.stage() == JobStage::Ready)
            .cloned(),
        error: record
            .error()
            .filter(|_| record.stage() == JobStage::Failed)
            .map(str::to_owned),
    })
}

/// Retrieves the blueprint of a finished game job.
///
/// # Errors
///
/// Returns `DomainError::JobNotFound` if no record exists,
/// `DomainError::JobNotReady` if the job has not reached `ready`, and
/// `DomainError::BlueprintUnavailable` if the result carries no blueprint.
pub async fn get_job_blueprint(
    job_id: Uuid,
    store: &dyn JobStore,
) -> Result<Blueprint, DomainError> {
    let record = store
        .get(job_id)
        .await?
        .ok_or(DomainError::JobNotFound(job_id))?;

    if record.stage() != JobStage::Ready {
        return Err(DomainError::JobNotReady(job_id));
    }

    record
        .result()
        .and_then(JobResult::blueprint)
        .cloned()
        .ok_or(DomainError::BlueprintUnavailable(job_id))
}
