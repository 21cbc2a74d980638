//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

use crate::job::JobStage;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// No record exists for the job identifier (or it has expired).
    #[error("job not found: {0}")]
    JobNotFound(Uuid),

    /// The job exists but has not reached `ready`.
    #[error("job not ready: {0}")]
    JobNotReady(Uuid),

    /// The job is ready but its result carries no blueprint.
    #[error("blueprint not found for job {0}")]
    BlueprintUnavailable(Uuid),

    /// A validation error in submitted input.
    #[error("validation error: {0}")]
    Validation(String),

    /// A stage change that the job state machine does not allow.
    #[error("invalid transition for job {job_id}: {from} -> {to}")]
    InvalidTransition {
        /// The job being transitioned.
        job_id: Uuid,
        /// The stage the record is in.
        from: JobStage,
        /// The stage that was requested.
        to: JobStage,
    },

    /// A pipeline stage failed; the failure has already been recorded on the job.
    #[error("job {job_id} failed during {stage}: {message}")]
    StageFailed {
        /// The job that failed.
        job_id: Uuid,
        /// The stage that was running.
        stage: JobStage,
        /// The failure message, as recorded on the job.
        message: String,
    },

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
