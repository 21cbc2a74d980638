//! Command handlers for the Job Submission context.

use dreamquest_core::clock::Clock;
use dreamquest_core::command::Command;
use dreamquest_core::dispatch::JobDispatcher;
use dreamquest_core::error::DomainError;
use dreamquest_core::job::JobRecord;
use dreamquest_core::store::{JOB_TTL, JobStore};
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::domain::commands::SubmitJob;
use crate::domain::validation::validate;

/// Handles the `SubmitJob` command: validates the input, writes the `queued`
/// record, then hands the new job id to the work queue.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the input is rejected (nothing is
/// written), and `DomainError::Infrastructure` if the record cannot be written
/// or the job cannot be enqueued. In the latter case the record is marked
/// `failed` with the dispatch error.
#[instrument(skip_all, fields(correlation_id = %command.correlation_id))]
pub async fn handle_submit_job(
    command: &SubmitJob,
    clock: &dyn Clock,
    store: &dyn JobStore,
    dispatcher: &dyn JobDispatcher,
) -> Result<JobRecord, DomainError> {
    validate(&command.input)?;

    let job_id = Uuid::new_v4();
    let mut record = JobRecord::queued(job_id, command.input.clone(), clock.now());
    store.set(&record, JOB_TTL).await?;

    if let Err(e) = dispatcher.dispatch(job_id).await {
        error!(%job_id, error = %e, "could not enqueue job");
        record.fail(e.to_string(), clock.now())?;
        if let Err(write_err) = store.set(&record, JOB_TTL).await {
            error!(%job_id, error = %write_err, "could not record enqueue failure");
        }
        return Err(DomainError::Infrastructure(format!(
            "could not enqueue job {job_id}: {e}"
        )));
    }

    info!(
        %job_id,
        command = command.command_type(),
        output_type = ?command.input.output_type,
        "job queued"
    );
    Ok(record)
}
