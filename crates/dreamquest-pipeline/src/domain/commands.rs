//! Commands for the Pipeline Orchestration context.

use dreamquest_core::command::Command;
use uuid::Uuid;

/// Command to run the pipeline for one job.
#[derive(Debug, Clone)]
pub struct ProcessJob {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The job to process.
    pub job_id: Uuid,
}

impl Command for ProcessJob {
    fn command_type(&self) -> &'static str {
        "pipeline.process_job"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn job_id(&self) -> Option<Uuid> {
        Some(self.job_id)
    }
}
