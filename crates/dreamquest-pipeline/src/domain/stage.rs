//! Stage failures.
//!
//! Every error raised while a stage runs is tagged with that stage, so the
//! orchestrator can record it on the job and report where the job stopped.

use std::fmt;

use dreamquest_core::job::JobStage;

/// A failure raised while `stage` was running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageFailure {
    /// The stage that was running.
    pub stage: JobStage,
    /// Human-readable failure message; recorded verbatim on the job.
    pub message: String,
}

impl StageFailure {
    /// Creates a failure for `stage`.
    #[must_use]
    pub fn new(stage: JobStage, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
        }
    }
}

impl fmt::Display for StageFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.stage, self.message)
    }
}

/// Result of running (part of) a stage.
pub type StageOutcome<T> = Result<T, StageFailure>;

/// Tags an error with the stage it happened in.
pub trait AtStage<T> {
    /// Converts the error side into a [`StageFailure`] for `stage`.
    ///
    /// # Errors
    ///
    /// Returns the tagged failure when `self` is an error.
    fn at_stage(self, stage: JobStage) -> StageOutcome<T>;
}

impl<T, E: fmt::Display> AtStage<T> for Result<T, E> {
    fn at_stage(self, stage: JobStage) -> StageOutcome<T> {
        self.map_err(|e| StageFailure::new(stage, e.to_string()))
    }
}
