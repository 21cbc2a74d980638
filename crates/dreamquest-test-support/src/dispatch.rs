//! Mock `JobDispatcher` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use dreamquest_core::dispatch::JobDispatcher;
use dreamquest_core::error::DomainError;
use uuid::Uuid;

/// A dispatcher that records every job id it is handed.
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    dispatched: Mutex<Vec<Uuid>>,
}

impl RecordingDispatcher {
    /// Create an empty recording dispatcher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the job ids dispatched so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn dispatched(&self) -> Vec<Uuid> {
        self.dispatched.lock().unwrap().clone()
    }
}

#[async_trait]
impl JobDispatcher for RecordingDispatcher {
    async fn dispatch(&self, job_id: Uuid) -> Result<(), DomainError> {
        self.dispatched.lock().unwrap().push(job_id);
        Ok(())
    }
}

/// A dispatcher whose queue is always unavailable.
#[derive(Debug)]
pub struct FailingDispatcher;

#[async_trait]
impl JobDispatcher for FailingDispatcher {
    async fn dispatch(&self, _job_id: Uuid) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("work queue closed".into()))
    }
}
