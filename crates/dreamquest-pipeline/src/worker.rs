//! In-process work queue.
//!
//! Submission hands job ids to a [`ChannelDispatcher`]; a single [`Worker`]
//! drains the channel and runs up to `max_concurrent_jobs` pipelines at once.
//! A job id that is already running is dropped rather than run twice, and
//! failed jobs are not retried. A pipeline task that panics has its job
//! marked `failed`, so every started job ends `ready` or `failed`.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use dreamquest_core::clock::Clock;
use dreamquest_core::dispatch::JobDispatcher;
use dreamquest_core::error::DomainError;
use dreamquest_core::store::JobStore;
use tokio::sync::{Semaphore, mpsc};
use tokio::task::{self, JoinError, JoinSet};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::application::command_handlers::{PipelineCollaborators, fail_job, handle_process_job};
use crate::domain::commands::ProcessJob;

/// Dispatcher that enqueues job ids on a bounded channel.
#[derive(Debug, Clone)]
pub struct ChannelDispatcher {
    sender: mpsc::Sender<Uuid>,
}

impl ChannelDispatcher {
    /// Creates a dispatcher and the receiving end a [`Worker`] drains.
    #[must_use]
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<Uuid>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl JobDispatcher for ChannelDispatcher {
    async fn dispatch(&self, job_id: Uuid) -> Result<(), DomainError> {
        self.sender
            .send(job_id)
            .await
            .map_err(|_| DomainError::Infrastructure("work queue closed".into()))
    }
}

/// Set of job ids currently being processed.
#[derive(Debug, Default)]
struct InFlight {
    ids: Arc<Mutex<HashSet<Uuid>>>,
}

impl InFlight {
    /// Claims `job_id`, or returns `None` if it is already running.
    fn claim(&self, job_id: Uuid) -> Option<InFlightGuard> {
        let inserted = self
            .ids
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(job_id);
        inserted.then(|| InFlightGuard {
            ids: Arc::clone(&self.ids),
            job_id,
        })
    }
}

/// Releases its job id when dropped.
#[derive(Debug)]
struct InFlightGuard {
    ids: Arc<Mutex<HashSet<Uuid>>>,
    job_id: Uuid,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.ids
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.job_id);
    }
}

/// Runs the pipeline for every job id received from the queue.
pub struct Worker {
    clock: Arc<dyn Clock>,
    store: Arc<dyn JobStore>,
    collaborators: PipelineCollaborators,
    max_concurrent_jobs: usize,
}

impl fmt::Debug for Worker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Worker")
            .field("max_concurrent_jobs", &self.max_concurrent_jobs)
            .finish_non_exhaustive()
    }
}

impl Worker {
    /// Creates a worker. `max_concurrent_jobs` is clamped to at least 1.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        store: Arc<dyn JobStore>,
        collaborators: PipelineCollaborators,
        max_concurrent_jobs: usize,
    ) -> Self {
        Self {
            clock,
            store,
            collaborators,
            max_concurrent_jobs: max_concurrent_jobs.max(1),
        }
    }

    /// Drains `receiver` until every sender is dropped, then waits for the
    /// jobs still running.
    pub async fn run(self, mut receiver: mpsc::Receiver<Uuid>) {
        let permits = Arc::new(Semaphore::new(self.max_concurrent_jobs));
        let in_flight = InFlight::default();
        let mut running = HashMap::new();
        let mut tasks = JoinSet::new();
        let worker = Arc::new(self);

        info!(
            max_concurrent_jobs = worker.max_concurrent_jobs,
            "worker started"
        );

        while let Some(job_id) = receiver.recv().await {
            while let Some(joined) = tasks.try_join_next_with_id() {
                worker.settle(&mut running, joined).await;
            }

            let Some(guard) = in_flight.claim(job_id) else {
                warn!(%job_id, "job already in flight; dropping duplicate delivery");
                continue;
            };
            let Ok(permit) = Arc::clone(&permits).acquire_owned().await else {
                break;
            };

            let task_worker = Arc::clone(&worker);
            let handle = tasks.spawn(async move {
                let _permit = permit;
                task_worker.process(job_id).await;
            });
            running.insert(handle.id(), guard);
        }

        info!(running = tasks.len(), "work queue closed; draining");
        while let Some(joined) = tasks.join_next_with_id().await {
            worker.settle(&mut running, joined).await;
        }
        info!("worker stopped");
    }

    async fn process(&self, job_id: Uuid) {
        let command = ProcessJob {
            correlation_id: Uuid::new_v4(),
            job_id,
        };

        match handle_process_job(
            &command,
            self.clock.as_ref(),
            self.store.as_ref(),
            &self.collaborators,
        )
        .await
        {
            Ok(record) => info!(%job_id, stage = %record.stage(), "job processed"),
            Err(e) => error!(%job_id, error = %e, "job processing failed"),
        }
    }

    /// Releases a finished task's job id. A task that died without finishing
    /// has its job marked `failed` before the id is released.
    async fn settle(
        &self,
        running: &mut HashMap<task::Id, InFlightGuard>,
        joined: Result<(task::Id, ()), JoinError>,
    ) {
        let (task_id, crashed) = match joined {
            Ok((task_id, ())) => (task_id, None),
            Err(e) => (e.id(), Some(e)),
        };
        let Some(guard) = running.remove(&task_id) else {
            return;
        };
        let Some(crashed) = crashed else {
            return;
        };

        let job_id = guard.job_id;
        let message = crash_message(crashed);
        error!(%job_id, error = %message, "pipeline task died");
        if let Err(e) = fail_job(job_id, &message, self.clock.as_ref(), self.store.as_ref()).await {
            error!(%job_id, error = %e, "could not record job failure");
        }
    }
}

fn crash_message(error: JoinError) -> String {
    if !error.is_panic() {
        return format!("pipeline task aborted: {error}");
    }
    let payload = error.into_panic();
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_owned());
    format!("pipeline task panicked: {detail}")
}
