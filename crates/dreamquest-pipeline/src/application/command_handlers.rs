//! Command handlers for the Pipeline Orchestration context.
//!
//! `handle_process_job` drives one job through `analyzing`, `generating`
//! and `building`. Every stage change is a load-modify-write against the job
//! store, written before the stage's work starts, so pollers always see the
//! stage that is actually running. The first failure is recorded on the job
//! and stops the pipeline.

use std::fmt;
use std::sync::Arc;

use dreamquest_core::blueprint::Blueprint;
use dreamquest_core::clock::Clock;
use dreamquest_core::collaborator::{
    AssetGenerator, AssetManifest, CollaboratorError, DreamAnalyzer, MediaGenerator, MediaKind,
    Transcriber, WorldBuilder,
};
use dreamquest_core::command::Command;
use dreamquest_core::error::DomainError;
use dreamquest_core::job::{JobInput, JobRecord, JobResult, JobStage, OutputType};
use dreamquest_core::store::{JOB_TTL, JobStore};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::domain::commands::ProcessJob;
use crate::domain::stage::{AtStage, StageFailure, StageOutcome};

/// The external collaborators a pipeline run calls into.
#[derive(Clone)]
pub struct PipelineCollaborators {
    /// Turns audio-only submissions into dream text.
    pub transcriber: Arc<dyn Transcriber>,
    /// Turns dream text into a blueprint.
    pub analyzer: Arc<dyn DreamAnalyzer>,
    /// Produces the asset manifest for game outputs.
    pub assets: Arc<dyn AssetGenerator>,
    /// Builds the playable world for game outputs.
    pub world_builder: Arc<dyn WorldBuilder>,
    /// Composes and renders image and video outputs.
    pub media: Arc<dyn MediaGenerator>,
}

impl fmt::Debug for PipelineCollaborators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineCollaborators").finish_non_exhaustive()
    }
}

/// What the generating stage hands to the building stage.
enum Generated {
    World(AssetManifest),
    Media { kind: MediaKind, prompt: String },
}

fn media_kind(output_type: OutputType) -> Option<MediaKind> {
    match output_type {
        OutputType::Game => None,
        OutputType::Image => Some(MediaKind::Image),
        OutputType::Video => Some(MediaKind::Video),
    }
}

/// Handles the `ProcessJob` command: runs every remaining stage for the job
/// and returns the final record.
///
/// A job that is already `ready` or `failed` is returned unchanged without
/// any write. A job redelivered mid-flight is rerun from the start, but stage
/// writes at or below its stored stage are skipped, so its stage never moves
/// backwards.
///
/// # Errors
///
/// Returns `DomainError::JobNotFound` if no record exists (nothing is
/// written), `DomainError::Infrastructure` if the initial read fails, and
/// `DomainError::StageFailed` once a stage failure has been recorded on the
/// job.
#[instrument(
    skip_all,
    fields(job_id = %command.job_id, correlation_id = %command.correlation_id)
)]
pub async fn handle_process_job(
    command: &ProcessJob,
    clock: &dyn Clock,
    store: &dyn JobStore,
    collaborators: &PipelineCollaborators,
) -> Result<JobRecord, DomainError> {
    let record = store
        .get(command.job_id)
        .await?
        .ok_or(DomainError::JobNotFound(command.job_id))?;

    if record.stage().is_terminal() {
        info!(stage = %record.stage(), "job already finished; nothing to do");
        return Ok(record);
    }

    info!(
        command = command.command_type(),
        stage = %record.stage(),
        output_type = ?record.input().output_type,
        "processing job"
    );

    match run_stages(command.job_id, record.input(), clock, store, collaborators).await {
        Ok(record) => {
            info!(
                artifact = record.result().map_or("", JobResult::artifact_url),
                "job ready"
            );
            Ok(record)
        }
        Err(failure) => Err(record_failure(command.job_id, failure, clock, store).await),
    }
}

async fn run_stages(
    job_id: Uuid,
    input: &JobInput,
    clock: &dyn Clock,
    store: &dyn JobStore,
    collaborators: &PipelineCollaborators,
) -> StageOutcome<JobRecord> {
    enter_stage(job_id, JobStage::Analyzing, clock, store).await?;
    let dream_text = resolve_dream_text(input, collaborators.transcriber.as_ref())
        .await
        .at_stage(JobStage::Analyzing)?;
    let blueprint = collaborators
        .analyzer
        .analyze(&dream_text, input.style, input.mood, input.length)
        .await
        .at_stage(JobStage::Analyzing)?;
    debug!(world = blueprint.world.as_str(), "blueprint extracted");

    enter_stage(job_id, JobStage::Generating, clock, store).await?;
    let generated = generate(input.output_type, &dream_text, &blueprint, collaborators)
        .await
        .at_stage(JobStage::Generating)?;

    enter_stage(job_id, JobStage::Building, clock, store).await?;
    let result = build(job_id, blueprint, generated, collaborators)
        .await
        .at_stage(JobStage::Building)?;

    finish(job_id, result, clock, store).await
}

async fn resolve_dream_text(
    input: &JobInput,
    transcriber: &dyn Transcriber,
) -> Result<String, CollaboratorError> {
    if let Some(text) = input.dream_text.as_deref().filter(|t| !t.trim().is_empty()) {
        return Ok(text.to_owned());
    }

    match input.audio_url.as_deref() {
        Some(audio_url) => {
            debug!("transcribing audio-only submission");
            transcriber.transcribe(audio_url).await
        }
        None => Err(CollaboratorError::Failed(
            "job has neither dream text nor audio".to_owned(),
        )),
    }
}

async fn generate(
    output_type: OutputType,
    dream_text: &str,
    blueprint: &Blueprint,
    collaborators: &PipelineCollaborators,
) -> Result<Generated, CollaboratorError> {
    match media_kind(output_type) {
        None => {
            let manifest = collaborators.assets.generate(blueprint).await?;
            debug!(models = manifest.models.len(), "assets generated");
            Ok(Generated::World(manifest))
        }
        Some(kind) => {
            let prompt = collaborators
                .media
                .compose(kind, dream_text, blueprint)
                .await?;
            Ok(Generated::Media { kind, prompt })
        }
    }
}

async fn build(
    job_id: Uuid,
    blueprint: Blueprint,
    generated: Generated,
    collaborators: &PipelineCollaborators,
) -> Result<JobResult, CollaboratorError> {
    match generated {
        Generated::World(_) => {
            let webgl_url = collaborators.world_builder.build(job_id, &blueprint).await?;
            Ok(JobResult::Game {
                webgl_url,
                blueprint,
            })
        }
        Generated::Media {
            kind: MediaKind::Image,
            prompt,
        } => {
            let image_url = collaborators
                .media
                .render(MediaKind::Image, job_id, &prompt)
                .await?;
            Ok(JobResult::Image { image_url, prompt })
        }
        Generated::Media {
            kind: MediaKind::Video,
            prompt,
        } => {
            let video_url = collaborators
                .media
                .render(MediaKind::Video, job_id, &prompt)
                .await?;
            Ok(JobResult::Video {
                video_url,
                storyboard: prompt,
            })
        }
    }
}

async fn load(job_id: Uuid, stage: JobStage, store: &dyn JobStore) -> StageOutcome<JobRecord> {
    store
        .get(job_id)
        .await
        .at_stage(stage)?
        .ok_or_else(|| StageFailure::new(stage, DomainError::JobNotFound(job_id).to_string()))
}

/// Moves the stored record to `stage`, writing only when the stage changes.
async fn enter_stage(
    job_id: Uuid,
    stage: JobStage,
    clock: &dyn Clock,
    store: &dyn JobStore,
) -> StageOutcome<()> {
    let mut record = load(job_id, stage, store).await?;

    if record.advance(stage, clock.now()).at_stage(stage)? {
        store.set(&record, JOB_TTL).await.at_stage(stage)?;
        info!(stage = %stage, progress = record.progress(), "stage started");
    } else {
        debug!(
            stage = %stage,
            stored = %record.stage(),
            "record already at or past stage; skipping write"
        );
    }
    Ok(())
}

async fn finish(
    job_id: Uuid,
    result: JobResult,
    clock: &dyn Clock,
    store: &dyn JobStore,
) -> StageOutcome<JobRecord> {
    let mut record = load(job_id, JobStage::Building, store).await?;
    record
        .complete(result, clock.now())
        .at_stage(JobStage::Building)?;
    store
        .set(&record, JOB_TTL)
        .await
        .at_stage(JobStage::Building)?;
    Ok(record)
}

/// Marks the job `failed` with `message` through a load-modify-write.
///
/// Returns `Ok(None)` without writing when the record has expired or the job
/// already finished.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the store read or write fails.
pub async fn fail_job(
    job_id: Uuid,
    message: &str,
    clock: &dyn Clock,
    store: &dyn JobStore,
) -> Result<Option<JobRecord>, DomainError> {
    let Some(mut record) = store.get(job_id).await? else {
        warn!(%job_id, "job record disappeared; failure not recorded");
        return Ok(None);
    };
    if let Err(e) = record.fail(message, clock.now()) {
        warn!(%job_id, error = %e, "job finished elsewhere; failure not recorded");
        return Ok(None);
    }
    store.set(&record, JOB_TTL).await?;
    Ok(Some(record))
}

/// Records `failure` on the job and returns the error reported to the caller.
///
/// Failing to record the failure is logged; the caller still gets the
/// original stage failure.
async fn record_failure(
    job_id: Uuid,
    failure: StageFailure,
    clock: &dyn Clock,
    store: &dyn JobStore,
) -> DomainError {
    warn!(stage = %failure.stage, error = %failure.message, "stage failed");

    if let Err(e) = fail_job(job_id, &failure.message, clock, store).await {
        error!(error = %e, "could not record job failure");
    }

    DomainError::StageFailed {
        job_id,
        stage: failure.stage,
        message: failure.message,
    }
}
