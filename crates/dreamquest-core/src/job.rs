//! Job record and its stage machine.
//!
//! A record moves forward along `queued < analyzing < generating < building
//! < ready`, or drops to `failed` from any non-terminal stage. The mutating
//! methods on [`JobRecord`] are the only way to change stage, so the stored
//! stage never regresses and `result`/`error` are never both present.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::blueprint::Blueprint;
use crate::error::DomainError;

/// Requested kind of output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputType {
    /// A single still image.
    Image,
    /// A short video.
    Video,
    /// A playable world.
    #[default]
    Game,
}

/// Visual style of the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    /// Flat-shaded, low polygon count.
    Lowpoly,
    /// Photorealistic.
    Realistic,
    /// Cartoon shading.
    Toon,
    /// Dreamlike distortion.
    Surreal,
}

impl Style {
    /// Stable wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lowpoly => "lowpoly",
            Self::Realistic => "realistic",
            Self::Toon => "toon",
            Self::Surreal => "surreal",
        }
    }
}

/// Emotional mood of the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    /// Peaceful.
    Calm,
    /// Anxious.
    Tense,
    /// Magical.
    Mystic,
    /// Wistful.
    Nostalgic,
}

impl Mood {
    /// Stable wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Calm => "calm",
            Self::Tense => "tense",
            Self::Mystic => "mystic",
            Self::Nostalgic => "nostalgic",
        }
    }
}

/// Requested duration of the experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Length {
    /// A few minutes.
    Short,
    /// An extended session.
    Long,
}

impl Length {
    /// Stable wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Long => "long",
        }
    }
}

/// Processing stage of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStage {
    /// Accepted and waiting for a worker.
    Queued,
    /// Turning dream text into a blueprint.
    Analyzing,
    /// Producing assets or a media prompt.
    Generating,
    /// Building the final artifact.
    Building,
    /// Finished; the record carries a result.
    Ready,
    /// Aborted; the record carries an error.
    Failed,
}

impl JobStage {
    /// Progress reported while the record is in this stage.
    #[must_use]
    pub fn checkpoint(self) -> u8 {
        match self {
            Self::Queued | Self::Failed => 0,
            Self::Analyzing => 25,
            Self::Generating => 50,
            Self::Building => 75,
            Self::Ready => 100,
        }
    }

    /// Whether no further transitions are possible.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Ready | Self::Failed)
    }

    /// Stable wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::Analyzing => "analyzing",
            Self::Generating => "generating",
            Self::Building => "building",
            Self::Ready => "ready",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for JobStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the caller asked for. Immutable once the job is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobInput {
    /// Free-text dream description.
    pub dream_text: Option<String>,
    /// Reference to a recorded dream, transcribed during analysis.
    pub audio_url: Option<String>,
    /// Requested output kind.
    #[serde(default)]
    pub output_type: OutputType,
    /// Visual style.
    pub style: Style,
    /// Mood.
    pub mood: Mood,
    /// Experience length.
    pub length: Length,
    /// Optional caller-supplied user identifier.
    pub user_id: Option<String>,
}

/// Final output of a job, shaped by the requested output type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "output_type", rename_all = "snake_case")]
pub enum JobResult {
    /// A playable world.
    Game {
        /// Where the built world is served.
        webgl_url: String,
        /// The blueprint the world was built from.
        blueprint: Blueprint,
    },
    /// A still image.
    Image {
        /// Where the image is served.
        image_url: String,
        /// The prompt the image was generated from.
        prompt: String,
    },
    /// A video.
    Video {
        /// Where the video is served.
        video_url: String,
        /// The storyboard the video was generated from.
        storyboard: String,
    },
}

impl JobResult {
    /// The output type this result belongs to.
    #[must_use]
    pub fn output_type(&self) -> OutputType {
        match self {
            Self::Game { .. } => OutputType::Game,
            Self::Image { .. } => OutputType::Image,
            Self::Video { .. } => OutputType::Video,
        }
    }

    /// Reference to the produced artifact.
    #[must_use]
    pub fn artifact_url(&self) -> &str {
        match self {
            Self::Game { webgl_url, .. } => webgl_url,
            Self::Image { image_url, .. } => image_url,
            Self::Video { video_url, .. } => video_url,
        }
    }

    /// The blueprint, for game results.
    #[must_use]
    pub fn blueprint(&self) -> Option<&Blueprint> {
        match self {
            Self::Game { blueprint, .. } => Some(blueprint),
            Self::Image { .. } | Self::Video { .. } => None,
        }
    }
}

/// Snapshot of a job as persisted in the job store.
///
/// Serialized flat: `job_id`, `status`, `progress`, the echoed input fields,
/// then `result` or `error` when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    job_id: Uuid,
    #[serde(rename = "status")]
    stage: JobStage,
    progress: u8,
    #[serde(flatten)]
    input: JobInput,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    result: Option<JobResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl JobRecord {
    /// Creates a freshly queued record.
    #[must_use]
    pub fn queued(job_id: Uuid, input: JobInput, now: DateTime<Utc>) -> Self {
        Self {
            job_id,
            stage: JobStage::Queued,
            progress: JobStage::Queued.checkpoint(),
            input,
            result: None,
            error: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Job identifier.
    #[must_use]
    pub fn job_id(&self) -> Uuid {
        self.job_id
    }

    /// Current stage.
    #[must_use]
    pub fn stage(&self) -> JobStage {
        self.stage
    }

    /// Current progress, 0–100.
    #[must_use]
    pub fn progress(&self) -> u8 {
        self.progress
    }

    /// The original request.
    #[must_use]
    pub fn input(&self) -> &JobInput {
        &self.input
    }

    /// The result, present only when ready.
    #[must_use]
    pub fn result(&self) -> Option<&JobResult> {
        self.result.as_ref()
    }

    /// The failure message, present only when failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// When the job was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the record was last changed.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Moves the record forward to an in-flight stage.
    ///
    /// Returns `Ok(true)` when the stage changed and `Ok(false)` when the
    /// record is already at or past `to`, which happens when a job is
    /// redelivered mid-flight. The stage never moves backwards.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTransition` if the record is terminal or
    /// `to` is not one of `analyzing`, `generating`, `building`.
    pub fn advance(&mut self, to: JobStage, now: DateTime<Utc>) -> Result<bool, DomainError> {
        let in_flight = matches!(
            to,
            JobStage::Analyzing | JobStage::Generating | JobStage::Building
        );
        if !in_flight || self.stage.is_terminal() {
            return Err(self.invalid(to));
        }
        if to <= self.stage {
            return Ok(false);
        }

        self.stage = to;
        self.progress = to.checkpoint();
        self.updated_at = now;
        Ok(true)
    }

    /// Marks the record ready with its result.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTransition` unless the record is building.
    pub fn complete(&mut self, result: JobResult, now: DateTime<Utc>) -> Result<(), DomainError> {
        if self.stage != JobStage::Building {
            return Err(self.invalid(JobStage::Ready));
        }

        self.stage = JobStage::Ready;
        self.progress = JobStage::Ready.checkpoint();
        self.result = Some(result);
        self.error = None;
        self.updated_at = now;
        Ok(())
    }

    /// Marks the record failed. Progress drops to 0 and any result is cleared.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTransition` if the record is already terminal.
    pub fn fail(&mut self, message: impl Into<String>, now: DateTime<Utc>) -> Result<(), DomainError> {
        if self.stage.is_terminal() {
            return Err(self.invalid(JobStage::Failed));
        }

        self.stage = JobStage::Failed;
        self.progress = JobStage::Failed.checkpoint();
        self.result = None;
        self.error = Some(message.into());
        self.updated_at = now;
        Ok(())
    }

    fn invalid(&self, to: JobStage) -> DomainError {
        DomainError::InvalidTransition {
            job_id: self.job_id,
            from: self.stage,
            to,
        }
    }
}
