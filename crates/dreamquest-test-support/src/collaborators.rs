//! Canned and failing implementations of the pipeline ports.

use std::sync::Mutex;

use async_trait::async_trait;
use dreamquest_core::blueprint::Blueprint;
use dreamquest_core::collaborator::{
    AssetGenerator, AssetManifest, CollaboratorError, DreamAnalyzer, MediaGenerator, MediaKind,
    TextCompletion, Transcriber, WorldBuilder,
};
use dreamquest_core::job::{Length, Mood, Style};
use uuid::Uuid;

/// A completion model that always replies with the same text.
#[derive(Debug, Clone)]
pub struct CannedCompletion {
    reply: String,
}

impl CannedCompletion {
    /// Create a model that replies with `reply`.
    #[must_use]
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

#[async_trait]
impl TextCompletion for CannedCompletion {
    async fn complete(&self, _prompt: &str) -> Result<String, CollaboratorError> {
        Ok(self.reply.clone())
    }
}

/// A completion model that always fails with the given message.
#[derive(Debug, Clone)]
pub struct FailingCompletion {
    message: String,
}

impl FailingCompletion {
    /// Create a model that fails with `message`.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl TextCompletion for FailingCompletion {
    async fn complete(&self, _prompt: &str) -> Result<String, CollaboratorError> {
        Err(CollaboratorError::Failed(self.message.clone()))
    }
}

/// A transcriber that returns the same text for any audio.
#[derive(Debug, Clone)]
pub struct StaticTranscriber {
    text: String,
}

impl StaticTranscriber {
    /// Create a transcriber that returns `text`.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl Transcriber for StaticTranscriber {
    async fn transcribe(&self, _audio_url: &str) -> Result<String, CollaboratorError> {
        Ok(self.text.clone())
    }
}

/// A transcriber that always fails with the given message.
#[derive(Debug, Clone)]
pub struct FailingTranscriber(pub String);

#[async_trait]
impl Transcriber for FailingTranscriber {
    async fn transcribe(&self, _audio_url: &str) -> Result<String, CollaboratorError> {
        Err(CollaboratorError::Failed(self.0.clone()))
    }
}

/// An analyzer that always fails with the given message.
#[derive(Debug, Clone)]
pub struct FailingAnalyzer(pub String);

#[async_trait]
impl DreamAnalyzer for FailingAnalyzer {
    async fn analyze(
        &self,
        _dream_text: &str,
        _style: Style,
        _mood: Mood,
        _length: Length,
    ) -> Result<Blueprint, CollaboratorError> {
        Err(CollaboratorError::Failed(self.0.clone()))
    }
}

/// An asset generator that always fails with the given message.
#[derive(Debug, Clone)]
pub struct FailingAssetGenerator(pub String);

#[async_trait]
impl AssetGenerator for FailingAssetGenerator {
    async fn generate(&self, _blueprint: &Blueprint) -> Result<AssetManifest, CollaboratorError> {
        Err(CollaboratorError::Failed(self.0.clone()))
    }
}

/// A world builder that always fails with the given message.
#[derive(Debug, Clone)]
pub struct FailingWorldBuilder(pub String);

#[async_trait]
impl WorldBuilder for FailingWorldBuilder {
    async fn build(&self, _job_id: Uuid, _blueprint: &Blueprint) -> Result<String, CollaboratorError> {
        Err(CollaboratorError::Failed(self.0.clone()))
    }
}

/// A media generator that always fails with the given message.
#[derive(Debug, Clone)]
pub struct FailingMediaGenerator(pub String);

#[async_trait]
impl MediaGenerator for FailingMediaGenerator {
    async fn compose(
        &self,
        _kind: MediaKind,
        _dream_text: &str,
        _blueprint: &Blueprint,
    ) -> Result<String, CollaboratorError> {
        Err(CollaboratorError::Failed(self.0.clone()))
    }

    async fn render(
        &self,
        _kind: MediaKind,
        _job_id: Uuid,
        _prompt: &str,
    ) -> Result<String, CollaboratorError> {
        Err(CollaboratorError::Failed(self.0.clone()))
    }
}

/// A world builder that records every build request and returns
/// `/webgl/<job_id>/index.html`.
#[derive(Debug, Default)]
pub struct RecordingWorldBuilder {
    builds: Mutex<Vec<(Uuid, Blueprint)>>,
}

impl RecordingWorldBuilder {
    /// Create an empty recording builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every `(job_id, blueprint)` built so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn builds(&self) -> Vec<(Uuid, Blueprint)> {
        self.builds.lock().unwrap().clone()
    }
}

#[async_trait]
impl WorldBuilder for RecordingWorldBuilder {
    async fn build(&self, job_id: Uuid, blueprint: &Blueprint) -> Result<String, CollaboratorError> {
        self.builds.lock().unwrap().push((job_id, blueprint.clone()));
        Ok(format!("/webgl/{job_id}/index.html"))
    }
}
