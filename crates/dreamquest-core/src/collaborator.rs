//! Ports for the external collaborators the pipeline calls into.
//!
//! Each collaborator is an opaque, synchronous-from-the-pipeline's-view call.
//! Failures surface as [`CollaboratorError`] and abort the running stage.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::blueprint::{Blueprint, Character};
use crate::job::{Length, Mood, Style};

/// Error returned by a collaborator.
///
/// The `Display` output is what gets recorded on a failed job.
#[derive(Debug, Error)]
pub enum CollaboratorError {
    /// The collaborator reported a failure.
    #[error("{0}")]
    Failed(String),

    /// File system error while producing an artifact.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// An artifact could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Category of a generated asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    /// Bird model.
    Bird,
    /// House model.
    House,
    /// Person model.
    Person,
    /// Ground mesh for the world.
    Terrain,
    /// Background audio loop.
    Ambient,
}

impl From<&Character> for AssetKind {
    fn from(character: &Character) -> Self {
        match character {
            Character::Bird { .. } => Self::Bird,
            Character::House { .. } => Self::House,
            Character::Person { .. } => Self::Person,
        }
    }
}

/// Reference to one generated asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRef {
    /// What the asset is.
    #[serde(rename = "type")]
    pub kind: AssetKind,
    /// Where the asset lives.
    pub file: String,
}

/// Assets generated for a blueprint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetManifest {
    /// 3-D models.
    pub models: Vec<AssetRef>,
    /// Textures.
    pub textures: Vec<AssetRef>,
    /// Audio tracks.
    pub audio: Vec<AssetRef>,
}

/// Kind of media produced for non-game outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    /// A still image.
    Image,
    /// A video.
    Video,
}

/// Turns recorded audio into dream text.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribes the audio at `audio_url`.
    async fn transcribe(&self, audio_url: &str) -> Result<String, CollaboratorError>;
}

/// Turns dream text into a blueprint.
#[async_trait]
pub trait DreamAnalyzer: Send + Sync {
    /// Analyzes `dream_text` and returns the blueprint, carrying `style` and `mood` through.
    ///
    /// `length` is the requested experience length; analyzers may use it as a hint.
    async fn analyze(
        &self,
        dream_text: &str,
        style: Style,
        mood: Mood,
        length: Length,
    ) -> Result<Blueprint, CollaboratorError>;
}

/// Opaque text-completion model.
#[async_trait]
pub trait TextCompletion: Send + Sync {
    /// Returns the model's reply to `prompt`.
    async fn complete(&self, prompt: &str) -> Result<String, CollaboratorError>;
}

/// Produces the assets a world needs.
#[async_trait]
pub trait AssetGenerator: Send + Sync {
    /// Generates the asset manifest for `blueprint`.
    async fn generate(&self, blueprint: &Blueprint) -> Result<AssetManifest, CollaboratorError>;
}

/// Builds the interactive world for a job.
#[async_trait]
pub trait WorldBuilder: Send + Sync {
    /// Persists `blueprint` as build input for `job_id` and returns the URL
    /// of the built world. Replaying a build for the same job must overwrite,
    /// not duplicate, its output.
    async fn build(&self, job_id: Uuid, blueprint: &Blueprint) -> Result<String, CollaboratorError>;
}

/// Produces images and videos.
#[async_trait]
pub trait MediaGenerator: Send + Sync {
    /// Writes the generation prompt (image) or storyboard (video).
    async fn compose(
        &self,
        kind: MediaKind,
        dream_text: &str,
        blueprint: &Blueprint,
    ) -> Result<String, CollaboratorError>;

    /// Renders media from `prompt` and returns its URL.
    async fn render(
        &self,
        kind: MediaKind,
        job_id: Uuid,
        prompt: &str,
    ) -> Result<String, CollaboratorError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blueprint::CharacterRole;

    #[test]
    fn test_failed_error_displays_message_verbatim() {
        let err = CollaboratorError::Failed("build farm offline".to_owned());

        assert_eq!(err.to_string(), "build farm offline");
    }

    #[test]
    fn test_asset_kind_follows_character_type() {
        let bird = Character::Bird {
            role: CharacterRole::Guide,
        };

        assert_eq!(AssetKind::from(&bird), AssetKind::Bird);
        assert_eq!(
            AssetKind::from(&Character::House { float: false }),
            AssetKind::House
        );
    }

    #[test]
    fn test_asset_ref_serializes_kind_as_type() {
        let asset = AssetRef {
            kind: AssetKind::Terrain,
            file: "/assets/models/terrain_forest.glb".to_owned(),
        };

        let json = serde_json::to_value(&asset).unwrap();

        assert_eq!(json["type"], "terrain");
        assert_eq!(json["file"], "/assets/models/terrain_forest.glb");
    }
}
