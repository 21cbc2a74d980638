//! Transcriber used when no speech-to-text backend is configured.

use async_trait::async_trait;
use dreamquest_core::collaborator::{CollaboratorError, Transcriber};

/// Fails every transcription, so audio-only jobs end up `failed` with a
/// readable reason instead of hanging.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredTranscriber;

#[async_trait]
impl Transcriber for UnconfiguredTranscriber {
    async fn transcribe(&self, _audio_url: &str) -> Result<String, CollaboratorError> {
        Err(CollaboratorError::Failed(
            "audio transcription is not configured".to_owned(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_transcriber_always_fails() {
        let result = UnconfiguredTranscriber
            .transcribe("https://example.com/dream.ogg")
            .await;

        match result {
            Err(CollaboratorError::Failed(msg)) => {
                assert_eq!(msg, "audio transcription is not configured");
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }
}
