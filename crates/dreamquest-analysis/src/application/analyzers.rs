//! `DreamAnalyzer` implementations.

use async_trait::async_trait;
use dreamquest_core::blueprint::Blueprint;
use dreamquest_core::collaborator::{CollaboratorError, DreamAnalyzer, TextCompletion};
use dreamquest_core::job::{Length, Mood, Style};
use tracing::debug;

use crate::domain::extractor;
use crate::domain::response::parse_blueprint_response;

/// Analyzer backed by the deterministic keyword extractor. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordAnalyzer;

#[async_trait]
impl DreamAnalyzer for KeywordAnalyzer {
    async fn analyze(
        &self,
        dream_text: &str,
        style: Style,
        mood: Mood,
        _length: Length,
    ) -> Result<Blueprint, CollaboratorError> {
        Ok(extractor::extract(dream_text, style, mood))
    }
}

/// Analyzer that asks a text-completion model for the blueprint.
///
/// Transport failures from the model propagate; a reply that is not a valid
/// blueprint is replaced by the fallback blueprint.
#[derive(Debug)]
pub struct ModelAnalyzer<C> {
    completion: C,
}

impl<C: TextCompletion> ModelAnalyzer<C> {
    /// Creates an analyzer over `completion`.
    #[must_use]
    pub fn new(completion: C) -> Self {
        Self { completion }
    }
}

/// Builds the instruction sent to the model.
#[must_use]
pub fn blueprint_prompt(dream_text: &str, style: Style, mood: Mood, length: Length) -> String {
    format!(
        "Based on this dream description, create a game world blueprint in JSON format.\n\
         Dream: {dream_text}\n\
         Style: {style}\n\
         Mood: {mood}\n\
         Length: {length}\n\n\
         Create a JSON object with:\n\
         - world: one of forest, city, ocean, desert, space\n\
         - time: one of dawn, day, sunset, night\n\
         - weather: one of clear, feathers_rain, fog, storm\n\
         - goal: one of follow_bird_to_flying_house, find_hidden_object, escape_danger, explore_world\n\
         - characters: array of {{\"type\": \"bird\" or \"person\", \"role\": \"guide\" or \"mysterious\"}} \
         or {{\"type\": \"house\", \"float\": true or false}}\n\n\
         Return ONLY valid JSON, no other text.",
        style = style.as_str(),
        mood = mood.as_str(),
        length = length.as_str(),
    )
}

#[async_trait]
impl<C: TextCompletion> DreamAnalyzer for ModelAnalyzer<C> {
    async fn analyze(
        &self,
        dream_text: &str,
        style: Style,
        mood: Mood,
        length: Length,
    ) -> Result<Blueprint, CollaboratorError> {
        let prompt = blueprint_prompt(dream_text, style, mood, length);
        let reply = self.completion.complete(&prompt).await?;
        debug!(reply_len = reply.len(), "received model blueprint");
        Ok(parse_blueprint_response(&reply, style, mood))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use dreamquest_core::blueprint::{TimeOfDay, Weather, World};
    use dreamquest_test_support::{CannedCompletion, FailingCompletion};

    use super::*;

    /// Records every prompt and replies with an empty object.
    #[derive(Debug, Clone, Default)]
    struct RecordingCompletion {
        prompts: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl TextCompletion for RecordingCompletion {
        async fn complete(&self, prompt: &str) -> Result<String, CollaboratorError> {
            self.prompts.lock().unwrap().push(prompt.to_owned());
            Ok("{}".to_owned())
        }
    }

    #[tokio::test]
    async fn test_keyword_analyzer_delegates_to_extractor() {
        // Arrange
        let text = "A storm over the ocean at dawn.";

        // Act
        let blueprint = KeywordAnalyzer
            .analyze(text, Style::Realistic, Mood::Tense, Length::Short)
            .await
            .unwrap();

        // Assert
        assert_eq!(blueprint, extractor::extract(text, Style::Realistic, Mood::Tense));
        assert_eq!(blueprint.world, World::Ocean);
        assert_eq!(blueprint.weather, Weather::Storm);
        assert_eq!(blueprint.time, TimeOfDay::Dawn);
    }

    #[tokio::test]
    async fn test_model_analyzer_parses_reply() {
        // Arrange
        let analyzer = ModelAnalyzer::new(CannedCompletion::new(
            "```json\n{\"world\": \"desert\", \"time\": \"day\"}\n```",
        ));

        // Act
        let blueprint = analyzer
            .analyze("Sand everywhere.", Style::Toon, Mood::Calm, Length::Long)
            .await
            .unwrap();

        // Assert
        assert_eq!(blueprint.world, World::Desert);
        assert_eq!(blueprint.time, TimeOfDay::Day);
        assert_eq!(blueprint.style, Style::Toon);
    }

    #[tokio::test]
    async fn test_model_analyzer_falls_back_on_malformed_reply() {
        // Arrange
        let analyzer = ModelAnalyzer::new(CannedCompletion::new("not json at all"));

        // Act
        let blueprint = analyzer
            .analyze("A city at night.", Style::Surreal, Mood::Nostalgic, Length::Short)
            .await
            .unwrap();

        // Assert
        assert_eq!(blueprint, Blueprint::fallback(Style::Surreal, Mood::Nostalgic));
    }

    #[tokio::test]
    async fn test_model_analyzer_propagates_completion_failure() {
        // Arrange
        let analyzer = ModelAnalyzer::new(FailingCompletion::new("model quota exceeded"));

        // Act
        let result = analyzer
            .analyze("A city at night.", Style::Surreal, Mood::Nostalgic, Length::Short)
            .await;

        // Assert
        match result {
            Err(CollaboratorError::Failed(msg)) => assert_eq!(msg, "model quota exceeded"),
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn test_blueprint_prompt_includes_request() {
        let prompt = blueprint_prompt(
            "A floating house.",
            Style::Lowpoly,
            Mood::Mystic,
            Length::Long,
        );

        assert!(prompt.contains("Dream: A floating house."));
        assert!(prompt.contains("Style: lowpoly"));
        assert!(prompt.contains("Mood: mystic"));
        assert!(prompt.contains("Length: long"));
    }

    #[tokio::test]
    async fn test_model_analyzer_sends_requested_length() {
        // Arrange
        let completion = RecordingCompletion::default();
        let analyzer = ModelAnalyzer::new(completion.clone());

        // Act
        analyzer
            .analyze("A floating house.", Style::Toon, Mood::Calm, Length::Long)
            .await
            .unwrap();

        // Assert
        let prompts = completion.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Length: long"));
    }
}
