//! Media generator that writes prompts from the blueprint and renders to
//! placeholder images.

use async_trait::async_trait;
use dreamquest_core::blueprint::Blueprint;
use dreamquest_core::collaborator::{CollaboratorError, MediaGenerator, MediaKind};
use uuid::Uuid;

/// Placeholder served for rendered images.
pub const IMAGE_PLACEHOLDER_URL: &str =
    "https://placehold.co/1024x1024/1a1a2e/white?text=Dream+Image";

/// Placeholder served for rendered videos.
pub const VIDEO_PLACEHOLDER_URL: &str =
    "https://placehold.co/1920x1080/1a1a2e/white?text=Dream+Video";

/// Composes prompts and storyboards deterministically and renders every
/// request to a fixed placeholder.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderMediaGenerator;

fn cast(blueprint: &Blueprint) -> String {
    if blueprint.characters.is_empty() {
        return "no one else".to_owned();
    }
    blueprint
        .characters
        .iter()
        .map(|c| format!("a {}", c.kind()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn image_prompt(dream_text: &str, blueprint: &Blueprint) -> String {
    format!(
        "{dream} Rendered in a {style} style with a {mood} mood. \
         Setting: a {world} at {time}, weather {weather}. Featuring {cast}.",
        dream = dream_text.trim(),
        style = blueprint.style.as_str(),
        mood = blueprint.mood.as_str(),
        world = blueprint.world.as_str(),
        time = blueprint.time.as_str(),
        weather = blueprint.weather.as_str().replace('_', " "),
        cast = cast(blueprint),
    )
}

fn storyboard(dream_text: &str, blueprint: &Blueprint) -> String {
    let world = blueprint.world.as_str();
    let time = blueprint.time.as_str();
    let scenes = [
        format!("Establishing shot of the {world} at {time}."),
        format!(
            "The weather turns {}; the camera drifts closer.",
            blueprint.weather.as_str().replace('_', " ")
        ),
        format!("We meet {}.", cast(blueprint)),
        format!("The dreamer pursues the goal: {}.", blueprint.goal.as_str().replace('_', " ")),
        format!("Closing shot, fading out on a {} note.", blueprint.mood.as_str()),
    ];

    let mut board = format!(
        "Storyboard ({} style) for: {}\n",
        blueprint.style.as_str(),
        dream_text.trim()
    );
    for (index, scene) in scenes.iter().enumerate() {
        board.push_str(&format!("Scene {}: {scene}\n", index + 1));
    }
    board
}

#[async_trait]
impl MediaGenerator for PlaceholderMediaGenerator {
    async fn compose(
        &self,
        kind: MediaKind,
        dream_text: &str,
        blueprint: &Blueprint,
    ) -> Result<String, CollaboratorError> {
        Ok(match kind {
            MediaKind::Image => image_prompt(dream_text, blueprint),
            MediaKind::Video => storyboard(dream_text, blueprint),
        })
    }

    async fn render(
        &self,
        kind: MediaKind,
        _job_id: Uuid,
        _prompt: &str,
    ) -> Result<String, CollaboratorError> {
        Ok(match kind {
            MediaKind::Image => IMAGE_PLACEHOLDER_URL,
            MediaKind::Video => VIDEO_PLACEHOLDER_URL,
        }
        .to_owned())
    }
}
