//! Parsing of model-written blueprints.
//!
//! Models are asked for bare JSON but often wrap it in a markdown code fence
//! or answer with something else entirely. Anything that does not decode into
//! the closed blueprint vocabulary is replaced by the fallback blueprint so
//! the job keeps moving.

use dreamquest_core::blueprint::{Blueprint, Character, Goal, TimeOfDay, Weather, World};
use dreamquest_core::job::{Mood, Style};
use serde::Deserialize;
use tracing::warn;

/// Fields a model is expected to fill in. Style and mood always come from the
/// request, never from the model.
#[derive(Debug, Deserialize)]
struct ModelBlueprint {
    #[serde(default)]
    world: World,
    #[serde(default)]
    time: TimeOfDay,
    #[serde(default)]
    weather: Weather,
    #[serde(default)]
    goal: Goal,
    #[serde(default)]
    characters: Vec<Character>,
}

/// Returns the contents of the first code fence in `raw`, or all of `raw`
/// when there is none. A ```` ```json ```` fence is preferred over a bare one.
#[must_use]
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let body = if let Some((_, rest)) = trimmed.split_once("```json") {
        rest
    } else if let Some((_, rest)) = trimmed.split_once("```") {
        rest
    } else {
        return trimmed;
    };

    body.split_once("```").map_or(body, |(inner, _)| inner).trim()
}

/// Decodes a model reply into a blueprint, falling back to
/// [`Blueprint::fallback`] when the reply is not a valid blueprint.
#[must_use]
pub fn parse_blueprint_response(raw: &str, style: Style, mood: Mood) -> Blueprint {
    match serde_json::from_str::<ModelBlueprint>(strip_code_fence(raw)) {
        Ok(parsed) => Blueprint {
            world: parsed.world,
            time: parsed.time,
            weather: parsed.weather,
            goal: parsed.goal,
            characters: parsed.characters,
            style,
            mood,
        },
        Err(e) => {
            warn!(error = %e, "model reply is not a valid blueprint; using fallback");
            Blueprint::fallback(style, mood)
        }
    }
}
