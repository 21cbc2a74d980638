//! Keyword blueprint extractor.
//!
//! Pure and total: every field is matched independently against the cue
//! tables and falls back to its default when nothing matches.

use dreamquest_core::blueprint::{Blueprint, Character, CharacterRole, Goal, TimeOfDay, Weather, World};
use dreamquest_core::job::{Mood, Style};

use super::cues::{
    BIRD_CUES, FLOAT_CUES, GOAL_CUES, HOUSE_CUES, PERSON_CUES, TIME_CUES, WEATHER_CUES, WORLD_CUES,
    first_match, mentions,
};

/// Extracts a blueprint from `dream_text`, carrying `style` and `mood` through.
#[must_use]
pub fn extract(dream_text: &str, style: Style, mood: Mood) -> Blueprint {
    let text = dream_text.to_lowercase();

    Blueprint {
        world: first_match(&text, WORLD_CUES).unwrap_or(World::Forest),
        time: first_match(&text, TIME_CUES).unwrap_or(TimeOfDay::Night),
        weather: first_match(&text, WEATHER_CUES).unwrap_or(Weather::Clear),
        goal: first_match(&text, GOAL_CUES).unwrap_or(Goal::ExploreWorld),
        characters: detect_characters(&text),
        style,
        mood,
    }
}

/// Runs the fixed character checks in order; each adds at most one entry.
fn detect_characters(text: &str) -> Vec<Character> {
    let mut characters = Vec::with_capacity(3);

    if mentions(text, BIRD_CUES) {
        characters.push(Character::Bird {
            role: CharacterRole::Guide,
        });
    }

    if mentions(text, HOUSE_CUES) {
        characters.push(Character::House {
            float: mentions(text, FLOAT_CUES),
        });
    }

    if mentions(text, PERSON_CUES) {
        characters.push(Character::Person {
            role: CharacterRole::Mysterious,
        });
    }

    characters
}
