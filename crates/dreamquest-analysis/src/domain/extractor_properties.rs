//! Property-based tests for extractor invariants.

use dreamquest_core::blueprint::Blueprint;
use dreamquest_core::job::{Mood, Style};
use proptest::prelude::*;

use super::cues::{
    BIRD_CUES, FLOAT_CUES, GOAL_CUES, HOUSE_CUES, PERSON_CUES, TIME_CUES, WEATHER_CUES, WORLD_CUES,
};
use super::extractor::extract;

/// Every cue the extractor reacts to.
fn all_cues() -> Vec<&'static str> {
    let tables = WORLD_CUES
        .iter()
        .map(|(_, cues)| *cues)
        .chain(TIME_CUES.iter().map(|(_, cues)| *cues))
        .chain(WEATHER_CUES.iter().map(|(_, cues)| *cues))
        .chain(GOAL_CUES.iter().map(|(_, cues)| *cues));
    tables
        .chain([BIRD_CUES, HOUSE_CUES, FLOAT_CUES, PERSON_CUES])
        .flatten()
        .copied()
        .collect()
}

fn style_strategy() -> impl Strategy<Value = Style> {
    prop::sample::select(vec![
        Style::Lowpoly,
        Style::Realistic,
        Style::Toon,
        Style::Surreal,
    ])
}

fn mood_strategy() -> impl Strategy<Value = Mood> {
    prop::sample::select(vec![Mood::Calm, Mood::Tense, Mood::Mystic, Mood::Nostalgic])
}

/// Text without vowels. Every cue contains one, so none can match.
fn vowel_free_text() -> impl Strategy<Value = String> {
    "[b-df-hj-np-tv-zB-DF-HJ-NP-TV-Z0-9 .,;:!?'\n-]{0,300}"
}

/// Any printable text that happens to contain no cue.
fn cue_free_text() -> impl Strategy<Value = String> {
    "\\PC{0,200}".prop_filter("text mentions a cue", |text| {
        let lowered = text.to_lowercase();
        !all_cues().iter().any(|cue| lowered.contains(cue))
    })
}

proptest! {
    /// Invariant: every cue contains a vowel, so vowel-free text cannot match.
    #[test]
    fn every_cue_contains_a_vowel(cue in prop::sample::select(all_cues())) {
        prop_assert!(cue.chars().any(|c| "aeiou".contains(c)), "cue {:?}", cue);
    }

    /// Invariant: text without cues yields the default blueprint.
    #[test]
    fn vowel_free_text_yields_fallback(
        text in vowel_free_text(),
        style in style_strategy(),
        mood in mood_strategy(),
    ) {
        prop_assert_eq!(extract(&text, style, mood), Blueprint::fallback(style, mood));
    }

    /// Invariant: text without cues yields the default blueprint.
    #[test]
    fn cue_free_text_yields_fallback(
        text in cue_free_text(),
        style in style_strategy(),
        mood in mood_strategy(),
    ) {
        prop_assert_eq!(extract(&text, style, mood), Blueprint::fallback(style, mood));
    }

    /// Invariant: extraction is deterministic down to the serialized bytes.
    #[test]
    fn extract_is_byte_identical_across_calls(
        text in "\\PC{0,300}",
        style in style_strategy(),
        mood in mood_strategy(),
    ) {
        let first = serde_json::to_string(&extract(&text, style, mood)).unwrap();
        let second = serde_json::to_string(&extract(&text, style, mood)).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Invariant: determinism holds for text built from real cues too.
    #[test]
    fn extract_is_deterministic_on_cue_heavy_text(
        words in prop::collection::vec(prop::sample::select(all_cues()), 0..12),
        style in style_strategy(),
        mood in mood_strategy(),
    ) {
        let text = words.join(" ");
        let first = serde_json::to_string(&extract(&text, style, mood)).unwrap();
        let second = serde_json::to_string(&extract(&text, style, mood)).unwrap();
        prop_assert_eq!(first, second);
    }
}
