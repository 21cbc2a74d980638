//! Keyword cue tables.
//!
//! Tables are listed in priority order: when cues for two entries of the same
//! table both occur in a dream, the earlier entry wins. Cues match as plain
//! substrings of the lower-cased text, so `"sun"` also matches `"sunset"`.

use dreamquest_core::blueprint::{Goal, TimeOfDay, Weather, World};

/// A value together with the cues that select it.
pub type CueTable<T> = &'static [(T, &'static [&'static str])];

/// Environment cues.
pub const WORLD_CUES: CueTable<World> = &[
    (World::Forest, &["forest", "tree", "woods"]),
    (World::City, &["city", "urban", "street"]),
    (World::Ocean, &["ocean", "sea", "water"]),
    (World::Desert, &["desert", "sand"]),
    (World::Space, &["space", "stars", "galaxy"]),
];

/// Time-of-day cues.
pub const TIME_CUES: CueTable<TimeOfDay> = &[
    (TimeOfDay::Night, &["night", "dark", "moon"]),
    (TimeOfDay::Day, &["day", "sun", "bright"]),
    (TimeOfDay::Sunset, &["sunset", "dusk"]),
    (TimeOfDay::Dawn, &["dawn", "sunrise"]),
];

/// Weather cues.
pub const WEATHER_CUES: CueTable<Weather> = &[
    (Weather::FeathersRain, &["rain", "feather"]),
    (Weather::Fog, &["fog", "mist"]),
    (Weather::Storm, &["storm"]),
];

/// Objective cues, keyed by intent verb.
pub const GOAL_CUES: CueTable<Goal> = &[
    (Goal::FollowBirdToFlyingHouse, &["follow"]),
    (Goal::FindHiddenObject, &["find", "search"]),
    (Goal::EscapeDanger, &["escape", "run"]),
];

/// A bird in the dream.
pub const BIRD_CUES: &[&str] = &["bird"];

/// A house in the dream.
pub const HOUSE_CUES: &[&str] = &["house"];

/// Something in the dream is airborne; makes a detected house float.
pub const FLOAT_CUES: &[&str] = &["float", "flying"];

/// Someone else in the dream.
pub const PERSON_CUES: &[&str] = &["person", "figure", "someone"];

/// Whether any cue occurs in `text`.
#[must_use]
pub fn mentions(text: &str, cues: &[&str]) -> bool {
    cues.iter().any(|cue| text.contains(cue))
}

/// The first entry of `table` with a cue in `text`.
#[must_use]
pub fn first_match<T: Copy>(text: &str, table: CueTable<T>) -> Option<T> {
    table
        .iter()
        .find(|(_, cues)| mentions(text, cues))
        .map(|(value, _)| *value)
}
