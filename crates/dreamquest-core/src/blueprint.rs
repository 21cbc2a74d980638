//! Blueprint vocabulary: the structured world description produced from dream text.
//!
//! Every category is a closed enumeration so a blueprint can never carry a
//! value the world builder does not know how to render.

use serde::{Deserialize, Serialize};

use crate::job::{Mood, Style};

/// Environment category of the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum World {
    /// Woods and trees.
    #[default]
    Forest,
    /// Streets and buildings.
    City,
    /// Open water.
    Ocean,
    /// Dunes and sand.
    Desert,
    /// Stars and galaxies.
    Space,
}

impl World {
    /// Stable wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Forest => "forest",
            Self::City => "city",
            Self::Ocean => "ocean",
            Self::Desert => "desert",
            Self::Space => "space",
        }
    }
}

/// Time of day in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    /// Early morning light.
    Dawn,
    /// Full daylight.
    Day,
    /// Evening light; `dusk` is accepted as an alias.
    #[serde(alias = "dusk")]
    Sunset,
    /// Darkness.
    #[default]
    Night,
}

impl TimeOfDay {
    /// Stable wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dawn => "dawn",
            Self::Day => "day",
            Self::Sunset => "sunset",
            Self::Night => "night",
        }
    }
}

/// Weather condition in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    /// No precipitation.
    #[default]
    Clear,
    /// Rain of feathers.
    FeathersRain,
    /// Fog or mist.
    Fog,
    /// Thunderstorm.
    Storm,
}

impl Weather {
    /// Stable wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::FeathersRain => "feathers_rain",
            Self::Fog => "fog",
            Self::Storm => "storm",
        }
    }
}

/// Player objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    /// Follow the guide bird to the flying house.
    FollowBirdToFlyingHouse,
    /// Find an object hidden in the world.
    FindHiddenObject,
    /// Get away from a threat.
    EscapeDanger,
    /// Free exploration.
    #[default]
    ExploreWorld,
}

impl Goal {
    /// Stable wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FollowBirdToFlyingHouse => "follow_bird_to_flying_house",
            Self::FindHiddenObject => "find_hidden_object",
            Self::EscapeDanger => "escape_danger",
            Self::ExploreWorld => "explore_world",
        }
    }
}

/// Narrative role of a living character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterRole {
    /// Leads the player somewhere.
    Guide,
    /// Unknown intentions.
    Mysterious,
}

/// An entity detected in the dream.
///
/// Serialized with an inline `type` tag, e.g. `{"type":"bird","role":"guide"}`
/// or `{"type":"house","float":true}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Character {
    /// A bird.
    Bird {
        /// What the bird does.
        role: CharacterRole,
    },
    /// A house, possibly floating.
    House {
        /// Whether the house floats in the air.
        float: bool,
    },
    /// A person or figure.
    Person {
        /// What the person does.
        role: CharacterRole,
    },
}

impl Character {
    /// The entity type name used on the wire and in asset paths.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bird { .. } => "bird",
            Self::House { .. } => "house",
            Self::Person { .. } => "person",
        }
    }
}

/// Structured world description extracted from a dream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blueprint {
    /// Environment category.
    pub world: World,
    /// Time of day.
    pub time: TimeOfDay,
    /// Weather condition.
    pub weather: Weather,
    /// Player objective.
    pub goal: Goal,
    /// Detected entities in detection order.
    pub characters: Vec<Character>,
    /// Visual style, carried through from the request.
    pub style: Style,
    /// Mood, carried through from the request.
    pub mood: Mood,
}

impl Blueprint {
    /// The blueprint produced when nothing in the dream matched: a quiet
    /// forest at night with clear skies and no characters.
    #[must_use]
    pub fn fallback(style: Style, mood: Mood) -> Self {
        Self {
            world: World::default(),
            time: TimeOfDay::default(),
            weather: Weather::default(),
            goal: Goal::default(),
            characters: Vec::new(),
            style,
            mood,
        }
    }
}
