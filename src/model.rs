//! Core data model - workout days, zones, exercises

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Muscle group tag on an exercise. Closed set: anything outside it is
/// rejected at import time rather than mapped to a default.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum MuscleGroup {
    Chest,
    Back,
    Shoulders,
    Biceps,
    Triceps,
    Legs,
    Calves,
}

impl MuscleGroup {
    /// Lowercase wire tag, as it appears in both JSON schemas.
    pub fn tag(&self) -> &'static str {
        match self {
            MuscleGroup::Chest => "chest",
            MuscleGroup::Back => "back",
            MuscleGroup::Shoulders => "shoulders",
            MuscleGroup::Biceps => "biceps",
            MuscleGroup::Triceps => "triceps",
            MuscleGroup::Legs => "legs",
            MuscleGroup::Calves => "calves",
        }
    }

    pub fn parse(tag: &str) -> Option<MuscleGroup> {
        MuscleGroup::all().iter().copied().find(|g| g.tag() == tag)
    }

    /// Glyph shown next to an exercise in the TUI list.
    pub fn glyph(&self) -> &'static str {
        match self {
            MuscleGroup::Chest => "▣",
            MuscleGroup::Back => "▥",
            MuscleGroup::Shoulders => "◈",
            MuscleGroup::Biceps => "◉",
            MuscleGroup::Triceps => "◎",
            MuscleGroup::Legs => "▲",
            MuscleGroup::Calves => "△",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            MuscleGroup::Chest => Color::LightRed,
            MuscleGroup::Back => Color::LightGreen,
            MuscleGroup::Shoulders => Color::Yellow,
            MuscleGroup::Biceps => Color::LightBlue,
            MuscleGroup::Triceps => Color::LightCyan,
            MuscleGroup::Legs => Color::Green,
            MuscleGroup::Calves => Color::Cyan,
        }
    }

    /// All groups for iteration
    pub fn all() -> &'static [MuscleGroup] {
        &[
            MuscleGroup::Chest,
            MuscleGroup::Back,
            MuscleGroup::Shoulders,
            MuscleGroup::Biceps,
            MuscleGroup::Triceps,
            MuscleGroup::Legs,
            MuscleGroup::Calves,
        ]
    }
}

/// One movement inside a zone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub name: String,
    /// Free-form display string, e.g. "3 x 6-8"
    pub sets: String,
    #[serde(rename = "type")]
    pub kind: MuscleGroup,
    pub notes: String,
}

/// Named grouping of exercises within a day, typically an equipment station.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GymZone {
    pub name: String,
    pub exercises: Vec<Exercise>,
}

/// One training session template.
///
/// `id` must be unique within a collection; it namespaces completion keys so
/// two days can carry an exercise with the same name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkoutDay {
    pub id: i64,
    pub title: String,
    pub subtitle: String,
    pub theme: String,
    pub accent: String,
    #[serde(rename = "bgLight")]
    pub bg_light: String,
    #[serde(rename = "bgDark")]
    pub bg_dark: String,
    pub zones: Vec<GymZone>,
}

impl WorkoutDay {
    /// Exercises of every zone, in display order.
    pub fn exercises(&self) -> impl Iterator<Item = &Exercise> {
        self.zones.iter().flat_map(|z| z.exercises.iter())
    }

    pub fn exercise_count(&self) -> usize {
        self.zones.iter().map(|z| z.exercises.len()).sum()
    }

    /// Terminal accent color derived from the opaque presentation token,
    /// same substring heuristic the original UI used for its hex codes.
    pub fn accent_color(&self) -> Color {
        if self.accent.contains("orange") {
            Color::LightRed
        } else if self.accent.contains("blue") {
            Color::Blue
        } else if self.accent.contains("purple") {
            Color::Magenta
        } else if self.accent.contains("emerald") {
            Color::Green
        } else {
            Color::Gray
        }
    }
}
