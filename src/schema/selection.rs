use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::record::{Formality, SpiceLevel, TimeSlot};

/// Longest selection string accepted from the menu layer.
pub const MAX_SELECTION_LEN: usize = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("selection is empty")]
    EmptySelection,
    #[error("selection is {len} characters long (maximum {max})")]
    SelectionTooLong { len: usize, max: usize },
    #[error("unsupported category: {0}")]
    UnknownCategory(String),
    #[error("invalid {field}: {value}")]
    UnknownPreference { field: &'static str, value: String },
}

/// The four content categories offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Slang,
    Food,
    Festival,
    Emotion,
}

impl Category {
    pub const ALL: [Category; 4] = [Self::Slang, Self::Food, Self::Festival, Self::Emotion];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Slang => "slang",
            Self::Food => "food",
            Self::Festival => "festival",
            Self::Emotion => "emotion",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "slang" => Ok(Self::Slang),
            "food" => Ok(Self::Food),
            "festival" | "festivals" => Ok(Self::Festival),
            "emotion" | "mood" => Ok(Self::Emotion),
            other => Err(SelectionError::UnknownCategory(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dietary {
    Vegetarian,
    NonVegetarian,
}

impl FromStr for Dietary {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vegetarian" | "veg" => Ok(Self::Vegetarian),
            "non-vegetarian" | "nonvegetarian" | "non_vegetarian" | "non-veg" | "nonveg" => {
                Ok(Self::NonVegetarian)
            }
            other => Err(SelectionError::UnknownPreference {
                field: "dietary preference",
                value: other.to_string(),
            }),
        }
    }
}

/// Telugu-speaking regions used for flavour and tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    CoastalAndhra,
    Rayalaseema,
    Telangana,
    Uttarandhra,
}

impl Region {
    pub const ALL: [Region; 4] = [
        Self::CoastalAndhra,
        Self::Rayalaseema,
        Self::Telangana,
        Self::Uttarandhra,
    ];

    /// Key used for per-region phrase lists.
    pub fn key(&self) -> &'static str {
        match self {
            Self::CoastalAndhra => "coastal_andhra",
            Self::Rayalaseema => "rayalaseema",
            Self::Telangana => "telangana",
            Self::Uttarandhra => "uttarandhra",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::CoastalAndhra => "Coastal Andhra",
            Self::Rayalaseema => "Rayalaseema",
            Self::Telangana => "Telangana",
            Self::Uttarandhra => "Uttarandhra",
        }
    }
}

impl FromStr for Region {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "coastal_andhra" | "coastal" | "andhra" => Ok(Self::CoastalAndhra),
            "rayalaseema" => Ok(Self::Rayalaseema),
            "telangana" => Ok(Self::Telangana),
            "uttarandhra" | "north_andhra" => Ok(Self::Uttarandhra),
            _ => Err(SelectionError::UnknownPreference {
                field: "region",
                value: s.trim().to_string(),
            }),
        }
    }
}

/// Optional user preferences. Every field may be left unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub spice_level: Option<SpiceLevel>,
    #[serde(default)]
    pub dietary: Option<Dietary>,
    #[serde(default)]
    pub formality: Option<Formality>,
    #[serde(default)]
    pub region: Option<Region>,
    #[serde(default)]
    pub time_of_day: Option<TimeSlot>,
}

/// A single request: what the user picked from the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSelection {
    pub category: Category,
    pub selection: String,
    #[serde(default)]
    pub preferences: Option<Preferences>,
}

impl UserSelection {
    pub fn new(category: Category, selection: impl Into<String>) -> Self {
        Self {
            category,
            selection: selection.into(),
            preferences: None,
        }
    }

    pub fn with_preferences(mut self, preferences: Preferences) -> Self {
        self.preferences = Some(preferences);
        self
    }

    /// Check the selection string against the menu contract.
    pub fn validate(&self) -> Result<(), SelectionError> {
        let trimmed = self.selection.trim();
        if trimmed.is_empty() {
            return Err(SelectionError::EmptySelection);
        }
        let len = trimmed.chars().count();
        if len > MAX_SELECTION_LEN {
            return Err(SelectionError::SelectionTooLong {
                len,
                max: MAX_SELECTION_LEN,
            });
        }
        Ok(())
    }

    pub fn preferences(&self) -> Preferences {
        self.preferences.clone().unwrap_or_default()
    }
}
