use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::selection::SelectionError;

/// How formal a vernacular term is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Formality {
    Formal,
    Informal,
}

impl Formality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Formal => "formal",
            Self::Informal => "informal",
        }
    }
}

impl FromStr for Formality {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "formal" => Ok(Self::Formal),
            "informal" | "casual" => Ok(Self::Informal),
            other => Err(SelectionError::UnknownPreference {
                field: "formality",
                value: other.to_string(),
            }),
        }
    }
}

/// Heat of a dish. Ordered from mildest to hottest, so `<=` is a spice ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpiceLevel {
    Low,
    Medium,
    High,
    Extreme,
}

impl SpiceLevel {
    pub const ALL: [SpiceLevel; 4] = [Self::Low, Self::Medium, Self::High, Self::Extreme];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Extreme => "extreme",
        }
    }

    /// Infer a spice level from free-text description.
    ///
    /// Checks "extreme" first, then "high"/"spicy", then "low"/"mild",
    /// and falls back to medium.
    pub fn infer(description: &str) -> Self {
        let lower = description.to_lowercase();
        if lower.contains("extreme") {
            Self::Extreme
        } else if lower.contains("high") || lower.contains("spicy") {
            Self::High
        } else if lower.contains("low") || lower.contains("mild") {
            Self::Low
        } else {
            Self::Medium
        }
    }
}

impl fmt::Display for SpiceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpiceLevel {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" | "mild" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" | "spicy" => Ok(Self::High),
            "extreme" => Ok(Self::Extreme),
            other => Err(SelectionError::UnknownPreference {
                field: "spice level",
                value: other.to_string(),
            }),
        }
    }
}

/// Time of day a dish is best eaten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeSlot {
    Morning,
    Lunch,
    Evening,
    Any,
}

impl TimeSlot {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Morning => "Morning",
            Self::Lunch => "Lunch",
            Self::Evening => "Evening",
            Self::Any => "Any",
        }
    }

    /// Find the first recognised slot token inside a `best_time` string.
    pub fn recognise(text: &str) -> Option<Self> {
        let lower = text.to_lowercase();
        [Self::Morning, Self::Lunch, Self::Evening, Self::Any]
            .into_iter()
            .find(|slot| lower.contains(&slot.label().to_lowercase()))
    }

    /// Infer a slot from a dish description; evening when nothing matches.
    pub fn infer(description: &str) -> Self {
        let lower = description.to_lowercase();
        if lower.contains("breakfast") || lower.contains("morning") {
            Self::Morning
        } else if lower.contains("lunch") {
            Self::Lunch
        } else {
            Self::Evening
        }
    }
}

impl FromStr for TimeSlot {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "morning" | "breakfast" => Ok(Self::Morning),
            "lunch" | "afternoon" => Ok(Self::Lunch),
            "evening" | "dinner" | "night" => Ok(Self::Evening),
            "any" | "anytime" => Ok(Self::Any),
            other => Err(SelectionError::UnknownPreference {
                field: "time of day",
                value: other.to_string(),
            }),
        }
    }
}

/// Where a comfort dish is usually eaten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Setting {
    Home,
    Street,
    Both,
}

impl Setting {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Street => "street",
            Self::Both => "both",
        }
    }

    /// Infer the setting from a food name.
    pub fn infer(food: &str) -> Self {
        const STREET: &[&str] = &["coffee", "punugulu", "bajji", "mirchi", "pakodi", "samosa"];
        const HOME: &[&str] = &["pappu", "rasam", "charu", "soup", "perugu", "curd rice", "annam"];

        let lower = food.to_lowercase();
        if STREET.iter().any(|k| lower.contains(k)) {
            Self::Street
        } else if HOME.iter().any(|k| lower.contains(k)) {
            Self::Home
        } else {
            Self::Both
        }
    }
}

/// A region-specific twist on a term or festival.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionalVariation {
    pub region: String,
    pub variation: String,
}

/// A slang or colloquial expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VernacularTermRecord {
    pub term: String,
    pub literal_meaning: String,
    pub emotional_intent: String,
    pub social_appropriateness: String,
    pub formality: Formality,
    #[serde(default)]
    pub regional_variations: Vec<RegionalVariation>,
}

/// A city specialty dish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DishRecord {
    pub name: String,
    pub city: String,
    pub spice_level: SpiceLevel,
    pub best_time: String,
    pub description: String,
    #[serde(default)]
    pub cultural_significance: Option<String>,
}

impl DishRecord {
    /// The slot recognised in `best_time`, if any.
    pub fn time_slot(&self) -> Option<TimeSlot> {
        TimeSlot::recognise(&self.best_time)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FestivalRecord {
    pub name: String,
    pub cultural_meaning: String,
    pub food_symbolism: String,
    pub emotional_tone: String,
    pub associated_foods: Vec<String>,
    #[serde(default)]
    pub regional_variations: Vec<RegionalVariation>,
}

/// A mood and the dish that answers it. `mood` is always lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodDishMapping {
    pub mood: String,
    pub recommended_food: String,
    pub emotional_logic: String,
    pub home_or_street: Setting,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spice_levels_are_ordered() {
        assert!(SpiceLevel::Low < SpiceLevel::Medium);
        assert!(SpiceLevel::High < SpiceLevel::Extreme);
        assert_eq!(SpiceLevel::ALL.iter().max(), Some(&SpiceLevel::Extreme));
    }

    #[test]
    fn spice_inference_checks_extreme_first() {
        assert_eq!(SpiceLevel::infer("extreme heat, highly addictive"), SpiceLevel::Extreme);
        assert_eq!(SpiceLevel::infer("spicy tamarind gravy"), SpiceLevel::High);
        assert_eq!(SpiceLevel::infer("mild and soothing"), SpiceLevel::Low);
        assert_eq!(SpiceLevel::infer("medium spice"), SpiceLevel::Medium);
        assert_eq!(SpiceLevel::infer("crispy fritters"), SpiceLevel::Medium);
    }

    #[test]
    fn time_inference_defaults_to_evening() {
        assert_eq!(TimeSlot::infer("a breakfast favourite"), TimeSlot::Morning);
        assert_eq!(TimeSlot::infer("heavy lunch plate"), TimeSlot::Lunch);
        assert_eq!(TimeSlot::infer("medium spice"), TimeSlot::Evening);
    }

    #[test]
    fn time_slot_recognised_inside_text() {
        assert_eq!(TimeSlot::recognise("Morning (breakfast)"), Some(TimeSlot::Morning));
        assert_eq!(TimeSlot::recognise("Any"), Some(TimeSlot::Any));
        assert_eq!(TimeSlot::recognise("whenever"), None);
    }

    #[test]
    fn setting_inferred_from_food_name() {
        assert_eq!(Setting::infer("Filter Coffee with Punugulu"), Setting::Street);
        assert_eq!(Setting::infer("Pappu with Avakaya"), Setting::Home);
        assert_eq!(Setting::infer("Pulihora"), Setting::Both);
    }

    #[test]
    fn enum_parsing_rejects_unknown_values() {
        assert_eq!("MILD".parse::<SpiceLevel>().unwrap(), SpiceLevel::Low);
        assert!("volcanic".parse::<SpiceLevel>().is_err());
        assert_eq!("Informal".parse::<Formality>().unwrap(), Formality::Informal);
        assert!("slangy".parse::<Formality>().is_err());
    }
}
