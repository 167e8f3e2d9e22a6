/// Mood → dish recommendations from a fixed table, with preference tweaks.
use serde::{Deserialize, Serialize};

use crate::schema::record::SpiceLevel;
use crate::schema::selection::{Dietary, Preferences, Region};

/// A dish recommended for a mood, with the reasoning behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub food: String,
    pub reasoning: String,
    pub cultural_context: String,
    pub spice_level: SpiceLevel,
}

struct MoodEntry {
    mood: &'static str,
    food: &'static str,
    reasoning: &'static str,
    cultural_context: &'static str,
    spice_level: SpiceLevel,
    explanation: &'static str,
}

static MOOD_TABLE: [MoodEntry; 5] = [
    MoodEntry {
        mood: "sad",
        food: "Pappu with Avakaya",
        reasoning: "When you're feeling sad, warm pappu with a spoon of avakaya is pure comfort, like a hug from amma.",
        cultural_context: "Every Telugu home makes pappu; it is the first taste of home after a long day.",
        spice_level: SpiceLevel::Medium,
        explanation: "Ayyo, feeling low? Pappu annam with avakaya and a dollop of neyyi is what amma would make. Comfort in every bite, nanna.",
    },
    MoodEntry {
        mood: "sick",
        food: "Rasam Rice",
        reasoning: "When you're sick, hot miriyala rasam clears the head and settles the stomach.",
        cultural_context: "Rasam is the home remedy every Telugu grandmother swears by.",
        spice_level: SpiceLevel::Low,
        explanation: "Ammo, not well? A plate of rasam annam with pepper and garlic, eaten slowly. Ammamma's medicine never fails.",
    },
    MoodEntry {
        mood: "happy",
        food: "Chicken Biryani",
        reasoning: "When you're happy, a festive plate of biryani is how Telugu people celebrate good news.",
        cultural_context: "Biryani turns up at every wedding, birthday, and cricket win.",
        spice_level: SpiceLevel::High,
        explanation: "Arey, santosham aa? Then it has to be biryani, bava! Share it with friends and the joy doubles.",
    },
    MoodEntry {
        mood: "angry",
        food: "Perugu Annam",
        reasoning: "When you're angry, cool perugu annam brings the temperature down.",
        cultural_context: "Curd rice ends every Telugu meal for a reason; it calms body and mind.",
        spice_level: SpiceLevel::Low,
        explanation: "Kopam vachinda? Sit down, eat some perugu annam with a little pickle. Chalu, cool down ra.",
    },
    MoodEntry {
        mood: "tired",
        food: "Filter Coffee with Punugulu",
        reasoning: "When you're tired, strong filter coffee and crispy punugulu wake you right up.",
        cultural_context: "The evening coffee and snack break is a ritual in every Andhra town.",
        spice_level: SpiceLevel::Medium,
        explanation: "Alasipoyava? One strong filter coffee and hot punugulu from the corner bandi, bava. Energy full!",
    },
];

const GENERIC_EXPLANATION: &str =
    "Telugu food has a dish for every feeling, and this one is made with care to lift your mood.";

/// Vegetarian swaps for dishes that have a known substitute.
const VEGETARIAN_SUBSTITUTES: [(&str, &str); 2] = [
    ("Chicken Biryani", "Veg Biryani"),
    ("Kodi Kura", "Gutti Vankaya Kura"),
];

const HOME_FRAMING: &str = "Best enjoyed at home, made the way amma does it.";
const STREET_FRAMING: &str = "Best enjoyed fresh from a street-side bandi with friends.";

fn spice_suffix(level: SpiceLevel) -> &'static str {
    match level {
        SpiceLevel::Low => " (mild version)",
        SpiceLevel::Medium => " (medium spice)",
        SpiceLevel::High => " (extra spicy)",
        SpiceLevel::Extreme => " (Guntur-level fiery)",
    }
}

fn regional_flavor(region: Region) -> (&'static str, &'static str) {
    match region {
        Region::CoastalAndhra => (
            " with a coastal tang",
            "In Coastal Andhra it comes with a little extra tamarind and a lot of love.",
        ),
        Region::Rayalaseema => (
            " Rayalaseema style",
            "In Rayalaseema they make it bold, with fiery red chilli.",
        ),
        Region::Telangana => (
            " Telangana style",
            "In Telangana it is cooked with a rustic, earthy touch.",
        ),
        Region::Uttarandhra => (
            " Uttarandhra style",
            "In Uttarandhra it carries a gentle sweetness from jaggery.",
        ),
    }
}

fn entry_for(mood: &str) -> Option<&'static MoodEntry> {
    let normalized = mood.trim().to_lowercase();
    MOOD_TABLE.iter().find(|e| e.mood == normalized)
}

pub struct MoodToDishMapper;

impl MoodToDishMapper {
    /// Recommendation for a mood; unknown moods get the comfort-stew entry.
    pub fn map(mood: &str) -> Recommendation {
        let entry = entry_for(mood).unwrap_or(&MOOD_TABLE[0]);
        Recommendation {
            food: entry.food.to_string(),
            reasoning: entry.reasoning.to_string(),
            cultural_context: entry.cultural_context.to_string(),
            spice_level: entry.spice_level,
        }
    }

    pub fn explain(mood: &str, food: &str) -> String {
        match entry_for(mood) {
            Some(entry) if entry.food.eq_ignore_ascii_case(food.trim()) => {
                entry.explanation.to_string()
            }
            _ => GENERIC_EXPLANATION.to_string(),
        }
    }

    /// Apply dietary, spice, regional and home/street adjustments in that order.
    pub fn apply_preferences(
        mut recommendation: Recommendation,
        preferences: &Preferences,
    ) -> Recommendation {
        if preferences.dietary == Some(Dietary::Vegetarian) {
            if let Some((_, substitute)) = VEGETARIAN_SUBSTITUTES
                .iter()
                .find(|(dish, _)| dish.eq_ignore_ascii_case(&recommendation.food))
            {
                recommendation.food = substitute.to_string();
            }
        }

        if let Some(level) = preferences.spice_level {
            if level != recommendation.spice_level {
                recommendation.food.push_str(spice_suffix(level));
                recommendation.spice_level = level;
            }
        }

        if let Some(region) = preferences.region {
            let (suffix, sentence) = regional_flavor(region);
            recommendation.food.push_str(suffix);
            recommendation.cultural_context.push(' ');
            recommendation.cultural_context.push_str(sentence);
        }

        let accumulated = format!(
            "{} {}",
            recommendation.reasoning, recommendation.cultural_context
        )
        .to_lowercase();
        let framing = if ["sad", "sick", "angry"].iter().any(|m| accumulated.contains(m)) {
            Some(HOME_FRAMING)
        } else if ["happy", "tired"].iter().any(|m| accumulated.contains(m)) {
            Some(STREET_FRAMING)
        } else {
            None
        };
        if let Some(framing) = framing {
            recommendation.reasoning.push(' ');
            recommendation.reasoning.push_str(framing);
        }

        recommendation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sad_maps_to_pappu() {
        let rec = MoodToDishMapper::map("sad");
        assert_eq!(rec.food, "Pappu with Avakaya");
        assert_eq!(rec.spice_level, SpiceLevel::Medium);
        assert!(rec.reasoning.to_lowercase().contains("comfort"));
    }

    #[test]
    fn lookup_normalizes_case_and_whitespace() {
        assert_eq!(MoodToDishMapper::map("  TIRED ").food, "Filter Coffee with Punugulu");
    }

    #[test]
    fn unknown_mood_defaults_to_comfort_entry() {
        assert_eq!(MoodToDishMapper::map("bored"), MoodToDishMapper::map("sad"));
    }

    #[test]
    fn explain_matches_mapped_food_only() {
        let specific = MoodToDishMapper::explain("angry", "perugu annam");
        assert!(specific.contains("perugu annam"));
        assert_eq!(MoodToDishMapper::explain("angry", "Pizza"), GENERIC_EXPLANATION);
        assert_eq!(MoodToDishMapper::explain("bored", "Pappu with Avakaya"), GENERIC_EXPLANATION);
    }

    #[test]
    fn vegetarian_substitution_only_for_known_dishes() {
        let prefs = Preferences {
            dietary: Some(Dietary::Vegetarian),
            ..Preferences::default()
        };
        let happy = MoodToDishMapper::apply_preferences(MoodToDishMapper::map("happy"), &prefs);
        assert_eq!(happy.food, "Veg Biryani");

        let sad = MoodToDishMapper::apply_preferences(MoodToDishMapper::map("sad"), &prefs);
        assert_eq!(sad.food, "Pappu with Avakaya");
    }

    #[test]
    fn spice_override_relabels_and_suffixes() {
        let prefs = Preferences {
            spice_level: Some(SpiceLevel::Extreme),
            ..Preferences::default()
        };
        let rec = MoodToDishMapper::apply_preferences(MoodToDishMapper::map("sad"), &prefs);
        assert_eq!(rec.food, "Pappu with Avakaya (Guntur-level fiery)");
        assert_eq!(rec.spice_level, SpiceLevel::Extreme);

        let same = Preferences {
            spice_level: Some(SpiceLevel::Medium),
            ..Preferences::default()
        };
        let unchanged = MoodToDishMapper::apply_preferences(MoodToDishMapper::map("sad"), &same);
        assert_eq!(unchanged.food, "Pappu with Avakaya");
    }

    #[test]
    fn region_adds_suffix_and_context() {
        let prefs = Preferences {
            region: Some(Region::Rayalaseema),
            ..Preferences::default()
        };
        let rec = MoodToDishMapper::apply_preferences(MoodToDishMapper::map("angry"), &prefs);
        assert_eq!(rec.food, "Perugu Annam Rayalaseema style");
        assert!(rec.cultural_context.contains("In Rayalaseema"));
    }

    #[test]
    fn home_and_street_framing_follow_reasoning_text() {
        let prefs = Preferences::default();
        let sick = MoodToDishMapper::apply_preferences(MoodToDishMapper::map("sick"), &prefs);
        assert!(sick.reasoning.ends_with(HOME_FRAMING));

        let tired = MoodToDishMapper::apply_preferences(MoodToDishMapper::map("tired"), &prefs);
        assert!(tired.reasoning.ends_with(STREET_FRAMING));

        let neutral = Recommendation {
            food: "Pesarattu".to_string(),
            reasoning: "A good green gram dosa".to_string(),
            cultural_context: "Popular in Vijayawada".to_string(),
            spice_level: SpiceLevel::Medium,
        };
        let framed = MoodToDishMapper::apply_preferences(neutral.clone(), &prefs);
        assert_eq!(framed, neutral);
    }
}
