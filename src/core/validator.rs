/// Structural checks for knowledge records and whole collections.
///
/// Enum-typed fields are checked when they are parsed (`FromStr`), so the
/// predicates here cover what the types cannot: non-empty text, recognised
/// time tokens, list contents, and regional pairs.

use crate::core::parser::KnowledgeCollections;
use crate::schema::record::{
    DishRecord, FestivalRecord, MoodDishMapping, RegionalVariation, VernacularTermRecord,
};

/// Moods every complete knowledge base must map.
pub const REQUIRED_MOODS: [&str; 5] = ["sad", "sick", "happy", "angry", "tired"];

/// Cities every complete knowledge base must cover.
pub const REQUIRED_CITIES: [&str; 4] = ["visakhapatnam", "vijayawada", "guntur", "tirupati"];

fn filled(value: &str) -> bool {
    !value.trim().is_empty()
}

fn valid_variations(variations: &[RegionalVariation]) -> bool {
    variations
        .iter()
        .all(|v| filled(&v.region) && filled(&v.variation))
}

pub fn is_valid_term(record: &VernacularTermRecord) -> bool {
    filled(&record.term)
        && filled(&record.literal_meaning)
        && filled(&record.emotional_intent)
        && filled(&record.social_appropriateness)
        && valid_variations(&record.regional_variations)
}

pub fn is_valid_dish(record: &DishRecord) -> bool {
    filled(&record.name)
        && filled(&record.city)
        && filled(&record.description)
        && filled(&record.best_time)
        && record.time_slot().is_some()
        && record
            .cultural_significance
            .as_deref()
            .map_or(true, filled)
}

pub fn is_valid_festival(record: &FestivalRecord) -> bool {
    filled(&record.name)
        && filled(&record.cultural_meaning)
        && filled(&record.food_symbolism)
        && filled(&record.emotional_tone)
        && !record.associated_foods.is_empty()
        && record.associated_foods.iter().all(|food| filled(food))
        && valid_variations(&record.regional_variations)
}

pub fn is_valid_mood_mapping(record: &MoodDishMapping) -> bool {
    filled(&record.mood)
        && record.mood == record.mood.to_lowercase()
        && filled(&record.recommended_food)
        && filled(&record.emotional_logic)
}

/// Check a parsed knowledge base for completeness.
///
/// Returns every problem found, empty when the collections are usable.
pub fn validate_completeness(collections: &KnowledgeCollections) -> Vec<String> {
    let mut issues = Vec::new();

    if collections.terms.is_empty() {
        issues.push("No vernacular terms were found".to_string());
    }
    if collections.dishes.is_empty() {
        issues.push("No dishes were found".to_string());
    }
    if collections.festivals.is_empty() {
        issues.push("No festivals were found".to_string());
    }
    if collections.mood_mappings.is_empty() {
        issues.push("No mood mappings were found".to_string());
    }

    for mood in REQUIRED_MOODS {
        if !collections.mood_mappings.iter().any(|m| m.mood == mood) {
            issues.push(format!("Missing required mood: {}", mood));
        }
    }

    for city in REQUIRED_CITIES {
        if !collections
            .dishes
            .iter()
            .any(|d| d.city.to_lowercase() == city)
        {
            issues.push(format!("Missing required city: {}", city));
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::record::{Formality, Setting, SpiceLevel};

    fn term() -> VernacularTermRecord {
        VernacularTermRecord {
            term: "Bava".to_string(),
            literal_meaning: "brother-in-law".to_string(),
            emotional_intent: "affectionate camaraderie".to_string(),
            social_appropriateness: "Between close friends".to_string(),
            formality: Formality::Informal,
            regional_variations: Vec::new(),
        }
    }

    fn dish() -> DishRecord {
        DishRecord {
            name: "Punugulu".to_string(),
            city: "Visakhapatnam".to_string(),
            spice_level: SpiceLevel::Medium,
            best_time: "Evening".to_string(),
            description: "crispy fritters".to_string(),
            cultural_significance: None,
        }
    }

    #[test]
    fn complete_term_is_valid() {
        assert!(is_valid_term(&term()));
    }

    #[test]
    fn blank_field_invalidates_term() {
        let mut record = term();
        record.emotional_intent = "   ".to_string();
        assert!(!is_valid_term(&record));
    }

    #[test]
    fn half_empty_regional_pair_invalidates_term() {
        let mut record = term();
        record.regional_variations.push(RegionalVariation {
            region: "Telangana".to_string(),
            variation: String::new(),
        });
        assert!(!is_valid_term(&record));
    }

    #[test]
    fn dish_requires_recognised_time() {
        assert!(is_valid_dish(&dish()));
        let mut record = dish();
        record.best_time = "whenever".to_string();
        assert!(!is_valid_dish(&record));
    }

    #[test]
    fn festival_requires_foods() {
        let mut festival = FestivalRecord {
            name: "Ugadi".to_string(),
            cultural_meaning: "New year festival".to_string(),
            food_symbolism: "Six tastes of life".to_string(),
            emotional_tone: "Hopeful".to_string(),
            associated_foods: vec!["Ugadi Pachadi".to_string()],
            regional_variations: Vec::new(),
        };
        assert!(is_valid_festival(&festival));

        festival.associated_foods.push(" ".to_string());
        assert!(!is_valid_festival(&festival));

        festival.associated_foods.clear();
        assert!(!is_valid_festival(&festival));
    }

    #[test]
    fn mood_must_be_lowercase() {
        let mut mapping = MoodDishMapping {
            mood: "sad".to_string(),
            recommended_food: "Pappu".to_string(),
            emotional_logic: "comfort".to_string(),
            home_or_street: Setting::Home,
        };
        assert!(is_valid_mood_mapping(&mapping));
        mapping.mood = "Sad".to_string();
        assert!(!is_valid_mood_mapping(&mapping));
    }

    #[test]
    fn empty_collections_report_every_gap() {
        let issues = validate_completeness(&KnowledgeCollections::default());
        // four empty collections, five moods, four cities
        assert_eq!(issues.len(), 13);
        assert!(issues.iter().any(|i| i.contains("tired")));
        assert!(issues.iter().any(|i| i.contains("tirupati")));
    }

    #[test]
    fn city_match_is_case_insensitive() {
        let mut collections = KnowledgeCollections::default();
        collections.dishes.push(dish());
        let issues = validate_completeness(&collections);
        assert!(!issues.iter().any(|i| i.contains("visakhapatnam")));
        assert!(issues.iter().any(|i| i.contains("guntur")));
    }
}
