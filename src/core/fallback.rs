/// Fixed knowledge set used when the document is unreadable or incomplete.
///
/// Always satisfies `validate_completeness`.

use crate::core::parser::KnowledgeCollections;
use crate::schema::record::{
    DishRecord, FestivalRecord, Formality, MoodDishMapping, RegionalVariation, Setting,
    SpiceLevel, VernacularTermRecord,
};

fn term(
    term: &str,
    literal: &str,
    intent: &str,
    usage: &str,
    formality: Formality,
    variations: &[(&str, &str)],
) -> VernacularTermRecord {
    VernacularTermRecord {
        term: term.to_string(),
        literal_meaning: literal.to_string(),
        emotional_intent: intent.to_string(),
        social_appropriateness: usage.to_string(),
        formality,
        regional_variations: variations
            .iter()
            .map(|(region, variation)| RegionalVariation {
                region: region.to_string(),
                variation: variation.to_string(),
            })
            .collect(),
    }
}

fn dish(name: &str, city: &str, spice: SpiceLevel, time: &str, description: &str) -> DishRecord {
    DishRecord {
        name: name.to_string(),
        city: city.to_string(),
        spice_level: spice,
        best_time: time.to_string(),
        description: description.to_string(),
        cultural_significance: Some(format!("Traditional {} specialty", city)),
    }
}

fn festival(
    name: &str,
    meaning: &str,
    symbolism: &str,
    tone: &str,
    foods: &[&str],
) -> FestivalRecord {
    FestivalRecord {
        name: name.to_string(),
        cultural_meaning: meaning.to_string(),
        food_symbolism: symbolism.to_string(),
        emotional_tone: tone.to_string(),
        associated_foods: foods.iter().map(|f| f.to_string()).collect(),
        regional_variations: Vec::new(),
    }
}

fn mood(mood: &str, food: &str, logic: &str) -> MoodDishMapping {
    MoodDishMapping {
        mood: mood.to_string(),
        recommended_food: food.to_string(),
        emotional_logic: logic.to_string(),
        home_or_street: Setting::infer(food),
    }
}

pub fn fallback_collections() -> KnowledgeCollections {
    KnowledgeCollections {
        terms: vec![
            term(
                "Bava",
                "brother-in-law",
                "warm camaraderie, treating a friend like family",
                "Between close friends; Avoid with elders you have just met",
                Formality::Informal,
                &[("Telangana", "Used for any close pal in Hyderabad colleges")],
            ),
            term(
                "Ra",
                "a call-out suffix for a friend",
                "easy familiarity and affection",
                "With friends and younger siblings; Avoid with teachers and elders",
                Formality::Informal,
                &[],
            ),
            term(
                "Adiripoyindi",
                "it shook everything",
                "pure excitement and approval",
                "Praising food, films, or a great performance",
                Formality::Informal,
                &[],
            ),
            term(
                "Garu",
                "respected one",
                "respect and courtesy",
                "Added after names of elders and in formal introductions",
                Formality::Formal,
                &[],
            ),
        ],
        dishes: vec![
            dish("Punugulu", "Visakhapatnam", SpiceLevel::Medium, "Evening", "crispy fritters from leftover dosa batter"),
            dish("Bongulo Chicken", "Visakhapatnam", SpiceLevel::High, "Evening", "smoky bamboo chicken, spicy and rich"),
            dish("Bellam Jilebi", "Visakhapatnam", SpiceLevel::Low, "Evening", "jaggery jalebi, mild and sweet"),
            dish("Ulavacharu", "Vijayawada", SpiceLevel::Low, "Lunch", "horse gram soup, mild and earthy"),
            dish("Kodi Kura", "Vijayawada", SpiceLevel::High, "Lunch", "spicy country chicken curry"),
            dish("Guntur Mirchi Bajji", "Guntur", SpiceLevel::Extreme, "Evening", "extreme heat stuffed chillies"),
            dish("Gongura Pachadi", "Guntur", SpiceLevel::High, "Lunch", "spicy sorrel leaf chutney"),
            dish("Tirupati Laddu", "Tirupati", SpiceLevel::Low, "Any", "mild temple sweet of besan and ghee"),
            dish("Pulihora", "Tirupati", SpiceLevel::Medium, "Lunch", "tangy tamarind rice offering"),
        ],
        festivals: vec![
            festival(
                "Sankranti",
                "Harvest festival thanking the sun, the cattle and the farmers",
                "Ariselu symbolizes the sweetness of a full granary",
                "Joyful homecoming",
                &["Ariselu", "Pongali", "Sakinalu"],
            ),
            festival(
                "Ugadi",
                "Telugu new year festival welcoming a fresh cycle",
                "Ugadi Pachadi represents the six tastes of life",
                "Hopeful and fresh",
                &["Ugadi Pachadi", "Bobbatlu", "Pulihora"],
            ),
            festival(
                "Vinayaka Chavithi",
                "Worship of Lord Ganesha before every new beginning",
                "Undrallu represents the offerings loved by Ganesha",
                "Devotional and lively",
                &["Undrallu", "Kudumulu", "Panakam"],
            ),
        ],
        mood_mappings: vec![
            mood("sad", "Pappu with Avakaya", "warm pappu and mango pickle taste like amma's kitchen"),
            mood("sick", "Rasam Rice", "peppery rasam clears the head and settles the stomach"),
            mood("happy", "Chicken Biryani", "festive biryani is how every Telugu celebration tastes"),
            mood("angry", "Perugu Annam", "cool curd rice calms a hot temper"),
            mood("tired", "Filter Coffee with Punugulu", "strong coffee and crispy punugulu bring you back to life"),
        ],
    }
}
