/// Parser integration tests — the standard document, fixtures, and
/// record-level guarantees.

use vernacular_engine::core::parser::{DocumentParser, KnowledgeCollections};
use vernacular_engine::core::source::STANDARD_DOCUMENT;
use vernacular_engine::core::validator::{
    is_valid_dish, is_valid_festival, is_valid_mood_mapping, is_valid_term,
    validate_completeness,
};
use vernacular_engine::schema::record::{Formality, SpiceLevel, TimeSlot};

fn incomplete_fixture() -> String {
    std::fs::read_to_string("tests/fixtures/incomplete_kb.txt").unwrap()
}

fn assert_all_valid(parsed: &KnowledgeCollections) {
    for term in &parsed.terms {
        assert!(is_valid_term(term), "invalid term: {:?}", term);
    }
    for dish in &parsed.dishes {
        assert!(is_valid_dish(dish), "invalid dish: {:?}", dish);
    }
    for festival in &parsed.festivals {
        assert!(is_valid_festival(festival), "invalid festival: {:?}", festival);
    }
    for mapping in &parsed.mood_mappings {
        assert!(is_valid_mood_mapping(mapping), "invalid mapping: {:?}", mapping);
    }
}

#[test]
fn standard_document_is_complete() {
    let parsed = DocumentParser::parse(STANDARD_DOCUMENT);
    let issues = validate_completeness(&parsed);
    assert!(issues.is_empty(), "{:?}", issues);

    assert_eq!(parsed.terms.len(), 7);
    assert_eq!(parsed.festivals.len(), 5);
    assert_eq!(parsed.mood_mappings.len(), 5);
    assert_eq!(parsed.dishes.len(), 13);
}

#[test]
fn parsed_records_always_validate() {
    let documents = [
        STANDARD_DOCUMENT.to_string(),
        incomplete_fixture(),
        String::new(),
        "FOOD BY CITY\nGuntur\n→\n → nothing\nBajji →\n".to_string(),
        "FESTIVALS & TRADITIONS\nUgadi\nFoods: , ,\n".to_string(),
        "TELUGU SLANG\n\"Bava\"\nLiteral:\nEmotion:   \n".to_string(),
    ];
    for document in &documents {
        assert_all_valid(&DocumentParser::parse(document));
    }
}

#[test]
fn standard_terms_keep_document_order_and_formality() {
    let parsed = DocumentParser::parse(STANDARD_DOCUMENT);
    let names: Vec<&str> = parsed.terms.iter().map(|t| t.term.as_str()).collect();
    assert_eq!(
        names,
        vec!["Bava", "Ra", "Adiripoyindi", "Garu", "Mama", "Baboi", "Chala"]
    );

    let formal: Vec<&str> = parsed
        .terms
        .iter()
        .filter(|t| t.formality == Formality::Formal)
        .map(|t| t.term.as_str())
        .collect();
    assert_eq!(formal, vec!["Garu"]);

    let bava = &parsed.terms[0];
    assert_eq!(bava.regional_variations.len(), 2);
    assert!(bava.social_appropriateness.contains("; Avoid with elders"));
    assert_eq!(parsed.terms[6].social_appropriateness, "everyday speech with anyone");
}

#[test]
fn standard_dishes_infer_spice_and_time() {
    let parsed = DocumentParser::parse(STANDARD_DOCUMENT);
    let find = |name: &str| parsed.dishes.iter().find(|d| d.name == name).unwrap();

    let bajji = find("Guntur Mirchi Bajji");
    assert_eq!(bajji.city, "Guntur");
    assert_eq!(bajji.spice_level, SpiceLevel::Extreme);
    assert_eq!(bajji.time_slot(), Some(TimeSlot::Evening));

    let pesarattu = find("Pesarattu");
    assert_eq!(pesarattu.city, "Vijayawada");
    assert_eq!(pesarattu.spice_level, SpiceLevel::Medium);
    assert_eq!(pesarattu.best_time, "Morning");

    let jilebi = find("Bellam Jilebi");
    assert_eq!(jilebi.spice_level, SpiceLevel::Low);
    assert_eq!(jilebi.best_time, "Lunch");

    let laddu = find("Tirupati Laddu");
    assert_eq!(laddu.city, "Tirupati");
    assert_eq!(
        laddu.cultural_significance.as_deref(),
        Some("Traditional Tirupati specialty")
    );
}

#[test]
fn vizag_punugulu_scenario() {
    let text = "🍛 FOOD BY CITY\nVisakhapatnam (Vizag)\nPunugulu → medium spice\n";
    let parsed = DocumentParser::parse(text);
    assert_eq!(parsed.dishes.len(), 1);
    let dish = &parsed.dishes[0];
    assert_eq!(dish.name, "Punugulu");
    assert_eq!(dish.city, "Visakhapatnam");
    assert_eq!(dish.spice_level, SpiceLevel::Medium);
    assert_eq!(dish.best_time, "Evening");
}

#[test]
fn festival_without_tone_is_celebratory() {
    let text = "🎉 FESTIVALS & TRADITIONS\nDasara\nTen-day celebration of good over evil\nFoods: A, B\n";
    let parsed = DocumentParser::parse(text);
    assert_eq!(parsed.festivals.len(), 1);
    assert_eq!(parsed.festivals[0].emotional_tone, "Celebratory");
    assert_eq!(parsed.festivals[0].associated_foods, vec!["A", "B"]);
}

#[test]
fn standard_festivals_carry_variations_and_defaults() {
    let parsed = DocumentParser::parse(STANDARD_DOCUMENT);
    let dasara = parsed
        .festivals
        .iter()
        .find(|f| f.name == "Dasara")
        .unwrap();
    assert_eq!(dasara.emotional_tone, "Celebratory");
    assert_eq!(
        dasara.food_symbolism,
        "Traditional foods representing the spirit of Dasara"
    );
    assert_eq!(dasara.regional_variations[0].region, "Telangana");

    let sankranti = &parsed.festivals[0];
    assert_eq!(sankranti.name, "Sankranti");
    assert!(sankranti.food_symbolism.contains("gratitude"));
}

#[test]
fn incomplete_fixture_reports_missing_pieces() {
    let parsed = DocumentParser::parse(&incomplete_fixture());
    let issues = validate_completeness(&parsed);
    assert_eq!(
        issues,
        vec![
            "Missing required mood: tired".to_string(),
            "Missing required city: tirupati".to_string(),
        ]
    );
}

#[test]
fn empty_document_reports_everything() {
    let issues = validate_completeness(&DocumentParser::parse(""));
    assert_eq!(issues.len(), 13);
    assert_eq!(issues[0], "No vernacular terms were found");
}
