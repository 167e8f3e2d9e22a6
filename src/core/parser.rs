/// Knowledge document parser — tolerant extraction of typed records from
/// a loosely formatted text document.
///
/// The document has four sections, each introduced by a header line that
/// contains a fixed marker phrase. Parsing never fails: anything that cannot
/// be fully extracted is dropped and the collection is simply smaller.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::validator::{
    is_valid_dish, is_valid_festival, is_valid_mood_mapping, is_valid_term, REQUIRED_CITIES,
};
use crate::schema::record::{
    DishRecord, FestivalRecord, Formality, MoodDishMapping, RegionalVariation, Setting,
    SpiceLevel, TimeSlot, VernacularTermRecord,
};

static QUOTED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"["“]([^"“”\n]+)["”]"#).expect("quoted-term pattern"));
static MEANING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^[ \t]*(?:literal(?: meaning)?|meaning)[ \t]*:[ \t]*(.+)$")
        .expect("meaning pattern")
});
static EMOTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^[ \t]*(?:emotional meaning|emotion)[ \t]*:[ \t]*(.+)$")
        .expect("emotion pattern")
});
static USAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^[ \t]*(?:usage|use)[ \t]*:[ \t]*(.+)$").expect("usage pattern")
});
static AVOID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)^[ \t]*(avoid\b.*)$").expect("avoid pattern"));
static FORMAL_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bformal\b").expect("formal pattern"));
static REGIONAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^[ \t]*(?:regional variations?|regional|region)[ \t]*:[ \t]*(.+)$")
        .expect("regional pattern")
});
static ARROW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*(?:→|->|=>|\bmaps to\b)\s*").expect("arrow pattern"));
static PAREN_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\([^)]*\)\s*$").expect("parenthetical pattern"));
static FESTIVAL_HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z][\w'’-]*(?:\s+[A-Z][\w'’-]*)*(?:\s*\([^)]*\))?$")
        .expect("festival heading pattern")
});

/// The four sections of a knowledge document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Terms,
    Dishes,
    Festivals,
    Moods,
}

impl Section {
    pub const ALL: [Section; 4] = [Self::Terms, Self::Dishes, Self::Festivals, Self::Moods];

    /// Marker phrase (matched case-insensitively) that opens the section.
    pub fn marker(&self) -> &'static str {
        match self {
            Self::Terms => "telugu slang",
            Self::Dishes => "food by city",
            Self::Festivals => "festivals & traditions",
            Self::Moods => "emotion to food",
        }
    }
}

/// Everything extracted from one document, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeCollections {
    pub terms: Vec<VernacularTermRecord>,
    pub dishes: Vec<DishRecord>,
    pub festivals: Vec<FestivalRecord>,
    pub mood_mappings: Vec<MoodDishMapping>,
}

pub struct DocumentParser;

impl DocumentParser {
    /// Parse a whole document. Missing sections yield empty collections.
    pub fn parse(text: &str) -> KnowledgeCollections {
        let collections = KnowledgeCollections {
            terms: parse_terms(section_text(text, Section::Terms)),
            dishes: parse_dishes(section_text(text, Section::Dishes)),
            festivals: parse_festivals(section_text(text, Section::Festivals)),
            mood_mappings: parse_moods(section_text(text, Section::Moods)),
        };
        debug!(
            terms = collections.terms.len(),
            dishes = collections.dishes.len(),
            festivals = collections.festivals.len(),
            moods = collections.mood_mappings.len(),
            "parsed knowledge document"
        );
        collections
    }
}

/// Text of a section: from the line after its header up to the line of the
/// next header (or end of document). Empty when the marker is absent.
pub fn section_text(text: &str, section: Section) -> &str {
    // ASCII lowercasing keeps byte offsets identical.
    let lower = text.to_ascii_lowercase();
    let Some(start) = lower.find(section.marker()) else {
        return "";
    };
    let body_start = lower[start..]
        .find('\n')
        .map_or(text.len(), |i| start + i + 1);
    let end = Section::ALL
        .iter()
        .filter_map(|s| lower[body_start..].find(s.marker()).map(|i| body_start + i))
        .min()
        .map_or(text.len(), |pos| line_start(text, pos).max(body_start));
    &text[body_start..end]
}

fn line_start(text: &str, pos: usize) -> usize {
    text[..pos].rfind('\n').map_or(0, |i| i + 1)
}

/// Trim a line and drop any list bullet in front of it.
fn clean_line(line: &str) -> &str {
    line.trim()
        .trim_start_matches(['-', '*', '•'])
        .trim_start()
}

fn non_blank_lines(section: &str) -> Vec<&str> {
    section
        .lines()
        .map(clean_line)
        .filter(|l| !l.is_empty())
        .collect()
}

fn capture_label(pattern: &Regex, block: &str) -> Option<String> {
    pattern
        .captures(block)
        .map(|c| c[1].trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Parse `Region - variation` (hyphen, en dash, or colon separated).
fn parse_variation(value: &str) -> Option<RegionalVariation> {
    let (region, variation) = [" - ", " – ", " — ", ":"]
        .iter()
        .find_map(|sep| value.split_once(sep))?;
    let region = region.trim();
    let variation = variation.trim();
    if region.is_empty() || variation.is_empty() {
        return None;
    }
    Some(RegionalVariation {
        region: region.to_string(),
        variation: variation.to_string(),
    })
}

fn parse_variations(block: &str) -> Vec<RegionalVariation> {
    REGIONAL
        .captures_iter(block)
        .filter_map(|c| parse_variation(&c[1]))
        .collect()
}

// ---------------------------------------------------------------------------
// Vernacular terms
// ---------------------------------------------------------------------------

fn parse_terms(section: &str) -> Vec<VernacularTermRecord> {
    let quotes: Vec<(usize, usize, String)> = QUOTED
        .captures_iter(section)
        .filter_map(|c| {
            let whole = c.get(0)?;
            Some((whole.start(), whole.end(), c[1].trim().to_string()))
        })
        .collect();

    let mut terms = Vec::new();
    for (i, (_, end, name)) in quotes.iter().enumerate() {
        let block_end = quotes.get(i + 1).map_or(section.len(), |next| next.0);
        let block = &section[*end..block_end];
        match extract_term(name, block) {
            Some(term) if is_valid_term(&term) => terms.push(term),
            _ => debug!(candidate = %name, "dropped vernacular term candidate"),
        }
    }
    terms
}

fn extract_term(name: &str, block: &str) -> Option<VernacularTermRecord> {
    let literal_meaning = capture_label(&MEANING, block)?;
    let emotional_intent = capture_label(&EMOTION, block)?;

    let mut usage: Vec<String> = capture_label(&USAGE, block).into_iter().collect();
    usage.extend(
        AVOID
            .captures_iter(block)
            .map(|c| c[1].trim().to_string())
            .filter(|s| !s.is_empty()),
    );
    let social_appropriateness = if usage.is_empty() {
        "General use".to_string()
    } else {
        usage.join("; ")
    };

    let formality = if FORMAL_WORD.is_match(block) {
        Formality::Formal
    } else {
        Formality::Informal
    };

    Some(VernacularTermRecord {
        term: name.to_string(),
        literal_meaning,
        emotional_intent,
        social_appropriateness,
        formality,
        regional_variations: parse_variations(block),
    })
}

// ---------------------------------------------------------------------------
// Dishes
// ---------------------------------------------------------------------------

/// Canonical city name if the line names one of the required cities.
fn match_city(line: &str) -> Option<String> {
    let stripped = PAREN_SUFFIX.replace(line, "");
    let name = stripped.trim().trim_end_matches(':').trim();
    let lower = name.to_lowercase();
    REQUIRED_CITIES
        .iter()
        .find(|city| **city == lower)
        .map(|city| title_case(city))
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn split_arrow(line: &str) -> Option<(&str, &str)> {
    let m = ARROW.find(line)?;
    Some((line[..m.start()].trim(), line[m.end()..].trim()))
}

fn parse_dishes(section: &str) -> Vec<DishRecord> {
    let mut dishes = Vec::new();
    let mut current_city: Option<String> = None;

    for line in non_blank_lines(section) {
        let Some((name, description)) = split_arrow(line) else {
            if let Some(city) = match_city(line) {
                current_city = Some(city);
            }
            continue;
        };
        let Some(city) = current_city.as_ref() else {
            continue;
        };

        let dish = DishRecord {
            name: name.to_string(),
            city: city.clone(),
            spice_level: SpiceLevel::infer(description),
            best_time: TimeSlot::infer(description).label().to_string(),
            description: description.to_string(),
            cultural_significance: Some(format!("Traditional {} specialty", city)),
        };
        if is_valid_dish(&dish) {
            dishes.push(dish);
        } else {
            debug!(line, "dropped dish line");
        }
    }
    dishes
}

// ---------------------------------------------------------------------------
// Festivals
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct FestivalDraft {
    name: String,
    cultural_meaning: Option<String>,
    food_symbolism: Option<String>,
    emotional_tone: Option<String>,
    associated_foods: Vec<String>,
    regional_variations: Vec<RegionalVariation>,
}

impl FestivalDraft {
    fn new(name: String) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    fn absorb(&mut self, line: &str) {
        let lower = line.to_ascii_lowercase();
        if lower.starts_with("regional") || lower.starts_with("region:") {
            if let Some((_, value)) = line.split_once(':') {
                self.regional_variations.extend(parse_variation(value));
            }
        } else if let Some(rest) = lower
            .strip_prefix("foods:")
            .or_else(|| lower.strip_prefix("food:"))
        {
            let offset = line.len() - rest.len();
            self.associated_foods.extend(
                line[offset..]
                    .split(',')
                    .map(str::trim)
                    .filter(|f| !f.is_empty())
                    .map(str::to_string),
            );
        } else if let Some(pos) = lower.find("emotional tone:") {
            let tone = line[pos + "emotional tone:".len()..].trim();
            if !tone.is_empty() {
                self.emotional_tone = Some(tone.to_string());
            }
        } else if lower.contains("symbolizes") || lower.contains("represents") {
            self.food_symbolism = Some(line.to_string());
        } else if (lower.contains("festival")
            || lower.contains("worship")
            || lower.contains("celebration"))
            && self.cultural_meaning.is_none()
        {
            self.cultural_meaning = Some(line.to_string());
        }
    }

    fn finish(self) -> Option<FestivalRecord> {
        let cultural_meaning = self.cultural_meaning?;
        if self.associated_foods.is_empty() {
            return None;
        }
        Some(FestivalRecord {
            food_symbolism: self.food_symbolism.unwrap_or_else(|| {
                format!("Traditional foods representing the spirit of {}", self.name)
            }),
            emotional_tone: self
                .emotional_tone
                .unwrap_or_else(|| "Celebratory".to_string()),
            name: self.name,
            cultural_meaning,
            associated_foods: self.associated_foods,
            regional_variations: self.regional_variations,
        })
    }
}

fn flush_festival(draft: Option<FestivalDraft>, festivals: &mut Vec<FestivalRecord>) {
    let Some(draft) = draft else {
        return;
    };
    let name = draft.name.clone();
    match draft.finish() {
        Some(festival) if is_valid_festival(&festival) => festivals.push(festival),
        _ => debug!(festival = %name, "dropped incomplete festival block"),
    }
}

fn parse_festivals(section: &str) -> Vec<FestivalRecord> {
    let mut festivals = Vec::new();
    let mut current: Option<FestivalDraft> = None;

    for line in non_blank_lines(section) {
        if !line.contains(':') && FESTIVAL_HEADING.is_match(line) {
            flush_festival(current.take(), &mut festivals);
            let name = PAREN_SUFFIX.replace(line, "").trim().to_string();
            current = Some(FestivalDraft::new(name));
        } else if let Some(draft) = current.as_mut() {
            draft.absorb(line);
        }
    }
    flush_festival(current, &mut festivals);
    festivals
}

// ---------------------------------------------------------------------------
// Mood mappings
// ---------------------------------------------------------------------------

/// Contents of the first parenthetical in `text`, if any.
fn parenthetical(text: &str) -> Option<&str> {
    let open = text.find('(')?;
    let close = open + text[open..].find(')')?;
    let inner = text[open + 1..close].trim();
    (!inner.is_empty()).then_some(inner)
}

fn parse_moods(section: &str) -> Vec<MoodDishMapping> {
    let lines = non_blank_lines(section);
    let mut mappings = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let Some((left, right)) = split_arrow(line) else {
            continue;
        };
        let mood = left.to_lowercase();
        let food = right.split('(').next().unwrap_or("").trim().to_string();
        if mood.is_empty() || food.is_empty() {
            continue;
        }

        let next_line_logic = lines
            .get(i + 1)
            .filter(|next| next.starts_with('('))
            .and_then(|next| parenthetical(next));
        let emotional_logic = parenthetical(right)
            .or(next_line_logic)
            .map(str::to_string)
            .unwrap_or_else(|| {
                format!("{} is culturally appropriate for {} feelings", food, mood)
            });

        let mapping = MoodDishMapping {
            home_or_street: Setting::infer(&food),
            mood,
            recommended_food: food,
            emotional_logic,
        };
        if is_valid_mood_mapping(&mapping) {
            mappings.push(mapping);
        }
    }
    mappings
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
🗣️ TELUGU SLANG & EXPRESSIONS
\"Bava\"
Literal: brother-in-law
Emotional meaning: warm camaraderie
Usage: between close friends
Avoid with elders you just met
Regional variation: Telangana - common in Hyderabad colleges

\"Garu\"
Literal: respected one
Emotion: respect
Formality: formal

\"Half\"
Usage: nothing else here

🍛 FOOD BY CITY
Visakhapatnam (Vizag)
Punugulu → medium spice
Guntur
- Mirchi Bajji → extreme heat, evening street snack
Stray line without a city

🎉 FESTIVALS & TRADITIONS
Ugadi
Telugu new year festival
Foods: Ugadi Pachadi, Bobbatlu
Ugadi Pachadi represents the six tastes of life
Emotional tone: Hopeful

Broken Festival
Foods: Nothing

💭 EMOTION TO FOOD MAPPING
Sad → Pappu with Avakaya (tastes like home)
Sick → Rasam Rice
(pepper clears the head)
Tired → Filter Coffee
";

    #[test]
    fn sections_are_split_by_marker() {
        let dishes = section_text(SAMPLE, Section::Dishes);
        assert!(dishes.starts_with("Visakhapatnam"));
        assert!(!dishes.contains("FESTIVALS"));
        assert!(section_text(SAMPLE, Section::Moods).contains("Rasam"));
    }

    #[test]
    fn missing_marker_yields_empty_section() {
        assert_eq!(section_text("no markers here", Section::Terms), "");
        let parsed = DocumentParser::parse("no markers here");
        assert_eq!(parsed, KnowledgeCollections::default());
    }

    #[test]
    fn terms_extracted_with_usage_and_avoid_joined() {
        let parsed = DocumentParser::parse(SAMPLE);
        assert_eq!(parsed.terms.len(), 2);

        let bava = &parsed.terms[0];
        assert_eq!(bava.term, "Bava");
        assert_eq!(bava.literal_meaning, "brother-in-law");
        assert_eq!(bava.emotional_intent, "warm camaraderie");
        assert_eq!(
            bava.social_appropriateness,
            "between close friends; Avoid with elders you just met"
        );
        assert_eq!(bava.formality, Formality::Informal);
        assert_eq!(bava.regional_variations.len(), 1);
        assert_eq!(bava.regional_variations[0].region, "Telangana");
    }

    #[test]
    fn formal_word_marks_term_formal_and_usage_defaults() {
        let parsed = DocumentParser::parse(SAMPLE);
        let garu = &parsed.terms[1];
        assert_eq!(garu.term, "Garu");
        assert_eq!(garu.formality, Formality::Formal);
        assert_eq!(garu.social_appropriateness, "General use");
    }

    #[test]
    fn dish_lines_follow_current_city() {
        let parsed = DocumentParser::parse(SAMPLE);
        assert_eq!(parsed.dishes.len(), 2);

        let punugulu = &parsed.dishes[0];
        assert_eq!(punugulu.name, "Punugulu");
        assert_eq!(punugulu.city, "Visakhapatnam");
        assert_eq!(punugulu.spice_level, SpiceLevel::Medium);
        assert_eq!(punugulu.best_time, "Evening");
        assert_eq!(
            punugulu.cultural_significance.as_deref(),
            Some("Traditional Visakhapatnam specialty")
        );

        let bajji = &parsed.dishes[1];
        assert_eq!(bajji.city, "Guntur");
        assert_eq!(bajji.spice_level, SpiceLevel::Extreme);
    }

    #[test]
    fn dish_before_any_city_is_ignored() {
        let text = "FOOD BY CITY\nPunugulu → medium spice\nGuntur\nBajji → spicy";
        let parsed = DocumentParser::parse(text);
        assert_eq!(parsed.dishes.len(), 1);
        assert_eq!(parsed.dishes[0].name, "Bajji");
    }

    #[test]
    fn festival_needs_meaning_and_foods() {
        let parsed = DocumentParser::parse(SAMPLE);
        assert_eq!(parsed.festivals.len(), 1);
        let ugadi = &parsed.festivals[0];
        assert_eq!(ugadi.name, "Ugadi");
        assert_eq!(ugadi.associated_foods, vec!["Ugadi Pachadi", "Bobbatlu"]);
        assert_eq!(ugadi.emotional_tone, "Hopeful");
        assert!(ugadi.food_symbolism.contains("six tastes"));
    }

    #[test]
    fn festival_defaults_applied() {
        let text = "FESTIVALS & TRADITIONS\nBathukamma\nFloral festival of Telangana\nFoods: Malida, Saddulu\n";
        let parsed = DocumentParser::parse(text);
        assert_eq!(parsed.festivals.len(), 1);
        assert_eq!(parsed.festivals[0].emotional_tone, "Celebratory");
        assert_eq!(
            parsed.festivals[0].food_symbolism,
            "Traditional foods representing the spirit of Bathukamma"
        );
    }

    #[test]
    fn mood_logic_from_same_line_next_line_or_synthesized() {
        let parsed = DocumentParser::parse(SAMPLE);
        let moods = &parsed.mood_mappings;
        assert_eq!(moods.len(), 3);

        assert_eq!(moods[0].mood, "sad");
        assert_eq!(moods[0].recommended_food, "Pappu with Avakaya");
        assert_eq!(moods[0].emotional_logic, "tastes like home");
        assert_eq!(moods[0].home_or_street, Setting::Home);

        assert_eq!(moods[1].emotional_logic, "pepper clears the head");

        assert_eq!(
            moods[2].emotional_logic,
            "Filter Coffee is culturally appropriate for tired feelings"
        );
        assert_eq!(moods[2].home_or_street, Setting::Street);
    }

    #[test]
    fn mood_logic_takes_the_first_parenthetical() {
        let parsed = DocumentParser::parse("EMOTION TO FOOD\nSad → Pappu (comfort) with Avakaya (home)\n");
        assert_eq!(parsed.mood_mappings.len(), 1);
        assert_eq!(parsed.mood_mappings[0].recommended_food, "Pappu");
        assert_eq!(parsed.mood_mappings[0].emotional_logic, "comfort");
    }

    #[test]
    fn maps_to_token_is_an_arrow() {
        let text = "EMOTION TO FOOD\nHappy maps to Pulihora";
        let parsed = DocumentParser::parse(text);
        assert_eq!(parsed.mood_mappings[0].mood, "happy");
        assert_eq!(parsed.mood_mappings[0].recommended_food, "Pulihora");
    }
}
