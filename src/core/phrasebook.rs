/// Phrasebook — the fixed phrase lists and sentence templates behind
/// composition and formatting, loaded from RON.
///
/// The default phrasebook is compiled in from `data/phrasebook.ron`; a
/// different one can be loaded from disk without rebuilding.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::core::template::{Template, TemplateError};
use crate::schema::selection::{Category, Region};

const BUILTIN_PHRASEBOOK: &str = include_str!("../../data/phrasebook.ron");

#[derive(Debug, Error)]
pub enum PhrasebookError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("template '{name}': {source}")]
    Template {
        name: &'static str,
        #[source]
        source: TemplateError,
    },
    #[error("template '{template}' refers to unknown field '{field}'")]
    UnknownField { template: &'static str, field: String },
    #[error("phrase list '{0}' is empty")]
    EmptyList(&'static str),
}

/// Phrases keyed by region, with a general list for requests without one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionalPhrases {
    pub coastal_andhra: Vec<String>,
    pub rayalaseema: Vec<String>,
    pub telangana: Vec<String>,
    pub uttarandhra: Vec<String>,
    pub general: Vec<String>,
}

impl RegionalPhrases {
    /// The list for a region; an empty regional list falls back to `general`.
    pub fn for_region(&self, region: Option<Region>) -> &[String] {
        let list = match region {
            Some(Region::CoastalAndhra) => &self.coastal_andhra,
            Some(Region::Rayalaseema) => &self.rayalaseema,
            Some(Region::Telangana) => &self.telangana,
            Some(Region::Uttarandhra) => &self.uttarandhra,
            None => &self.general,
        };
        if list.is_empty() {
            &self.general
        } else {
            list
        }
    }
}

/// Phrases keyed by request category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPhrases {
    pub slang: Vec<String>,
    pub food: Vec<String>,
    pub festival: Vec<String>,
    pub emotion: Vec<String>,
}

impl CategoryPhrases {
    pub fn get(&self, category: Category) -> &[String] {
        match category {
            Category::Slang => &self.slang,
            Category::Food => &self.food,
            Category::Festival => &self.festival,
            Category::Emotion => &self.emotion,
        }
    }
}

/// How a vocabulary word is worked into text that lacks one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordClass {
    /// Exclamations such as "Arey": prepended.
    Interjection,
    /// Terms of address such as "bava": appended in a call-out sentence.
    Kinship,
    Other,
}

/// Parsed sentence templates used by the composer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateBook {
    pub slang: Template,
    pub slang_variation: Template,
    pub slang_closing: Template,
    pub food_intro: Template,
    pub food_dish: Template,
    pub food_dish_any_time: Template,
    pub food_closing: Template,
    pub festival: Template,
    pub festival_variation: Template,
    pub festival_closing: Template,
    pub emotion: Template,
    pub emotion_logic: Template,
    pub emotion_closing: Template,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phrasebook {
    pub openers: RegionalPhrases,
    /// Lowercase first words that already count as an opener.
    pub opener_patterns: Vec<String>,
    pub vocabulary: Vec<String>,
    pub interjections: Vec<String>,
    pub kinship_words: Vec<String>,
    /// Words the formatter works in when a category's text has none.
    pub category_words: CategoryPhrases,
    pub jargon: Vec<String>,
    pub warmth_markers: Vec<String>,
    pub closers: CategoryPhrases,
    pub closing_markers: Vec<String>,
    pub templates: TemplateBook,
}

// RON deserialization helpers: templates arrive as plain strings and are
// parsed and field-checked on load.

#[derive(Debug, Deserialize)]
#[serde(rename = "Phrasebook")]
struct RonPhrasebook {
    openers: RegionalPhrases,
    opener_patterns: Vec<String>,
    vocabulary: Vec<String>,
    interjections: Vec<String>,
    kinship_words: Vec<String>,
    category_words: CategoryPhrases,
    jargon: Vec<String>,
    warmth_markers: Vec<String>,
    closers: CategoryPhrases,
    closing_markers: Vec<String>,
    templates: RonTemplates,
}

#[derive(Debug, Deserialize)]
#[serde(rename = "Templates")]
struct RonTemplates {
    slang: String,
    slang_variation: String,
    slang_closing: String,
    food_intro: String,
    food_dish: String,
    food_dish_any_time: String,
    food_closing: String,
    festival: String,
    festival_variation: String,
    festival_closing: String,
    emotion: String,
    emotion_logic: String,
    emotion_closing: String,
}

const SLANG_FIELDS: &[&str] = &[
    "term",
    "literal_meaning",
    "emotional_intent",
    "appropriateness",
    "formality",
];
const VARIATION_FIELDS: &[&str] = &["region", "variation"];
const DISH_FIELDS: &[&str] = &["name", "description", "spice", "time", "significance"];
const FESTIVAL_FIELDS: &[&str] = &[
    "name",
    "cultural_meaning",
    "food_symbolism",
    "foods",
    "emotional_tone",
];
const EMOTION_FIELDS: &[&str] = &["mood", "food", "reasoning", "cultural_context"];
const EMOTION_LOGIC_FIELDS: &[&str] = &["emotional_logic", "setting"];

fn parse_template(
    name: &'static str,
    text: &str,
    allowed: &[&str],
) -> Result<Template, PhrasebookError> {
    let template =
        Template::parse(text).map_err(|source| PhrasebookError::Template { name, source })?;
    if let Some(field) = template.fields().find(|f| !allowed.contains(f)) {
        return Err(PhrasebookError::UnknownField {
            template: name,
            field: field.to_string(),
        });
    }
    Ok(template)
}

impl RonTemplates {
    fn into_book(self) -> Result<TemplateBook, PhrasebookError> {
        Ok(TemplateBook {
            slang: parse_template("slang", &self.slang, SLANG_FIELDS)?,
            slang_variation: parse_template(
                "slang_variation",
                &self.slang_variation,
                VARIATION_FIELDS,
            )?,
            slang_closing: parse_template("slang_closing", &self.slang_closing, &["term"])?,
            food_intro: parse_template("food_intro", &self.food_intro, &["city"])?,
            food_dish: parse_template("food_dish", &self.food_dish, DISH_FIELDS)?,
            food_dish_any_time: parse_template(
                "food_dish_any_time",
                &self.food_dish_any_time,
                DISH_FIELDS,
            )?,
            food_closing: parse_template("food_closing", &self.food_closing, &["city"])?,
            festival: parse_template("festival", &self.festival, FESTIVAL_FIELDS)?,
            festival_variation: parse_template(
                "festival_variation",
                &self.festival_variation,
                VARIATION_FIELDS,
            )?,
            festival_closing: parse_template("festival_closing", &self.festival_closing, &["name"])?,
            emotion: parse_template("emotion", &self.emotion, EMOTION_FIELDS)?,
            emotion_logic: parse_template(
                "emotion_logic",
                &self.emotion_logic,
                EMOTION_LOGIC_FIELDS,
            )?,
            emotion_closing: parse_template("emotion_closing", &self.emotion_closing, &["mood"])?,
        })
    }
}

fn lowercased(words: Vec<String>) -> Vec<String> {
    words
        .into_iter()
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

impl Phrasebook {
    /// The compiled-in phrasebook.
    pub fn builtin() -> Result<Phrasebook, PhrasebookError> {
        Self::parse_ron(BUILTIN_PHRASEBOOK)
    }

    /// Load a phrasebook from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<Phrasebook, PhrasebookError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a phrasebook from a RON string.
    pub fn parse_ron(input: &str) -> Result<Phrasebook, PhrasebookError> {
        let raw: RonPhrasebook = ron::from_str(input)?;

        let required: [(&'static str, &[String]); 11] = [
            ("openers.general", &raw.openers.general),
            ("vocabulary", &raw.vocabulary),
            ("category_words.slang", &raw.category_words.slang),
            ("category_words.food", &raw.category_words.food),
            ("category_words.festival", &raw.category_words.festival),
            ("category_words.emotion", &raw.category_words.emotion),
            ("warmth_markers", &raw.warmth_markers),
            ("closers.slang", &raw.closers.slang),
            ("closers.food", &raw.closers.food),
            ("closers.festival", &raw.closers.festival),
            ("closers.emotion", &raw.closers.emotion),
        ];
        if let Some((name, _)) = required.iter().find(|(_, list)| list.is_empty()) {
            return Err(PhrasebookError::EmptyList(*name));
        }

        Ok(Phrasebook {
            openers: raw.openers,
            opener_patterns: lowercased(raw.opener_patterns),
            vocabulary: lowercased(raw.vocabulary),
            interjections: lowercased(raw.interjections),
            kinship_words: lowercased(raw.kinship_words),
            category_words: raw.category_words,
            jargon: lowercased(raw.jargon),
            warmth_markers: lowercased(raw.warmth_markers),
            closers: raw.closers,
            closing_markers: lowercased(raw.closing_markers),
            templates: raw.templates.into_book()?,
        })
    }

    pub fn word_class(&self, word: &str) -> WordClass {
        let word = word.trim().to_lowercase();
        if self.interjections.contains(&word) {
            WordClass::Interjection
        } else if self.kinship_words.contains(&word) {
            WordClass::Kinship
        } else {
            WordClass::Other
        }
    }

    /// Vocabulary words present in `text`, as whole words, in list order.
    pub fn vocabulary_in(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        self.vocabulary
            .iter()
            .filter(|w| contains_word(&lower, w))
            .cloned()
            .collect()
    }
}

/// Whole-word, case-sensitive containment. Callers lowercase both sides.
pub fn contains_word(haystack: &str, word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    haystack.match_indices(word).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + word.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> Phrasebook {
        Phrasebook::builtin().unwrap()
    }

    fn all_regional(phrases: &RegionalPhrases) -> Vec<&String> {
        phrases
            .coastal_andhra
            .iter()
            .chain(&phrases.rayalaseema)
            .chain(&phrases.telangana)
            .chain(&phrases.uttarandhra)
            .chain(&phrases.general)
            .collect()
    }

    fn all_closers(book: &Phrasebook) -> Vec<&String> {
        Category::ALL
            .iter()
            .flat_map(|c| book.closers.get(*c))
            .collect()
    }

    #[test]
    fn builtin_loads() {
        let book = book();
        assert!(book.vocabulary.contains(&"bava".to_string()));
        assert!(!book.jargon.is_empty());
        assert!(!book.openers.telangana.is_empty());
    }

    #[test]
    fn every_opener_carries_vocabulary_and_a_pattern() {
        let book = book();
        for opener in all_regional(&book.openers) {
            assert!(
                !book.vocabulary_in(opener).is_empty(),
                "opener without vocabulary: {}",
                opener
            );
            let first = opener
                .split(|c: char| !c.is_alphanumeric())
                .next()
                .unwrap()
                .to_lowercase();
            assert!(
                book.opener_patterns.contains(&first),
                "opener not recognised as one: {}",
                opener
            );
        }
    }

    #[test]
    fn opener_patterns_are_vocabulary() {
        let book = book();
        for pattern in &book.opener_patterns {
            assert!(book.vocabulary.contains(pattern), "{}", pattern);
        }
    }

    #[test]
    fn closers_carry_closing_and_warmth_markers() {
        let book = book();
        for closer in all_closers(&book) {
            let lower = closer.to_lowercase();
            assert!(
                book.closing_markers.iter().any(|m| lower.contains(m.as_str())),
                "closer without closing marker: {}",
                closer
            );
            assert!(
                book.warmth_markers.iter().any(|m| lower.contains(m.as_str())),
                "closer without warmth: {}",
                closer
            );
            assert!(!book.vocabulary_in(closer).is_empty(), "{}", closer);
            assert!(closer.ends_with(['.', '!', '?']), "{}", closer);
        }
    }

    #[test]
    fn closing_markers_are_warm() {
        let book = book();
        for marker in &book.closing_markers {
            assert!(
                book.warmth_markers.iter().any(|w| marker.contains(w.as_str())),
                "{}",
                marker
            );
        }
    }

    #[test]
    fn fixed_phrases_contain_no_jargon() {
        let book = book();
        let phrases = all_regional(&book.openers)
            .into_iter()
            .chain(all_closers(&book))
            .chain(&book.vocabulary);
        for phrase in phrases {
            let lower = phrase.to_lowercase();
            for term in &book.jargon {
                assert!(!contains_word(&lower, term), "{} in {}", term, phrase);
            }
        }
    }

    #[test]
    fn category_words_are_vocabulary() {
        let book = book();
        for category in Category::ALL {
            for word in book.category_words.get(category) {
                assert!(book.vocabulary.contains(&word.to_lowercase()), "{}", word);
            }
        }
    }

    #[test]
    fn word_classes() {
        let book = book();
        assert_eq!(book.word_class("Arey"), WordClass::Interjection);
        assert_eq!(book.word_class("bava"), WordClass::Kinship);
        assert_eq!(book.word_class("ruchi"), WordClass::Other);
    }

    #[test]
    fn region_falls_back_to_general_when_empty() {
        let mut book = book();
        book.openers.rayalaseema.clear();
        assert_eq!(
            book.openers.for_region(Some(Region::Rayalaseema)),
            book.openers.general.as_slice()
        );
    }

    #[test]
    fn contains_word_respects_boundaries() {
        assert!(contains_word("arey bava, chudu", "bava"));
        assert!(contains_word("\"bava\" means", "bava"));
        assert!(!contains_word("bavagaru", "bava"));
        assert!(!contains_word("ammamma", "amma"));
        assert!(contains_word("ammamma, amma!", "amma"));
        assert!(!contains_word("anything", ""));
    }

    #[test]
    fn vocabulary_in_lists_matches() {
        let book = book();
        let found = book.vocabulary_in("Arey bava, pappu annam is ready!");
        assert!(found.contains(&"arey".to_string()));
        assert!(found.contains(&"bava".to_string()));
        assert!(found.contains(&"pappu".to_string()));
    }

    #[test]
    fn unknown_template_field_is_rejected() {
        let broken = BUILTIN_PHRASEBOOK.replacen("{city}", "{town}", 1);
        let err = Phrasebook::parse_ron(&broken).unwrap_err();
        assert!(matches!(err, PhrasebookError::UnknownField { .. }), "{:?}", err);
    }

    #[test]
    fn malformed_ron_is_an_error() {
        assert!(matches!(
            Phrasebook::parse_ron("(openers: "),
            Err(PhrasebookError::Ron(_))
        ));
    }
}
