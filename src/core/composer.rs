/// Narrative composer — turns a looked-up record into category prose.
///
/// Every sentence comes from a phrasebook template; approximations from
/// the store pass through untouched.

use serde::{Deserialize, Serialize};

use crate::core::mood::Recommendation;
use crate::core::phrasebook::Phrasebook;
use crate::core::store::Lookup;
use crate::schema::record::{
    DishRecord, FestivalRecord, Formality, MoodDishMapping, RegionalVariation, Setting, TimeSlot,
    VernacularTermRecord,
};
use crate::schema::selection::{Category, Preferences, Region};

const INFORMAL_WITH_ELDERS: &str =
    "Careful though, this one is informal, so keep it for friends and not for elders.";
const DEFAULT_SIGNIFICANCE: &str = "A local favourite";

/// Register of a composed response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Playful,
    Enthusiastic,
    Celebratory,
    Caring,
    Apologetic,
}

impl Tone {
    pub fn for_category(category: Category) -> Self {
        match category {
            Category::Slang => Self::Playful,
            Category::Food => Self::Enthusiastic,
            Category::Festival => Self::Celebratory,
            Category::Emotion => Self::Caring,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Playful => "playful",
            Self::Enthusiastic => "enthusiastic",
            Self::Celebratory => "celebratory",
            Self::Caring => "caring",
            Self::Apologetic => "apologetic",
        }
    }
}

/// Unformatted prose plus what the formatter needs to finish it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposedContent {
    pub content: String,
    pub vocabulary_words_used: Vec<String>,
    pub tone: Tone,
    pub region: Option<Region>,
    pub category: Category,
}

/// What a request resolved to in the store.
#[derive(Debug, Clone)]
pub enum Subject<'a> {
    Slang(Lookup<&'a VernacularTermRecord>),
    Food {
        city: &'a str,
        dishes: Lookup<Vec<&'a DishRecord>>,
    },
    Festival(Lookup<&'a FestivalRecord>),
    Emotion {
        mapping: Lookup<&'a MoodDishMapping>,
        recommendation: Recommendation,
        explanation: String,
    },
}

impl Subject<'_> {
    pub fn category(&self) -> Category {
        match self {
            Self::Slang(_) => Category::Slang,
            Self::Food { .. } => Category::Food,
            Self::Festival(_) => Category::Festival,
            Self::Emotion { .. } => Category::Emotion,
        }
    }
}

pub struct NarrativeComposer<'p> {
    phrasebook: &'p Phrasebook,
}

impl<'p> NarrativeComposer<'p> {
    pub fn new(phrasebook: &'p Phrasebook) -> Self {
        Self { phrasebook }
    }

    pub fn compose(&self, subject: &Subject<'_>, preferences: &Preferences) -> ComposedContent {
        let category = subject.category();
        let composed = match subject {
            Subject::Slang(Lookup::Found(term)) => Some(self.slang(term, preferences)),
            Subject::Food {
                city,
                dishes: Lookup::Found(dishes),
            } => Some(self.food(city, dishes)),
            Subject::Festival(Lookup::Found(festival)) => Some(self.festival(festival)),
            Subject::Emotion {
                mapping,
                recommendation,
                explanation,
            } => match mapping {
                Lookup::Found(mapping) => Some(self.emotion(mapping, recommendation, explanation)),
                Lookup::Approximate(_) => None,
            },
            _ => None,
        };

        let (content, tone) = match composed {
            Some(content) => (content, Tone::for_category(category)),
            None => (
                approximation_text(subject).unwrap_or_default(),
                Tone::Apologetic,
            ),
        };

        ComposedContent {
            vocabulary_words_used: self.phrasebook.vocabulary_in(&content),
            content,
            tone,
            region: preferences.region,
            category,
        }
    }

    fn slang(&self, term: &VernacularTermRecord, preferences: &Preferences) -> String {
        let templates = &self.phrasebook.templates;
        let appropriateness = term
            .social_appropriateness
            .split("; ")
            .map(lower_first)
            .collect::<Vec<_>>()
            .join("; ");

        let mut sentences = vec![templates.slang.render(&[
            ("term", term.term.trim()),
            ("literal_meaning", trim_sentence(&term.literal_meaning)),
            ("emotional_intent", lower_first(trim_sentence(&term.emotional_intent)).as_str()),
            ("appropriateness", trim_sentence(&appropriateness)),
            ("formality", term.formality.as_str()),
        ])];
        sentences.extend(self.variations(&term.regional_variations, Category::Slang));
        if preferences.formality == Some(Formality::Formal) && term.formality == Formality::Informal
        {
            sentences.push(INFORMAL_WITH_ELDERS.to_string());
        }
        sentences.push(templates.slang_closing.render(&[("term", term.term.trim())]));
        sentences.join(" ")
    }

    fn food(&self, city: &str, dishes: &[&DishRecord]) -> String {
        let templates = &self.phrasebook.templates;
        let city = dishes.first().map_or(city, |d| d.city.as_str()).trim();

        let mut sentences = vec![templates.food_intro.render(&[("city", city)])];
        for dish in dishes {
            let significance = dish
                .cultural_significance
                .as_deref()
                .map(trim_sentence)
                .filter(|s| !s.is_empty())
                .unwrap_or(DEFAULT_SIGNIFICANCE);
            let time = dish.time_slot().unwrap_or(TimeSlot::Any);
            let template = if time == TimeSlot::Any {
                &templates.food_dish_any_time
            } else {
                &templates.food_dish
            };
            sentences.push(template.render(&[
                ("name", dish.name.trim()),
                ("description", trim_sentence(&dish.description)),
                ("spice", dish.spice_level.as_str()),
                ("time", time.label().to_lowercase().as_str()),
                ("significance", significance),
            ]));
        }
        sentences.push(templates.food_closing.render(&[("city", city)]));
        sentences.join(" ")
    }

    fn festival(&self, festival: &FestivalRecord) -> String {
        let templates = &self.phrasebook.templates;
        let name = festival.name.trim();
        let foods = festival
            .associated_foods
            .iter()
            .map(|f| f.trim())
            .collect::<Vec<_>>()
            .join(", ");

        let mut sentences = vec![templates.festival.render(&[
            ("name", name),
            ("cultural_meaning", trim_sentence(&festival.cultural_meaning)),
            ("food_symbolism", trim_sentence(&festival.food_symbolism)),
            ("foods", foods.as_str()),
            ("emotional_tone", lower_first(trim_sentence(&festival.emotional_tone)).as_str()),
        ])];
        sentences.extend(self.variations(&festival.regional_variations, Category::Festival));
        sentences.push(templates.festival_closing.render(&[("name", name)]));
        sentences.join(" ")
    }

    fn emotion(
        &self,
        mapping: &MoodDishMapping,
        recommendation: &Recommendation,
        explanation: &str,
    ) -> String {
        let templates = &self.phrasebook.templates;
        let setting = match mapping.home_or_street {
            Setting::Home => "home",
            Setting::Street => "street",
            Setting::Both => "home and street",
        };

        let sentences = [
            templates.emotion.render(&[
                ("mood", mapping.mood.as_str()),
                ("food", recommendation.food.as_str()),
                ("reasoning", recommendation.reasoning.as_str()),
                ("cultural_context", recommendation.cultural_context.as_str()),
            ]),
            explanation.trim().to_string(),
            templates.emotion_logic.render(&[
                ("emotional_logic", trim_sentence(&mapping.emotional_logic)),
                ("setting", setting),
            ]),
            templates
                .emotion_closing
                .render(&[("mood", mapping.mood.as_str())]),
        ];
        sentences
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn variations(&self, variations: &[RegionalVariation], category: Category) -> Vec<String> {
        let template = match category {
            Category::Festival => &self.phrasebook.templates.festival_variation,
            _ => &self.phrasebook.templates.slang_variation,
        };
        variations
            .iter()
            .map(|v| {
                template.render(&[
                    ("region", v.region.trim()),
                    ("variation", trim_sentence(&v.variation)),
                ])
            })
            .collect()
    }
}

fn approximation_text(subject: &Subject<'_>) -> Option<String> {
    let approximation = match subject {
        Subject::Slang(lookup) => lookup.approximation(),
        Subject::Food { dishes, .. } => dishes.approximation(),
        Subject::Festival(lookup) => lookup.approximation(),
        Subject::Emotion { mapping, .. } => mapping.approximation(),
    };
    approximation.map(|a| a.content.clone())
}

/// Drop surrounding whitespace and trailing sentence punctuation so a value
/// can sit mid-sentence in a template.
fn trim_sentence(text: &str) -> &str {
    text.trim().trim_end_matches(['.', '!', ' '])
}

fn lower_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
