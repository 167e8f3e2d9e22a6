/// Knowledge store — keyed, read-only access to the parsed (or fallback)
/// knowledge base.
///
/// Built once: read the document, parse it, check completeness, and fall
/// back to the fixed dataset on any failure. Never mutated afterward, so a
/// single store can be shared freely between readers.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::fallback::fallback_collections;
use crate::core::matcher::{HeuristicMatcher, Matcher};
use crate::core::parser::{DocumentParser, KnowledgeCollections};
use crate::core::source::{DocumentSource, EmbeddedSource};
use crate::core::validator::validate_completeness;
use crate::schema::record::{
    DishRecord, FestivalRecord, MoodDishMapping, TimeSlot, VernacularTermRecord,
};
use crate::schema::selection::{Dietary, Preferences};

/// Name fragments that mark a dish as non-vegetarian.
const MEAT_KEYWORDS: &[&str] = &[
    "chicken", "mutton", "mamsam", "kodi", "fish", "chepa", "prawn", "royyala", "egg",
    "keema", "meat",
];

fn is_non_vegetarian(dish: &DishRecord) -> bool {
    let name = dish.name.to_lowercase();
    MEAT_KEYWORDS.iter().any(|k| name.contains(k))
}

fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}

/// Why a lookup fell back to an approximation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    UnknownTerm,
    UnknownCity,
    NoMatchingDishes,
    UnknownFestival,
    UnknownMood,
}

/// What a lookup miss returns instead of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Approximation {
    /// Ready-to-show apology text. Always contains `original_query`.
    pub content: String,
    pub original_query: String,
    pub reason: FallbackReason,
    /// The nearest known key, when one was close enough.
    pub suggestion: Option<String>,
}

/// Result of a lookup that never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    Approximate(Approximation),
}

impl<T> Lookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn approximation(&self) -> Option<&Approximation> {
        match self {
            Self::Found(_) => None,
            Self::Approximate(approx) => Some(approx),
        }
    }
}

/// Where the store's records came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataOrigin {
    Parsed,
    Fallback,
}

/// Records in document order with a case-insensitive key index.
/// The first record for a key wins.
#[derive(Debug, Clone)]
struct Index<T> {
    records: Vec<T>,
    names: Vec<String>,
    keys: FxHashMap<String, usize>,
}

impl<T> Index<T> {
    fn build(records: Vec<T>, key: impl Fn(&T) -> &str) -> Self {
        let mut kept = Vec::with_capacity(records.len());
        let mut names = Vec::with_capacity(records.len());
        let mut keys = FxHashMap::default();
        for record in records {
            let name = key(&record).trim().to_string();
            let normalized = normalize_key(&name);
            if keys.contains_key(&normalized) {
                continue;
            }
            keys.insert(normalized, kept.len());
            names.push(name);
            kept.push(record);
        }
        Self {
            records: kept,
            names,
            keys,
        }
    }

    fn get(&self, key: &str) -> Option<&T> {
        self.keys
            .get(&normalize_key(key))
            .map(|&i| &self.records[i])
    }
}

pub struct KnowledgeStore {
    terms: Index<VernacularTermRecord>,
    festivals: Index<FestivalRecord>,
    moods: Index<MoodDishMapping>,
    dishes: Vec<DishRecord>,
    cities: Vec<String>,
    dishes_by_city: FxHashMap<String, Vec<usize>>,
    matcher: Box<dyn Matcher + Send + Sync>,
    origin: DataOrigin,
    load_issues: Vec<String>,
}

impl Default for KnowledgeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KnowledgeStore {
    /// Load from the standard embedded document.
    pub fn new() -> Self {
        Self::from_source(&EmbeddedSource)
    }

    /// Load from any document source, falling back to the fixed dataset
    /// if the source is unreadable or the parsed data is incomplete.
    pub fn from_source(source: &dyn DocumentSource) -> Self {
        match source.read() {
            Ok(text) => Self::from_text(&text),
            Err(e) => {
                warn!(
                    source = %source.describe(),
                    error = %e,
                    "knowledge document unavailable, loading fallback data"
                );
                Self::from_collections(fallback_collections(), DataOrigin::Fallback, vec![e.to_string()])
            }
        }
    }

    pub fn from_text(text: &str) -> Self {
        let parsed = DocumentParser::parse(text);
        let issues = validate_completeness(&parsed);
        if issues.is_empty() {
            Self::from_collections(parsed, DataOrigin::Parsed, Vec::new())
        } else {
            warn!(?issues, "knowledge document incomplete, loading fallback data");
            Self::from_collections(fallback_collections(), DataOrigin::Fallback, issues)
        }
    }

    fn from_collections(
        collections: KnowledgeCollections,
        origin: DataOrigin,
        load_issues: Vec<String>,
    ) -> Self {
        let mut cities: Vec<String> = Vec::new();
        let mut dishes_by_city: FxHashMap<String, Vec<usize>> = FxHashMap::default();
        for (i, dish) in collections.dishes.iter().enumerate() {
            let key = normalize_key(&dish.city);
            if !dishes_by_city.contains_key(&key) {
                cities.push(dish.city.trim().to_string());
            }
            dishes_by_city.entry(key).or_default().push(i);
        }

        let store = Self {
            terms: Index::build(collections.terms, |t| t.term.as_str()),
            festivals: Index::build(collections.festivals, |f| f.name.as_str()),
            moods: Index::build(collections.mood_mappings, |m| m.mood.as_str()),
            dishes: collections.dishes,
            cities,
            dishes_by_city,
            matcher: Box::new(HeuristicMatcher),
            origin,
            load_issues,
        };
        info!(
            origin = ?store.origin,
            terms = store.terms.records.len(),
            dishes = store.dishes.len(),
            festivals = store.festivals.records.len(),
            moods = store.moods.records.len(),
            "knowledge store loaded"
        );
        store
    }

    /// Replace the closest-match strategy used by the fallback lookups.
    pub fn with_matcher(mut self, matcher: Box<dyn Matcher + Send + Sync>) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn origin(&self) -> DataOrigin {
        self.origin
    }

    /// Completeness issues or read error that triggered the fallback.
    pub fn load_issues(&self) -> &[String] {
        &self.load_issues
    }

    // -- exact lookups -----------------------------------------------------

    pub fn lookup_term(&self, term: &str) -> Option<&VernacularTermRecord> {
        self.terms.get(term)
    }

    pub fn lookup_festival(&self, name: &str) -> Option<&FestivalRecord> {
        self.festivals.get(name)
    }

    pub fn lookup_mood(&self, mood: &str) -> Option<&MoodDishMapping> {
        self.moods.get(mood)
    }

    /// Dishes for a city that pass the dietary, spice and time filters.
    /// Unknown cities give an empty list.
    pub fn lookup_dishes(&self, city: &str, preferences: &Preferences) -> Vec<&DishRecord> {
        let Some(indices) = self.dishes_by_city.get(&normalize_key(city)) else {
            return Vec::new();
        };
        indices
            .iter()
            .map(|&i| &self.dishes[i])
            .filter(|dish| match preferences.dietary {
                Some(Dietary::Vegetarian) => !is_non_vegetarian(dish),
                Some(Dietary::NonVegetarian) => is_non_vegetarian(dish),
                None => true,
            })
            .filter(|dish| {
                preferences
                    .spice_level
                    .map_or(true, |ceiling| dish.spice_level <= ceiling)
            })
            .filter(|dish| match preferences.time_of_day {
                None | Some(TimeSlot::Any) => true,
                Some(wanted) => matches!(dish.time_slot(), Some(slot) if slot == wanted || slot == TimeSlot::Any),
            })
            .collect()
    }

    // -- lookups with fallback ---------------------------------------------

    pub fn lookup_term_with_fallback(&self, term: &str) -> Lookup<&VernacularTermRecord> {
        match self.lookup_term(term) {
            Some(record) => Lookup::Found(record),
            None => Lookup::Approximate(self.approximate(
                term,
                &self.terms.names,
                FallbackReason::UnknownTerm,
            )),
        }
    }

    pub fn lookup_festival_with_fallback(&self, name: &str) -> Lookup<&FestivalRecord> {
        match self.lookup_festival(name) {
            Some(record) => Lookup::Found(record),
            None => Lookup::Approximate(self.approximate(
                name,
                &self.festivals.names,
                FallbackReason::UnknownFestival,
            )),
        }
    }

    pub fn lookup_mood_with_fallback(&self, mood: &str) -> Lookup<&MoodDishMapping> {
        match self.lookup_mood(mood) {
            Some(record) => Lookup::Found(record),
            None => Lookup::Approximate(self.approximate(
                mood,
                &self.moods.names,
                FallbackReason::UnknownMood,
            )),
        }
    }

    pub fn lookup_dishes_with_fallback(
        &self,
        city: &str,
        preferences: &Preferences,
    ) -> Lookup<Vec<&DishRecord>> {
        if !self.dishes_by_city.contains_key(&normalize_key(city)) {
            return Lookup::Approximate(self.approximate(
                city,
                &self.cities,
                FallbackReason::UnknownCity,
            ));
        }
        let dishes = self.lookup_dishes(city, preferences);
        if dishes.is_empty() {
            return Lookup::Approximate(self.approximate(
                city,
                &self.cities,
                FallbackReason::NoMatchingDishes,
            ));
        }
        Lookup::Found(dishes)
    }

    fn approximate(&self, query: &str, known: &[String], reason: FallbackReason) -> Approximation {
        let query = query.trim();
        let suggestion = self
            .matcher
            .closest(query, known)
            .map(str::to_string);
        Approximation {
            content: apology(query, suggestion.as_deref(), known, reason),
            original_query: query.to_string(),
            reason,
            suggestion,
        }
    }

    // -- enumeration -------------------------------------------------------

    pub fn terms(&self) -> &[String] {
        &self.terms.names
    }

    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    pub fn festivals(&self) -> &[String] {
        &self.festivals.names
    }

    pub fn moods(&self) -> &[String] {
        &self.moods.names
    }
}

fn apology(query: &str, suggestion: Option<&str>, known: &[String], reason: FallbackReason) -> String {
    let opening = match reason {
        FallbackReason::UnknownTerm => format!("Ayyo, I don't know the word \"{}\" yet.", query),
        FallbackReason::UnknownCity => {
            format!("Ayyo, I don't have food notes for \"{}\" yet.", query)
        }
        FallbackReason::NoMatchingDishes => format!(
            "Ayyo, nothing from \"{}\" matches those preferences. Try a higher spice level or a different time of day.",
            query
        ),
        FallbackReason::UnknownFestival => {
            format!("Ayyo, I haven't learnt about \"{}\" yet.", query)
        }
        FallbackReason::UnknownMood => {
            format!("Ayyo, I don't have a dish for feeling \"{}\" yet.", query)
        }
    };

    match (reason, suggestion) {
        (FallbackReason::NoMatchingDishes, _) => opening,
        (_, Some(nearest)) => format!("{} Did you mean \"{}\", bava?", opening, nearest),
        (_, None) if !known.is_empty() => {
            let shown: Vec<&str> = known.iter().take(5).map(String::as_str).collect();
            format!("{} Try one of these: {}.", opening, shown.join(", "))
        }
        (_, None) => opening,
    }
}
