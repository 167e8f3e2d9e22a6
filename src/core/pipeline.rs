/// The main content pipeline: UserSelection → formatted response.
///
/// Wires together store lookup, mood mapping, composition and the output
/// formatter.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::core::composer::{ComposedContent, NarrativeComposer, Subject};
use crate::core::formatter::{OutputFormatter, ValidationReport};
use crate::core::matcher::Matcher;
use crate::core::mood::MoodToDishMapper;
use crate::core::phrasebook::{Phrasebook, PhrasebookError};
use crate::core::source::{FileSource, TextSource};
use crate::core::store::KnowledgeStore;
use crate::core::variety::{PhraseSelector, SeededSelector};
use crate::schema::selection::{Category, SelectionError, UserSelection};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("phrasebook error: {0}")]
    Phrasebook(#[from] PhrasebookError),
    #[error("invalid selection: {0}")]
    Selection(#[from] SelectionError),
}

/// The top-level engine. Built via `VernacularEngine::builder()`.
pub struct VernacularEngine {
    store: KnowledgeStore,
    formatter: OutputFormatter,
    seed: u64,
}

/// Builder for constructing a `VernacularEngine`.
pub struct VernacularEngineBuilder {
    seed: u64,
    document_path: Option<PathBuf>,
    phrasebook_path: Option<PathBuf>,
    /// Directly provided document text (for testing without files).
    document: Option<String>,
    /// Directly provided phrasebook (for testing without files).
    phrasebook: Option<Phrasebook>,
    selector: Option<Box<dyn PhraseSelector>>,
    matcher: Option<Box<dyn Matcher + Send + Sync>>,
}

impl VernacularEngine {
    pub fn builder() -> VernacularEngineBuilder {
        VernacularEngineBuilder {
            seed: 0,
            document_path: None,
            phrasebook_path: None,
            document: None,
            phrasebook: None,
            selector: None,
            matcher: None,
        }
    }

    pub fn store(&self) -> &KnowledgeStore {
        &self.store
    }

    pub fn phrasebook(&self) -> &Phrasebook {
        self.formatter.phrasebook()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Restart phrase selection from a new seed.
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.formatter.set_selector(Box::new(SeededSelector::new(seed)));
    }

    /// Look the selection up and compose unformatted prose for it.
    pub fn compose(&self, selection: &UserSelection) -> Result<ComposedContent, PipelineError> {
        selection.validate()?;
        let query = selection.selection.trim();
        let preferences = selection.preferences();

        let subject = match selection.category {
            Category::Slang => Subject::Slang(self.store.lookup_term_with_fallback(query)),
            Category::Food => Subject::Food {
                city: query,
                dishes: self.store.lookup_dishes_with_fallback(query, &preferences),
            },
            Category::Festival => {
                Subject::Festival(self.store.lookup_festival_with_fallback(query))
            }
            Category::Emotion => {
                let base = MoodToDishMapper::map(query);
                let explanation = MoodToDishMapper::explain(query, &base.food);
                Subject::Emotion {
                    mapping: self.store.lookup_mood_with_fallback(query),
                    recommendation: MoodToDishMapper::apply_preferences(base, &preferences),
                    explanation,
                }
            }
        };

        Ok(NarrativeComposer::new(self.formatter.phrasebook()).compose(&subject, &preferences))
    }

    /// Compose and format a response for the selection.
    pub fn respond(&mut self, selection: &UserSelection) -> Result<String, PipelineError> {
        let composed = self.compose(selection)?;
        debug!(
            category = %composed.category,
            selection = %selection.selection.trim(),
            tone = composed.tone.as_str(),
            words = ?composed.vocabulary_words_used,
            "formatting response"
        );
        Ok(self.format(&composed))
    }

    /// Run the output formatter over already-composed content.
    pub fn format(&mut self, composed: &ComposedContent) -> String {
        self.formatter.format(
            &composed.content,
            &composed.vocabulary_words_used,
            composed.category,
            composed.region,
        )
    }

    /// Menu entries for a category, in document order.
    pub fn options(&self, category: Category) -> Vec<String> {
        let keys = match category {
            Category::Slang => self.store.terms(),
            Category::Food => self.store.cities(),
            Category::Festival => self.store.festivals(),
            Category::Emotion => self.store.moods(),
        };
        keys.to_vec()
    }

    /// Check any text against the output policy.
    pub fn validate_output(&self, text: &str) -> ValidationReport {
        self.formatter.validate(text)
    }
}

impl VernacularEngineBuilder {
    /// Read the knowledge document from a file instead of the built-in one.
    pub fn document_path(mut self, path: impl AsRef<Path>) -> Self {
        self.document_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Provide knowledge document text directly.
    pub fn with_document(mut self, text: impl Into<String>) -> Self {
        self.document = Some(text.into());
        self
    }

    pub fn phrasebook_path(mut self, path: impl AsRef<Path>) -> Self {
        self.phrasebook_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Provide a phrasebook directly.
    pub fn with_phrasebook(mut self, phrasebook: Phrasebook) -> Self {
        self.phrasebook = Some(phrasebook);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Replace the seeded random phrase selection.
    pub fn with_selector(mut self, selector: Box<dyn PhraseSelector>) -> Self {
        self.selector = Some(selector);
        self
    }

    pub fn with_matcher(mut self, matcher: Box<dyn Matcher + Send + Sync>) -> Self {
        self.matcher = Some(matcher);
        self
    }

    pub fn build(self) -> Result<VernacularEngine, PipelineError> {
        let phrasebook = match (self.phrasebook, &self.phrasebook_path) {
            (Some(phrasebook), _) => phrasebook,
            (None, Some(path)) => Phrasebook::load_from_ron(path)?,
            (None, None) => Phrasebook::builtin()?,
        };

        let store = match (self.document, &self.document_path) {
            (Some(text), _) => KnowledgeStore::from_source(&TextSource(text)),
            (None, Some(path)) => KnowledgeStore::from_source(&FileSource::new(path)),
            (None, None) => KnowledgeStore::new(),
        };
        let store = match self.matcher {
            Some(matcher) => store.with_matcher(matcher),
            None => store,
        };

        let selector: Box<dyn PhraseSelector> = match self.selector {
            Some(selector) => selector,
            None => Box::new(SeededSelector::new(self.seed)),
        };

        Ok(VernacularEngine {
            store,
            formatter: OutputFormatter::new(phrasebook, selector),
            seed: self.seed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::DataOrigin;
    use crate::core::variety::FirstSelector;
    use crate::schema::selection::Preferences;

    fn engine() -> VernacularEngine {
        VernacularEngine::builder()
            .with_selector(Box::new(FirstSelector))
            .build()
            .unwrap()
    }

    #[test]
    fn builds_from_embedded_defaults() {
        let engine = engine();
        assert_eq!(engine.store().origin(), DataOrigin::Parsed);
        assert_eq!(engine.seed(), 0);
    }

    #[test]
    fn invalid_selection_is_rejected() {
        let mut engine = engine();
        let empty = UserSelection::new(Category::Slang, "   ");
        assert!(matches!(
            engine.respond(&empty),
            Err(PipelineError::Selection(SelectionError::EmptySelection))
        ));

        let long = UserSelection::new(Category::Food, "x".repeat(101));
        assert!(matches!(
            engine.compose(&long),
            Err(PipelineError::Selection(SelectionError::SelectionTooLong { .. }))
        ));
    }

    #[test]
    fn respond_produces_valid_output_for_every_option() {
        let mut engine = engine();
        for category in Category::ALL {
            for option in engine.options(category) {
                let out = engine
                    .respond(&UserSelection::new(category, option.clone()))
                    .unwrap();
                let report = engine.validate_output(&out);
                assert!(report.is_valid, "{} {}: {:?}", category, option, report.issues);
            }
        }
    }

    #[test]
    fn unknown_selection_degrades_to_apology() {
        let engine = engine();
        let composed = engine
            .compose(&UserSelection::new(Category::Festival, "Diwali"))
            .unwrap();
        assert!(composed.content.contains("Diwali"));
        assert!(composed.content.starts_with("Ayyo"));
    }

    #[test]
    fn missing_document_file_falls_back() {
        let engine = VernacularEngine::builder()
            .document_path("does/not/exist.txt")
            .build()
            .unwrap();
        assert_eq!(engine.store().origin(), DataOrigin::Fallback);
        assert_eq!(engine.options(Category::Emotion).len(), 5);
    }

    #[test]
    fn missing_phrasebook_file_is_an_error() {
        let result = VernacularEngine::builder()
            .phrasebook_path("does/not/exist.ron")
            .build();
        assert!(matches!(
            result,
            Err(PipelineError::Phrasebook(PhrasebookError::Io(_)))
        ));
    }

    #[test]
    fn same_seed_same_output() {
        let selection = UserSelection::new(Category::Food, "Guntur");
        let mut a = VernacularEngine::builder().seed(9).build().unwrap();
        let mut b = VernacularEngine::builder().seed(9).build().unwrap();
        for _ in 0..5 {
            assert_eq!(a.respond(&selection).unwrap(), b.respond(&selection).unwrap());
        }
    }

    #[test]
    fn formatting_composed_content_matches_respond() {
        let selection = UserSelection::new(Category::Festival, "Ugadi");
        let mut a = engine();
        let mut b = engine();
        let composed = a.compose(&selection).unwrap();
        assert_eq!(a.format(&composed), b.respond(&selection).unwrap());
    }

    #[test]
    fn region_preference_reaches_the_opener() {
        let mut engine = engine();
        let selection = UserSelection::new(Category::Food, "Vijayawada").with_preferences(
            Preferences {
                region: Some(crate::schema::selection::Region::Telangana),
                ..Preferences::default()
            },
        );
        let out = engine.respond(&selection).unwrap();
        assert!(out.starts_with("Arey mama!"), "{}", out);
    }
}
