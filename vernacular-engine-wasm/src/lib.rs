//! WASM bindings for vernacular-engine — powers the web menu demo.

use wasm_bindgen::prelude::*;

use vernacular_engine::core::composer::Tone;
use vernacular_engine::core::pipeline::VernacularEngine;
use vernacular_engine::core::variety::SeededSelector;
use vernacular_engine::schema::selection::{Category, Preferences, Region, UserSelection};

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Serialize)]
struct CategoryInfo {
    id: &'static str,
    options: Vec<String>,
}

#[derive(serde::Serialize)]
struct ResponseInfo {
    text: String,
    tone: &'static str,
    approximate: bool,
    issues: Vec<String>,
}

fn parse_category(s: &str) -> Result<Category, JsError> {
    s.parse::<Category>()
        .map_err(|e| JsError::new(&format!("Invalid category: {e}")))
}

/// An empty string means "no preferences".
fn parse_preferences(prefs_json: &str) -> Result<Preferences, JsError> {
    if prefs_json.trim().is_empty() {
        return Ok(Preferences::default());
    }
    serde_json::from_str(prefs_json)
        .map_err(|e| JsError::new(&format!("Invalid preferences JSON: {e}")))
}

// ---------------------------------------------------------------------------
// VernacularDemo — the main exported struct
// ---------------------------------------------------------------------------
#[wasm_bindgen]
pub struct VernacularDemo {
    engine: VernacularEngine,
}

#[wasm_bindgen]
impl VernacularDemo {
    /// Create a demo instance over the built-in knowledge base.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> Result<VernacularDemo, JsError> {
        let engine = VernacularEngine::builder()
            .seed(seed)
            .build()
            .map_err(|e| JsError::new(&format!("Engine build error: {e}")))?;
        Ok(VernacularDemo { engine })
    }

    /// Create a demo instance whose phrase choices differ on every page load.
    pub fn unseeded() -> Result<VernacularDemo, JsError> {
        let engine = VernacularEngine::builder()
            .with_selector(Box::new(SeededSelector::from_entropy()))
            .build()
            .map_err(|e| JsError::new(&format!("Engine build error: {e}")))?;
        Ok(VernacularDemo { engine })
    }

    /// Generate the formatted response for a menu selection.
    ///
    /// `prefs_json` is optional and shaped like:
    /// ```json
    /// {
    ///   "spice_level": "medium",
    ///   "dietary": "vegetarian",
    ///   "formality": "informal",
    ///   "region": "telangana",
    ///   "time_of_day": "evening"
    /// }
    /// ```
    pub fn respond(
        &mut self,
        category: &str,
        selection: &str,
        prefs_json: &str,
    ) -> Result<String, JsError> {
        let request = UserSelection::new(parse_category(category)?, selection)
            .with_preferences(parse_preferences(prefs_json)?);
        self.engine
            .respond(&request)
            .map_err(|e| JsError::new(&format!("Response error: {e}")))
    }

    /// Like `respond`, but returns JSON with the tone and policy check.
    pub fn respond_detailed(
        &mut self,
        category: &str,
        selection: &str,
        prefs_json: &str,
    ) -> Result<String, JsError> {
        let request = UserSelection::new(parse_category(category)?, selection)
            .with_preferences(parse_preferences(prefs_json)?);
        let composed = self
            .engine
            .compose(&request)
            .map_err(|e| JsError::new(&format!("Response error: {e}")))?;
        let text = self.engine.format(&composed);
        let report = self.engine.validate_output(&text);

        let info = ResponseInfo {
            text,
            tone: composed.tone.as_str(),
            approximate: composed.tone == Tone::Apologetic,
            issues: report.issues,
        };
        serde_json::to_string(&info)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Return JSON array of menu entries for a category.
    pub fn options(&self, category: &str) -> Result<String, JsError> {
        let options = self.engine.options(parse_category(category)?);
        serde_json::to_string(&options)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Return JSON array of every category with its menu entries.
    pub fn menu(&self) -> Result<String, JsError> {
        let menu: Vec<CategoryInfo> = Category::ALL
            .iter()
            .map(|&category| CategoryInfo {
                id: category.as_str(),
                options: self.engine.options(category),
            })
            .collect();
        serde_json::to_string(&menu)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Return JSON array of region identifiers accepted in preferences.
    pub fn regions() -> String {
        let keys: Vec<&str> = Region::ALL.iter().map(Region::key).collect();
        serde_json::to_string(&keys).unwrap_or_else(|_| "[]".to_string())
    }

    /// Return JSON array of spice levels, mildest first.
    pub fn spice_levels() -> String {
        serde_json::to_string(&["low", "medium", "high", "extreme"])
            .unwrap_or_else(|_| "[]".to_string())
    }

    /// Restart phrase selection from a new seed.
    pub fn reset(&mut self, seed: u64) {
        self.engine.reseed(seed);
    }
}
