/// Output formatter — the last pass over composed prose.
///
/// `format` runs five steps in order: opener, vocabulary, jargon strip,
/// closer, normalisation. With a deterministic selector the result is a
/// fixed point: formatting it again changes nothing.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::phrasebook::{contains_word, Phrasebook, WordClass};
use crate::core::variety::PhraseSelector;
use crate::schema::selection::{Category, Region};

static SPACE_BEFORE_PUNCT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+([,.!?;:])").expect("static regex"));
static DANGLING_PUNCT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[,;:]+([.!?,;:])").expect("static regex"));
static EMPTY_PARENS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(\s*\)").expect("static regex"));
static TERMINATOR_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([.!?])[.!?,;:]+").expect("static regex"));
/// A sentence reduced to a lone article or determiner by jargon removal.
static ORPHAN_SENTENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(^|[.!?]\s+)(?:the|a|an|this|that|these|those|our|your|my|its)\s*[.!?]+\s*")
        .expect("static regex")
});
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));
static SENTENCE_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([.!?]\s+)(\p{Ll})").expect("static regex"));

/// Outcome of checking text against the output policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub issues: Vec<String>,
}

pub struct OutputFormatter {
    phrasebook: Phrasebook,
    jargon: Option<Regex>,
    selector: Box<dyn PhraseSelector>,
}

impl OutputFormatter {
    pub fn new(phrasebook: Phrasebook, selector: Box<dyn PhraseSelector>) -> Self {
        let jargon = jargon_pattern(&phrasebook.jargon);
        Self {
            phrasebook,
            jargon,
            selector,
        }
    }

    pub fn phrasebook(&self) -> &Phrasebook {
        &self.phrasebook
    }

    pub fn set_selector(&mut self, selector: Box<dyn PhraseSelector>) {
        self.selector = selector;
    }

    pub fn format(
        &mut self,
        content: &str,
        telugu_words: &[String],
        category: Category,
        region: Option<Region>,
    ) -> String {
        let text = self.ensure_opener(content.trim(), region);
        let text = self.ensure_vocabulary(text, telugu_words, category);
        let text = self.strip_jargon(text);
        let text = self.ensure_closer(text, category);
        normalize(&text)
    }

    /// Check text against the output policy, reporting every failed check.
    pub fn validate(&self, content: &str) -> ValidationReport {
        let lower = content.to_lowercase();
        let mut issues = Vec::new();

        if !self.phrasebook.vocabulary.iter().any(|w| contains_word(&lower, w)) {
            issues.push("No Telugu vocabulary found".to_string());
        }

        if let Some(jargon) = &self.jargon {
            let mut found: Vec<String> = jargon
                .find_iter(content)
                .map(|m| m.as_str().to_lowercase())
                .collect();
            found.dedup();
            if !found.is_empty() {
                issues.push(format!("Contains technical terms: {}", found.join(", ")));
            }
        }

        if !self
            .phrasebook
            .warmth_markers
            .iter()
            .any(|m| lower.contains(m.as_str()))
        {
            issues.push("No warmth marker found".to_string());
        }

        if !content.trim_end().ends_with(['.', '!', '?']) {
            issues.push("Missing terminal punctuation".to_string());
        }

        ValidationReport {
            is_valid: issues.is_empty(),
            issues,
        }
    }

    fn ensure_opener(&mut self, text: &str, region: Option<Region>) -> String {
        let first_word = text
            .trim_start_matches(|c: char| !c.is_alphanumeric())
            .split(|c: char| !c.is_alphanumeric())
            .next()
            .unwrap_or_default()
            .to_lowercase();
        if self.phrasebook.opener_patterns.contains(&first_word) {
            return text.to_string();
        }
        match self.selector.select(self.phrasebook.openers.for_region(region)) {
            Some(opener) => format!("{} {}", opener, text),
            None => text.to_string(),
        }
    }

    fn ensure_vocabulary(&mut self, text: String, words: &[String], category: Category) -> String {
        let words = if words.is_empty() {
            self.phrasebook.category_words.get(category)
        } else {
            words
        };
        let lower = text.to_lowercase();
        if words.iter().any(|w| contains_word(&lower, &w.to_lowercase())) {
            return text;
        }
        let Some(word) = self.selector.select(words) else {
            return text;
        };
        match self.phrasebook.word_class(word) {
            WordClass::Interjection => format!("{}, {}", capitalize(word), text),
            WordClass::Kinship => {
                append_sentence(&text, &format!("That's what we call it, {}!", word))
            }
            WordClass::Other => append_sentence(&text, &format!("We call it {} in Telugu.", word)),
        }
    }

    fn strip_jargon(&self, text: String) -> String {
        let Some(jargon) = &self.jargon else {
            return text;
        };
        if !jargon.is_match(&text) {
            return text;
        }
        let mut text = text;
        // removals can bring the words of a multi-word term together
        while jargon.is_match(&text) {
            text = WHITESPACE
                .replace_all(&jargon.replace_all(&text, ""), " ")
                .into_owned();
        }
        let text = EMPTY_PARENS.replace_all(&text, "");
        let text = SPACE_BEFORE_PUNCT.replace_all(&text, "$1");
        let text = ORPHAN_SENTENCE.replace_all(&text, "${1}");
        let text = DANGLING_PUNCT.replace_all(&text, "$1");
        let text = TERMINATOR_RUN.replace_all(&text, "$1");
        text.trim().to_string()
    }

    fn ensure_closer(&mut self, text: String, category: Category) -> String {
        let last = last_sentence(&text).to_lowercase();
        if self
            .phrasebook
            .closing_markers
            .iter()
            .any(|m| last.contains(m.as_str()))
        {
            return text;
        }
        match self.selector.select(self.phrasebook.closers.get(category)) {
            Some(closer) => append_sentence(&text, closer),
            None => text,
        }
    }
}

/// Case-insensitive whole-word pattern over the denylist. Spaces inside a
/// multi-word term match any run of whitespace.
fn jargon_pattern(terms: &[String]) -> Option<Regex> {
    let alternatives: Vec<String> = terms
        .iter()
        .filter(|t| !t.trim().is_empty())
        .map(|t| {
            t.split_whitespace()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"\s+")
        })
        .collect();
    if alternatives.is_empty() {
        return None;
    }
    Regex::new(&format!(r"(?i)\b(?:{})\b", alternatives.join("|"))).ok()
}

/// The final sentence of `text`, ignoring its own terminal punctuation.
fn last_sentence(text: &str) -> &str {
    let body = text.trim_end().trim_end_matches(['.', '!', '?']);
    match body.rfind(['.', '!', '?']) {
        Some(i) => &body[i + 1..],
        None => body,
    }
}

/// Append a sentence, closing off the text before it if needed.
fn append_sentence(text: &str, sentence: &str) -> String {
    let text = text.trim_end();
    if text.is_empty() {
        sentence.to_string()
    } else if text.ends_with(['.', '!', '?']) {
        format!("{} {}", text, sentence)
    } else {
        format!("{}. {}", text, sentence)
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Collapse whitespace, capitalise sentence starts and the first letter,
/// and guarantee terminal punctuation.
fn normalize(text: &str) -> String {
    let text = WHITESPACE.replace_all(text.trim(), " ");
    let text = SENTENCE_START.replace_all(&text, |caps: &regex::Captures| {
        format!("{}{}", &caps[1], caps[2].to_uppercase())
    });

    let mut out = String::with_capacity(text.len() + 1);
    let mut capitalized = false;
    for c in text.chars() {
        if !capitalized && c.is_alphabetic() {
            out.extend(c.to_uppercase());
            capitalized = true;
        } else {
            out.push(c);
        }
    }

    if !out.ends_with(['.', '!', '?']) {
        out.push('.');
    }
    out
}
