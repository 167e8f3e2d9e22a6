/// KB Linter — checks a knowledge document (and optionally a phrasebook)
/// before it ships.
///
/// Usage: kb_linter <knowledge_file> [--phrasebook <file.ron>]

use std::path::Path;
use std::process;

use tracing_subscriber::EnvFilter;
use vernacular_engine::core::parser::{DocumentParser, KnowledgeCollections};
use vernacular_engine::core::phrasebook::{contains_word, Phrasebook};
use vernacular_engine::core::source::{DocumentSource, FileSource};
use vernacular_engine::core::validator::validate_completeness;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        println!("Usage: kb_linter <knowledge_file> [--phrasebook <file.ron>]");
        process::exit(0);
    }

    let document_path = &args[1];
    let mut phrasebook_path = None;

    let mut i = 2;
    while i < args.len() {
        if args[i] == "--phrasebook" && i + 1 < args.len() {
            i += 1;
            phrasebook_path = Some(args[i].clone());
        }
        i += 1;
    }

    let source = FileSource::new(document_path);
    let text = match source.read() {
        Ok(text) => text,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(1);
        }
    };

    let parsed = DocumentParser::parse(&text);
    print_counts(&parsed);

    let errors = validate_completeness(&parsed);
    let warnings = lint_records(&parsed, phrasebook_path.as_deref());

    println!("\n=== Knowledge Lint Report ===\n");

    if errors.is_empty() && warnings.is_empty() {
        println!("All checks passed!");
    }

    for warning in &warnings {
        println!("WARNING: {}", warning);
    }

    for error in &errors {
        println!("ERROR: {}", error);
    }

    println!(
        "\nSummary: {} errors, {} warnings",
        errors.len(),
        warnings.len()
    );

    if !errors.is_empty() {
        println!("The engine would load its built-in fallback data for this document.");
        process::exit(1);
    }
}

fn print_counts(parsed: &KnowledgeCollections) {
    println!("Parsed {} terms", parsed.terms.len());
    println!("Parsed {} dishes", parsed.dishes.len());
    println!("Parsed {} festivals", parsed.festivals.len());
    println!("Parsed {} mood mappings", parsed.mood_mappings.len());
}

fn lint_records(parsed: &KnowledgeCollections, phrasebook_path: Option<&str>) -> Vec<String> {
    let mut warnings = Vec::new();

    for term in &parsed.terms {
        if term.regional_variations.is_empty() {
            warnings.push(format!("Term '{}' has no regional variations", term.term));
        }
    }

    for dish in &parsed.dishes {
        if dish.cultural_significance.is_none() {
            warnings.push(format!(
                "Dish '{}' ({}) has no cultural significance",
                dish.name, dish.city
            ));
        }
    }

    for festival in &parsed.festivals {
        if festival.associated_foods.len() < 2 {
            warnings.push(format!(
                "Festival '{}' lists only {} food(s)",
                festival.name,
                festival.associated_foods.len()
            ));
        }
    }

    // Jargon in the document survives into responses until the formatter strips it.
    let phrasebook = match phrasebook_path {
        Some(path) => match Phrasebook::load_from_ron(Path::new(path)) {
            Ok(book) => book,
            Err(e) => {
                warnings.push(format!("Could not load phrasebook '{}': {}", path, e));
                return warnings;
            }
        },
        None => match Phrasebook::builtin() {
            Ok(book) => book,
            Err(e) => {
                warnings.push(format!("Built-in phrasebook is broken: {}", e));
                return warnings;
            }
        },
    };

    let texts = parsed
        .terms
        .iter()
        .map(|t| (t.term.as_str(), format!("{} {}", t.emotional_intent, t.social_appropriateness)))
        .chain(
            parsed
                .dishes
                .iter()
                .map(|d| (d.name.as_str(), d.description.clone())),
        )
        .chain(
            parsed
                .festivals
                .iter()
                .map(|f| (f.name.as_str(), format!("{} {}", f.cultural_meaning, f.food_symbolism))),
        );
    for (name, text) in texts {
        let lower = text.to_lowercase();
        for word in &phrasebook.jargon {
            if contains_word(&lower, word) {
                warnings.push(format!("'{}' mentions technical term '{}'", name, word));
            }
        }
    }

    warnings
}
