/// Preview — interactive shell for trying selections against a knowledge
/// document and phrasebook.
///
/// Usage: preview [--document <path>] [--phrasebook <path>] [--seed <n>]
///
/// Commands:
///   slang|food|festival|mood <selection> [key=value ...]  — generate a response
///   options <category>     — list menu entries for a category
///   prefs [key=value ...]  — show or set session preferences ('prefs clear' resets)
///   check <text>           — validate any text against the output policy
///   bulk <n> <category> <selection>  — generate n responses with variety stats
///   seed <n>               — set RNG seed
///   help                   — list commands
///   quit                   — exit

use rustc_hash::FxHashSet;
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;
use vernacular_engine::core::pipeline::VernacularEngine;
use vernacular_engine::schema::record::{Formality, SpiceLevel, TimeSlot};
use vernacular_engine::schema::selection::{
    Category, Dietary, Preferences, Region, SelectionError, UserSelection,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut document_path = None;
    let mut phrasebook_path = None;
    let mut seed: u64 = 42;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_usage();
                return;
            }
            "--document" if i + 1 < args.len() => {
                i += 1;
                document_path = Some(args[i].clone());
            }
            "--phrasebook" if i + 1 < args.len() => {
                i += 1;
                phrasebook_path = Some(args[i].clone());
            }
            "--seed" if i + 1 < args.len() => {
                i += 1;
                seed = args[i].parse().unwrap_or(42);
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let mut builder = VernacularEngine::builder().seed(seed);
    if let Some(ref path) = document_path {
        builder = builder.document_path(path);
    }
    if let Some(ref path) = phrasebook_path {
        builder = builder.phrasebook_path(path);
    }
    let mut engine = match builder.build() {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };

    println!("Knowledge origin: {:?}", engine.store().origin());
    for issue in engine.store().load_issues() {
        println!("  load issue: {}", issue);
    }
    println!("Seed: {}", engine.seed());
    println!("Type 'help' for commands.\n");

    let mut session_prefs = Preferences::default();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("preview> ");
        stdout.flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let cmd = parts[0].to_lowercase();

        match cmd.as_str() {
            "quit" | "exit" | "q" => {
                println!("Poyi vastanu. Goodbye.");
                break;
            }
            "help" | "h" | "?" => {
                print_help();
            }
            "slang" | "food" | "festival" | "mood" | "emotion" => {
                let Ok(category) = cmd.parse::<Category>() else {
                    continue;
                };
                let (selection, prefs) = match split_request(&parts[1..], &session_prefs) {
                    Ok(request) => request,
                    Err(e) => {
                        println!("ERROR: {}", e);
                        continue;
                    }
                };
                if selection.is_empty() {
                    println!("Usage: {} <selection> [key=value ...]", cmd);
                    println!("  Try 'options {}' to see what is available.", category);
                    continue;
                }
                let request = UserSelection::new(category, selection).with_preferences(prefs);
                match engine.respond(&request) {
                    Ok(text) => {
                        println!("\n--- Response ---");
                        println!("{}", text);
                        println!("--- End ---");
                        let report = engine.validate_output(&text);
                        if !report.is_valid {
                            println!("Policy issues: {}", report.issues.join("; "));
                        }
                        println!();
                    }
                    Err(e) => {
                        println!("ERROR: {}", e);
                    }
                }
            }
            "options" => {
                let Some(category) = parts.get(1).and_then(|c| c.parse::<Category>().ok()) else {
                    println!("Usage: options <slang|food|festival|mood>");
                    continue;
                };
                for option in engine.options(category) {
                    println!("  {}", option);
                }
            }
            "prefs" => {
                if parts.get(1) == Some(&"clear") {
                    session_prefs = Preferences::default();
                    println!("Preferences cleared.");
                    continue;
                }
                for part in &parts[1..] {
                    if let Err(e) = apply_preference(&mut session_prefs, part) {
                        println!("ERROR: {}", e);
                    }
                }
                print_preferences(&session_prefs);
            }
            "check" => {
                let text = line[cmd.len()..].trim();
                let report = engine.validate_output(text);
                if report.is_valid {
                    println!("Valid.");
                } else {
                    for issue in &report.issues {
                        println!("  {}", issue);
                    }
                }
            }
            "seed" => {
                if parts.len() < 2 {
                    println!("Current seed: {}", engine.seed());
                    continue;
                }
                match parts[1].parse::<u64>() {
                    Ok(s) => {
                        engine.reseed(s);
                        println!("Seed set to {}", s);
                    }
                    Err(_) => {
                        println!("Invalid seed: {}", parts[1]);
                    }
                }
            }
            "bulk" => {
                if parts.len() < 4 {
                    println!("Usage: bulk <n> <category> <selection>");
                    continue;
                }
                let count: usize = match parts[1].parse() {
                    Ok(n) if n > 0 => n,
                    _ => {
                        println!("Invalid count: {}", parts[1]);
                        continue;
                    }
                };
                let category = match parts[2].parse::<Category>() {
                    Ok(c) => c,
                    Err(e) => {
                        println!("ERROR: {}", e);
                        continue;
                    }
                };
                let (selection, prefs) = match split_request(&parts[3..], &session_prefs) {
                    Ok(request) => request,
                    Err(e) => {
                        println!("ERROR: {}", e);
                        continue;
                    }
                };
                let request = UserSelection::new(category, selection).with_preferences(prefs);
                run_bulk(&mut engine, &request, count);
            }
            _ => {
                println!("Unknown command: '{}'. Type 'help' for commands.", cmd);
            }
        }
    }
}

/// Split command arguments into the selection text and per-request
/// preferences layered over the session ones.
fn split_request(
    parts: &[&str],
    session: &Preferences,
) -> Result<(String, Preferences), SelectionError> {
    let mut prefs = session.clone();
    let mut words = Vec::new();
    for part in parts {
        if part.contains('=') {
            apply_preference(&mut prefs, part)?;
        } else {
            words.push(*part);
        }
    }
    Ok((words.join(" "), prefs))
}

fn apply_preference(prefs: &mut Preferences, pair: &str) -> Result<(), SelectionError> {
    let Some((key, value)) = pair.split_once('=') else {
        return Err(SelectionError::UnknownPreference {
            field: "preference",
            value: pair.to_string(),
        });
    };
    match key.trim().to_lowercase().as_str() {
        "spice" => prefs.spice_level = Some(value.parse::<SpiceLevel>()?),
        "diet" | "dietary" => prefs.dietary = Some(value.parse::<Dietary>()?),
        "formality" => prefs.formality = Some(value.parse::<Formality>()?),
        "region" => prefs.region = Some(value.parse::<Region>()?),
        "time" => prefs.time_of_day = Some(value.parse::<TimeSlot>()?),
        other => {
            return Err(SelectionError::UnknownPreference {
                field: "preference",
                value: other.to_string(),
            })
        }
    }
    Ok(())
}

fn print_preferences(prefs: &Preferences) {
    println!("  spice:     {}", prefs.spice_level.map_or("-", |s| s.as_str()));
    println!("  dietary:   {:?}", prefs.dietary);
    println!("  formality: {}", prefs.formality.map_or("-", |f| f.as_str()));
    println!("  region:    {}", prefs.region.map_or("-", |r| r.display_name()));
    println!("  time:      {}", prefs.time_of_day.map_or("-", |t| t.label()));
}

fn run_bulk(engine: &mut VernacularEngine, request: &UserSelection, count: usize) {
    let mut distinct: FxHashSet<String> = FxHashSet::default();
    let mut openers: FxHashSet<String> = FxHashSet::default();
    let mut invalid = 0;

    for n in 0..count {
        let text = match engine.respond(request) {
            Ok(text) => text,
            Err(e) => {
                println!("ERROR: {}", e);
                return;
            }
        };
        if !engine.validate_output(&text).is_valid {
            invalid += 1;
        }
        if let Some(first) = text.split_inclusive(['!', '.', '?']).next() {
            openers.insert(first.trim().to_string());
        }
        if n < 3 {
            println!("[{}] {}", n + 1, text);
        }
        distinct.insert(text);
    }

    println!("\n=== Variety Report ===");
    println!("Responses:          {}", count);
    println!("Distinct responses: {}", distinct.len());
    println!("Distinct openers:   {}", openers.len());
    println!("Policy failures:    {}", invalid);
}

fn print_usage() {
    println!("Usage: preview [--document <path>] [--phrasebook <path>] [--seed <n>]");
    println!();
    println!("Without --document the built-in knowledge base is used.");
}

fn print_help() {
    println!("Commands:");
    println!("  slang <term> [key=value ...]       Explain a slang term");
    println!("  food <city> [key=value ...]        Recommend dishes from a city");
    println!("  festival <name> [key=value ...]    Describe a festival");
    println!("  mood <mood> [key=value ...]        Recommend comfort food for a mood");
    println!("  options <category>                 List menu entries");
    println!("  prefs [key=value ...] | prefs clear  Show or set session preferences");
    println!("  check <text>                       Validate text against the output policy");
    println!("  bulk <n> <category> <selection>    Generate n responses with variety stats");
    println!("  seed <n>                           Set RNG seed");
    println!("  help                               Show this help");
    println!("  quit                               Exit");
    println!();
    println!("Preference keys: spice=low|medium|high|extreme, diet=veg|non-veg,");
    println!("  formality=formal|informal, region=coastal_andhra|rayalaseema|telangana|uttarandhra,");
    println!("  time=morning|lunch|evening|any");
}
