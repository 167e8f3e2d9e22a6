/// Variety — how one phrase is picked from a fixed list.
///
/// Production output rotates through openers and closers; tests swap in a
/// deterministic strategy so formatted text is stable.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Picks one option from a fixed phrase list.
pub trait PhraseSelector: Send {
    fn select<'a>(&mut self, options: &'a [String]) -> Option<&'a str>;
}

/// Random choice from a seeded `StdRng`. Same seed, same sequence.
#[derive(Debug, Clone)]
pub struct SeededSelector {
    rng: StdRng,
}

impl SeededSelector {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl PhraseSelector for SeededSelector {
    fn select<'a>(&mut self, options: &'a [String]) -> Option<&'a str> {
        options.choose(&mut self.rng).map(String::as_str)
    }
}

/// Always the first option.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstSelector;

impl PhraseSelector for FirstSelector {
    fn select<'a>(&mut self, options: &'a [String]) -> Option<&'a str> {
        options.first().map(String::as_str)
    }
}
