/// Closest-match lookup used to make fallback messages helpful.

/// Minimum score a candidate needs to be suggested.
pub const MATCH_THRESHOLD: f32 = 0.3;

/// Finds the known key nearest to a query string.
pub trait Matcher {
    fn closest<'a>(&self, query: &str, candidates: &'a [String]) -> Option<&'a str>;
}

/// Containment / first-letter / length heuristic.
///
/// An exact case-insensitive match wins outright. Otherwise a candidate
/// scores 0.8 for containment in either direction, 0.2 for a shared first
/// character and 0.1 for a length within two. Candidates are scanned in
/// order and the best only changes on a strictly higher score, so the
/// earliest candidate wins a tie.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicMatcher;

impl HeuristicMatcher {
    pub fn score(query: &str, candidate: &str) -> f32 {
        let q = query.trim().to_lowercase();
        let c = candidate.trim().to_lowercase();
        let mut score = 0.0;
        if q.contains(&c) || c.contains(&q) {
            score += 0.8;
        }
        if q.chars().next().is_some() && q.chars().next() == c.chars().next() {
            score += 0.2;
        }
        if q.chars().count().abs_diff(c.chars().count()) <= 2 {
            score += 0.1;
        }
        score
    }
}

impl Matcher for HeuristicMatcher {
    fn closest<'a>(&self, query: &str, candidates: &'a [String]) -> Option<&'a str> {
        let normalized = query.trim().to_lowercase();
        if let Some(exact) = candidates
            .iter()
            .find(|c| c.trim().to_lowercase() == normalized)
        {
            return Some(exact.as_str());
        }

        let mut best: Option<&'a str> = None;
        let mut best_score = 0.0;
        for candidate in candidates {
            let score = Self::score(query, candidate);
            if score + f32::EPSILON >= MATCH_THRESHOLD && score > best_score {
                best = Some(candidate.as_str());
                best_score = score;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn festivals() -> Vec<String> {
        ["Sankranti", "Ugadi", "Vinayaka Chavithi"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn exact_match_short_circuits() {
        assert_eq!(HeuristicMatcher.closest("Ugadi", &festivals()), Some("Ugadi"));
        assert_eq!(HeuristicMatcher.closest("  ugadi ", &festivals()), Some("Ugadi"));
    }

    #[test]
    fn containment_scores_highest() {
        assert_eq!(HeuristicMatcher.closest("Vinayaka", &festivals()), Some("Vinayaka Chavithi"));
        assert_eq!(HeuristicMatcher.closest("sankranthi", &festivals()), Some("Sankranti"));
    }

    #[test]
    fn weak_similarity_returns_none() {
        // shared first letter only: 0.2, below threshold
        assert_eq!(HeuristicMatcher.closest("Diwali", &["Dasara Navaratri".to_string()]), None);
        assert_eq!(HeuristicMatcher.closest("xyz", &festivals()), None);
    }

    #[test]
    fn first_letter_and_length_reach_threshold() {
        // 0.2 + 0.1
        assert_eq!(HeuristicMatcher.closest("Uggadi", &festivals()), Some("Ugadi"));
    }

    #[test]
    fn earliest_candidate_wins_ties() {
        let candidates = vec!["Bava".to_string(), "Bala".to_string()];
        assert_eq!(HeuristicMatcher.closest("Baba", &candidates), Some("Bava"));
    }

    #[test]
    fn empty_candidates() {
        assert_eq!(HeuristicMatcher.closest("anything", &[]), None);
    }
}
