use std::collections::HashSet;

use crate::ranking::distance::similarity_normalized;
use crate::ranking::text::normalize;

/// Score for a normalized-exact title match
const EXACT_SCORE: f64 = 100.0;

/// Score when the title starts with the query
const PREFIX_SCORE: f64 = 90.0;

/// Score when the title contains the query as a substring
const SUBSTRING_SCORE: f64 = 75.0;

// Composite weights, tuned empirically for perceived relevance.
const TOKEN_OVERLAP_WEIGHT: f64 = 40.0;
const FULL_SIMILARITY_WEIGHT: f64 = 45.0;
const BEST_TOKEN_WEIGHT: f64 = 15.0;

/// Title tokens shorter than this are skipped in the best-token signal
const MIN_TOKEN_LEN: usize = 2;

/// Fuzzy relevance of `title` for `query`, in `[0, 100]`.
///
/// Branches are tried in strict priority order: empty → 0, exact → 100,
/// prefix → 90, substring → 75, else a weighted composite of token overlap,
/// full-string similarity and best single-token similarity. Pure and total:
/// never panics, identical inputs always score identically.
pub fn fuzzy_score(query: &str, title: &str) -> f64 {
    let q = normalize(query);
    let t = normalize(title);

    if q.is_empty() || t.is_empty() {
        return 0.0;
    }
    if t == q {
        return EXACT_SCORE;
    }
    if t.starts_with(&q) {
        return PREFIX_SCORE;
    }
    if t.contains(&q) {
        return SUBSTRING_SCORE;
    }

    let query_tokens: Vec<&str> = q.split(' ').collect();
    let title_tokens: Vec<&str> = t.split(' ').collect();
    let title_set: HashSet<&str> = title_tokens.iter().copied().collect();

    let overlap = query_tokens
        .iter()
        .filter(|tok| title_set.contains(**tok))
        .count();
    let overlap_ratio = overlap as f64 / query_tokens.len() as f64;

    let full_similarity = similarity_normalized(&q, &t);

    let best_token_similarity = title_tokens
        .iter()
        .filter(|tok| tok.len() >= MIN_TOKEN_LEN)
        .map(|tok| similarity_normalized(&q, tok))
        .fold(0.0, f64::max);

    overlap_ratio * TOKEN_OVERLAP_WEIGHT
        + full_similarity * FULL_SIMILARITY_WEIGHT
        + best_token_similarity * BEST_TOKEN_WEIGHT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_inputs_score_zero() {
        assert_eq!(fuzzy_score("", ""), 0.0);
        assert_eq!(fuzzy_score("batman", ""), 0.0);
        assert_eq!(fuzzy_score("", "Batman"), 0.0);
        assert_eq!(fuzzy_score("?!", "Batman"), 0.0);
    }

    #[test]
    fn test_exact_match() {
        assert_eq!(fuzzy_score("The Matrix", "The Matrix"), 100.0);
        // Exact after normalization too
        assert_eq!(fuzzy_score("amélie", "Amelie!"), 100.0);
    }

    #[test]
    fn test_exact_only_when_normalized_equal() {
        assert!(fuzzy_score("matrix", "The Matrix") < 100.0);
        assert!(fuzzy_score("batman", "Batman Begins") < 100.0);
    }

    #[test]
    fn test_prefix_match() {
        assert_eq!(fuzzy_score("batman", "Batman Begins"), 90.0);
        assert_eq!(fuzzy_score("the dark", "The Dark Knight"), 90.0);
    }

    #[test]
    fn test_substring_match() {
        assert_eq!(fuzzy_score("dark knight", "The Dark Knight"), 75.0);
        assert_eq!(fuzzy_score("matrix", "The Matrix"), 75.0);
    }

    #[test]
    fn test_composite_in_range() {
        let score = fuzzy_score("batmn begins", "Batman Begins");
        assert!(score > 0.0 && score < 100.0);

        let unrelated = fuzzy_score("batmn begins", "Finding Nemo");
        assert!(unrelated < score);
    }

    #[test]
    fn test_prefix_beats_unrelated_overlap() {
        let related = fuzzy_score("bat", "Batman Begins");
        let unrelated = fuzzy_score("bat", "The Avengers");
        assert!(related > unrelated);
    }

    #[test]
    fn test_token_overlap_contributes() {
        // Shared token "knight", nothing else lines up
        let with_overlap = fuzzy_score("knight rider", "First Knight");
        let without_overlap = fuzzy_score("knight rider", "Ocean's Eleven");
        assert!(with_overlap > without_overlap);
    }

    #[test]
    fn test_deterministic() {
        let a = fuzzy_score("inception", "Inception");
        let b = fuzzy_score("inception", "Inception");
        assert_eq!(a, b);
    }
}
