//! Bag-of-words cosine similarity between text blocks.

use super::clamp_unit;
use crate::config::CompareOptions;
use std::collections::HashMap;

/// Apply option-driven normalization before scoring.
///
/// `ignore_whitespace` collapses runs of whitespace to single spaces and
/// trims the ends; `ignore_case` lower-cases the whole block.
#[must_use]
pub fn normalize_text(text: &str, options: &CompareOptions) -> String {
    let mut normalized = if options.ignore_whitespace {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    } else {
        text.to_string()
    };
    if options.ignore_case {
        normalized = normalized.to_lowercase();
    }
    normalized
}

/// Option-aware text similarity: normalize both blocks, then score.
#[must_use]
pub fn text_similarity(a: &str, b: &str, options: &CompareOptions) -> f64 {
    text_similarity_raw(&normalize_text(a, options), &normalize_text(b, options))
}

/// Cosine similarity of word-frequency vectors.
///
/// Both empty returns 1.0, exactly one empty returns 0.0. Tokens are split
/// on non-word boundaries and lower-cased; a zero-magnitude vector on either
/// side (no tokens survive) scores 0.0.
#[must_use]
pub fn text_similarity_raw(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let freq_a = word_frequencies(a);
    let freq_b = word_frequencies(b);

    // Equal vectors score exactly 1.0, without float noise from the norms
    if freq_a == freq_b {
        return if freq_a.is_empty() { 0.0 } else { 1.0 };
    }

    let dot: f64 = freq_a
        .iter()
        .filter_map(|(word, &count_a)| {
            freq_b
                .get(word)
                .map(|&count_b| f64::from(count_a) * f64::from(count_b))
        })
        .sum();

    let magnitude_a = magnitude(&freq_a);
    let magnitude_b = magnitude(&freq_b);
    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }

    clamp_unit(dot / (magnitude_a * magnitude_b))
}

/// Tokenize on non-word-character boundaries, lower-cased.
fn word_frequencies(text: &str) -> HashMap<String, u32> {
    let mut freq = HashMap::new();
    for token in text.split(|c: char| !(c.is_alphanumeric() || c == '_')) {
        if token.is_empty() {
            continue;
        }
        *freq.entry(token.to_lowercase()).or_insert(0) += 1;
    }
    freq
}

fn magnitude(freq: &HashMap<String, u32>) -> f64 {
    freq.values()
        .map(|&count| f64::from(count) * f64::from(count))
        .sum::<f64>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_empty() {
        assert_eq!(text_similarity_raw("", ""), 1.0);
    }

    #[test]
    fn test_one_empty() {
        assert_eq!(text_similarity_raw("hello", ""), 0.0);
        assert_eq!(text_similarity_raw("", "hello"), 0.0);
    }

    #[test]
    fn test_identical_text_is_exactly_one() {
        assert_eq!(
            text_similarity_raw("the quick brown fox", "the quick brown fox"),
            1.0
        );
    }

    #[test]
    fn test_case_insensitive_tokens() {
        assert_eq!(text_similarity_raw("Hello World", "hello world"), 1.0);
    }

    #[test]
    fn test_word_order_does_not_matter() {
        // Bag-of-words: permutations have identical frequency vectors
        assert_eq!(text_similarity_raw("alpha beta", "beta alpha"), 1.0);
    }

    #[test]
    fn test_disjoint_vocabularies() {
        assert_eq!(text_similarity_raw("alpha beta", "gamma delta"), 0.0);
    }

    #[test]
    fn test_partial_overlap_is_between_bounds() {
        let score = text_similarity_raw("engine oil pressure", "engine oil temperature");
        assert!(score > 0.0 && score < 1.0, "got {score}");
    }

    #[test]
    fn test_punctuation_only_scores_zero() {
        // Non-empty strings with no word tokens have zero-magnitude vectors
        assert_eq!(text_similarity_raw("...", "!!!"), 0.0);
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        let opts = CompareOptions::default();
        assert_eq!(normalize_text("a\n  b\tc ", &opts), "a b c");
    }

    #[test]
    fn test_normalize_case_folding() {
        let opts = CompareOptions::permissive();
        assert_eq!(normalize_text("Mixed CASE", &opts), "mixed case");
    }

    #[test]
    fn test_whitespace_variants_match_with_defaults() {
        let opts = CompareOptions::default();
        assert_eq!(text_similarity("a  b\nc", "a b c", &opts), 1.0);
    }
}
