//! Similarity scorers for text, elements, and tree shape.
//!
//! All scores are in `[0.0, 1.0]`. The text layer is a deliberately naive
//! bag-of-words cosine: no stemming, no stop-word removal. Callers needing
//! domain tuning normalize their text before building the document tree.

mod element;
mod structural;
mod text;

pub use element::element_similarity;
pub use structural::structural_similarity;
pub use text::{normalize_text, text_similarity, text_similarity_raw};

/// Clamp a score to `[0.0, 1.0]`, snapping float noise at the top so that
/// identical inputs compare as exactly 1.0.
pub(crate) fn clamp_unit(score: f64) -> f64 {
    if score >= 1.0 - 1e-9 {
        1.0
    } else {
        score.max(0.0)
    }
}
