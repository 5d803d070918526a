//! Pairwise element similarity.

use super::text::text_similarity;
use crate::config::CompareOptions;
use crate::model::Element;

/// Combined similarity for a pair of tree nodes.
///
/// Element type is a strong structural signal: a kind mismatch halves the
/// text score, capping it at 0.5 even for identical text. Matching kinds
/// pass the text similarity through unchanged.
#[must_use]
pub fn element_similarity(a: &Element, b: &Element, options: &CompareOptions) -> f64 {
    let text_score = text_similarity(&a.text, &b.text, options);
    if a.kind == b.kind {
        text_score
    } else {
        0.5 * text_score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ElementKind;

    #[test]
    fn test_same_kind_same_text() {
        let a = Element::new(ElementKind::Paragraph, "identical wording");
        let b = Element::new(ElementKind::Paragraph, "identical wording");
        assert_eq!(element_similarity(&a, &b, &CompareOptions::default()), 1.0);
    }

    #[test]
    fn test_kind_mismatch_caps_at_half() {
        let a = Element::new(ElementKind::Paragraph, "identical wording");
        let b = Element::new(ElementKind::Heading, "identical wording");
        assert_eq!(element_similarity(&a, &b, &CompareOptions::default()), 0.5);
    }

    #[test]
    fn test_kind_mismatch_scales_text_score() {
        let a = Element::new(ElementKind::Paragraph, "alpha beta");
        let b = Element::new(ElementKind::Table, "gamma delta");
        assert_eq!(element_similarity(&a, &b, &CompareOptions::default()), 0.0);
    }

    #[test]
    fn test_both_empty_same_kind() {
        let a = Element::new(ElementKind::Section, "");
        let b = Element::new(ElementKind::Section, "");
        assert_eq!(element_similarity(&a, &b, &CompareOptions::default()), 1.0);
    }
}
