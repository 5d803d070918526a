//! Coarse tree-shape similarity, independent of text content.

use super::clamp_unit;
use crate::model::{DocumentTree, ElementId};

/// Estimate similarity between two subtrees from root type and
/// children-count/type overlap.
///
/// Additive scheme, clamped to 1.0:
/// - base 0.5 when root kinds match, else 0.3;
/// - both childless: +0.5;
/// - exactly one childless: +0.1;
/// - equal child counts: +0.3, plus up to +0.2 for the fraction of
///   index-aligned matching child kinds;
/// - differing counts: +0.1, plus up to +0.1 for matching kinds over the
///   overlapping prefix.
///
/// Used once at the top level of a comparison; the differ does not invoke
/// this per change record.
#[must_use]
pub fn structural_similarity(
    tree_a: &DocumentTree,
    root_a: ElementId,
    tree_b: &DocumentTree,
    root_b: ElementId,
) -> f64 {
    let (Some(a), Some(b)) = (tree_a.get(root_a), tree_b.get(root_b)) else {
        return 0.0;
    };

    let mut score = if a.kind == b.kind { 0.5 } else { 0.3 };

    let children_a = &a.children;
    let children_b = &b.children;

    match (children_a.is_empty(), children_b.is_empty()) {
        (true, true) => score += 0.5,
        (true, false) | (false, true) => score += 0.1,
        (false, false) => {
            let overlap = children_a.len().min(children_b.len());
            let matching_kinds = children_a
                .iter()
                .zip(children_b.iter())
                .take(overlap)
                .filter(|(&ca, &cb)| {
                    match (tree_a.get(ca), tree_b.get(cb)) {
                        (Some(na), Some(nb)) => na.kind == nb.kind,
                        _ => false,
                    }
                })
                .count();
            let fraction = matching_kinds as f64 / overlap as f64;

            if children_a.len() == children_b.len() {
                score += 0.3 + 0.2 * fraction;
            } else {
                score += 0.1 + 0.1 * fraction;
            }
        }
    }

    clamp_unit(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ElementKind, TreeBuilder};

    fn tree_with_children(kinds: &[ElementKind]) -> (DocumentTree, ElementId) {
        let mut b = TreeBuilder::new();
        let root = b.add(None, ElementKind::Section, "");
        for &kind in kinds {
            b.add(Some(root), kind, "");
        }
        (b.build(), root)
    }

    #[test]
    fn test_identical_shape_is_one() {
        let kinds = [ElementKind::Heading, ElementKind::Paragraph];
        let (ta, ra) = tree_with_children(&kinds);
        let (tb, rb) = tree_with_children(&kinds);
        assert_eq!(structural_similarity(&ta, ra, &tb, rb), 1.0);
    }

    #[test]
    fn test_both_childless_same_kind() {
        let (ta, ra) = tree_with_children(&[]);
        let (tb, rb) = tree_with_children(&[]);
        assert_eq!(structural_similarity(&ta, ra, &tb, rb), 1.0);
    }

    #[test]
    fn test_one_childless() {
        let (ta, ra) = tree_with_children(&[]);
        let (tb, rb) = tree_with_children(&[ElementKind::Paragraph]);
        let score = structural_similarity(&ta, ra, &tb, rb);
        assert!((score - 0.6).abs() < 1e-12, "got {score}");
    }

    #[test]
    fn test_equal_counts_mismatched_kinds() {
        let (ta, ra) = tree_with_children(&[ElementKind::Heading, ElementKind::Paragraph]);
        let (tb, rb) = tree_with_children(&[ElementKind::Table, ElementKind::Image]);
        // 0.5 base + 0.3 equal counts + 0.2 * 0 matching
        let score = structural_similarity(&ta, ra, &tb, rb);
        assert!((score - 0.8).abs() < 1e-12, "got {score}");
    }

    #[test]
    fn test_differing_counts_partial_prefix() {
        let (ta, ra) = tree_with_children(&[ElementKind::Heading, ElementKind::Paragraph]);
        let (tb, rb) = tree_with_children(&[
            ElementKind::Heading,
            ElementKind::Table,
            ElementKind::Paragraph,
        ]);
        // 0.5 base + 0.1 differing counts + 0.1 * (1/2 matching prefix)
        let score = structural_similarity(&ta, ra, &tb, rb);
        assert!((score - 0.65).abs() < 1e-12, "got {score}");
    }

    #[test]
    fn test_root_kind_mismatch_lowers_base() {
        let mut a = TreeBuilder::new();
        let ra = a.add(None, ElementKind::Section, "");
        let mut b = TreeBuilder::new();
        let rb = b.add(None, ElementKind::Table, "");
        // 0.3 base + 0.5 both childless
        let score = structural_similarity(&a.build(), ra, &b.build(), rb);
        assert!((score - 0.8).abs() < 1e-12, "got {score}");
    }

    #[test]
    fn test_dangling_roots_score_zero() {
        let (ta, _) = tree_with_children(&[]);
        let (tb, rb) = tree_with_children(&[]);
        let bogus = {
            let mut builder = TreeBuilder::new();
            builder.add(None, ElementKind::Section, "");
            builder.add(None, ElementKind::Section, "")
        };
        // An id valid in some other tree but not in `ta`
        assert_eq!(structural_similarity(&ta, bogus, &tb, rb), 0.0);
    }
}
