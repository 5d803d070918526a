//! Sibling matching: pairing ordered child lists across two trees.
//!
//! The matcher is position-agnostic. It builds a full similarity matrix over
//! the cross product of both sibling lists and commits pairs by score, so
//! reordered siblings still pair by content.

use crate::config::{AssignmentMode, CompareOptions};
use crate::error::{DocDiffError, Result};
use crate::model::{DocumentTree, ElementId};
use crate::similarity::element_similarity;
use tracing::trace;

/// One committed before/after pairing.
#[derive(Debug, Clone, Copy)]
pub struct MatchedPair {
    pub before: ElementId,
    pub after: ElementId,
    pub score: f64,
}

/// Result of matching two sibling lists.
#[derive(Debug, Clone, Default)]
pub struct SiblingMatchResult {
    /// Committed pairs, in before-list order
    pub matched: Vec<MatchedPair>,
    /// Before-side elements with no partner, in list order
    pub unmatched_before: Vec<ElementId>,
    /// After-side elements with no partner, in list order
    pub unmatched_after: Vec<ElementId>,
}

impl SiblingMatchResult {
    /// Look up the committed partner for a before-side element.
    #[must_use]
    pub fn partner_of(&self, before: ElementId) -> Option<ElementId> {
        self.matched
            .iter()
            .find(|pair| pair.before == before)
            .map(|pair| pair.after)
    }
}

/// Pair elements across two sibling lists using element similarity.
///
/// Only pairs scoring at least `options.similarity_threshold` are committed;
/// everything else lands in the unmatched lists. Fails with a resource-limit
/// error when either list exceeds `options.limits.max_siblings`.
pub fn match_siblings(
    tree_before: &DocumentTree,
    tree_after: &DocumentTree,
    before: &[ElementId],
    after: &[ElementId],
    options: &CompareOptions,
) -> Result<SiblingMatchResult> {
    let max = options.limits.max_siblings;
    let widest = before.len().max(after.len());
    if widest > max {
        return Err(DocDiffError::resource_limit(
            max,
            widest,
            "sibling list width",
        ));
    }

    if before.is_empty() || after.is_empty() {
        return Ok(SiblingMatchResult {
            matched: Vec::new(),
            unmatched_before: before.to_vec(),
            unmatched_after: after.to_vec(),
        });
    }

    // Full similarity matrix over the cross product
    let matrix: Vec<Vec<f64>> = before
        .iter()
        .map(|&b_id| {
            after
                .iter()
                .map(|&a_id| match (tree_before.get(b_id), tree_after.get(a_id)) {
                    (Some(b), Some(a)) => element_similarity(b, a, options),
                    _ => 0.0,
                })
                .collect()
        })
        .collect();

    let pairs = match options.assignment_mode {
        AssignmentMode::Greedy => greedy_selection(&matrix, options.similarity_threshold),
        AssignmentMode::Optimal => optimal_selection(&matrix, options.similarity_threshold),
    };

    trace!(
        before = before.len(),
        after = after.len(),
        matched = pairs.len(),
        "sibling matching done"
    );

    let mut used_before = vec![false; before.len()];
    let mut used_after = vec![false; after.len()];
    let mut matched: Vec<MatchedPair> = pairs
        .into_iter()
        .map(|(i, j, score)| {
            used_before[i] = true;
            used_after[j] = true;
            MatchedPair {
                before: before[i],
                after: after[j],
                score,
            }
        })
        .collect();
    // Emit pairs in before-list order for deterministic downstream records
    matched.sort_by_key(|pair| {
        before
            .iter()
            .position(|&id| id == pair.before)
            .unwrap_or(usize::MAX)
    });

    let unmatched_before = before
        .iter()
        .enumerate()
        .filter(|(i, _)| !used_before[*i])
        .map(|(_, &id)| id)
        .collect();
    let unmatched_after = after
        .iter()
        .enumerate()
        .filter(|(j, _)| !used_after[*j])
        .map(|(_, &id)| id)
        .collect();

    Ok(SiblingMatchResult {
        matched,
        unmatched_before,
        unmatched_after,
    })
}

/// Reference matching behavior: repeatedly take the single best-scoring
/// unmatched pair across the whole matrix, stopping outright once the best
/// remaining score falls below the threshold.
fn greedy_selection(matrix: &[Vec<f64>], threshold: f64) -> Vec<(usize, usize, f64)> {
    let rows = matrix.len();
    let cols = matrix.first().map_or(0, Vec::len);
    let mut used_row = vec![false; rows];
    let mut used_col = vec![false; cols];
    let mut committed = Vec::new();

    loop {
        let mut best: Option<(usize, usize, f64)> = None;
        for (i, row) in matrix.iter().enumerate() {
            if used_row[i] {
                continue;
            }
            for (j, &score) in row.iter().enumerate() {
                if used_col[j] {
                    continue;
                }
                if best.map_or(true, |(_, _, s)| score > s) {
                    best = Some((i, j, score));
                }
            }
        }

        match best {
            Some((i, j, score)) if score >= threshold => {
                used_row[i] = true;
                used_col[j] = true;
                committed.push((i, j, score));
            }
            // Below threshold or one side exhausted: stop matching entirely
            _ => break,
        }
    }

    committed
}

/// Globally optimal assignment via Kuhn-Munkres, threshold applied to the
/// resulting pairs. O(n^3) in the wider list.
fn optimal_selection(matrix: &[Vec<f64>], threshold: f64) -> Vec<(usize, usize, f64)> {
    use pathfinding::kuhn_munkres::kuhn_munkres_min;
    use pathfinding::matrix::Matrix;

    let rows = matrix.len();
    let cols = matrix.first().map_or(0, Vec::len);
    if rows == 0 || cols == 0 {
        return Vec::new();
    }

    // Scale to i64 and negate for minimization; pad to a square matrix
    let n = rows.max(cols);
    let scale = 1_000_000_f64;
    let weights: Vec<Vec<i64>> = (0..n)
        .map(|i| {
            (0..n)
                .map(|j| {
                    if i < rows && j < cols {
                        -((matrix[i][j] * scale) as i64)
                    } else {
                        0
                    }
                })
                .collect()
        })
        .collect();

    let cost_matrix = Matrix::from_rows(weights).expect("square weight matrix");
    let (_, assignment) = kuhn_munkres_min(&cost_matrix);

    assignment
        .into_iter()
        .enumerate()
        .filter(|&(i, j)| i < rows && j < cols)
        .map(|(i, j)| (i, j, matrix[i][j]))
        .filter(|&(_, _, score)| score >= threshold)
        .collect()
}
