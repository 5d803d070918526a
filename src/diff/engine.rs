//! Document comparison engine.
//!
//! Walks matched element pairs recursively, emits change records in
//! pre-order over the before tree (residual after-only subtrees follow),
//! and assembles the aggregate comparison result.

use super::classify::classify;
use super::matcher::match_siblings;
use super::result::{ChangeSummary, ChangeType, DocumentComparison, ElementChange};
use super::stats;
use crate::analysis::ImpactAnalyzer;
use crate::config::CompareOptions;
use crate::error::{DiffErrorKind, DocDiffError, ErrorContext, Result};
use crate::model::{DocumentStructure, DocumentTree, ElementId};
use crate::similarity::{element_similarity, structural_similarity, text_similarity};
use std::time::Instant;
use tracing::debug;

/// Semantic diff engine for comparing document structures.
///
/// The engine is immutable and holds no per-comparison state; a single
/// instance can serve many comparisons, concurrently via
/// [`DiffEngine::compare_many`].
pub struct DiffEngine {
    options: CompareOptions,
    analyzer: ImpactAnalyzer,
}

impl DiffEngine {
    /// Create an engine with default options.
    #[must_use]
    pub fn new() -> Self {
        Self {
            options: CompareOptions::default(),
            analyzer: ImpactAnalyzer::new(),
        }
    }

    /// Create an engine with custom options, validating them up front.
    pub fn with_options(options: CompareOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            options,
            analyzer: ImpactAnalyzer::new(),
        })
    }

    /// The options this engine runs with.
    #[must_use]
    pub fn options(&self) -> &CompareOptions {
        &self.options
    }

    /// Compare two documents and return the full comparison result.
    pub fn compare(
        &self,
        before: &DocumentStructure,
        after: &DocumentStructure,
    ) -> Result<DocumentComparison> {
        let started = Instant::now();

        before.validate().context("before document")?;
        after.validate().context("after document")?;

        let structure_similarity =
            structural_similarity(&before.tree, before.root, &after.tree, after.root);
        let content_similarity =
            text_similarity(&before.full_text(), &after.full_text(), &self.options);
        let overall_similarity = (structure_similarity + content_similarity) / 2.0;

        let mut walker = TreeWalker {
            tree_before: &before.tree,
            tree_after: &after.tree,
            options: &self.options,
            started,
            changes: Vec::new(),
        };
        walker.compare_pair(before.root, after.root, 0)?;
        let changes = walker.changes;

        let summary = ChangeSummary::from_changes(&changes);
        let mut statistics = stats::aggregate(&changes);
        statistics.processing_time_ms = started.elapsed().as_millis() as u64;

        let mut comparison = DocumentComparison {
            overall_similarity,
            structure_similarity,
            content_similarity,
            changes,
            summary,
            statistics,
            impact: None,
        };

        if self.options.include_impact_analysis {
            comparison.impact = Some(self.analyzer.analyze(&comparison));
        }

        debug!(
            changes = comparison.summary.total,
            overall = comparison.overall_similarity,
            elapsed_ms = comparison.statistics.processing_time_ms,
            "comparison finished"
        );

        Ok(comparison)
    }

    /// Compare independent document pairs in parallel.
    ///
    /// Each pair gets its own result; one failing pair does not abort the
    /// batch.
    pub fn compare_many(
        &self,
        pairs: &[(DocumentStructure, DocumentStructure)],
    ) -> Vec<Result<DocumentComparison>> {
        use rayon::prelude::*;
        pairs
            .par_iter()
            .map(|(before, after)| self.compare(before, after))
            .collect()
    }
}

impl Default for DiffEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Recursive pair walker. Emits records into `changes` as it descends.
struct TreeWalker<'a> {
    tree_before: &'a DocumentTree,
    tree_after: &'a DocumentTree,
    options: &'a CompareOptions,
    started: Instant,
    changes: Vec<ElementChange>,
}

impl TreeWalker<'_> {
    fn check_limits(&self, depth: usize) -> Result<()> {
        if depth > self.options.limits.max_depth {
            return Err(DocDiffError::diff(
                "tree recursion",
                DiffErrorKind::DepthExceeded(self.options.limits.max_depth),
            ));
        }
        if let Some(deadline) = self.options.deadline {
            if self.started.elapsed() > deadline {
                return Err(DocDiffError::diff(
                    "tree recursion",
                    DiffErrorKind::DeadlineExceeded(deadline),
                ));
            }
        }
        Ok(())
    }

    /// Compare a matched pair of elements, then descend into their children.
    fn compare_pair(&mut self, before: ElementId, after: ElementId, depth: usize) -> Result<()> {
        self.check_limits(depth)?;

        let before_el = self.tree_before.try_get(before)?;
        let after_el = self.tree_after.try_get(after)?;

        let similarity = element_similarity(before_el, after_el, self.options);
        let change_type = if similarity >= 1.0 {
            ChangeType::Unchanged
        } else {
            ChangeType::Modified
        };
        let significance = classify(change_type, similarity, &self.options.significance);
        self.changes.push(ElementChange::compared(
            before_el,
            after_el,
            similarity,
            significance,
        ));

        let children_before = self.tree_before.children(before).to_vec();
        let children_after = self.tree_after.children(after).to_vec();

        match (children_before.is_empty(), children_after.is_empty()) {
            (true, true) => {}
            (false, true) => {
                for child in children_before {
                    self.emit_subtree(self.tree_before, child, ChangeType::Removed, depth + 1)?;
                }
            }
            (true, false) => {
                for child in children_after {
                    self.emit_subtree(self.tree_after, child, ChangeType::Added, depth + 1)?;
                }
            }
            (false, false) => {
                let matches = match_siblings(
                    self.tree_before,
                    self.tree_after,
                    &children_before,
                    &children_after,
                    self.options,
                )?;

                // Before-side children in document order: matched pairs
                // recurse, the rest are removed subtrees
                for child in &children_before {
                    if let Some(partner) = matches.partner_of(*child) {
                        self.compare_pair(*child, partner, depth + 1)?;
                    } else {
                        self.emit_subtree(
                            self.tree_before,
                            *child,
                            ChangeType::Removed,
                            depth + 1,
                        )?;
                    }
                }
                // Residual after-only subtrees follow
                for child in matches.unmatched_after {
                    self.emit_subtree(self.tree_after, child, ChangeType::Added, depth + 1)?;
                }
            }
        }

        Ok(())
    }

    /// Emit one record for `id` and recursively for its entire subtree.
    fn emit_subtree(
        &mut self,
        tree: &DocumentTree,
        id: ElementId,
        change_type: ChangeType,
        depth: usize,
    ) -> Result<()> {
        self.check_limits(depth)?;

        let element = tree.try_get(id)?;
        let children = element.children.clone();
        let change = match change_type {
            ChangeType::Removed => ElementChange::removed(element),
            _ => ElementChange::added(element),
        };
        self.changes.push(change);

        for child in children {
            self.emit_subtree(tree, child, change_type, depth + 1)?;
        }
        Ok(())
    }
}
