//! Comparison result structures.

use crate::analysis::ImpactAnalysis;
use crate::model::{Element, ElementKind};
use serde::{Deserialize, Serialize};

/// Type of change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    Added,
    Removed,
    Modified,
    /// Reserved for future move detection; no code path emits it today.
    /// The matcher is position-agnostic, so a moved element is
    /// indistinguishable from one matched in place.
    Moved,
    Unchanged,
}

impl ChangeType {
    /// Stable lowercase label, matching the serialized form.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Removed => "removed",
            Self::Modified => "modified",
            Self::Moved => "moved",
            Self::Unchanged => "unchanged",
        }
    }
}

/// Three-level severity classification of a single change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Significance {
    Major,
    Minor,
    Trivial,
}

/// Text snapshots for a change record, independent of the live tree.
///
/// Owned copies so that later mutation of inputs cannot affect historical
/// records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChangeContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
}

/// One emitted diff record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementChange {
    /// Change classification
    pub change_type: ChangeType,
    /// Severity bucket; defined for every record, including unchanged ones
    pub significance: Significance,
    /// Structural type of the element, for filtering and reporting
    pub element_kind: ElementKind,
    /// Heading depth, when the element carries one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    /// Similarity for modified/unchanged pairs; absent for pure add/remove
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
    /// Text snapshots
    pub content: ChangeContent,
}

impl ElementChange {
    /// Record a pure addition. Always major.
    pub fn added(element: &Element) -> Self {
        Self {
            change_type: ChangeType::Added,
            significance: Significance::Major,
            element_kind: element.kind,
            level: element.level,
            similarity: None,
            content: ChangeContent {
                before: None,
                after: Some(element.text.clone()),
            },
        }
    }

    /// Record a pure removal. Always major.
    pub fn removed(element: &Element) -> Self {
        Self {
            change_type: ChangeType::Removed,
            significance: Significance::Major,
            element_kind: element.kind,
            level: element.level,
            similarity: None,
            content: ChangeContent {
                before: Some(element.text.clone()),
                after: None,
            },
        }
    }

    /// Record a matched pair: unchanged at similarity 1.0, modified below.
    pub fn compared(
        before: &Element,
        after: &Element,
        similarity: f64,
        significance: Significance,
    ) -> Self {
        let change_type = if similarity >= 1.0 {
            ChangeType::Unchanged
        } else {
            ChangeType::Modified
        };
        Self {
            change_type,
            significance,
            element_kind: after.kind,
            level: after.level.or(before.level),
            similarity: Some(similarity),
            content: ChangeContent {
                before: Some(before.text.clone()),
                after: Some(after.text.clone()),
            },
        }
    }

    /// Length of the before snapshot in characters.
    #[must_use]
    pub fn before_len(&self) -> usize {
        self.content.before.as_ref().map_or(0, |t| t.chars().count())
    }

    /// Length of the after snapshot in characters.
    #[must_use]
    pub fn after_len(&self) -> usize {
        self.content.after.as_ref().map_or(0, |t| t.chars().count())
    }
}

/// Counts by change type and by significance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChangeSummary {
    pub total: usize,
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
    pub moved: usize,
    pub unchanged: usize,
    pub major: usize,
    pub minor: usize,
    pub trivial: usize,
}

impl ChangeSummary {
    /// Tally a list of change records.
    #[must_use]
    pub fn from_changes(changes: &[ElementChange]) -> Self {
        let mut summary = Self {
            total: changes.len(),
            ..Default::default()
        };
        for change in changes {
            match change.change_type {
                ChangeType::Added => summary.added += 1,
                ChangeType::Removed => summary.removed += 1,
                ChangeType::Modified => summary.modified += 1,
                ChangeType::Moved => summary.moved += 1,
                ChangeType::Unchanged => summary.unchanged += 1,
            }
            match change.significance {
                Significance::Major => summary.major += 1,
                Significance::Minor => summary.minor += 1,
                Significance::Trivial => summary.trivial += 1,
            }
        }
        summary
    }
}

/// Estimated character-level statistics for a comparison.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiffStatistics {
    /// Characters added
    pub added_chars: u64,
    /// Characters removed
    pub removed_chars: u64,
    /// Heuristic estimate of characters changed in place
    pub changed_chars: u64,
    /// Wall-clock time of the comparison, in milliseconds
    pub processing_time_ms: u64,
}

/// Complete result of a document comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[must_use]
pub struct DocumentComparison {
    /// Mean of structure and content similarity
    pub overall_similarity: f64,
    /// Tree-shape similarity of the two roots
    pub structure_similarity: f64,
    /// Whole-document text similarity
    pub content_similarity: f64,
    /// Ordered change records: pre-order over the before tree, then residual
    /// after-only subtrees
    pub changes: Vec<ElementChange>,
    /// Counts by type and significance
    pub summary: ChangeSummary,
    /// Character statistics
    pub statistics: DiffStatistics,
    /// Business-impact assessment, when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<ImpactAnalysis>,
}

impl DocumentComparison {
    /// Whether any record is something other than unchanged.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.summary.total != self.summary.unchanged
    }

    /// Iterate records of one change type.
    pub fn changes_of(&self, change_type: ChangeType) -> impl Iterator<Item = &ElementChange> {
        self.changes
            .iter()
            .filter(move |c| c.change_type == change_type)
    }

    /// Iterate records of one significance bucket.
    pub fn changes_with_significance(
        &self,
        significance: Significance,
    ) -> impl Iterator<Item = &ElementChange> {
        self.changes
            .iter()
            .filter(move |c| c.significance == significance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_tallies_types_and_significance() {
        let a = Element::new(ElementKind::Paragraph, "new text");
        let b = Element::new(ElementKind::Paragraph, "old text");
        let changes = vec![
            ElementChange::added(&a),
            ElementChange::removed(&b),
            ElementChange::compared(&b, &a, 0.5, Significance::Minor),
        ];
        let summary = ChangeSummary::from_changes(&changes);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.added, 1);
        assert_eq!(summary.removed, 1);
        assert_eq!(summary.modified, 1);
        assert_eq!(summary.major, 2);
        assert_eq!(summary.minor, 1);
        assert_eq!(summary.trivial, 0);
    }

    #[test]
    fn test_compared_at_one_is_unchanged() {
        let e = Element::new(ElementKind::Paragraph, "same");
        let change = ElementChange::compared(&e, &e, 1.0, Significance::Trivial);
        assert_eq!(change.change_type, ChangeType::Unchanged);
        assert_eq!(change.similarity, Some(1.0));
    }

    #[test]
    fn test_added_has_no_before() {
        let e = Element::new(ElementKind::Table, "cells");
        let change = ElementChange::added(&e);
        assert!(change.content.before.is_none());
        assert_eq!(change.content.after.as_deref(), Some("cells"));
        assert!(change.similarity.is_none());
    }

    #[test]
    fn test_char_lengths_count_chars_not_bytes() {
        let e = Element::new(ElementKind::Paragraph, "Prüfverfahren");
        let change = ElementChange::removed(&e);
        assert_eq!(change.before_len(), 13);
    }
}
