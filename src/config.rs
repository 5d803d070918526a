//! Comparison options and limits.

use crate::error::{DocDiffError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Cutoffs mapping a similarity score to a significance bucket.
///
/// Scores below `major` are major changes, scores below `minor` are minor,
/// everything else is trivial. Both boundaries are strict (`<`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SignificanceThresholds {
    /// Major cutoff
    pub major: f64,
    /// Minor cutoff
    pub minor: f64,
}

impl Default for SignificanceThresholds {
    fn default() -> Self {
        Self {
            major: 0.3,
            minor: 0.7,
        }
    }
}

/// How the sibling matcher resolves the similarity matrix into pairs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentMode {
    /// Repeatedly take the single best-scoring pair (reference behavior).
    #[default]
    Greedy,
    /// Globally optimal assignment via the Hungarian algorithm. O(n^3) but
    /// maximizes total pair similarity.
    Optimal,
}

/// Guards against pathological inputs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DiffLimits {
    /// Maximum width of a sibling list the matcher will accept
    pub max_siblings: usize,
    /// Maximum tree depth the differ will recurse into
    pub max_depth: usize,
}

impl Default for DiffLimits {
    fn default() -> Self {
        Self {
            max_siblings: 512,
            max_depth: 128,
        }
    }
}

/// Options controlling a document comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareOptions {
    /// Collapse runs of whitespace before scoring text blocks
    pub ignore_whitespace: bool,
    /// Lower-case text before scoring
    pub ignore_case: bool,
    /// Minimum score for the sibling matcher to commit a match (0.0 - 1.0)
    pub similarity_threshold: f64,
    /// Significance classification cutoffs
    pub significance: SignificanceThresholds,
    /// Run impact analysis on the finished comparison
    pub include_impact_analysis: bool,
    /// Sibling pairing strategy
    #[serde(default)]
    pub assignment_mode: AssignmentMode,
    /// Resource guards
    #[serde(default)]
    pub limits: DiffLimits,
    /// Wall-clock budget for a single comparison
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<Duration>,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            ignore_whitespace: true,
            ignore_case: false,
            similarity_threshold: 0.8,
            significance: SignificanceThresholds::default(),
            include_impact_analysis: true,
            assignment_mode: AssignmentMode::default(),
            limits: DiffLimits::default(),
            deadline: None,
        }
    }
}

impl CompareOptions {
    /// Strict matching: only near-identical siblings pair up.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            similarity_threshold: 0.95,
            ..Default::default()
        }
    }

    /// Permissive matching for noisy extractions (OCR output and the like).
    #[must_use]
    pub fn permissive() -> Self {
        Self {
            similarity_threshold: 0.6,
            ignore_case: true,
            ..Default::default()
        }
    }

    /// Set the sibling match threshold.
    #[must_use]
    pub fn with_similarity_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    /// Set significance cutoffs.
    #[must_use]
    pub fn with_significance(mut self, thresholds: SignificanceThresholds) -> Self {
        self.significance = thresholds;
        self
    }

    /// Enable or disable the impact analysis stage.
    #[must_use]
    pub fn with_impact_analysis(mut self, include: bool) -> Self {
        self.include_impact_analysis = include;
        self
    }

    /// Choose the sibling pairing strategy.
    #[must_use]
    pub fn with_assignment_mode(mut self, mode: AssignmentMode) -> Self {
        self.assignment_mode = mode;
        self
    }

    /// Set a wall-clock budget for the comparison.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Check that every threshold is inside its legal range.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(DocDiffError::config(format!(
                "similarity_threshold must be in [0, 1], got {}",
                self.similarity_threshold
            )));
        }
        for (name, value) in [
            ("significance.major", self.significance.major),
            ("significance.minor", self.significance.minor),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(DocDiffError::config(format!(
                    "{name} must be in [0, 1], got {value}"
                )));
            }
        }
        if self.significance.major > self.significance.minor {
            return Err(DocDiffError::config(format!(
                "significance.major ({}) must not exceed significance.minor ({})",
                self.significance.major, self.significance.minor
            )));
        }
        if self.limits.max_siblings == 0 {
            return Err(DocDiffError::config("limits.max_siblings must be positive"));
        }
        if self.limits.max_depth == 0 {
            return Err(DocDiffError::config("limits.max_depth must be positive"));
        }
        Ok(())
    }
}
