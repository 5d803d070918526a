//! Keyword-heuristic business-impact analysis.
//!
//! Severity comes from the change summary; domain tags and the regulatory
//! flag come from fixed keyword patterns over the changed text. This is a
//! coarse screen for human reviewers, not a semantic classifier.

use crate::diff::{ChangeType, DocumentComparison, ElementChange};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Overall severity rating of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactSeverity {
    Low,
    Medium,
    High,
}

impl ImpactSeverity {
    /// Stable lowercase label, matching the serialized form.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Business-impact assessment of a document comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpactAnalysis {
    /// First affected area, or "general" when none matched
    pub category: String,
    /// Overall severity rating
    pub severity: ImpactSeverity,
    /// Domain tags whose keyword patterns matched changed text
    pub affected_areas: Vec<String>,
    /// Ordered, never-empty review recommendations
    pub recommendations: Vec<String>,
    /// Whether any changed text matched the regulatory/safety pattern
    pub regulatory_impact: bool,
}

/// Keyword-pattern analyzer over changed text.
///
/// Patterns are compiled once at construction; build one analyzer and reuse
/// it across comparisons.
#[derive(Debug)]
pub struct ImpactAnalyzer {
    regulatory: Regex,
    areas: Vec<(&'static str, Regex)>,
}

const REGULATORY_PATTERN: &str =
    r"(?i)\b(regulation|regulatory|compliance|safety|certification|approval|authority|FAA|EASA|ICAO|FDA|EPA|OSHA)\b";

/// Domain tag patterns, probed in this order; the first match becomes the
/// analysis category.
const AREA_PATTERNS: &[(&str, &str)] = &[
    (
        "technical",
        r"(?i)\b(system|component|installation|maintenance|inspection|torque|wiring|assembly|specification)\b",
    ),
    (
        "operational",
        r"(?i)\b(operation|operating|procedure|performance|limitation|checklist|crew|dispatch)\b",
    ),
    (
        "training",
        r"(?i)\b(training|instruction|qualification|familiarization|course|curriculum)\b",
    ),
    (
        "safety",
        r"(?i)\b(safety|warning|caution|hazard|danger|emergency|risk)\b",
    ),
    (
        "regulatory",
        r"(?i)\b(regulation|regulatory|compliance|certification|approval|authority|airworthiness)\b",
    ),
];

impl ImpactAnalyzer {
    /// Compile the keyword patterns.
    #[must_use]
    pub fn new() -> Self {
        Self {
            regulatory: Regex::new(REGULATORY_PATTERN).expect("regulatory pattern is valid"),
            areas: AREA_PATTERNS
                .iter()
                .map(|(tag, pattern)| (*tag, Regex::new(pattern).expect("area pattern is valid")))
                .collect(),
        }
    }

    /// Produce an impact assessment for a finished comparison.
    #[must_use]
    pub fn analyze(&self, comparison: &DocumentComparison) -> ImpactAnalysis {
        let summary = &comparison.summary;

        let severity = if summary.major > 5 {
            ImpactSeverity::High
        } else if summary.major > 0 || summary.minor > 10 {
            ImpactSeverity::Medium
        } else {
            ImpactSeverity::Low
        };

        let changed_text: Vec<&str> = comparison
            .changes
            .iter()
            .filter(|c| c.change_type != ChangeType::Unchanged)
            .flat_map(change_texts)
            .collect();

        let regulatory_impact = changed_text
            .iter()
            .any(|text| self.regulatory.is_match(text));

        let affected_areas: Vec<String> = self
            .areas
            .iter()
            .filter(|(_, pattern)| changed_text.iter().any(|text| pattern.is_match(text)))
            .map(|(tag, _)| (*tag).to_string())
            .collect();

        let recommendations =
            build_recommendations(severity, regulatory_impact, &affected_areas);

        let category = affected_areas
            .first()
            .cloned()
            .unwrap_or_else(|| "general".to_string());

        ImpactAnalysis {
            category,
            severity,
            affected_areas,
            recommendations,
            regulatory_impact,
        }
    }
}

impl Default for ImpactAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn change_texts(change: &ElementChange) -> impl Iterator<Item = &str> {
    change
        .content
        .before
        .as_deref()
        .into_iter()
        .chain(change.content.after.as_deref())
}

/// Fixed recommendation rules; always yields at least one entry.
fn build_recommendations(
    severity: ImpactSeverity,
    regulatory_impact: bool,
    affected_areas: &[String],
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if severity == ImpactSeverity::High {
        recommendations
            .push("Review all major changes with the responsible document owner".to_string());
    }
    if regulatory_impact {
        recommendations
            .push("Run a compliance audit against the affected regulations".to_string());
        recommendations
            .push("Notify the compliance officer before publishing the revised document".to_string());
    }
    if affected_areas.iter().any(|a| a == "safety") {
        recommendations
            .push("Escalate safety-related changes to the safety review board".to_string());
    }
    if affected_areas.iter().any(|a| a == "training") {
        recommendations
            .push("Check whether training material needs to be updated".to_string());
    }
    if affected_areas.iter().any(|a| a == "operational") {
        recommendations
            .push("Verify operational procedures remain consistent with the changes".to_string());
    }

    if recommendations.is_empty() {
        recommendations
            .push("Review the listed changes; no domain-specific action detected".to_string());
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{ChangeSummary, DiffStatistics, Significance};
    use crate::model::{Element, ElementKind};

    fn comparison_with(changes: Vec<ElementChange>) -> DocumentComparison {
        let summary = ChangeSummary::from_changes(&changes);
        DocumentComparison {
            overall_similarity: 0.5,
            structure_similarity: 0.5,
            content_similarity: 0.5,
            changes,
            summary,
            statistics: DiffStatistics::default(),
            impact: None,
        }
    }

    fn added(text: &str) -> ElementChange {
        ElementChange::added(&Element::new(ElementKind::Paragraph, text))
    }

    #[test]
    fn test_severity_high_above_five_major() {
        let changes: Vec<ElementChange> = (0..6).map(|i| added(&format!("block {i}"))).collect();
        let analysis = ImpactAnalyzer::new().analyze(&comparison_with(changes));
        assert_eq!(analysis.severity, ImpactSeverity::High);
    }

    #[test]
    fn test_severity_medium_with_one_major() {
        let analysis = ImpactAnalyzer::new().analyze(&comparison_with(vec![added("one block")]));
        assert_eq!(analysis.severity, ImpactSeverity::Medium);
    }

    #[test]
    fn test_severity_low_without_changes() {
        let analysis = ImpactAnalyzer::new().analyze(&comparison_with(Vec::new()));
        assert_eq!(analysis.severity, ImpactSeverity::Low);
        assert!(!analysis.regulatory_impact);
        assert_eq!(analysis.category, "general");
    }

    #[test]
    fn test_regulatory_keyword_sets_flag_and_recommendations() {
        let analysis = ImpactAnalyzer::new().analyze(&comparison_with(vec![added(
            "updated per EASA certification requirements",
        )]));
        assert!(analysis.regulatory_impact);
        assert!(analysis
            .recommendations
            .iter()
            .any(|r| r.contains("compliance audit")));
        assert!(analysis.affected_areas.contains(&"regulatory".to_string()));
    }

    #[test]
    fn test_unchanged_text_is_ignored() {
        let e = Element::new(ElementKind::Paragraph, "safety critical procedure");
        let unchanged = ElementChange::compared(&e, &e, 1.0, Significance::Trivial);
        let analysis = ImpactAnalyzer::new().analyze(&comparison_with(vec![unchanged]));
        assert!(!analysis.regulatory_impact);
        assert!(analysis.affected_areas.is_empty());
    }

    #[test]
    fn test_category_is_first_affected_area() {
        let analysis = ImpactAnalyzer::new().analyze(&comparison_with(vec![added(
            "system maintenance and crew training updates",
        )]));
        assert_eq!(analysis.category, "technical");
        assert!(analysis.affected_areas.contains(&"training".to_string()));
    }

    #[test]
    fn test_recommendations_never_empty() {
        let analysis = ImpactAnalyzer::new().analyze(&comparison_with(Vec::new()));
        assert!(!analysis.recommendations.is_empty());
    }
}
