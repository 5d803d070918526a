//! Derived, human-facing assessments of a finished comparison.

mod impact;

pub use impact::{ImpactAnalysis, ImpactAnalyzer, ImpactSeverity};
