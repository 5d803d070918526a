//! **Semantic structural comparison for extracted documents.**
//!
//! `docdiff-tools` compares two hierarchical document structures — trees of
//! typed elements (headings, paragraphs, tables) carrying text — and produces
//! a change report that classifies every structural and textual difference,
//! scores overall similarity, and derives a business-impact assessment.
//!
//! The crate assumes an upstream extraction stage has already turned the raw
//! document (PDF, DOCX, OCR output) into a [`model::DocumentStructure`];
//! parsing binary formats, persistence, and transport are out of scope.
//!
//! ## Key features
//!
//! - **Approximate tree matching**: a greedy, position-agnostic sibling
//!   matcher pairs elements by content similarity, with an optional globally
//!   optimal Hungarian-algorithm mode.
//! - **Similarity scoring**: bag-of-words cosine text similarity, combined
//!   element similarity, and a coarse tree-shape estimate.
//! - **Significance classification**: every change lands in a
//!   major/minor/trivial bucket with configurable cutoffs.
//! - **Impact analysis**: keyword heuristics over changed text yield a
//!   severity rating, affected-domain tags, a regulatory flag, and review
//!   recommendations.
//!
//! ## Getting started
//!
//! ```
//! use docdiff_tools::model::{DocumentStructure, ElementKind, ExtractionMetadata, TreeBuilder};
//! use docdiff_tools::DiffEngine;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut builder = TreeBuilder::new();
//!     let root = builder.add(None, ElementKind::Section, "");
//!     builder.add(Some(root), ElementKind::Paragraph, "original wording");
//!     let before =
//!         DocumentStructure::new("v1", builder.build(), root, ExtractionMetadata::default())?;
//!
//!     let mut builder = TreeBuilder::new();
//!     let root = builder.add(None, ElementKind::Section, "");
//!     builder.add(Some(root), ElementKind::Paragraph, "revised wording");
//!     let after =
//!         DocumentStructure::new("v2", builder.build(), root, ExtractionMetadata::default())?;
//!
//!     let comparison = DiffEngine::new().compare(&before, &after)?;
//!     println!("overall similarity: {:.2}", comparison.overall_similarity);
//!     for change in &comparison.changes {
//!         println!("{:?} {:?}", change.change_type, change.significance);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`model`]: the arena-backed element tree and [`model::DocumentStructure`].
//! - [`similarity`]: text, element, and tree-shape scorers.
//! - [`diff`]: the [`DiffEngine`], sibling matcher, and result types.
//! - [`analysis`]: the keyword-driven [`ImpactAnalyzer`].
//! - [`config`]: [`CompareOptions`] and resource limits.
//! - [`error`]: the [`DocDiffError`] hierarchy.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // Cast safety: usize<->f64 casts are pervasive in similarity and
    // statistics math; all values are bounded in practice
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    // Doc completeness: # Errors / # Panics sections are aspirational
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod analysis;
pub mod config;
pub mod diff;
pub mod error;
pub mod model;
pub mod similarity;

// Re-export main types for convenience
pub use analysis::{ImpactAnalysis, ImpactAnalyzer, ImpactSeverity};
pub use config::{
    AssignmentMode, CompareOptions, DiffLimits, SignificanceThresholds,
};
pub use diff::{
    ChangeSummary, ChangeType, DiffEngine, DiffStatistics, DocumentComparison, ElementChange,
    Significance,
};
pub use error::{DocDiffError, ErrorContext, Result};
pub use model::{DocumentStructure, DocumentTree, Element, ElementId, ElementKind, TreeBuilder};
