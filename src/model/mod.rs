//! Document content model.
//!
//! Documents are represented as arena-backed element trees: nodes live in a
//! flat vector and refer to each other by index, so parent back-references
//! never create ownership cycles.

mod document;
mod element;

pub use document::{DocumentStructure, ExtractionMetadata};
pub use element::{DocumentTree, Element, ElementId, ElementKind, TreeBuilder};
