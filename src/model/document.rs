//! Document structure: the comparison engine's input unit.

use super::element::{DocumentTree, Element, ElementId};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Extraction-stage metadata attached to a [`DocumentStructure`].
///
/// Produced by the upstream structure-extraction collaborator; the
/// comparison engine carries it through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionMetadata {
    /// Extraction confidence (0.0 - 1.0)
    pub confidence: f64,
    /// Page count of the source document
    pub page_count: u32,
    /// Source format label (pdf, docx, ...)
    pub format: String,
    /// Detected language, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl Default for ExtractionMetadata {
    fn default() -> Self {
        Self {
            confidence: 1.0,
            page_count: 0,
            format: "unknown".to_string(),
            language: None,
        }
    }
}

/// A document's extracted content: a title, an element tree, and the
/// hierarchy root within that tree.
///
/// The flat pre-order element list of the data model is derived through
/// [`DocumentStructure::elements`], so it cannot diverge from the hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentStructure {
    /// Document title
    pub title: String,
    /// Element arena
    pub tree: DocumentTree,
    /// Hierarchy root
    pub root: ElementId,
    /// Extraction metadata
    #[serde(default)]
    pub metadata: ExtractionMetadata,
}

impl DocumentStructure {
    /// Create a document structure, validating the hierarchy.
    pub fn new(
        title: impl Into<String>,
        tree: DocumentTree,
        root: ElementId,
        metadata: ExtractionMetadata,
    ) -> Result<Self> {
        tree.validate(root)?;
        Ok(Self {
            title: title.into(),
            tree,
            root,
            metadata,
        })
    }

    /// Validate the hierarchy of an already-constructed document.
    ///
    /// Deserialized documents should be validated before comparison.
    pub fn validate(&self) -> Result<()> {
        self.tree.validate(self.root)
    }

    /// The hierarchy root element.
    pub fn root_element(&self) -> Result<&Element> {
        self.tree.try_get(self.root)
    }

    /// Flat pre-order view of the hierarchy.
    #[must_use]
    pub fn elements(&self) -> Vec<ElementId> {
        self.tree.preorder(self.root)
    }

    /// Aggregate text of the whole document in pre-order, newline-joined.
    ///
    /// Used for whole-document content similarity.
    #[must_use]
    pub fn full_text(&self) -> String {
        let mut parts = Vec::new();
        for id in self.elements() {
            if let Some(element) = self.tree.get(id) {
                if !element.text.is_empty() {
                    parts.push(element.text.as_str());
                }
            }
        }
        parts.join("\n")
    }

    /// Number of elements reachable from the root.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ElementKind, TreeBuilder};

    fn sample_document() -> DocumentStructure {
        let mut b = TreeBuilder::new();
        let root = b.add(None, ElementKind::Section, "");
        b.add(Some(root), ElementKind::Heading, "Overview");
        b.add(Some(root), ElementKind::Paragraph, "Body text.");
        DocumentStructure::new("manual", b.build(), root, ExtractionMetadata::default())
            .expect("valid document")
    }

    #[test]
    fn test_full_text_skips_empty_nodes() {
        let doc = sample_document();
        assert_eq!(doc.full_text(), "Overview\nBody text.");
    }

    #[test]
    fn test_element_count() {
        let doc = sample_document();
        assert_eq!(doc.element_count(), 3);
    }

    #[test]
    fn test_serde_round_trip() {
        let doc = sample_document();
        let json = serde_json::to_string(&doc).expect("serialize");
        let back: DocumentStructure = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.title, "manual");
        assert!(back.validate().is_ok());
        assert_eq!(back.element_count(), 3);
    }
}
