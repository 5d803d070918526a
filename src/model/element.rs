//! Arena-backed element tree.

use crate::error::{DocDiffError, InputErrorKind, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Index of an element within its [`DocumentTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(usize);

impl ElementId {
    /// Get the raw arena index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Structural type of a document element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ElementKind {
    Section,
    Heading,
    Paragraph,
    List,
    ListItem,
    Table,
    Image,
    Footnote,
    Other,
}

impl ElementKind {
    /// Stable lowercase label, matching the serialized form.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Section => "section",
            Self::Heading => "heading",
            Self::Paragraph => "paragraph",
            Self::List => "list",
            Self::ListItem => "list_item",
            Self::Table => "table",
            Self::Image => "image",
            Self::Footnote => "footnote",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One node of a document's content tree.
///
/// `parent` exists for lookup during construction and reporting only; the
/// diff engine traverses exclusively through `children`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Element {
    /// Structural type
    pub kind: ElementKind,
    /// The element's own textual content (may be empty for structural nodes)
    pub text: String,
    /// Heading depth, when applicable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    /// Ordered children, by arena index
    #[serde(default)]
    pub children: Vec<ElementId>,
    /// Parent element, by arena index (lookup only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<ElementId>,
    /// Open key/value bag (page number, extraction details), opaque to the engine
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub metadata: IndexMap<String, String>,
}

impl Element {
    /// Create a leaf element with no children.
    pub fn new(kind: ElementKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            level: None,
            children: Vec::new(),
            parent: None,
            metadata: IndexMap::new(),
        }
    }

    /// Whether this element has any children.
    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Arena of document elements.
///
/// Immutable once built; construct through [`TreeBuilder`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentTree {
    nodes: Vec<Element>,
}

impl DocumentTree {
    /// Number of elements in the arena.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up an element by id.
    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.nodes.get(id.0)
    }

    /// Look up an element, failing with an input error when the id dangles.
    pub fn try_get(&self, id: ElementId) -> Result<&Element> {
        self.nodes.get(id.0).ok_or_else(|| {
            DocDiffError::invalid_input(
                "element lookup",
                InputErrorKind::DanglingElementId {
                    id: id.0,
                    len: self.nodes.len(),
                },
            )
        })
    }

    /// Children of an element. Dangling ids yield an empty slice.
    #[must_use]
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.get(id).map_or(&[], |e| e.children.as_slice())
    }

    /// Pre-order traversal starting at `root`.
    ///
    /// This is the flat element view of the document, derived on demand so
    /// it can never diverge from the hierarchy.
    #[must_use]
    pub fn preorder(&self, root: ElementId) -> Vec<ElementId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if self.get(id).is_none() {
                continue;
            }
            out.push(id);
            // Push children reversed so they pop in document order
            for &child in self.children(id).iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    /// Validate that the subtree under `root` is well formed: every id in
    /// bounds, every element reachable at most once.
    pub fn validate(&self, root: ElementId) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(DocDiffError::invalid_input(
                "hierarchy root",
                InputErrorKind::MissingRoot,
            ));
        }
        if self.get(root).is_none() {
            return Err(DocDiffError::invalid_input(
                "hierarchy root",
                InputErrorKind::DanglingElementId {
                    id: root.0,
                    len: self.nodes.len(),
                },
            ));
        }

        let mut seen = HashSet::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                return Err(DocDiffError::invalid_input(
                    "hierarchy",
                    InputErrorKind::DuplicateElementId(id.0),
                ));
            }
            let element = self.try_get(id)?;
            for &child in &element.children {
                if self.get(child).is_none() {
                    return Err(DocDiffError::invalid_input(
                        format!("children of {id}"),
                        InputErrorKind::DanglingElementId {
                            id: child.0,
                            len: self.nodes.len(),
                        },
                    ));
                }
                stack.push(child);
            }
        }
        Ok(())
    }
}

/// Builder for immutable [`DocumentTree`] construction.
///
/// Parent links are maintained by the builder; callers never mutate a built
/// tree in place.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<Element>,
}

impl TreeBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element, attaching it to `parent` when given.
    pub fn add(
        &mut self,
        parent: Option<ElementId>,
        kind: ElementKind,
        text: impl Into<String>,
    ) -> ElementId {
        let id = ElementId(self.nodes.len());
        let mut element = Element::new(kind, text);
        element.parent = parent;
        self.nodes.push(element);
        if let Some(parent_id) = parent {
            if let Some(parent_node) = self.nodes.get_mut(parent_id.0) {
                parent_node.children.push(id);
            }
        }
        id
    }

    /// Set the heading level of an element.
    pub fn set_level(&mut self, id: ElementId, level: u8) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.level = Some(level);
        }
    }

    /// Attach a metadata entry to an element.
    pub fn insert_metadata(
        &mut self,
        id: ElementId,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.metadata.insert(key.into(), value.into());
        }
    }

    /// Finish construction.
    #[must_use]
    pub fn build(self) -> DocumentTree {
        DocumentTree { nodes: self.nodes }
    }
}
