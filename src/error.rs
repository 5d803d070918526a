//! Unified error types for docdiff-tools.
//!
//! The comparison engine is total for well-formed inputs; everything here
//! covers malformed trees, configured resource limits, and option validation.

use thiserror::Error;

/// Main error type for docdiff-tools operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DocDiffError {
    /// The input document structure is malformed
    #[error("Invalid input document: {context}")]
    InvalidInput {
        context: String,
        #[source]
        source: InputErrorKind,
    },

    /// Errors during diff computation
    #[error("Diff computation failed: {context}")]
    Diff {
        context: String,
        #[source]
        source: DiffErrorKind,
    },

    /// A configured resource limit was exceeded
    #[error("Resource limit exceeded: {context} (limit {limit}, actual {actual})")]
    ResourceLimit {
        limit: usize,
        actual: usize,
        context: String,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Specific input error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum InputErrorKind {
    #[error("Document has no hierarchy root")]
    MissingRoot,

    #[error("Element id {id} is out of bounds (tree has {len} elements)")]
    DanglingElementId { id: usize, len: usize },

    #[error("Element id {0} appears more than once in the hierarchy")]
    DuplicateElementId(usize),
}

/// Specific diff error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DiffErrorKind {
    #[error("Deadline of {0:?} exceeded")]
    DeadlineExceeded(std::time::Duration),

    #[error("Maximum recursion depth {0} exceeded")]
    DepthExceeded(usize),
}

/// Convenient Result type for docdiff-tools operations
pub type Result<T> = std::result::Result<T, DocDiffError>;

impl DocDiffError {
    /// Create an invalid-input error with context
    pub fn invalid_input(context: impl Into<String>, source: InputErrorKind) -> Self {
        Self::InvalidInput {
            context: context.into(),
            source,
        }
    }

    /// Create a diff error with context
    pub fn diff(context: impl Into<String>, source: DiffErrorKind) -> Self {
        Self::Diff {
            context: context.into(),
            source,
        }
    }

    /// Create a resource-limit error
    pub fn resource_limit(limit: usize, actual: usize, context: impl Into<String>) -> Self {
        Self::ResourceLimit {
            limit,
            actual,
            context: context.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

/// Extension trait for adding context to errors.
///
/// The context string is prepended to the error's existing context,
/// creating a chain that shows the path through the code.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure (lazy evaluation).
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<DocDiffError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: DocDiffError, new_ctx: &str) -> DocDiffError {
    match err {
        DocDiffError::InvalidInput {
            context: existing,
            source,
        } => DocDiffError::InvalidInput {
            context: chain_context(new_ctx, &existing),
            source,
        },
        DocDiffError::Diff {
            context: existing,
            source,
        } => DocDiffError::Diff {
            context: chain_context(new_ctx, &existing),
            source,
        },
        DocDiffError::ResourceLimit {
            limit,
            actual,
            context: existing,
        } => DocDiffError::ResourceLimit {
            limit,
            actual,
            context: chain_context(new_ctx, &existing),
        },
        DocDiffError::Config(msg) => DocDiffError::Config(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings together.
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DocDiffError::invalid_input("before document", InputErrorKind::MissingRoot);
        let display = err.to_string();
        assert!(
            display.contains("Invalid input"),
            "Error message should mention invalid input: {}",
            display
        );
    }

    #[test]
    fn test_resource_limit_display() {
        let err = DocDiffError::resource_limit(512, 2048, "sibling list width");
        let display = err.to_string();
        assert!(display.contains("512"));
        assert!(display.contains("2048"));
    }

    #[test]
    fn test_context_chaining() {
        let initial: Result<()> = Err(DocDiffError::invalid_input(
            "initial context",
            InputErrorKind::MissingRoot,
        ));

        let err = initial.context("outer context");
        match err {
            Err(DocDiffError::InvalidInput { context, .. }) => {
                assert!(context.contains("outer context"), "{}", context);
                assert!(context.contains("initial context"), "{}", context);
            }
            _ => panic!("Expected InvalidInput error"),
        }
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let mut called = false;

        let ok_result: Result<i32> = Ok(42);
        let _ = ok_result.with_context(|| {
            called = true;
            "should not be called"
        });
        assert!(!called, "Closure should not be called for Ok result");
    }

    #[test]
    fn test_chain_context_helper() {
        assert_eq!(chain_context("new", ""), "new");
        assert_eq!(chain_context("new", "existing"), "new: existing");
    }
}
