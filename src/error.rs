/// Error handling module for the Markdown engine.
///
/// Malformed markdown is never an error: every construct degrades to literal
/// text or partial structure. The variants below are configuration errors
/// raised while assembling a parser.
use thiserror::Error;

/// Main error type for the Markdown engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkdownError {
    /// A builder step referenced a handler missing from the catalog.
    #[error("No {catalog} handler named '{name}'")]
    UnknownHandler {
        catalog: HandlerCatalog,
        name: String,
    },

    /// A handler was added under a name the catalog already holds.
    #[error("Duplicate {catalog} handler '{name}'")]
    DuplicateHandler {
        catalog: HandlerCatalog,
        name: String,
    },
}

/// Which handler catalog an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerCatalog {
    Block,
    Inline,
}

impl std::fmt::Display for HandlerCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HandlerCatalog::Block => f.write_str("block"),
            HandlerCatalog::Inline => f.write_str("inline"),
        }
    }
}

/// Convenience type alias for Results in the Markdown engine.
pub type Result<T> = std::result::Result<T, MarkdownError>;

impl MarkdownError {
    pub fn unknown_handler(catalog: HandlerCatalog, name: impl Into<String>) -> Self {
        MarkdownError::UnknownHandler {
            catalog,
            name: name.into(),
        }
    }

    pub fn duplicate_handler(catalog: HandlerCatalog, name: impl Into<String>) -> Self {
        MarkdownError::DuplicateHandler {
            catalog,
            name: name.into(),
        }
    }
}
