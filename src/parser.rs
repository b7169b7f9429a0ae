// Parser module: orchestrator, handler traits and the standard grammar rules
mod core;
mod links;
mod state;
mod traits;

pub mod rules;


pub use self::core::Parser;
pub use links::resolve_links;
pub use state::{ParserState, PLACEHOLDER_CLOSE, PLACEHOLDER_OPEN};
pub use traits::{BlockParser, InlineParser};

/// Context tags pushed by sub-parsers and inline calls.
///
/// Handlers consult them through `exclude_from_subparse` to opt out of
/// contexts where their construct is not valid.
pub mod context {
    /// Content of a list item
    pub const LIST: &str = "list";
    /// Content of a blockquote
    pub const BLOCKQUOTE: &str = "blockquote";
    /// Inline content of a heading
    pub const HEADING: &str = "heading";
    /// Display text of a link
    pub const LINK: &str = "link";

    /// Returns true if `tag` is on the context stack.
    pub fn contains(context: &[String], tag: &str) -> bool {
        context.iter().any(|entry| entry == tag)
    }
}
