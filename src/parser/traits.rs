use crate::ast::{Child, Node};
use crate::lexer::TokenStream;
use std::fmt::Debug;

use super::core::Parser;
use super::state::ParserState;

/// A grammar rule operating on whole lines at the top of the block loop.
///
/// Block handlers are tried in catalog order at every position; the first one
/// returning `true` claims it.
pub trait BlockParser: Debug + Send + Sync {
    /// Unique name within a catalog, used by builders to position handlers
    fn name(&self) -> &str;

    /// Tries to claim the stream's current position. On success the handler
    /// has consumed at least one line and appended its output to `ast`.
    /// On failure the stream and `ast` are left untouched.
    fn parse(&self, parser: &Parser, stream: &mut TokenStream, ast: &mut Vec<Node>) -> bool;

    /// Returns true if the rule must not run inside the given context.
    fn exclude_from_subparse(&self, context: &[String]) -> bool {
        let _ = context;
        false
    }
}

/// A stage of the inline pipeline.
///
/// Every stage runs on the text handed down by the previous one. A stage
/// claims what it recognises by splicing placeholders into the text (see
/// [`ParserState::add_inline`]) and then passes the text on with
/// [`Parser::continue_inlines`], so later stages still see everything it
/// left alone.
pub trait InlineParser: Debug + Send + Sync {
    fn name(&self) -> &str;

    fn parse(&self, parser: &Parser, text: &str, state: ParserState<'_>) -> Vec<Child>;

    fn exclude_from_subparse(&self, context: &[String]) -> bool {
        let _ = context;
        false
    }
}
