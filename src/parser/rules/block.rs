//! Block-level grammar rules.
//!
//! [`standard`] returns them most specific first, with the always-matching
//! [`Paragraph`] last so that every position is claimed.

mod blockquote;
mod code;
mod headers;
mod horizontal_rule;
mod html;
mod link_definition;
mod list;
mod paragraph;

use std::sync::Arc;

use crate::parser::BlockParser;

pub use blockquote::Blockquote;
pub use code::{FencedCode, IndentedCode};
pub use headers::{AtxHeader, SetextHeader};
pub use horizontal_rule::HorizontalRule;
pub use html::{HtmlBlock, HtmlComment};
pub use link_definition::LinkDefinitionRule;
pub use list::List;
pub use paragraph::Paragraph;

/// The standard block catalog in precedence order.
pub fn standard() -> Vec<Arc<dyn BlockParser>> {
    vec![
        Arc::new(SetextHeader),
        Arc::new(AtxHeader),
        Arc::new(Blockquote),
        Arc::new(IndentedCode),
        Arc::new(FencedCode),
        Arc::new(List),
        Arc::new(HorizontalRule),
        Arc::new(LinkDefinitionRule),
        Arc::new(HtmlBlock),
        Arc::new(HtmlComment),
        Arc::new(Paragraph),
    ]
}
