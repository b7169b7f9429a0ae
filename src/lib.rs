//! Markdown to AST engine.
//!
//! Parsing runs in two phases. Block handlers claim whole lines from a
//! [`lexer::TokenStream`] in catalog order; the text of every leaf block then
//! goes through a fixed pipeline of inline stages. Reference links are
//! resolved against the document's definitions once the tree is complete.
//!
//! ```
//! use markast::{parse, Node};
//!
//! let ast = parse("# Hello\n\nSome *text*");
//! assert!(matches!(ast[0], Node::Heading { level: 1, .. }));
//! assert_eq!(ast[1].text_content(), "Some text");
//! ```

// Core modules
pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;

// Configuration and extension modules
pub mod config;
pub mod extensions;

// Re-export key types for public API
pub use ast::{
    Child, Link, LinkDefinition, LinkKind, ListItem, ListKind, MutVisitor, Node, Visitable,
    Visitor,
};
pub use config::ParserConfig;
pub use error::{HandlerCatalog, MarkdownError, Result};
pub use extensions::ParserBuilder;
pub use parser::{resolve_links, BlockParser, InlineParser, Parser, ParserState};

use lazy_static::lazy_static;

lazy_static! {
    static ref MARKDOWN: Parser = Parser::markdown();
}

/// Parses markdown text with the standard grammar.
///
/// Malformed input never fails: unrecognised syntax is kept as text.
///
/// # Examples
///
/// ```
/// use markast::{parse, Child, Node};
///
/// let ast = parse("- a\n- b");
/// let Node::List { items, .. } = &ast[0] else { panic!() };
/// assert_eq!(items[1].children, vec![Child::from("b")]);
/// ```
pub fn parse(markdown: &str) -> Vec<Node> {
    MARKDOWN.parse(markdown)
}

/// Parses markdown text with a custom parser, for example one assembled
/// with [`ParserBuilder`].
pub fn parse_with(parser: &Parser, markdown: &str) -> Vec<Node> {
    parser.parse(markdown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() {
        assert_eq!(
            parse("# Hello, World!"),
            vec![Node::Heading {
                level: 1,
                children: vec![Child::from("Hello, World!")],
            }]
        );
    }

    #[test]
    fn test_parse_with_custom_parser() {
        let parser = ParserBuilder::markdown()
            .without_block("atx_header")
            .build()
            .expect("valid preset");
        let ast = parse_with(&parser, "# not a heading");
        assert!(matches!(ast[0], Node::Paragraph { .. }));
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_empty());
        assert!(parse("\n \n\t\n").is_empty());
    }
}
