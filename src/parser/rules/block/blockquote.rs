use crate::ast::{Child, Node};
use crate::lexer::TokenStream;
use crate::parser::context::BLOCKQUOTE;
use crate::parser::rules::patterns::BLOCKQUOTE as QUOTE_MARKER;
use crate::parser::{BlockParser, Parser};

/// Consecutive `>` lines, parsed as nested blocks.
///
/// A quote directly following another quote node extends it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Blockquote;

impl BlockParser for Blockquote {
    fn name(&self) -> &str {
        "blockquote"
    }

    fn parse(&self, parser: &Parser, stream: &mut TokenStream, ast: &mut Vec<Node>) -> bool {
        if !stream.peek(0).matches(&QUOTE_MARKER) {
            return false;
        }

        let mut lines = Vec::new();
        while let Some(text) = stream.peek(0).text() {
            let Some(marker) = QUOTE_MARKER.find(text) else {
                break;
            };
            lines.push(text[marker.end()..].to_string());
            stream.consume(0);
        }

        let content = parser
            .subparser(Some(BLOCKQUOTE))
            .parse(&lines.join("\n"))
            .into_iter()
            .map(Child::Node);

        match ast.last_mut() {
            Some(Node::BlockQuote { children }) => children.extend(content),
            _ => ast.push(Node::BlockQuote {
                children: content.collect(),
            }),
        }
        true
    }
}
