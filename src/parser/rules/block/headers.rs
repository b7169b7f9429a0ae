use crate::ast::Node;
use crate::lexer::TokenStream;
use crate::parser::context::{self, HEADING};
use crate::parser::rules::patterns::{starts_other_block, ATX_HEADER, INDENTED, SETEXT_UNDERLINE};
use crate::parser::{BlockParser, Parser};

/// A line underlined with `===` (level 1) or `---` (level 2).
#[derive(Debug, Clone, Copy, Default)]
pub struct SetextHeader;

impl BlockParser for SetextHeader {
    fn name(&self) -> &str {
        "setext_header"
    }

    fn parse(&self, parser: &Parser, stream: &mut TokenStream, ast: &mut Vec<Node>) -> bool {
        let line = stream.peek(0);
        let Some(text) = line.text() else {
            return false;
        };
        if line.is_empty() || starts_other_block(text) || INDENTED.is_match(text) {
            return false;
        }

        let Some(underline) = stream.peek(1).captures(&SETEXT_UNDERLINE) else {
            return false;
        };
        let level = if underline[1].starts_with('=') { 1 } else { 2 };

        let children = parser.parse_inlines(text.trim(), &[HEADING]);
        ast.push(Node::Heading { level, children });
        stream.consume(1);
        true
    }

    fn exclude_from_subparse(&self, context: &[String]) -> bool {
        context::contains(context, context::LIST)
    }
}

/// `#` run, a space and the heading text, with an optional closing `#` run.
#[derive(Debug, Clone, Copy, Default)]
pub struct AtxHeader;

impl BlockParser for AtxHeader {
    fn name(&self) -> &str {
        "atx_header"
    }

    fn parse(&self, parser: &Parser, stream: &mut TokenStream, ast: &mut Vec<Node>) -> bool {
        let Some(caps) = stream.peek(0).captures(&ATX_HEADER) else {
            return false;
        };

        let (Some(marker), Some(content)) = (caps.get(1), caps.get(2)) else {
            debug_assert!(false, "ATX header matched without marker and content groups");
            return false;
        };

        let level = marker.as_str().len() as u8;
        let children = parser.parse_inlines(content.as_str(), &[HEADING]);
        ast.push(Node::Heading { level, children });
        stream.consume(0);
        true
    }
}
