use crate::ast::Node;
use crate::lexer::TokenStream;
use crate::parser::rules::patterns::HORIZONTAL_RULE;
use crate::parser::{BlockParser, Parser};

/// Three or more `-`, `*` or `_`, optionally separated by spaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct HorizontalRule;

impl BlockParser for HorizontalRule {
    fn name(&self) -> &str {
        "horizontal_rule"
    }

    fn parse(&self, _parser: &Parser, stream: &mut TokenStream, ast: &mut Vec<Node>) -> bool {
        if !stream.peek(0).matches(&HORIZONTAL_RULE) {
            return false;
        }
        ast.push(Node::Hr);
        stream.consume(0);
        true
    }
}
