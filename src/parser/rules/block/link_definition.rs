use log::trace;

use crate::ast::{LinkDefinition, Node};
use crate::lexer::{to_literal, unescape, TokenStream};
use crate::parser::context;
use crate::parser::rules::patterns::DEFINITION_START;
use crate::parser::rules::syntax::{definition_line, title_line};
use crate::parser::{BlockParser, Parser};

/// `[id]: href "title"`, with the title optionally on the following line.
///
/// The definition stays in the tree; link resolution copies its target onto
/// matching references once the whole document is parsed.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkDefinitionRule;

impl BlockParser for LinkDefinitionRule {
    fn name(&self) -> &str {
        "link_definition"
    }

    fn parse(&self, _parser: &Parser, stream: &mut TokenStream, ast: &mut Vec<Node>) -> bool {
        let Some(text) = stream.peek(0).text() else {
            return false;
        };
        if !DEFINITION_START.is_match(text) {
            return false;
        }
        let Ok((_, line)) = definition_line(text) else {
            return false;
        };

        let mut title = line.title.map(to_literal);
        let mut source = text.trim().to_string();
        let mut extra = 0;

        if title.is_none() {
            if let Some(next) = stream.peek(1).text() {
                if let Ok((_, continued)) = title_line(next) {
                    title = Some(to_literal(continued));
                    source.push('\n');
                    source.push_str(next.trim());
                    extra = 1;
                }
            }
        }

        let definition = LinkDefinition {
            id: to_literal(line.id),
            href: to_literal(line.href),
            title,
            source: unescape(&source),
        };
        trace!("link definition [{}] -> {}", definition.id, definition.href);

        ast.push(Node::LinkDefinition(definition));
        stream.consume(extra);
        true
    }

    fn exclude_from_subparse(&self, context: &[String]) -> bool {
        context::contains(context, context::LIST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition(input: &str) -> (LinkDefinition, usize) {
        let parser = Parser::markdown();
        let mut stream = TokenStream::new(input);
        let mut ast = Vec::new();
        assert!(LinkDefinitionRule.parse(&parser, &mut stream, &mut ast));
        match ast.pop() {
            Some(Node::LinkDefinition(definition)) => (definition, stream.line()),
            other => panic!("expected definition, got {other:?}"),
        }
    }

    #[test]
    fn title_on_the_same_line() {
        let (definition, line) = definition("[1]: http://example.com \"Example\"\nnext");
        assert_eq!(definition.id, "1");
        assert_eq!(definition.href, "http://example.com");
        assert_eq!(definition.title.as_deref(), Some("Example"));
        assert_eq!(line, 1);
    }

    #[test]
    fn title_on_the_next_line() {
        let (definition, line) = definition("[a]: /url\n    'Title'");
        assert_eq!(definition.title.as_deref(), Some("Title"));
        assert_eq!(definition.source, "[a]: /url\n'Title'");
        assert_eq!(line, 2);
    }

    #[test]
    fn malformed_definition_is_declined() {
        let parser = Parser::markdown();
        let mut stream = TokenStream::new("[a]: x y z");
        let mut ast = Vec::new();
        assert!(!LinkDefinitionRule.parse(&parser, &mut stream, &mut ast));
        assert_eq!(stream.line(), 0);
    }

    #[test]
    fn excluded_inside_lists() {
        assert!(LinkDefinitionRule.exclude_from_subparse(&["list".to_string()]));
        assert!(!LinkDefinitionRule.exclude_from_subparse(&["blockquote".to_string()]));
    }
}
