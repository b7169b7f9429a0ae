use crate::ast::{Child, Node};
use crate::parser::{InlineParser, Parser, ParserState};

use super::rewrite;

/// Backtick code span.
///
/// A run of `n` backticks closes at the next run of exactly `n`. One space
/// directly inside each fence is dropped. Runs without a partner stay
/// literal.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineCode;

fn run_length(text: &str, start: usize) -> usize {
    text[start..].bytes().take_while(|&byte| byte == b'`').count()
}

/// Finds the next code span at or after `from`: its full range and content.
fn find_span(text: &str, from: usize) -> Option<(usize, usize, &str)> {
    let mut search = from;

    while let Some(offset) = text[search..].find('`') {
        let open = search + offset;
        let fence = run_length(text, open);
        let content_start = open + fence;

        let mut scan = content_start;
        while let Some(offset) = text[scan..].find('`') {
            let candidate = scan + offset;
            let length = run_length(text, candidate);
            if length == fence {
                return Some((open, candidate + length, &text[content_start..candidate]));
            }
            scan = candidate + length;
        }

        search = content_start;
    }

    None
}

impl InlineParser for InlineCode {
    fn name(&self) -> &str {
        "inline_code"
    }

    fn parse(&self, parser: &Parser, text: &str, state: ParserState<'_>) -> Vec<Child> {
        let rewritten = rewrite(text, |from| {
            let (start, end, content) = find_span(text, from)?;
            let content = content.strip_prefix(' ').unwrap_or(content);
            let content = content.strip_suffix(' ').unwrap_or(content);

            let node = Node::Code {
                inline: true,
                source: None,
                children: vec![Child::Node(Node::Literal {
                    value: state.verbatim(content),
                })],
            };
            Some((start..end, state.add_inline(node)))
        });

        parser.continue_inlines(&rewritten, state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::escape;

    fn code_value(child: &Child) -> &str {
        match child {
            Child::Node(Node::Code { inline: true, children, .. }) => {
                match children.first().and_then(Child::as_node) {
                    Some(Node::Literal { value }) => value,
                    other => panic!("expected literal, got {other:?}"),
                }
            }
            other => panic!("expected inline code, got {other:?}"),
        }
    }

    #[test]
    fn span_content_is_verbatim() {
        let parser = Parser::markdown();
        let children = parser.parse_inlines("use `*x*` here", &[]);
        assert_eq!(children.len(), 3);
        assert_eq!(code_value(&children[1]), "*x*");
        assert_eq!(children[2], Child::from(" here"));
    }

    #[test]
    fn longer_fences_hold_backticks() {
        let parser = Parser::markdown();
        let children = parser.parse_inlines("`` a ` b ``", &[]);
        assert_eq!(children.len(), 1);
        assert_eq!(code_value(&children[0]), "a ` b");
    }

    #[test]
    fn unmatched_run_stays_literal() {
        let parser = Parser::markdown();
        let children = parser.parse_inlines("a ``b` c", &[]);
        assert_eq!(children, vec![Child::from("a ``b` c")]);
    }

    #[test]
    fn escapes_keep_their_backslash() {
        let parser = Parser::markdown();
        let children = parser.parse_inlines(&escape(r"`\*`"), &[]);
        assert_eq!(code_value(&children[0]), r"\*");
    }
}
