use crate::ast::Node;
use crate::lexer::TokenStream;
use crate::parser::{BlockParser, Parser};

/// Terminal rule: claims any line.
///
/// The paragraph runs until a blank line, the end of input, or a line that
/// another handler of the current parser would claim. That check runs the
/// handlers of a [`Parser::shallow`] copy on a cloned stream, so it never
/// consumes anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct Paragraph;

impl Paragraph {
    fn claimed_elsewhere(&self, probe_parser: &Parser, stream: &TokenStream) -> bool {
        let mut scratch = Vec::new();
        probe_parser
            .block_parsers()
            .iter()
            .filter(|handler| handler.name() != self.name())
            .any(|handler| {
                let mut probe = stream.clone();
                handler.parse(probe_parser, &mut probe, &mut scratch)
            })
    }
}

impl BlockParser for Paragraph {
    fn name(&self) -> &str {
        "paragraph"
    }

    fn parse(&self, parser: &Parser, stream: &mut TokenStream, ast: &mut Vec<Node>) -> bool {
        let Some(first) = stream.peek(0).text() else {
            return false;
        };
        let mut lines = vec![first.trim_start().to_string()];
        stream.consume(0);

        let probe_parser = parser.shallow();
        while !stream.peek(0).is_empty() && !self.claimed_elsewhere(&probe_parser, stream) {
            if let Some(text) = stream.peek(0).text() {
                lines.push(text.trim_start().to_string());
            }
            stream.consume(0);
        }

        let text = lines.join("\n");
        let children = parser.parse_inlines(text.trim_end(), &[]);
        ast.push(Node::Paragraph { children });
        true
    }
}
