use crate::ast::{Child, Node};
use crate::lexer::{to_literal, unescape, TokenStream};
use crate::parser::rules::patterns::{strip_indent, FENCE_CLOSE, FENCE_OPEN, INDENTED};
use crate::parser::{BlockParser, Parser};

fn code_block(source: Option<String>, lines: &[String]) -> Node {
    Node::Code {
        inline: false,
        source,
        children: vec![Child::Node(Node::Literal {
            value: unescape(&lines.join("\n")),
        })],
    }
}

/// Lines indented by four spaces or a tab, starting after a blank line.
///
/// Blank lines inside the run are kept only when another indented line
/// follows them.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndentedCode;

impl BlockParser for IndentedCode {
    fn name(&self) -> &str {
        "indented_code"
    }

    fn parse(&self, _parser: &Parser, stream: &mut TokenStream, ast: &mut Vec<Node>) -> bool {
        if !stream.peek(0).matches(&INDENTED) || !stream.peek(-1).is_empty() {
            return false;
        }

        let mut lines = Vec::new();
        loop {
            let line = stream.peek(0);
            let Some(text) = line.text() else {
                break;
            };

            if line.matches(&INDENTED) && !line.is_empty() {
                lines.push(strip_indent(text, 4).to_string());
                stream.consume(0);
                continue;
            }

            if !line.is_empty() {
                break;
            }

            let mut blanks = 1;
            while !stream.peek(blanks).is_eos() && stream.peek(blanks).is_empty() {
                blanks += 1;
            }
            if !stream.peek(blanks).matches(&INDENTED) {
                break;
            }
            for consumed in stream.consume(blanks as usize - 1) {
                lines.push(strip_indent(&consumed, 4).to_string());
            }
        }

        ast.push(code_block(None, &lines));
        true
    }
}

/// Triple (or longer) backtick or tilde fence with an optional language.
///
/// The closing fence uses the same character and is at least as long.
/// Without one the block runs to the end of input.
#[derive(Debug, Clone, Copy, Default)]
pub struct FencedCode;

impl BlockParser for FencedCode {
    fn name(&self) -> &str {
        "fenced_code"
    }

    fn parse(&self, _parser: &Parser, stream: &mut TokenStream, ast: &mut Vec<Node>) -> bool {
        let Some(caps) = stream.peek(0).captures(&FENCE_OPEN) else {
            return false;
        };
        let fence = caps[1].to_string();
        let language = Some(to_literal(&caps[2])).filter(|language| !language.is_empty());
        stream.consume(0);

        let fence_char = fence.chars().next();
        let mut lines = Vec::new();
        while let Some(text) = stream.peek(0).text() {
            let closes = FENCE_CLOSE.captures(text).map_or(false, |close| {
                close[1].chars().next() == fence_char && close[1].len() >= fence.len()
            });
            if closes {
                stream.consume(0);
                break;
            }
            lines.push(text.to_string());
            stream.consume(0);
        }

        ast.push(code_block(language, &lines));
        true
    }
}
