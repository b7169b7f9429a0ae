use lazy_static::lazy_static;
use regex::Regex;

use crate::ast::Node;
use crate::lexer::{unescape, TokenStream};
use crate::parser::rules::patterns::{HTML_COMMENT_OPEN, HTML_OPEN};
use crate::parser::{BlockParser, Parser};

lazy_static! {
    static ref TAG: Regex = Regex::new(r"<(/?)([A-Za-z][A-Za-z0-9-]*)[^>]*?(/?)>")
        .expect("html tag pattern");
}

fn html_node(lines: &[String]) -> Node {
    Node::Html {
        value: unescape(&lines.join("\n")),
    }
}

/// Change in open `name` elements across `line`.
fn depth_change(line: &str, name: &str) -> isize {
    TAG.captures_iter(line)
        .filter(|caps| caps[2].eq_ignore_ascii_case(name))
        .map(|caps| match (&caps[1], &caps[3]) {
            ("/", _) => -1,
            (_, "/") => 0,
            _ => 1,
        })
        .sum()
}

/// Raw HTML starting with an opening tag at the start of a line.
///
/// The block runs through the line that closes the opening element, or is a
/// single self-closing tag. The close must end its line and come before any
/// blank line; otherwise the lines are left to the paragraph rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlBlock;

impl BlockParser for HtmlBlock {
    fn name(&self) -> &str {
        "html_block"
    }

    fn parse(&self, _parser: &Parser, stream: &mut TokenStream, ast: &mut Vec<Node>) -> bool {
        let Some(caps) = stream.peek(0).captures(&HTML_OPEN) else {
            return false;
        };
        let name = caps[1].to_string();
        let closing = format!("</{}>", name.to_ascii_lowercase());

        let mut depth = 0isize;
        let mut offset = 0isize;
        while let Some(text) = stream.peek(offset).text() {
            if text.trim().is_empty() {
                return false;
            }
            depth += depth_change(text, &name);
            if depth > 0 {
                offset += 1;
                continue;
            }

            let trimmed = text.trim_end();
            let self_closing = offset == 0 && trimmed.ends_with("/>");
            if self_closing || trimmed.to_ascii_lowercase().ends_with(&closing) {
                let lines = stream.consume(offset as usize);
                ast.push(html_node(&lines));
                return true;
            }
            return false;
        }

        false
    }
}

/// `<!--` through the line holding `-->`, or through the end of input.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlComment;

impl BlockParser for HtmlComment {
    fn name(&self) -> &str {
        "html_comment"
    }

    fn parse(&self, _parser: &Parser, stream: &mut TokenStream, ast: &mut Vec<Node>) -> bool {
        let Some(first) = stream.peek(0).text() else {
            return false;
        };
        let Some(open) = HTML_COMMENT_OPEN.find(first) else {
            return false;
        };

        let mut offset = 0isize;
        let mut search_from = open.end();
        while let Some(text) = stream.peek(offset).text() {
            if text[search_from..].contains("-->") {
                break;
            }
            search_from = 0;
            offset += 1;
        }

        let extra = (offset as usize).min(stream.remaining().saturating_sub(1));
        let lines = stream.consume(extra);
        ast.push(html_node(&lines));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn html(handler: &dyn BlockParser, input: &str) -> Option<(String, usize)> {
        let parser = Parser::markdown();
        let mut stream = TokenStream::new(input);
        let mut ast = Vec::new();
        if !handler.parse(&parser, &mut stream, &mut ast) {
            return None;
        }
        match ast.pop() {
            Some(Node::Html { value }) => Some((value, stream.line())),
            other => panic!("expected html, got {other:?}"),
        }
    }

    #[test]
    fn block_runs_to_matching_close() {
        let (value, line) =
            html(&HtmlBlock, "<div>\n<div>inner</div>\n</div>\nafter").expect("html block");
        assert_eq!(value, "<div>\n<div>inner</div>\n</div>");
        assert_eq!(line, 3);
    }

    #[test]
    fn single_line_self_closing_tag() {
        let (value, line) = html(&HtmlBlock, "<hr class=\"x\" />\ntext").expect("html block");
        assert_eq!(value, "<hr class=\"x\" />");
        assert_eq!(line, 1);
    }

    #[test]
    fn unclosed_block_is_declined() {
        assert!(html(&HtmlBlock, "<div>\nopen").is_none());
    }

    #[test]
    fn element_closed_mid_line_is_declined() {
        assert!(html(&HtmlBlock, "<em>a</em> first\n\nSecond <em>c</em>").is_none());
    }

    #[test]
    fn blank_line_ends_the_search_for_a_close() {
        assert!(html(&HtmlBlock, "<div>\nopen\n\n</div>").is_none());
    }

    #[test]
    fn comment_spans_lines() {
        let (value, line) = html(&HtmlComment, "<!-- a\nb -->\nc").expect("comment");
        assert_eq!(value, "<!-- a\nb -->");
        assert_eq!(line, 2);
    }

    #[test]
    fn unterminated_comment_runs_to_end() {
        let (value, line) = html(&HtmlComment, "<!-- a\nb").expect("comment");
        assert_eq!(value, "<!-- a\nb");
        assert_eq!(line, 2);
    }
}
