use lazy_static::lazy_static;
use regex::Regex;

use crate::ast::{Child, Node};
use crate::parser::context::HEADING;
use crate::parser::{InlineParser, Parser, ParserState};

use super::rewrite;

lazy_static! {
    static ref HARD_BREAK: Regex = Regex::new(r"(?: {2,}|\\)\n").expect("line break pattern");
    static ref TRAILING_SPACES: Regex =
        Regex::new(r"(?m) {2,}$").expect("trailing spaces pattern");
}

/// Two or more spaces, or a backslash, at the end of a line.
///
/// In headings the trailing spaces are dropped without a break.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineBreak;

impl InlineParser for LineBreak {
    fn name(&self) -> &str {
        "line_break"
    }

    fn parse(&self, parser: &Parser, text: &str, state: ParserState<'_>) -> Vec<Child> {
        if state.has_context(HEADING) {
            let stripped = TRAILING_SPACES.replace_all(text, "");
            return parser.continue_inlines(&stripped, state);
        }

        let rewritten = rewrite(text, |from| {
            let found = HARD_BREAK.find_at(text, from)?;
            Some((found.range(), state.add_inline(Node::LineBreak)))
        });
        parser.continue_inlines(&rewritten, state)
    }
}
