//! Inline pipeline stages.
//!
//! Every stage scans the text it receives, replaces what it recognises with
//! placeholders and hands the rewritten text to the next stage. Content of a
//! recognised node (link text, emphasis) goes through the whole pipeline
//! again on its own.

mod autolink;
mod code;
mod emphasis;
mod line_break;
mod link;
mod reference;

use std::ops::Range;
use std::sync::Arc;

use crate::parser::InlineParser;

pub use autolink::Autolink;
pub use code::InlineCode;
pub use emphasis::Emphasis;
pub use line_break::LineBreak;
pub use link::InlineLink;
pub use reference::ReferenceLink;

/// The standard pipeline in stage order.
pub fn standard() -> Vec<Arc<dyn InlineParser>> {
    vec![
        Arc::new(InlineCode),
        Arc::new(InlineLink),
        Arc::new(ReferenceLink),
        Arc::new(Autolink),
        Arc::new(Emphasis::asterisk()),
        Arc::new(Emphasis::underscore()),
        Arc::new(LineBreak),
    ]
}

/// Replaces successive matches in `text`.
///
/// `next_match` receives the offset where scanning resumes and returns the
/// byte range to replace (starting at or after that offset) with its
/// replacement.
pub(crate) fn rewrite<F>(text: &str, mut next_match: F) -> String
where
    F: FnMut(usize) -> Option<(Range<usize>, String)>,
{
    let mut out = String::with_capacity(text.len());
    let mut position = 0;

    while position < text.len() {
        let Some((range, replacement)) = next_match(position) else {
            break;
        };
        debug_assert!(range.start >= position && range.end > range.start);
        out.push_str(&text[position..range.start]);
        out.push_str(&replacement);
        position = range.end;
    }

    out.push_str(&text[position..]);
    out
}

/// A `[...]` group with balanced brackets, optionally preceded by `!`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BracketSpan {
    /// Start of the span, at the `!` for images
    pub start: usize,
    /// The opening `[`
    pub open: usize,
    /// The matching `]`
    pub close: usize,
    pub image: bool,
}

impl BracketSpan {
    pub fn inner<'t>(&self, text: &'t str) -> &'t str {
        &text[self.open + 1..self.close]
    }
}

/// The next balanced bracket group opening at or after `from`.
pub(crate) fn find_bracket_span(text: &str, from: usize) -> Option<BracketSpan> {
    let mut search = from;

    while let Some(offset) = text.get(search..)?.find('[') {
        let open = search + offset;
        search = open + 1;

        let Some(close) = matching_bracket(text, open) else {
            continue;
        };
        let image = open > from && text.as_bytes()[open - 1] == b'!';
        return Some(BracketSpan {
            start: if image { open - 1 } else { open },
            open,
            close,
            image,
        });
    }

    None
}

fn matching_bracket(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, byte) in text.as_bytes()[open..].iter().enumerate() {
        match byte {
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + offset);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrite_replaces_in_order() {
        let text = "a1b2c";
        let rewritten = rewrite(text, |from| {
            text[from..]
                .find(|ch: char| ch.is_ascii_digit())
                .map(|offset| (from + offset..from + offset + 1, "#".to_string()))
        });
        assert_eq!(rewritten, "a#b#c");
    }

    #[test]
    fn bracket_spans_balance_nested_groups() {
        let span = find_bracket_span("x [a[b]c] y", 0).expect("span");
        assert_eq!((span.open, span.close), (2, 8));
        assert_eq!(span.inner("x [a[b]c] y"), "a[b]c");
        assert!(!span.image);
    }

    #[test]
    fn unmatched_bracket_is_skipped() {
        let text = "[a ![b] c";
        let span = find_bracket_span(text, 0).expect("span");
        assert!(span.image);
        assert_eq!(span.start, 3);
        assert_eq!(span.inner(text), "b");
    }
}
