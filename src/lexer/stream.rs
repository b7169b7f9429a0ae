use regex::{Captures, Regex};
use std::rc::Rc;

/// Line-oriented cursor over escaped input.
///
/// Lines are shared between clones, so probing ahead on a cloned stream only
/// copies the cursor.
#[derive(Debug, Clone)]
pub struct TokenStream {
    lines: Rc<[String]>,
    cursor: usize,
}

impl TokenStream {
    pub fn new(text: &str) -> Self {
        let lines: Vec<String> = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();
        Self::from_lines(lines)
    }

    pub fn from_lines(lines: Vec<String>) -> Self {
        Self {
            lines: lines.into(),
            cursor: 0,
        }
    }

    /// Looks at the line `offset` lines away from the cursor without moving it.
    /// Offsets outside the input yield an end-of-stream view.
    pub fn peek(&self, offset: isize) -> Line<'_> {
        let index = self.cursor as isize + offset;
        let text = usize::try_from(index)
            .ok()
            .and_then(|index| self.lines.get(index))
            .map(String::as_str);
        Line { text }
    }

    /// Advances past the current line plus `extra` more, returning what was
    /// consumed.
    pub fn consume(&mut self, extra: usize) -> Vec<String> {
        let end = (self.cursor + 1 + extra).min(self.lines.len());
        let consumed = self.lines[self.cursor.min(end)..end].to_vec();
        self.cursor = end;
        consumed
    }

    /// Index of the current line.
    pub fn line(&self) -> usize {
        self.cursor
    }

    pub fn is_eos(&self) -> bool {
        self.cursor >= self.lines.len()
    }

    pub fn remaining(&self) -> usize {
        self.lines.len().saturating_sub(self.cursor)
    }
}

/// Read-only view of one line of a [`TokenStream`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    text: Option<&'a str>,
}

impl<'a> Line<'a> {
    /// The line's text, or `None` past either end of the stream.
    pub fn text(&self) -> Option<&'a str> {
        self.text
    }

    pub fn is_eos(&self) -> bool {
        self.text.is_none()
    }

    /// True for missing lines and lines holding only whitespace.
    pub fn is_empty(&self) -> bool {
        self.text.map_or(true, |text| text.trim().is_empty())
    }

    pub fn matches(&self, pattern: &Regex) -> bool {
        self.text.map_or(false, |text| pattern.is_match(text))
    }

    pub fn captures(&self, pattern: &Regex) -> Option<Captures<'a>> {
        self.text.and_then(|text| pattern.captures(text))
    }

    /// Number of leading spaces.
    pub fn indent(&self) -> usize {
        self.text
            .map_or(0, |text| text.len() - text.trim_start_matches(' ').len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peek_does_not_move_the_cursor() {
        let mut stream = TokenStream::new("one\ntwo\nthree");
        assert_eq!(stream.peek(0).text(), Some("one"));
        assert_eq!(stream.peek(2).text(), Some("three"));
        assert!(stream.peek(3).is_eos());
        assert!(stream.peek(-1).is_eos());

        stream.consume(0);
        assert_eq!(stream.peek(-1).text(), Some("one"));
        assert_eq!(stream.line(), 1);
    }

    #[test]
    fn consume_takes_extra_lines() {
        let mut stream = TokenStream::new("a\nb\nc");
        assert_eq!(stream.consume(1), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(stream.consume(5), vec!["c".to_string()]);
        assert!(stream.is_eos());
        assert!(stream.consume(0).is_empty());
    }

    #[test]
    fn whitespace_lines_are_empty() {
        let stream = TokenStream::new(" \t \r\nx");
        assert!(stream.peek(0).is_empty());
        assert!(!stream.peek(1).is_empty());
        assert!(stream.peek(9).is_empty());
    }

    #[test]
    fn clones_have_independent_cursors() {
        let stream = TokenStream::new("a\nb");
        let mut probe = stream.clone();
        probe.consume(0);
        assert_eq!(stream.line(), 0);
        assert_eq!(probe.line(), 1);
    }
}
