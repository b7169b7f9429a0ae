use log::{debug, trace};

use crate::ast::{Child, Node};
use crate::parser::{InlineParser, Parser, ParserState};

use super::rewrite;

/// Upper bound on search steps per window; past it the best pairing found
/// so far is used.
const STEP_BUDGET: usize = 20_000;

/// Delimiters searched together. Longer runs are split into windows that
/// pair independently, which also bounds the search's recursion depth.
const WINDOW: usize = 512;

/// Emphasis and strong emphasis for one delimiter character.
///
/// Every way of pairing the delimiters into properly nested emphasis
/// (single) and strong (double) spans is searched. The pairing leaving the
/// fewest delimiters as literal text wins; among equal pairings the first
/// found wins, trying closes before opens and strong before emphasis. Only
/// the outermost spans become nodes here. Their content runs through the
/// whole pipeline again, which resolves the inner spans.
#[derive(Debug, Clone, Copy)]
pub struct Emphasis {
    delimiter: char,
    name: &'static str,
}

impl Emphasis {
    pub fn asterisk() -> Self {
        Self {
            delimiter: '*',
            name: "emphasis_asterisk",
        }
    }

    /// `_` does not open or close inside words.
    pub fn underscore() -> Self {
        Self {
            delimiter: '_',
            name: "emphasis_underscore",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpanKind {
    Emphasis,
    Strong,
}

impl SpanKind {
    fn width(self) -> usize {
        match self {
            SpanKind::Emphasis => 1,
            SpanKind::Strong => 2,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Open {
    kind: SpanKind,
    start: usize,
    outermost: bool,
}

/// A paired span, from the opening delimiter to past the closing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    kind: SpanKind,
    start: usize,
    end: usize,
    outermost: bool,
}

struct Search<'t> {
    text: &'t str,
    delimiter: char,
    positions: Vec<usize>,
    steps: usize,
    best: Option<(usize, Vec<Span>)>,
}

/// Pairs every delimiter in `text`, one window at a time.
///
/// A window may grow by one delimiter so that it does not end inside a
/// `**` pair.
fn pair_delimiters(text: &str, delimiter: char) -> Vec<Span> {
    let positions: Vec<usize> = text
        .char_indices()
        .filter(|&(_, ch)| ch == delimiter)
        .map(|(offset, _)| offset)
        .collect();

    let mut spans = Vec::new();
    let mut from = 0;
    while from < positions.len() {
        let mut to = (from + WINDOW).min(positions.len());
        if to < positions.len() && positions[to] == positions[to - 1] + 1 {
            to += 1;
        }
        if from > 0 || to < positions.len() {
            trace!("emphasis window over delimiters {from}..{to}");
        }
        spans.extend(Search::new(text, delimiter, positions[from..to].to_vec()).run());
        from = to;
    }
    spans
}

impl<'t> Search<'t> {
    fn new(text: &'t str, delimiter: char, positions: Vec<usize>) -> Self {
        Self {
            text,
            delimiter,
            positions,
            steps: 0,
            best: None,
        }
    }

    fn run(mut self) -> Vec<Span> {
        self.explore(0, &mut Vec::new(), &mut Vec::new(), 0);
        if self.steps > STEP_BUDGET {
            debug!(
                "emphasis search for '{}' stopped after {} steps",
                self.delimiter, STEP_BUDGET
            );
        }
        self.best.map(|(_, spans)| spans).unwrap_or_default()
    }

    fn char_before(&self, at: usize) -> Option<char> {
        self.text[..at].chars().next_back()
    }

    fn char_after(&self, at: usize) -> Option<char> {
        self.text[at..].chars().next()
    }

    fn can_open(&self, at: usize, width: usize) -> bool {
        let followed = self
            .char_after(at + width)
            .map_or(false, |ch| !ch.is_whitespace());
        let intraword = self.delimiter == '_'
            && self.char_before(at).map_or(false, char::is_alphanumeric);
        followed && !intraword
    }

    fn can_close(&self, at: usize, width: usize) -> bool {
        let preceded = self
            .char_before(at)
            .map_or(false, |ch| !ch.is_whitespace());
        let intraword = self.delimiter == '_'
            && self.char_after(at + width).map_or(false, char::is_alphanumeric);
        preceded && !intraword
    }

    fn explore(
        &mut self,
        index: usize,
        stack: &mut Vec<Open>,
        spans: &mut Vec<Span>,
        literals: usize,
    ) {
        self.steps += 1;
        if self.steps > STEP_BUDGET {
            return;
        }
        if matches!(&self.best, Some((score, _)) if literals >= *score) {
            return;
        }
        // Every open span needs at least one more delimiter to close it
        if stack.len() > self.positions.len() - index {
            return;
        }
        if index == self.positions.len() {
            self.best = Some((literals, spans.clone()));
            return;
        }

        let at = self.positions[index];
        let double = self.positions.get(index + 1) == Some(&(at + 1));

        if double {
            self.try_close(SpanKind::Strong, index, stack, spans, literals);
            self.try_open(SpanKind::Strong, index, stack, spans, literals);
        }
        self.try_close(SpanKind::Emphasis, index, stack, spans, literals);
        self.try_open(SpanKind::Emphasis, index, stack, spans, literals);
        self.explore(index + 1, stack, spans, literals + 1);
    }

    fn try_open(
        &mut self,
        kind: SpanKind,
        index: usize,
        stack: &mut Vec<Open>,
        spans: &mut Vec<Span>,
        literals: usize,
    ) {
        let at = self.positions[index];
        if !self.can_open(at, kind.width()) {
            return;
        }

        stack.push(Open {
            kind,
            start: at,
            outermost: stack.is_empty(),
        });
        self.explore(index + kind.width(), stack, spans, literals);
        stack.pop();
    }

    fn try_close(
        &mut self,
        kind: SpanKind,
        index: usize,
        stack: &mut Vec<Open>,
        spans: &mut Vec<Span>,
        literals: usize,
    ) {
        let at = self.positions[index];
        let Some(&open) = stack.last() else {
            return;
        };
        if open.kind != kind || !self.can_close(at, kind.width()) {
            return;
        }

        // No empty spans: the content needs something besides delimiters
        let content = &self.text[open.start + kind.width()..at];
        if !content.chars().any(|ch| ch != self.delimiter) {
            return;
        }

        stack.pop();
        spans.push(Span {
            kind,
            start: open.start,
            end: at + kind.width(),
            outermost: open.outermost,
        });
        self.explore(index + kind.width(), stack, spans, literals);
        spans.pop();
        stack.push(open);
    }
}

impl InlineParser for Emphasis {
    fn name(&self) -> &str {
        self.name
    }

    fn parse(&self, parser: &Parser, text: &str, state: ParserState<'_>) -> Vec<Child> {
        if !text.contains(self.delimiter) {
            return parser.continue_inlines(text, state);
        }

        let mut outermost: Vec<Span> = pair_delimiters(text, self.delimiter)
            .into_iter()
            .filter(|span| span.outermost)
            .collect();
        outermost.sort_by_key(|span| span.start);
        trace!("{}: {} outermost spans", self.name, outermost.len());

        let mut spans = outermost.into_iter();
        let rewritten = rewrite(text, |_| {
            let span = spans.next()?;
            let width = span.kind.width();
            let inner = &text[span.start + width..span.end - width];
            let children = parser.continue_inlines(inner, state.restart());
            let node = match span.kind {
                SpanKind::Emphasis => Node::Emphasis { children },
                SpanKind::Strong => Node::Strong { children },
            };
            Some((span.start..span.end, state.add_inline(node)))
        });

        parser.continue_inlines(&rewritten, state)
    }
}
