use crate::ast::{Child, Node};
use crate::lexer::{to_literal, unescape};
use std::cell::RefCell;

/// Opens a placeholder inside in-flight inline text.
pub const PLACEHOLDER_OPEN: char = '\u{F000}';
/// Closes a placeholder inside in-flight inline text.
pub const PLACEHOLDER_CLOSE: char = '\u{F001}';

/// Per-call state of the inline pipeline.
///
/// The state is copied into every recursive call. All copies stemming from
/// one `Parser::parse_inlines` entry share the same append-only node
/// collection, so a placeholder added by any stage resolves in any later one.
#[derive(Debug, Clone, Copy)]
pub struct ParserState<'a> {
    pipeline_index: usize,
    collected: &'a RefCell<Vec<Option<Node>>>,
    context: &'a [String],
}

impl<'a> ParserState<'a> {
    pub(crate) fn new(collected: &'a RefCell<Vec<Option<Node>>>, context: &'a [String]) -> Self {
        Self {
            pipeline_index: 0,
            collected,
            context,
        }
    }

    /// Index of the next pipeline stage to run.
    pub fn pipeline_index(&self) -> usize {
        self.pipeline_index
    }

    pub fn context(&self) -> &'a [String] {
        self.context
    }

    pub fn has_context(&self, tag: &str) -> bool {
        super::context::contains(self.context, tag)
    }

    /// The state for the following stage.
    pub fn advance(self) -> Self {
        Self {
            pipeline_index: self.pipeline_index + 1,
            ..self
        }
    }

    /// A state that runs the whole pipeline again, for the content of a
    /// node a stage has just recognised.
    pub fn restart(self) -> Self {
        Self {
            pipeline_index: 0,
            ..self
        }
    }

    /// Like [`ParserState::restart`], under a different context stack.
    pub fn nested<'b>(&self, context: &'b [String]) -> ParserState<'b>
    where
        'a: 'b,
    {
        ParserState {
            pipeline_index: 0,
            collected: self.collected,
            context,
        }
    }

    /// The current context extended with `tag`, for use with [`ParserState::nested`].
    pub fn context_with(&self, tag: &str) -> Vec<String> {
        let mut context = self.context.to_vec();
        context.push(tag.to_string());
        context
    }

    /// Stores `node` and returns the placeholder standing for it.
    ///
    /// No grammar rule matches the placeholder's delimiters, so the
    /// placeholder can be spliced into text that later stages still scan.
    pub fn add_inline(&self, node: Node) -> String {
        let mut collected = self.collected.borrow_mut();
        let index = collected.len();
        collected.push(Some(node));
        format!("{PLACEHOLDER_OPEN}{index}{PLACEHOLDER_CLOSE}")
    }

    /// Plain text of `text` with placeholders flattened to their nodes' text,
    /// for attributes that must not carry placeholders.
    pub fn flatten(&self, text: &str) -> String {
        self.flatten_with(text, to_literal)
    }

    /// Like [`ParserState::flatten`], but escapes keep their backslash, for
    /// verbatim content such as code spans.
    pub fn verbatim(&self, text: &str) -> String {
        self.flatten_with(text, unescape)
    }

    fn flatten_with(&self, text: &str, convert: fn(&str) -> String) -> String {
        let collected = self.collected.borrow();
        let mut out = String::with_capacity(text.len());
        for segment in segments(text) {
            match segment {
                Segment::Text(text) => out.push_str(&convert(text)),
                Segment::Placeholder(index, raw) => {
                    match collected.get(index).and_then(Option::as_ref) {
                        Some(node) => out.push_str(&node.text_content()),
                        None => out.push_str(raw),
                    }
                }
            }
        }
        out
    }

    /// Turns the finished text into children: escapes become literal
    /// characters and every placeholder is replaced by its node.
    pub(crate) fn resolve(&self, text: &str) -> Vec<Child> {
        let mut collected = self.collected.borrow_mut();
        let mut children = Vec::new();

        for segment in segments(text) {
            match segment {
                Segment::Text(text) => push_text(&mut children, &to_literal(text)),
                Segment::Placeholder(index, raw) => {
                    match collected.get_mut(index).and_then(Option::take) {
                        Some(node) => children.push(Child::Node(node)),
                        None => {
                            debug_assert!(false, "placeholder {index} resolved twice");
                            push_text(&mut children, raw);
                        }
                    }
                }
            }
        }

        children
    }
}

/// Appends text to `children`, merging with a trailing text leaf.
pub(crate) fn push_text(children: &mut Vec<Child>, text: &str) {
    if text.is_empty() {
        return;
    }
    match children.last_mut() {
        Some(Child::Text(last)) => last.push_str(text),
        _ => children.push(Child::Text(text.to_string())),
    }
}

enum Segment<'t> {
    Text(&'t str),
    Placeholder(usize, &'t str),
}

fn segments(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find(PLACEHOLDER_OPEN) {
        let after_open = open + PLACEHOLDER_OPEN.len_utf8();
        let parsed = rest[after_open..].find(PLACEHOLDER_CLOSE).and_then(|len| {
            let digits = &rest[after_open..after_open + len];
            digits.parse::<usize>().ok().map(|index| (index, len))
        });

        match parsed {
            Some((index, len)) => {
                let end = after_open + len + PLACEHOLDER_CLOSE.len_utf8();
                if open > 0 {
                    segments.push(Segment::Text(&rest[..open]));
                }
                segments.push(Segment::Placeholder(index, &rest[open..end]));
                rest = &rest[end..];
            }
            None => {
                segments.push(Segment::Text(&rest[..after_open]));
                rest = &rest[after_open..];
            }
        }
    }

    if !rest.is_empty() {
        segments.push(Segment::Text(rest));
    }
    segments
}
