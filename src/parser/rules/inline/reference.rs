use crate::ast::{Child, Link, LinkKind};
use crate::parser::context::LINK;
use crate::parser::{InlineParser, Parser, ParserState};

use super::link::build_link;
use super::{find_bracket_span, rewrite};

/// `[text][id]`, `[text][]` and `[text]`, plus their image forms.
///
/// Produces [`LinkKind::Ref`] links; `resolve_links` fills in the target
/// once the whole document is parsed. An empty id reuses the text.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceLink;

/// The `[id]` following a reference's text: its content and end offset.
fn explicit_id(text: &str, after: usize) -> Option<(&str, usize)> {
    let rest = &text[after..];
    let spaces = rest.len() - rest.trim_start_matches(|ch: char| ch == ' ' || ch == '\t').len();
    let rest = rest[spaces..].strip_prefix('[')?;
    let close = rest.find(|ch: char| ch == ']' || ch == '[')?;
    if !rest[close..].starts_with(']') {
        return None;
    }
    Some((&rest[..close], after + spaces + close + 2))
}

impl InlineParser for ReferenceLink {
    fn name(&self) -> &str {
        "reference_link"
    }

    fn parse(&self, parser: &Parser, text: &str, state: ParserState<'_>) -> Vec<Child> {
        let images_only = state.has_context(LINK);

        let rewritten = rewrite(text, |from| {
            let mut search = from;
            while let Some(span) = find_bracket_span(text, search) {
                search = span.open + 1;
                let inner = span.inner(text);
                if (images_only && !span.image) || inner.trim().is_empty() {
                    continue;
                }

                let (id, end) = match explicit_id(text, span.close + 1) {
                    Some((id, end)) if !id.trim().is_empty() => (id, end),
                    Some((_, end)) => (inner, end),
                    None => (inner, span.close + 1),
                };

                let link = Link {
                    kind: LinkKind::Ref,
                    href: None,
                    title: None,
                    id: Some(state.flatten(id)),
                    source: String::new(),
                    children: Vec::new(),
                };
                let node = build_link(parser, text, &span, end, state, link);
                return Some((span.start..end, state.add_inline(node)));
            }
            None
        });

        parser.continue_inlines(&rewritten, state)
    }
}
