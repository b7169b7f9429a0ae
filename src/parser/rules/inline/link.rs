use crate::ast::{Child, Link, LinkKind, Node};
use crate::parser::context::LINK;
use crate::parser::rules::syntax::link_tail;
use crate::parser::{InlineParser, Parser, ParserState};

use super::{find_bracket_span, rewrite, BracketSpan};

/// `[text](href "title")` and `![alt](href "title")`.
///
/// Inside link text only the image form is recognised.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineLink;

/// Attributes and children of a link or image spanning `span`.
///
/// Attribute text is flattened before the children resolve, since resolving
/// takes the nested nodes out of the state.
pub(crate) fn build_link(
    parser: &Parser,
    text: &str,
    span: &BracketSpan,
    end: usize,
    state: ParserState<'_>,
    mut link: Link,
) -> Node {
    link.source = state.flatten(&text[span.start..end]);
    let inner = span.inner(text);

    if span.image {
        let alt = state.flatten(inner);
        link.children = if alt.is_empty() { Vec::new() } else { vec![Child::Text(alt)] };
        Node::Image(link)
    } else {
        let context = state.context_with(LINK);
        link.children = parser.continue_inlines(inner, state.nested(&context));
        Node::Link(link)
    }
}

impl InlineParser for InlineLink {
    fn name(&self) -> &str {
        "link"
    }

    fn parse(&self, parser: &Parser, text: &str, state: ParserState<'_>) -> Vec<Child> {
        let images_only = state.has_context(LINK);

        let rewritten = rewrite(text, |from| {
            let mut search = from;
            while let Some(span) = find_bracket_span(text, search) {
                search = span.open + 1;
                if images_only && !span.image {
                    continue;
                }

                let Ok((rest, (href, title))) = link_tail(&text[span.close + 1..]) else {
                    continue;
                };
                let end = text.len() - rest.len();

                let link = Link {
                    kind: LinkKind::Inline,
                    href: Some(state.flatten(href)),
                    title: title.map(|title| state.flatten(title)),
                    id: None,
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

#[cfg(test)]
mod tests {
    use super::*;

    fn only_link(children: &[Child]) -> &Link {
        match children {
            [Child::Node(Node::Link(link))] | [Child::Node(Node::Image(link))] => link,
            other => panic!("expected a single link, got {other:?}"),
        }
    }

    #[test]
    fn link_with_title() {
        let parser = Parser::markdown();
        let children = parser.parse_inlines(r#"[home](/ "Home page")"#, &[]);
        let link = only_link(&children);
        assert_eq!(link.kind, LinkKind::Inline);
        assert_eq!(link.href.as_deref(), Some("/"));
        assert_eq!(link.title.as_deref(), Some("Home page"));
        assert_eq!(link.children, vec![Child::from("home")]);
        assert_eq!(link.source, r#"[home](/ "Home page")"#);
    }

    #[test]
    fn nested_brackets_stay_in_the_text() {
        let parser = Parser::markdown();
        let children = parser.parse_inlines("[a[b]c](d)", &[]);
        let link = only_link(&children);
        assert_eq!(link.href.as_deref(), Some("d"));
        assert_eq!(link.children, vec![Child::from("a[b]c")]);
    }

    #[test]
    fn image_inside_link_text() {
        let parser = Parser::markdown();
        let children = parser.parse_inlines("[![logo](l.png)](/)", &[]);
        let link = only_link(&children);
        match link.children.as_slice() {
            [Child::Node(Node::Image(image))] => {
                assert_eq!(image.href.as_deref(), Some("l.png"));
                assert_eq!(image.children, vec![Child::from("logo")]);
            }
            other => panic!("expected image, got {other:?}"),
        }
    }

    #[test]
    fn emphasis_in_link_text() {
        let parser = Parser::markdown();
        let children = parser.parse_inlines("[*a*](b)", &[]);
        let link = only_link(&children);
        assert!(matches!(link.children.as_slice(), [Child::Node(Node::Emphasis { .. })]));
    }

    #[test]
    fn malformed_tail_is_not_a_link() {
        let parser = Parser::markdown();
        let children = parser.parse_inlines("see (x) and [y](a b c", &[]);
        assert!(children.iter().all(|child| !matches!(
            child,
            Child::Node(Node::Link(Link { kind: LinkKind::Inline, .. }))
        )));
    }
}
