use lazy_static::lazy_static;
use regex::Regex;

use crate::ast::{Child, Link, LinkKind, Node};
use crate::parser::context::{self, LINK};
use crate::parser::{InlineParser, Parser, ParserState};

use super::rewrite;

lazy_static! {
    static ref AUTOLINK: Regex = Regex::new(
        r"<(?:(?P<url>[A-Za-z][A-Za-z0-9+.-]{1,31}:[^<>\s]+)|(?P<email>[^<>\s@:]+@[^<>\s@]+))>"
    )
    .expect("autolink pattern");
}

/// `<scheme:address>` and `<local@domain>`, kept verbatim as the link text.
///
/// Email addresses get a `mailto:` href.
#[derive(Debug, Clone, Copy, Default)]
pub struct Autolink;

impl InlineParser for Autolink {
    fn name(&self) -> &str {
        "autolink"
    }

    fn parse(&self, parser: &Parser, text: &str, state: ParserState<'_>) -> Vec<Child> {
        let rewritten = rewrite(text, |from| {
            let caps = AUTOLINK.captures_at(text, from)?;
            let whole = caps.get(0)?;

            let (href, label) = match (caps.name("url"), caps.name("email")) {
                (Some(url), _) => {
                    let url = state.flatten(url.as_str());
                    (url.clone(), url)
                }
                (None, Some(email)) => {
                    let email = state.flatten(email.as_str());
                    (format!("mailto:{email}"), email)
                }
                (None, None) => return None,
            };

            let node = Node::Link(Link {
                kind: LinkKind::Inline,
                href: Some(href),
                title: None,
                id: None,
                source: state.flatten(whole.as_str()),
                children: vec![Child::Text(label)],
            });
            Some((whole.range(), state.add_inline(node)))
        });

        parser.continue_inlines(&rewritten, state)
    }

    fn exclude_from_subparse(&self, context: &[String]) -> bool {
        context::contains(context, LINK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn href_and_label(children: &[Child]) -> (Option<&str>, &[Child]) {
        match children {
            [Child::Node(Node::Link(link))] => (link.href.as_deref(), &link.children),
            other => panic!("expected link, got {other:?}"),
        }
    }

    #[test]
    fn url_is_linked_verbatim() {
        let parser = Parser::markdown();
        let children = parser.parse_inlines("<https://example.com/a_b_c>", &[]);
        let (href, label) = href_and_label(&children);
        assert_eq!(href, Some("https://example.com/a_b_c"));
        assert_eq!(label, [Child::from("https://example.com/a_b_c")]);
    }

    #[test]
    fn email_gets_mailto() {
        let parser = Parser::markdown();
        let children = parser.parse_inlines("<me@example.org>", &[]);
        let (href, label) = href_and_label(&children);
        assert_eq!(href, Some("mailto:me@example.org"));
        assert_eq!(label, [Child::from("me@example.org")]);
    }

    #[test]
    fn html_tags_are_left_alone() {
        let parser = Parser::markdown();
        assert_eq!(
            parser.parse_inlines("a <span> b", &[]),
            vec![Child::from("a <span> b")]
        );
    }
}
