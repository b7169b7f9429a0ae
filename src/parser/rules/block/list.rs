use crate::ast::{Child, ListItem, ListKind, Node};
use crate::lexer::{Line, TokenStream};
use crate::parser::context::LIST;
use crate::parser::rules::patterns::{
    starts_other_block, strip_indent, HORIZONTAL_RULE, LIST_MARKER,
};
use crate::parser::{BlockParser, Parser};

/// Ordered or unordered list.
///
/// The first marker's indent `l` fixes the list level: a marker at exactly
/// `l` spaces starts a sibling item, a line indented by more than `l`
/// spaces (or a tab) stays inside the current item. An item ends at a
/// sibling marker, or at a blank line not followed by an indented line.
/// Item content is parsed by a `list` sub-parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct List;

/// A marker line, as seen at the list's level.
struct Marker {
    indent: usize,
    ordered: bool,
    number: Option<u64>,
    /// Column where item content starts
    content_offset: usize,
    content: String,
}

impl Marker {
    fn read(line: Line<'_>) -> Option<Self> {
        let text = line.text()?;
        if HORIZONTAL_RULE.is_match(text) {
            return None;
        }

        let caps = LIST_MARKER.captures(text)?;
        let indent = caps.get(1).map_or(0, |m| m.as_str().len());
        let marker = caps.get(2)?.as_str();
        let spacing = caps.get(3).map_or(1, |m| m.as_str().len());

        Some(Self {
            indent,
            ordered: marker.ends_with('.'),
            number: marker.strip_suffix('.').and_then(|digits| digits.parse().ok()),
            content_offset: indent + marker.len() + spacing,
            content: caps.get(4).map_or("", |m| m.as_str()).to_string(),
        })
    }

    fn continues(&self, other: &Marker) -> bool {
        other.indent == self.indent && other.ordered == self.ordered
    }
}

struct ItemLines {
    lines: Vec<String>,
    contains_empty: bool,
    followed_by_empty: bool,
}

/// Why an item stopped collecting lines.
enum ItemEnd {
    /// A sibling item of the same list follows
    Sibling,
    /// The list is over
    ListEnd,
}

impl List {
    /// A line that stays inside an item at level `indent`.
    fn is_inside(line: Line<'_>, indent: usize) -> bool {
        line.text()
            .map_or(false, |text| text.starts_with('\t') || line.indent() > indent)
    }

    fn is_sibling(first: &Marker, line: Line<'_>) -> Option<bool> {
        Marker::read(line)
            .filter(|marker| marker.indent == first.indent)
            .map(|marker| first.continues(&marker))
    }

    /// Collects the lines of the item whose marker is on the current line.
    fn collect_item(
        first: &Marker,
        marker: &Marker,
        stream: &mut TokenStream,
    ) -> (ItemLines, ItemEnd) {
        let mut item = ItemLines {
            lines: vec![marker.content.clone()],
            contains_empty: false,
            followed_by_empty: false,
        };
        stream.consume(0);

        loop {
            let line = stream.peek(0);
            let Some(text) = line.text() else {
                return (item, ItemEnd::ListEnd);
            };

            if line.is_empty() {
                let mut blanks = 1;
                while !stream.peek(blanks).is_eos() && stream.peek(blanks).is_empty() {
                    blanks += 1;
                }
                let after = stream.peek(blanks);

                if Self::is_inside(after, first.indent) {
                    item.contains_empty = true;
                    for _ in stream.consume(blanks as usize - 1) {
                        item.lines.push(String::new());
                    }
                    continue;
                }

                if Self::is_sibling(first, after) == Some(true) {
                    item.followed_by_empty = true;
                    stream.consume(blanks as usize - 1);
                    return (item, ItemEnd::Sibling);
                }

                return (item, ItemEnd::ListEnd);
            }

            match Self::is_sibling(first, line) {
                Some(true) => return (item, ItemEnd::Sibling),
                Some(false) => return (item, ItemEnd::ListEnd),
                None => {}
            }

            if Self::is_inside(line, first.indent) {
                item.lines.push(strip_indent(text, marker.content_offset).to_string());
                stream.consume(0);
                continue;
            }

            // Lazy continuation of the item's last paragraph
            if starts_other_block(text) {
                return (item, ItemEnd::ListEnd);
            }
            item.lines.push(text.trim_start().to_string());
            stream.consume(0);
        }
    }
}

/// Applies looseness and unwraps the leading paragraph of tight items.
fn finish_items(collected: Vec<(ItemLines, Vec<Node>)>) -> Vec<ListItem> {
    let mut previous_followed_by_empty = false;

    collected
        .into_iter()
        .map(|(lines, blocks)| {
            let loose =
                lines.contains_empty || lines.followed_by_empty || previous_followed_by_empty;
            previous_followed_by_empty = lines.followed_by_empty;

            let mut children: Vec<Child> = Vec::with_capacity(blocks.len());
            let mut blocks = blocks.into_iter();
            match blocks.next() {
                Some(Node::Paragraph { children: inline }) if !loose => children.extend(inline),
                Some(first) => children.push(Child::Node(first)),
                None => {}
            }
            children.extend(blocks.map(Child::Node));

            ListItem {
                loose,
                contains_empty: lines.contains_empty,
                followed_by_empty: lines.followed_by_empty,
                children,
            }
        })
        .collect()
}

impl BlockParser for List {
    fn name(&self) -> &str {
        "list"
    }

    fn parse(&self, parser: &Parser, stream: &mut TokenStream, ast: &mut Vec<Node>) -> bool {
        let Some(first) = Marker::read(stream.peek(0)) else {
            return false;
        };
        let kind = match first.number {
            Some(start) if first.ordered => ListKind::Ordered { start },
            _ if first.ordered => ListKind::Ordered { start: 1 },
            _ => ListKind::Unordered,
        };
        let subparser = parser.subparser(Some(LIST));
        let mut collected = Vec::new();

        while let Some(marker) = Marker::read(stream.peek(0)) {
            let (lines, end) = Self::collect_item(&first, &marker, stream);
            let blocks = subparser.parse(&lines.lines.join("\n"));
            collected.push((lines, blocks));

            if matches!(end, ItemEnd::ListEnd) {
                break;
            }
        }

        ast.push(Node::List {
            kind,
            items: finish_items(collected),
        });
        true
    }
}
