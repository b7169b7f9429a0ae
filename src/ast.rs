//! Abstract syntax tree produced by the parser.
//!
//! The tree is an ordered sequence of [`Node`]s. Composite nodes hold their
//! content as [`Child`] values, which are either nested nodes or plain text
//! leaves. Once a top-level parse returns, no child contains placeholder
//! markers and every reference link has been through link resolution.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One entry in a composite node's children.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Child {
    /// A nested AST node
    Node(Node),
    /// A plain text leaf
    Text(String),
}

impl Child {
    /// Returns the text of a text leaf.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Child::Text(text) => Some(text),
            Child::Node(_) => None,
        }
    }

    /// Returns the node of a node child.
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Child::Node(node) => Some(node),
            Child::Text(_) => None,
        }
    }
}

impl From<Node> for Child {
    fn from(node: Node) -> Self {
        Child::Node(node)
    }
}

impl From<String> for Child {
    fn from(text: String) -> Self {
        Child::Text(text)
    }
}

impl From<&str> for Child {
    fn from(text: &str) -> Self {
        Child::Text(text.to_string())
    }
}

/// Ordered or unordered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ListKind {
    /// `*`, `+` or `-` markers
    Unordered,
    /// `N.` markers, starting at the first item's number
    Ordered { start: u64 },
}

impl ListKind {
    pub fn is_ordered(&self) -> bool {
        matches!(self, ListKind::Ordered { .. })
    }
}

/// A single list item.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ListItem {
    /// Item content is block-level (paragraph wrapped) rather than inline
    pub loose: bool,
    /// The item contains an internal blank line
    pub contains_empty: bool,
    /// The item is followed by a blank line before the next item
    pub followed_by_empty: bool,
    pub children: Vec<Child>,
}

/// How a link or image got its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LinkKind {
    /// `[text](href "title")`, or an autolink
    Inline,
    /// `[text][id]` or `[text]`, waiting for (or missing) a definition
    Ref,
    /// A reference whose target was copied from a matching definition
    Defined,
}

/// Shared payload of link and image nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Link {
    pub kind: LinkKind,
    pub href: Option<String>,
    pub title: Option<String>,
    /// Reference id for [`LinkKind::Ref`] and [`LinkKind::Defined`] links
    pub id: Option<String>,
    /// Raw markdown span the node was built from
    pub source: String,
    /// Display text for links, alt text for images
    pub children: Vec<Child>,
}

impl Link {
    /// Returns true while the link still waits for a definition.
    pub fn is_unresolved(&self) -> bool {
        self.kind == LinkKind::Ref
    }
}

/// `[id]: href "title"`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinkDefinition {
    pub id: String,
    pub href: String,
    pub title: Option<String>,
    pub source: String,
}

/// AST node, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum Node {
    Paragraph {
        children: Vec<Child>,
    },
    /// ATX or setext heading, level 1-6
    Heading {
        level: u8,
        children: Vec<Child>,
    },
    List {
        kind: ListKind,
        items: Vec<ListItem>,
    },
    #[cfg_attr(feature = "serde", serde(rename = "blockquote"))]
    BlockQuote {
        children: Vec<Child>,
    },
    /// Code block or code span. `source` is the fence's language tag.
    Code {
        inline: bool,
        source: Option<String>,
        children: Vec<Child>,
    },
    /// Raw HTML block or comment, kept verbatim
    Html {
        value: String,
    },
    Link(Link),
    Image(Link),
    LinkDefinition(LinkDefinition),
    Emphasis {
        children: Vec<Child>,
    },
    Strong {
        children: Vec<Child>,
    },
    LineBreak,
    /// Horizontal rule
    Hr,
    /// Verbatim text that must not be interpreted further
    Literal {
        value: String,
    },
}

impl Node {
    /// Type tag of the node, as used by renderers.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Paragraph { .. } => "paragraph",
            Node::Heading { .. } => "heading",
            Node::List { .. } => "list",
            Node::BlockQuote { .. } => "blockquote",
            Node::Code { .. } => "code",
            Node::Html { .. } => "html",
            Node::Link(_) => "link",
            Node::Image(_) => "image",
            Node::LinkDefinition(_) => "link_definition",
            Node::Emphasis { .. } => "emphasis",
            Node::Strong { .. } => "strong",
            Node::LineBreak => "line_break",
            Node::Hr => "hr",
            Node::Literal { .. } => "literal",
        }
    }

    /// Children of composite nodes. Lists expose theirs through `items`.
    pub fn children(&self) -> Option<&[Child]> {
        match self {
            Node::Paragraph { children }
            | Node::Heading { children, .. }
            | Node::BlockQuote { children }
            | Node::Code { children, .. }
            | Node::Emphasis { children }
            | Node::Strong { children } => Some(children),
            Node::Link(link) | Node::Image(link) => Some(&link.children),
            _ => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Child>> {
        match self {
            Node::Paragraph { children }
            | Node::Heading { children, .. }
            | Node::BlockQuote { children }
            | Node::Code { children, .. }
            | Node::Emphasis { children }
            | Node::Strong { children } => Some(children),
            Node::Link(link) | Node::Image(link) => Some(&mut link.children),
            _ => None,
        }
    }

    /// Concatenated text of every descendant leaf.
    pub fn text_content(&self) -> String {
        let mut collector = TextCollector::default();
        self.accept(&mut collector);
        collector.text
    }
}

/// Visitor for immutable pre-order traversal.
pub trait Visitor {
    fn visit_node(&mut self, node: &Node);

    fn visit_text(&mut self, text: &str) {
        let _ = text;
    }
}

/// Visitor for pre-order traversal that may modify nodes in place.
///
/// A node is visited before its children, so children replaced by
/// `visit_node` are the ones traversed next.
pub trait MutVisitor {
    fn visit_node(&mut self, node: &mut Node);
}

/// Trait for visitor pattern support
pub trait Visitable {
    fn accept<V: Visitor>(&self, visitor: &mut V);
    fn accept_mut<V: MutVisitor>(&mut self, visitor: &mut V);
}

impl Visitable for Node {
    fn accept<V: Visitor>(&self, visitor: &mut V) {
        visitor.visit_node(self);
        match self {
            Node::List { items, .. } => {
                for item in items {
                    item.children.accept(visitor);
                }
            }
            other => {
                if let Some(children) = other.children() {
                    children.accept(visitor);
                }
            }
        }
    }

    fn accept_mut<V: MutVisitor>(&mut self, visitor: &mut V) {
        visitor.visit_node(self);
        match self {
            Node::List { items, .. } => {
                for item in items {
                    item.children.accept_mut(visitor);
                }
            }
            other => {
                if let Some(children) = other.children_mut() {
                    children.accept_mut(visitor);
                }
            }
        }
    }
}

impl Visitable for Child {
    fn accept<V: Visitor>(&self, visitor: &mut V) {
        match self {
            Child::Node(node) => node.accept(visitor),
            Child::Text(text) => visitor.visit_text(text),
        }
    }

    fn accept_mut<V: MutVisitor>(&mut self, visitor: &mut V) {
        if let Child::Node(node) = self {
            node.accept_mut(visitor);
        }
    }
}

impl<T: Visitable> Visitable for [T] {
    fn accept<V: Visitor>(&self, visitor: &mut V) {
        for entry in self {
            entry.accept(visitor);
        }
    }

    fn accept_mut<V: MutVisitor>(&mut self, visitor: &mut V) {
        for entry in self {
            entry.accept_mut(visitor);
        }
    }
}

impl<T: Visitable> Visitable for Vec<T> {
    fn accept<V: Visitor>(&self, visitor: &mut V) {
        self.as_slice().accept(visitor);
    }

    fn accept_mut<V: MutVisitor>(&mut self, visitor: &mut V) {
        self.as_mut_slice().accept_mut(visitor);
    }
}

#[derive(Default)]
struct TextCollector {
    text: String,
}

impl Visitor for TextCollector {
    fn visit_node(&mut self, node: &Node) {
        if let Node::Literal { value } = node {
            self.text.push_str(value);
        }
    }

    fn visit_text(&mut self, text: &str) {
        self.text.push_str(text);
    }
}
