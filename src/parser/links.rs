use std::collections::HashMap;

use log::debug;

use crate::ast::{LinkDefinition, LinkKind, MutVisitor, Node, Visitable, Visitor};

/// Resolves reference links and images against the definitions in `ast`.
///
/// The first pass collects every link definition by id (a later definition
/// of the same id replaces an earlier one). The second copies the matching
/// definition's target onto each reference; references without a definition
/// keep [`LinkKind::Ref`] and no `href`.
pub fn resolve_links(ast: &mut [Node]) {
    let mut collector = DefinitionCollector::default();
    ast.accept(&mut collector);

    if collector.definitions.is_empty() {
        return;
    }

    let mut resolver = ReferenceResolver {
        definitions: collector.definitions,
        resolved: 0,
        unresolved: 0,
    };
    ast.accept_mut(&mut resolver);

    debug!(
        "resolved {} reference links, {} left without a definition",
        resolver.resolved, resolver.unresolved
    );
}

#[derive(Default)]
struct DefinitionCollector {
    definitions: HashMap<String, LinkDefinition>,
}

impl Visitor for DefinitionCollector {
    fn visit_node(&mut self, node: &Node) {
        if let Node::LinkDefinition(definition) = node {
            self.definitions
                .insert(definition.id.clone(), definition.clone());
        }
    }
}

struct ReferenceResolver {
    definitions: HashMap<String, LinkDefinition>,
    resolved: usize,
    unresolved: usize,
}

impl MutVisitor for ReferenceResolver {
    fn visit_node(&mut self, node: &mut Node) {
        let link = match node {
            Node::Link(link) | Node::Image(link) if link.kind == LinkKind::Ref => link,
            _ => return,
        };

        let Some(definition) = link.id.as_ref().and_then(|id| self.definitions.get(id)) else {
            self.unresolved += 1;
            return;
        };

        link.href = Some(definition.href.clone());
        link.title = definition.title.clone();
        link.kind = LinkKind::Defined;
        link.source = definition.source.clone();
        self.resolved += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Child, Link};

    fn reference(id: &str) -> Node {
        Node::Link(Link {
            kind: LinkKind::Ref,
            href: None,
            title: None,
            id: Some(id.to_string()),
            source: format!("[{id}]"),
            children: vec![Child::from(id)],
        })
    }

    fn definition(id: &str, href: &str) -> Node {
        Node::LinkDefinition(LinkDefinition {
            id: id.to_string(),
            href: href.to_string(),
            title: None,
            source: format!("[{id}]: {href}"),
        })
    }

    #[test]
    fn copies_target_from_nested_definition() {
        let mut ast = vec![
            Node::Paragraph {
                children: vec![Child::Node(reference("a"))],
            },
            Node::BlockQuote {
                children: vec![Child::Node(definition("a", "/a"))],
            },
        ];
        resolve_links(&mut ast);

        let Node::Paragraph { children } = &ast[0] else {
            panic!("expected paragraph");
        };
        match children[0].as_node() {
            Some(Node::Link(link)) => {
                assert_eq!(link.kind, LinkKind::Defined);
                assert_eq!(link.href.as_deref(), Some("/a"));
                assert_eq!(link.source, "[a]: /a");
            }
            other => panic!("expected link, got {other:?}"),
        }
    }

    #[test]
    fn ids_match_exactly() {
        let mut ast = vec![reference("A"), definition("a", "/a")];
        resolve_links(&mut ast);
        assert_eq!(ast[0], reference("A"));
    }

    #[test]
    fn later_definition_wins() {
        let mut ast = vec![reference("x"), definition("x", "/1"), definition("x", "/2")];
        resolve_links(&mut ast);
        match &ast[0] {
            Node::Link(link) => assert_eq!(link.href.as_deref(), Some("/2")),
            other => panic!("expected link, got {other:?}"),
        }
    }
}
