use markast::lexer::ESCAPE_MARKER;
use markast::parser::{PLACEHOLDER_CLOSE, PLACEHOLDER_OPEN};
use markast::{parse, Child, LinkKind, Node, Visitable, Visitor};
use proptest::prelude::*;

/// Collects every text leaf and every reference id in the tree.
#[derive(Default)]
struct Audit {
    texts: Vec<String>,
    reference_ids: Vec<String>,
    definition_ids: Vec<String>,
}

impl Visitor for Audit {
    fn visit_node(&mut self, node: &Node) {
        match node {
            Node::Link(link) | Node::Image(link) if link.kind == LinkKind::Ref => {
                self.reference_ids.extend(link.id.clone());
            }
            Node::LinkDefinition(definition) => self.definition_ids.push(definition.id.clone()),
            Node::Literal { value } | Node::Html { value } => self.texts.push(value.clone()),
            _ => {}
        }
    }

    fn visit_text(&mut self, text: &str) {
        self.texts.push(text.to_string());
    }
}

fn audit(input: &str) -> Audit {
    let mut audit = Audit::default();
    parse(input).accept(&mut audit);
    audit
}

/// Markdown-ish input built from the syntax the grammar reacts to.
fn markdown_input() -> impl Strategy<Value = String> {
    let piece = prop_oneof![
        Just("*".to_string()),
        Just("**".to_string()),
        Just("_".to_string()),
        Just("`".to_string()),
        Just("[".to_string()),
        Just("]".to_string()),
        Just("(".to_string()),
        Just(")".to_string()),
        Just("\\".to_string()),
        Just("<".to_string()),
        Just(">".to_string()),
        Just("!".to_string()),
        Just("- ".to_string()),
        Just("# ".to_string()),
        Just("\n".to_string()),
        Just("\n\n".to_string()),
        Just("  ".to_string()),
        Just("[a]: /u".to_string()),
        "[a-z]{1,4}",
    ];
    prop::collection::vec(piece, 0..40).prop_map(|pieces| pieces.concat())
}

proptest! {
    #[test]
    fn no_placeholder_or_escape_residue(input in markdown_input()) {
        for text in audit(&input).texts {
            prop_assert!(!text.contains(PLACEHOLDER_OPEN), "placeholder in {:?}", text);
            prop_assert!(!text.contains(PLACEHOLDER_CLOSE), "placeholder in {:?}", text);
            prop_assert!(!text.contains(ESCAPE_MARKER), "escape marker in {:?}", text);
        }
    }

    #[test]
    fn references_left_unresolved_have_no_definition(input in markdown_input()) {
        let audit = audit(&input);
        for id in &audit.reference_ids {
            prop_assert!(!audit.definition_ids.contains(id), "[{}] has a definition", id);
        }
    }

    #[test]
    fn paragraph_text_keeps_plain_words(words in prop::collection::vec("[a-z]{1,8}", 1..10)) {
        let input = words.join(" ");
        let ast = parse(&input);
        prop_assert_eq!(ast, vec![Node::Paragraph { children: vec![Child::Text(input.clone())] }]);
    }
}
