use markast::{parse, Child, LinkKind, ListKind, Node, Parser, ParserBuilder};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn paragraph_children(node: &Node) -> &[Child] {
    match node {
        Node::Paragraph { children } => children,
        other => panic!("expected paragraph, got {other:?}"),
    }
}

#[test]
fn heading_then_paragraph() {
    init_logger();
    assert_eq!(
        parse("# H\n\nText"),
        vec![
            Node::Heading {
                level: 1,
                children: vec![Child::from("H")],
            },
            Node::Paragraph {
                children: vec![Child::from("Text")],
            },
        ]
    );
}

#[test]
fn reference_link_end_to_end() {
    init_logger();
    let ast = parse("[x][1]\n\n[1]: http://e.com \"T\"");
    match paragraph_children(&ast[0]) {
        [Child::Node(Node::Link(link))] => {
            assert_eq!(link.href.as_deref(), Some("http://e.com"));
            assert_eq!(link.title.as_deref(), Some("T"));
            assert_eq!(link.kind, LinkKind::Defined);
            assert_eq!(link.children, vec![Child::from("x")]);
        }
        other => panic!("expected one link, got {other:?}"),
    }
}

#[test]
fn reference_images_resolve_too() {
    init_logger();
    let ast = parse("![logo][l]\n\n[l]: /logo.png 'Logo'");
    match paragraph_children(&ast[0]) {
        [Child::Node(Node::Image(image))] => {
            assert_eq!(image.href.as_deref(), Some("/logo.png"));
            assert_eq!(image.title.as_deref(), Some("Logo"));
        }
        other => panic!("expected one image, got {other:?}"),
    }
}

#[test]
fn fenced_code_language() {
    init_logger();
    let ast = parse("~~~python\nprint(\"*hi*\")\n~~~");
    match &ast[..] {
        [Node::Code {
            inline: false,
            source,
            children,
        }] => {
            assert_eq!(source.as_deref(), Some("python"));
            assert_eq!(
                children,
                &vec![Child::Node(Node::Literal {
                    value: "print(\"*hi*\")".to_string(),
                })]
            );
        }
        other => panic!("expected code block, got {other:?}"),
    }
}

#[test]
fn nested_list_document() {
    init_logger();
    let ast = parse("1. first\n   - a\n   - b\n2. second\n\nafter");
    assert_eq!(ast.len(), 2);

    let Node::List { kind, items } = &ast[0] else {
        panic!("expected list, got {:?}", ast[0]);
    };
    assert_eq!(*kind, ListKind::Ordered { start: 1 });
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].children[0], Child::from("first"));
    match &items[0].children[1] {
        Child::Node(Node::List { kind, items }) => {
            assert_eq!(*kind, ListKind::Unordered);
            assert_eq!(items.len(), 2);
        }
        other => panic!("expected nested list, got {other:?}"),
    }
    assert!(matches!(ast[1], Node::Paragraph { .. }));
}

#[test]
fn quote_holding_list_paragraph_and_code() {
    init_logger();
    let ast = parse("> - item\n>\n> text\n>\n>     code");
    let Node::BlockQuote { children } = &ast[0] else {
        panic!("expected blockquote, got {:?}", ast[0]);
    };
    let kinds: Vec<&str> = children
        .iter()
        .filter_map(Child::as_node)
        .map(Node::kind_name)
        .collect();
    assert_eq!(kinds, vec!["list", "paragraph", "code"]);
}

#[test]
fn mixed_inline_content() {
    init_logger();
    let ast = parse("Visit <https://a.b>, mail <x@y.z> and read **[docs](/d)**  \nnow");
    let children = paragraph_children(&ast[0]);
    let kinds: Vec<&str> = children
        .iter()
        .filter_map(Child::as_node)
        .map(Node::kind_name)
        .collect();
    assert_eq!(kinds, vec!["link", "link", "strong", "line_break"]);
    assert_eq!(children.last(), Some(&Child::from("now")));
}

#[test]
fn custom_preset_through_the_builder() {
    init_logger();
    let base: Parser = ParserBuilder::markdown()
        .without_block("html_block")
        .without_block("html_comment")
        .build()
        .expect("valid preset");
    let ast = markast::parse_with(&base, "<div>\nx\n</div>");
    assert_eq!(ast.len(), 1);
    assert!(matches!(ast[0], Node::Paragraph { .. }));
}

#[cfg(feature = "serde")]
#[test]
fn ast_serializes_with_type_tags() {
    let ast = parse("> *a*");
    let json = serde_json::to_value(&ast).expect("serializable");
    assert_eq!(json[0]["type"], "blockquote");
}
