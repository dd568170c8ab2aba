#[cfg(test)]
mod rendering_tests {
    use crate::{convert_str, decode, Node, NodeKind, RenderContext, RenderError, WikiRenderer};
    use mockall::mock;
    use std::io;
    use std::sync::{Arc, Mutex};

    mock! {
        pub Sink {}
        impl std::io::Write for Sink {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize>;
            fn flush(&mut self) -> io::Result<()>;
        }
    }

    fn render(root: &Node) -> String {
        WikiRenderer
            .render_to_string(root, &RenderContext::new())
            .unwrap()
    }

    fn document(children: Vec<Node>) -> Node {
        Node::new(NodeKind::Document).with_children(children)
    }

    // Wrap `inner` in `depth` containers of `kind`
    fn nest(kind: NodeKind, depth: usize, inner: Node) -> Node {
        (0..depth).fold(inner, |node, _| Node::new(kind.clone()).with_child(node))
    }

    #[test]
    fn test_flat_document_keeps_initial_context() {
        let root = document(vec![
            Node::new(NodeKind::Title).with_text("One"),
            Node::new(NodeKind::ListItem)
                .with_child(Node::new(NodeKind::Paragraph).with_text("loose item")),
            Node::new(NodeKind::Title).with_text("Two"),
        ]);

        assert_eq!(render(&root), "h1. One\n\n loose item\n\nh1. Two\n\n");
    }

    #[test]
    fn test_heading_depth_tracks_section_nesting() {
        for depth in 0..6 {
            let title = Node::new(NodeKind::Title).with_text("T");
            let root = document(vec![nest(NodeKind::Section, depth, title)]);
            assert_eq!(render(&root), format!("h{}. T\n\n", depth + 1));
        }
    }

    #[test]
    fn test_list_prefix_tracks_list_nesting() {
        for depth in 1..5 {
            let item = Node::new(NodeKind::ListItem)
                .with_child(Node::new(NodeKind::Paragraph).with_text("x"));
            let root = document(vec![nest(NodeKind::BulletList, depth, item)]);
            assert_eq!(render(&root), format!("{} x\n", "*".repeat(depth)));
        }
    }

    #[test]
    fn test_paragraph_separator_depends_on_list_ancestor() {
        let root = document(vec![
            Node::new(NodeKind::Paragraph).with_text("top"),
            Node::new(NodeKind::DefinitionList).with_child(
                Node::new(NodeKind::DefinitionListItem).with_child(
                    Node::new(NodeKind::Definition)
                        .with_child(Node::new(NodeKind::Paragraph).with_text("inside")),
                ),
            ),
            Node::new(NodeKind::Section)
                .with_child(Node::new(NodeKind::Paragraph).with_text("section")),
        ]);

        assert_eq!(render(&root), "top\n\ninside\nsection\n\n");
    }

    // Definition terms render exactly like list items: the prefix, then the term's
    // children. Plain term text has no child to carry it and is not emitted.
    #[test]
    fn test_definition_term_renders_prefix_only() {
        let root = document(vec![Node::new(NodeKind::DefinitionList).with_child(
            Node::new(NodeKind::DefinitionListItem)
                .with_child(Node::new(NodeKind::Term).with_text("Pack"))
                .with_child(
                    Node::new(NodeKind::Definition)
                        .with_child(Node::new(NodeKind::Paragraph).with_text("A unit.")),
                ),
        )]);

        assert_eq!(render(&root), "* A unit.\n");
    }

    #[test]
    fn test_decode_has_no_side_effects() {
        let title = Node::new(NodeKind::Title)
            .with_text("Using ")
            .with_child(Node::new(NodeKind::Literal).with_text("ant").with_tail(" tasks"));
        let context = RenderContext::new();

        let first = decode(&title, &context);
        let second = decode(&title, &context);
        assert_eq!(first, second);
        assert_eq!(first, "Using {{ant}} tasks");
    }

    #[test]
    fn test_reference_inside_list_item_is_written_and_descended() {
        let root = document(vec![Node::new(NodeKind::BulletList).with_child(
            Node::new(NodeKind::ListItem).with_child(
                Node::new(NodeKind::Reference)
                    .with_text("Home")
                    .with_child(Node::new(NodeKind::Strong).with_text("!")),
            ),
        )]);

        assert_eq!(render(&root), "* [Home|]*!*");
    }

    #[test]
    fn test_convert_str_from_docutils_xml() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<document source="install.rst"><title>Installer</title><section ids="usage" names="usage"><title>Usage</title><paragraph>Run <literal>izpack</literal> with a <reference name="descriptor" refuri="install.xml">descriptor</reference>.</paragraph><bullet_list bullet="*"><list_item><paragraph>first</paragraph></list_item><list_item><paragraph>second</paragraph></list_item></bullet_list><literal_block xml:space="preserve">&lt;installation version="1.0"&gt;</literal_block><image uri="shot.png"/></section></document>"#;

        let wiki = convert_str(xml).unwrap();
        assert_eq!(
            wiki,
            "h1. Installer\n\n\
             h2. Usage\n\n\
             Run {{izpack}} with a [descriptor|install.xml].\n\n\
             * first\n\
             * second\n\
             {code}\n<installation version=\"1.0\">\n{code}\n\n\
             {warning:title=Manual attention required: image}\nshot.png\n{warning}\n\n"
        );
    }

    #[test]
    fn test_text_after_targets_and_inline_images_survives() {
        let xml = r#"<document><paragraph>See <reference name="IzPack" refuri="http://izpack.org">IzPack</reference><target ids="izpack" names="izpack" refuri="http://izpack.org"/> for details.</paragraph><paragraph>Logo <image alt="logo" uri="l.png"/> here.<comment xml:space="preserve">todo</comment></paragraph></document>"#;

        let wiki = convert_str(xml).unwrap();
        assert_eq!(
            wiki,
            "See [IzPack|http://izpack.org] for details.\n\n\
             Logo {warning:title=Manual attention required: image}\nl.png\n{warning}\n\n here.\n\n"
        );
    }

    #[test]
    fn test_fragments_are_streamed_until_write_failure() {
        let written = Arc::new(Mutex::new(Vec::new()));
        let sink_written = Arc::clone(&written);
        let mut calls = 0;

        let mut sink = MockSink::new();
        sink.expect_write().returning(move |buf| {
            calls += 1;
            if calls == 1 {
                sink_written.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            } else {
                Err(io::Error::other("disk full"))
            }
        });
        sink.expect_flush().never();

        let root = document(vec![
            Node::new(NodeKind::Title).with_text("A"),
            Node::new(NodeKind::Title).with_text("B"),
            Node::new(NodeKind::Title).with_text("C"),
        ]);

        let result = WikiRenderer.render(&root, &RenderContext::new(), &mut sink);

        assert!(matches!(result, Err(RenderError::Write(_))));
        assert_eq!(written.lock().unwrap().as_slice(), b"h1. A\n\n");
    }

    #[test]
    fn test_successful_render_flushes_once() {
        let mut sink = MockSink::new();
        sink.expect_write().returning(|buf| Ok(buf.len()));
        sink.expect_flush().times(1).returning(|| Ok(()));

        let root = document(vec![Node::new(NodeKind::Paragraph).with_text("done")]);
        WikiRenderer
            .render(&root, &RenderContext::new(), &mut sink)
            .unwrap();
    }
}
