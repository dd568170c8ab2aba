use quick_xml::escape::{resolve_predefined_entity, unescape};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use crate::error::ParseError;
use crate::parser::types::*;

/// Parse docutils XML (as written by `rst2xml`) into a [`Node`] tree.
///
/// Character data before an element's first child becomes its `text`; character data
/// after a child's end tag becomes that child's `tail`.
pub fn parse_document(xml: &str) -> Result<Node, ParseError> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Node> = Vec::new();
    let mut root: Option<Node> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                stack.push(start_node(&e)?);
            }
            Event::Empty(e) => {
                let node = start_node(&e)?;
                attach(&mut stack, &mut root, node);
            }
            Event::End(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                let node = stack
                    .pop()
                    .ok_or_else(|| ParseError::Unbalanced(format!("unexpected </{}>", name)))?;
                attach(&mut stack, &mut root, node);
            }
            Event::Text(e) => {
                let text = String::from_utf8_lossy(&e);
                append_text(&mut stack, &text);
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(&e);
                append_text(&mut stack, &text);
            }
            Event::GeneralRef(e) => {
                let name = String::from_utf8_lossy(&e).into_owned();
                append_text(&mut stack, &resolve_reference(&name));
            }
            Event::Eof => break,
            // Declarations, doctypes, comments and processing instructions carry no content
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(ParseError::Unbalanced(format!(
            "<{}> is never closed",
            open.kind
        )));
    }

    let root = root.ok_or(ParseError::Empty)?;
    debug!(kind = %root.kind, children = root.children.len(), "parsed document tree");
    Ok(root)
}

/// Parse a tree serialized as JSON (the serde form of [`Node`]).
pub fn parse_json(json: &str) -> Result<Node, ParseError> {
    Ok(serde_json::from_str(json)?)
}

fn start_node(e: &BytesStart<'_>) -> Result<Node, ParseError> {
    let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut node = Node::new(NodeKind::parse(&tag));

    for attr in e.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let raw = String::from_utf8_lossy(&attr.value);
        let value = unescape(&*raw)?.into_owned();
        node.attributes.insert(key, value);
    }

    Ok(node)
}

fn attach(stack: &mut [Node], root: &mut Option<Node>, node: Node) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        // Only the first top-level element is the document
        None if root.is_none() => *root = Some(node),
        None => {}
    }
}

fn append_text(stack: &mut [Node], text: &str) {
    // Text outside the root element is prolog/epilog whitespace
    let Some(parent) = stack.last_mut() else {
        return;
    };

    match parent.children.last_mut() {
        Some(previous) => previous.tail.push_str(text),
        None => parent.text.push_str(text),
    }
}

fn resolve_reference(name: &str) -> String {
    if let Some(value) = resolve_predefined_entity(name) {
        return value.to_string();
    }

    let code = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
        u32::from_str_radix(hex, 16).ok()
    } else if let Some(dec) = name.strip_prefix('#') {
        dec.parse::<u32>().ok()
    } else {
        None
    };

    match code.and_then(char::from_u32) {
        Some(c) => c.to_string(),
        // Unknown entities are kept verbatim rather than dropped
        None => format!("&{};", name),
    }
}
