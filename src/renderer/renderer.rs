use std::io::Write;

use tracing::{debug, warn};

use crate::error::RenderError;
use crate::parser::*;
use crate::renderer::renders::rule_for;
use crate::renderer::traits::*;

/// Streams a document tree out as wiki markup.
pub struct WikiRenderer;

impl WikiRenderer {
    /// Walk the children of `root` in document order, writing each fragment as soon
    /// as it is produced. A write failure aborts the walk; whatever was already
    /// written stays written.
    pub fn render<W: Write>(
        &self,
        root: &Node,
        context: &RenderContext,
        output: &mut W,
    ) -> Result<(), RenderError> {
        debug!(kind = %root.kind, children = root.children.len(), "rendering document");
        self.render_children(root, context, output)?;
        output.flush()?;
        Ok(())
    }

    pub fn render_to_string(
        &self,
        root: &Node,
        context: &RenderContext,
    ) -> Result<String, RenderError> {
        let mut buffer = Vec::new();
        self.render(root, context, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Rendered text of `node` for embedding in another fragment. Never writes.
    pub fn decode(&self, node: &Node, context: &RenderContext) -> String {
        decode(node, context)
    }

    fn render_children<W: Write>(
        &self,
        parent: &Node,
        context: &RenderContext,
        output: &mut W,
    ) -> Result<(), RenderError> {
        for child in &parent.children {
            let descend = match rule_for(child, context) {
                Some(rule) => {
                    if let Some(fragment) = &rule.fragment {
                        output.write_all(fragment.as_bytes())?;
                    }
                    rule.descend
                }
                None => {
                    report_unhandled(&child.kind);
                    true
                }
            };

            if descend {
                self.render_children(child, &context.fork_for(&child.kind), output)?;
            }
        }
        Ok(())
    }
}

/// Concatenate the node's text, the fragment (or decoded text) of each child, and
/// the node's tail.
pub fn decode(node: &Node, context: &RenderContext) -> String {
    let mut output = node.text.clone();

    for child in &node.children {
        match rule_for(child, context) {
            Some(rule) => {
                if let Some(fragment) = rule.fragment {
                    output.push_str(&fragment);
                }
            }
            None => {
                report_unhandled(&child.kind);
                output.push_str(&decode(child, context));
            }
        }
    }

    output.push_str(&node.tail);
    output
}

fn report_unhandled(kind: &NodeKind) {
    if let NodeKind::Other(tag) = kind {
        warn!(kind = %tag, "unhandled node kind, rendering its children only");
    }
}
