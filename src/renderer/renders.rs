use crate::parser::*;
use crate::renderer::components::*;
use crate::renderer::renderer::decode;
use crate::renderer::traits::*;

/// A rendering rule for one node kind.
pub type RuleFn = fn(&Node, &RenderContext) -> Rule;

/// Look up the rule for `kind`.
///
/// `None` means the kind has no markup of its own: structural containers and
/// unrecognized kinds are both walked as transparent containers.
pub fn lookup(kind: &NodeKind) -> Option<RuleFn> {
    let rule: RuleFn = match kind {
        NodeKind::Title => render_title,
        NodeKind::Paragraph => render_paragraph,
        NodeKind::ListItem | NodeKind::Term => render_list_item,
        NodeKind::Reference => render_reference,
        NodeKind::LiteralBlock => render_literal_block,
        NodeKind::BlockQuote => render_block_quote,
        NodeKind::Strong => render_strong,
        NodeKind::Literal => render_literal,
        NodeKind::Emphasis | NodeKind::TitleReference => render_emphasis,
        NodeKind::Image => render_image,
        NodeKind::Table => render_table,
        NodeKind::Comment
        | NodeKind::Target
        | NodeKind::SubstitutionDefinition
        | NodeKind::SystemMessage => render_nothing,
        _ => return None,
    };
    Some(rule)
}

/// Apply the rule for `node`, if its kind has one.
pub fn rule_for(node: &Node, context: &RenderContext) -> Option<Rule> {
    lookup(&node.kind).map(|rule| rule(node, context))
}

fn render_title(node: &Node, context: &RenderContext) -> Rule {
    Rule::emit(BlockMarkup.heading(context.heading_depth, &decode(node, context)))
}

fn render_paragraph(node: &Node, context: &RenderContext) -> Rule {
    Rule::emit(BlockMarkup.paragraph(&decode(node, context), context.paragraph_separator))
}

fn render_list_item(_node: &Node, context: &RenderContext) -> Rule {
    Rule::emit_and_descend(BlockMarkup.list_item(context))
}

fn render_reference(node: &Node, _context: &RenderContext) -> Rule {
    let target = node.attribute("refuri").unwrap_or_default();
    let link = InlineMarkup.link(&node.text, target);
    Rule::emit_and_descend(format!("{}{}", link, node.tail))
}

fn render_literal_block(node: &Node, _context: &RenderContext) -> Rule {
    Rule::emit(BlockMarkup.fenced("code", &node.raw_text()))
}

// Direct text only: the quoted paragraphs are children and get walked afterwards,
// unlike literal_block which takes the whole subtree's text and stops there.
fn render_block_quote(node: &Node, _context: &RenderContext) -> Rule {
    Rule::emit_and_descend(BlockMarkup.fenced("quote", &node.text))
}

// Inline wrappers only see the node's direct text; nested markup is not decoded.
fn render_strong(node: &Node, _context: &RenderContext) -> Rule {
    Rule::emit_and_descend(format!("{}{}", InlineMarkup.strong(&node.text), node.tail))
}

fn render_literal(node: &Node, _context: &RenderContext) -> Rule {
    Rule::emit_and_descend(format!("{}{}", InlineMarkup.monospace(&node.text), node.tail))
}

fn render_emphasis(node: &Node, _context: &RenderContext) -> Rule {
    Rule::emit_and_descend(format!("{}{}", InlineMarkup.emphasis(&node.text), node.tail))
}

fn render_image(node: &Node, _context: &RenderContext) -> Rule {
    let uri = node.attribute("uri").unwrap_or_default();
    Rule::emit(format!("{}{}", BlockMarkup.manual_attention("image", uri), node.tail))
}

fn render_table(node: &Node, _context: &RenderContext) -> Rule {
    let body = format!("{{noformat}}\n{}\n{{noformat}}", node.to_xml());
    Rule::emit(format!("{}{}", BlockMarkup.manual_attention("table", &body), node.tail))
}

// The node itself is invisible but the text after it still belongs to the parent.
fn render_nothing(node: &Node, _context: &RenderContext) -> Rule {
    if node.tail.is_empty() {
        Rule::skip()
    } else {
        Rule::emit(node.tail.clone())
    }
}
