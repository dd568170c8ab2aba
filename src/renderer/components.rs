use crate::renderer::traits::*;

/// Helper for the block-level constructs of the wiki dialect
pub struct BlockMarkup;

impl BlockMarkup {
    pub fn heading(&self, depth: usize, text: &str) -> String {
        format!("h{}. {}\n\n", depth, text)
    }

    pub fn paragraph(&self, text: &str, separator: ParagraphSeparator) -> String {
        format!("{}{}", text, separator.as_str())
    }

    pub fn list_item(&self, context: &RenderContext) -> String {
        format!("{} ", context.list_prefix)
    }

    /// Wrap `body` between `{macro}` fences, e.g. `{code}` or `{quote}`.
    pub fn fenced(&self, name: &str, body: &str) -> String {
        format!("{{{name}}}\n{body}\n{{{name}}}\n\n")
    }

    /// A block that calls for a human to finish the conversion by hand.
    pub fn manual_attention(&self, subject: &str, body: &str) -> String {
        format!(
            "{{warning:title=Manual attention required: {}}}\n{}\n{{warning}}\n\n",
            subject, body
        )
    }
}

/// Helper for inline constructs
pub struct InlineMarkup;

impl InlineMarkup {
    pub fn strong(&self, text: &str) -> String {
        format!("*{}*", text)
    }

    pub fn emphasis(&self, text: &str) -> String {
        format!("_{}_", text)
    }

    pub fn monospace(&self, text: &str) -> String {
        format!("{{{{{}}}}}", text)
    }

    pub fn link(&self, label: &str, target: &str) -> String {
        format!("[{}|{}]", label, target)
    }
}
