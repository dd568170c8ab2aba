//! # rstwiki
//!
//! Renders docutils document trees (the XML written by `rst2xml`) as Confluence-style
//! wiki markup.
//!
//! ```
//! let wiki = rstwiki::convert_str("<document><title>Guide</title></document>").unwrap();
//! assert_eq!(wiki, "h1. Guide\n\n");
//! ```

pub mod error;
pub mod parser;
pub mod renderer;

#[cfg(test)]
mod tests;

use std::fs::{self, File};
use std::path::Path;

use tracing::debug;

pub use error::{Error, ParseError, RenderError, Result};
pub use parser::{parse_document, parse_json, Node, NodeKind};
pub use renderer::{decode, ListMarker, ParagraphSeparator, RenderContext, Rule, WikiRenderer};

/// Convert docutils XML to wiki markup in memory.
pub fn convert_str(xml: &str) -> Result<String> {
    let root = parse_document(xml)?;
    Ok(WikiRenderer.render_to_string(&root, &RenderContext::new())?)
}

/// Load the tree at `input` (docutils XML, or JSON for a `.json` extension).
pub fn load_tree(input: &Path) -> Result<Node> {
    let content = fs::read_to_string(input)?;
    let is_json = input
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let root = if is_json {
        parse_json(&content)?
    } else {
        parse_document(&content)?
    };
    Ok(root)
}

/// Convert one input tree into one output file using the default context.
pub fn convert_file(input: &Path, output: &Path) -> Result<()> {
    convert_file_with(input, output, &RenderContext::new())
}

/// Convert one input tree into one output file, starting from `context`.
///
/// The output file is written fragment by fragment; on failure the file keeps
/// whatever was emitted before the error.
pub fn convert_file_with(input: &Path, output: &Path, context: &RenderContext) -> Result<()> {
    let root = load_tree(input)?;
    debug!(input = %input.display(), output = %output.display(), "converting");

    let mut file = File::create(output)?;
    WikiRenderer.render(&root, context, &mut file)?;
    Ok(())
}
