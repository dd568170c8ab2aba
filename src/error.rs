//! Error types for loading document trees and writing wiki output.

use thiserror::Error;

/// Errors raised while turning docutils XML (or JSON) into a [`Node`](crate::Node) tree.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("XML escape error: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unbalanced document: {0}")]
    Unbalanced(String),

    #[error("Document contains no root element")]
    Empty,
}

/// Fatal failure while emitting rendered output.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to write rendered output: {0}")]
    Write(#[from] std::io::Error),
}

/// Top-level error for the conversion entry points.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

pub type Result<T> = std::result::Result<T, Error>;
