use crate::parser::NodeKind;

/// Path-dependent formatting state for one branch of the document tree.
///
/// Contexts are values: descending into a container derives a new context for that
/// container's children and leaves the caller's context untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    pub heading_depth: usize,
    pub list_prefix: String,
    pub paragraph_separator: ParagraphSeparator,
}

impl RenderContext {
    pub fn new() -> Self {
        Self {
            heading_depth: 1,
            list_prefix: String::new(),
            paragraph_separator: ParagraphSeparator::DoubleBreak,
        }
    }

    pub fn with_heading_depth(&self, heading_depth: usize) -> Self {
        Self {
            heading_depth,
            list_prefix: self.list_prefix.clone(),
            paragraph_separator: self.paragraph_separator,
        }
    }

    pub fn for_section(&self) -> Self {
        self.with_heading_depth(self.heading_depth + 1)
    }

    pub fn for_list(&self, marker: ListMarker) -> Self {
        let mut list_prefix = self.list_prefix.clone();
        list_prefix.push(marker.as_char());
        Self {
            heading_depth: self.heading_depth,
            list_prefix,
            paragraph_separator: ParagraphSeparator::SingleBreak,
        }
    }

    /// Context for the children of a node of `kind`.
    pub fn fork_for(&self, kind: &NodeKind) -> Self {
        match kind {
            NodeKind::Section => self.for_section(),
            NodeKind::BulletList => self.for_list(ListMarker::Bullet),
            NodeKind::EnumeratedList => self.for_list(ListMarker::Enumerated),
            NodeKind::DefinitionList => self.for_list(ListMarker::Definition),
            _ => self.clone(),
        }
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new()
    }
}

/// What follows a rendered paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphSeparator {
    DoubleBreak,
    SingleBreak,
}

impl ParagraphSeparator {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParagraphSeparator::DoubleBreak => "\n\n",
            ParagraphSeparator::SingleBreak => "\n",
        }
    }
}

/// One nesting level of a list, as it appears in the item prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMarker {
    Bullet,
    Enumerated,
    Definition,
}

impl ListMarker {
    pub fn as_char(&self) -> char {
        match self {
            ListMarker::Bullet | ListMarker::Definition => '*',
            ListMarker::Enumerated => '#',
        }
    }
}

/// Outcome of a dispatch rule: an optional fragment and whether the children of the
/// node are visited by the block walker afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub fragment: Option<String>,
    pub descend: bool,
}

impl Rule {
    pub fn emit(fragment: impl Into<String>) -> Self {
        Self {
            fragment: Some(fragment.into()),
            descend: false,
        }
    }

    pub fn emit_and_descend(fragment: impl Into<String>) -> Self {
        Self {
            fragment: Some(fragment.into()),
            descend: true,
        }
    }

    pub fn skip() -> Self {
        Self {
            fragment: None,
            descend: false,
        }
    }
}
