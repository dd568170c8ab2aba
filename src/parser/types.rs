use quick_xml::escape::escape;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Element category of a docutils document node.
///
/// The set is closed: every tag the renderer knows about has its own variant and
/// everything else lands in [`NodeKind::Other`] with the original tag preserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    Document,
    Section,
    Title,
    Paragraph,
    BulletList,
    EnumeratedList,
    DefinitionList,
    DefinitionListItem,
    Definition,
    ListItem,
    Term,
    Reference,
    LiteralBlock,
    BlockQuote,
    Strong,
    Literal,
    Emphasis,
    TitleReference,
    Image,
    Table,
    Comment,
    Target,
    SubstitutionDefinition,
    SystemMessage,
    Other(String),
}

impl NodeKind {
    pub fn parse(tag: &str) -> Self {
        match tag {
            "document" => NodeKind::Document,
            "section" => NodeKind::Section,
            "title" => NodeKind::Title,
            "paragraph" => NodeKind::Paragraph,
            "bullet_list" => NodeKind::BulletList,
            "enumerated_list" => NodeKind::EnumeratedList,
            "definition_list" => NodeKind::DefinitionList,
            "definition_list_item" => NodeKind::DefinitionListItem,
            "definition" => NodeKind::Definition,
            "list_item" => NodeKind::ListItem,
            "term" => NodeKind::Term,
            "reference" => NodeKind::Reference,
            "literal_block" => NodeKind::LiteralBlock,
            "block_quote" => NodeKind::BlockQuote,
            "strong" => NodeKind::Strong,
            "literal" => NodeKind::Literal,
            "emphasis" => NodeKind::Emphasis,
            "title_reference" => NodeKind::TitleReference,
            "image" => NodeKind::Image,
            "table" => NodeKind::Table,
            "comment" => NodeKind::Comment,
            "target" => NodeKind::Target,
            "substitution_definition" => NodeKind::SubstitutionDefinition,
            "system_message" => NodeKind::SystemMessage,
            other => NodeKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            NodeKind::Document => "document",
            NodeKind::Section => "section",
            NodeKind::Title => "title",
            NodeKind::Paragraph => "paragraph",
            NodeKind::BulletList => "bullet_list",
            NodeKind::EnumeratedList => "enumerated_list",
            NodeKind::DefinitionList => "definition_list",
            NodeKind::DefinitionListItem => "definition_list_item",
            NodeKind::Definition => "definition",
            NodeKind::ListItem => "list_item",
            NodeKind::Term => "term",
            NodeKind::Reference => "reference",
            NodeKind::LiteralBlock => "literal_block",
            NodeKind::BlockQuote => "block_quote",
            NodeKind::Strong => "strong",
            NodeKind::Literal => "literal",
            NodeKind::Emphasis => "emphasis",
            NodeKind::TitleReference => "title_reference",
            NodeKind::Image => "image",
            NodeKind::Table => "table",
            NodeKind::Comment => "comment",
            NodeKind::Target => "target",
            NodeKind::SubstitutionDefinition => "substitution_definition",
            NodeKind::SystemMessage => "system_message",
            NodeKind::Other(tag) => tag,
        }
    }

    /// Containers that carry no markup of their own and are walked silently.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            NodeKind::Document
                | NodeKind::Section
                | NodeKind::BulletList
                | NodeKind::EnumeratedList
                | NodeKind::DefinitionList
                | NodeKind::DefinitionListItem
                | NodeKind::Definition
        )
    }
}

impl From<String> for NodeKind {
    fn from(tag: String) -> Self {
        NodeKind::parse(&tag)
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        kind.as_str().to_string()
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One element of a parsed docutils tree.
///
/// `text` is the content before the first child and `tail` the content that follows
/// this node's end tag inside its parent. Trees are built once by the loader and are
/// never modified by the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub kind: NodeKind,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub tail: String,
    #[serde(default)]
    pub children: Vec<Node>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            text: String::new(),
            tail: String::new(),
            children: Vec::new(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_tail(mut self, tail: impl Into<String>) -> Self {
        self.tail = tail.into();
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// All character data of the subtree in document order, markup stripped.
    /// The node's own tail is not included.
    pub fn raw_text(&self) -> String {
        let mut output = self.text.clone();
        for child in &self.children {
            output.push_str(&child.raw_text());
            output.push_str(&child.tail);
        }
        output
    }

    /// Serialize the subtree back to docutils XML. The node's own tail is excluded
    /// since it belongs to the parent.
    pub fn to_xml(&self) -> String {
        let mut output = String::new();
        self.write_xml(&mut output);
        output
    }

    fn write_xml(&self, output: &mut String) {
        output.push('<');
        output.push_str(self.kind.as_str());
        for (name, value) in &self.attributes {
            output.push_str(&format!(" {}=\"{}\"", name, escape(value.as_str())));
        }

        if self.text.is_empty() && self.children.is_empty() {
            output.push_str("/>");
            return;
        }

        output.push('>');
        output.push_str(&escape(self.text.as_str()));
        for child in &self.children {
            child.write_xml(output);
            output.push_str(&escape(child.tail.as_str()));
        }
        output.push_str(&format!("</{}>", self.kind.as_str()));
    }
}
