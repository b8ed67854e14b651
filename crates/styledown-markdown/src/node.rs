//! The document tree consumed by the resolver.
//!
//! Any markdown parser can feed the resolver by producing a [`Node`] tree; [`crate::parse`]
//! builds one from `pulldown-cmark` events. Node kinds the resolver has no rule for are carried
//! as [`Node::Unhandled`] and rendered by visiting their children.
use styledown_core::theme::HeadingLevel;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Document(Vec<Node>),
    Paragraph(Vec<Node>),
    Heading {
        level: HeadingLevel,
        children: Vec<Node>,
    },
    Text(String),
    Strong(Vec<Node>),
    Emphasis(Vec<Node>),
    InlineCode(String),
    CodeBlock {
        language: Option<String>,
        code: String,
    },
    BlockQuote(Vec<Node>),
    Link {
        destination: Option<String>,
        children: Vec<Node>,
    },
    UnorderedList(Vec<Node>),
    OrderedList {
        start: u64,
        children: Vec<Node>,
    },
    ListItem(Vec<Node>),
    /// A node kind without a dedicated rendering rule (tables, images, strikethrough, ...).
    Unhandled {
        tag: &'static str,
        children: Vec<Node>,
    },
}

/// Fieldless mirror of [`Node`], used to label recorded spans.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Document,
    Paragraph,
    Heading(HeadingLevel),
    Text,
    Strong,
    Emphasis,
    InlineCode,
    CodeBlock,
    BlockQuote,
    Link,
    UnorderedList,
    OrderedList,
    ListItem,
    Unhandled(&'static str),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Document(_) => NodeKind::Document,
            Node::Paragraph(_) => NodeKind::Paragraph,
            Node::Heading { level, .. } => NodeKind::Heading(*level),
            Node::Text(_) => NodeKind::Text,
            Node::Strong(_) => NodeKind::Strong,
            Node::Emphasis(_) => NodeKind::Emphasis,
            Node::InlineCode(_) => NodeKind::InlineCode,
            Node::CodeBlock { .. } => NodeKind::CodeBlock,
            Node::BlockQuote(_) => NodeKind::BlockQuote,
            Node::Link { .. } => NodeKind::Link,
            Node::UnorderedList(_) => NodeKind::UnorderedList,
            Node::OrderedList { .. } => NodeKind::OrderedList,
            Node::ListItem(_) => NodeKind::ListItem,
            Node::Unhandled { tag, .. } => NodeKind::Unhandled(*tag),
        }
    }

    /// Child nodes in document order; empty for leaves.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Document(children)
            | Node::Paragraph(children)
            | Node::Strong(children)
            | Node::Emphasis(children)
            | Node::BlockQuote(children)
            | Node::UnorderedList(children)
            | Node::ListItem(children)
            | Node::Heading { children, .. }
            | Node::Link { children, .. }
            | Node::OrderedList { children, .. }
            | Node::Unhandled { children, .. } => children.as_slice(),
            Node::Text(_) | Node::InlineCode(_) | Node::CodeBlock { .. } => &[],
        }
    }

    /// Block-level nodes start on their own line.
    pub fn is_block(&self) -> bool {
        matches!(
            self,
            Node::Paragraph(_)
                | Node::Heading { .. }
                | Node::CodeBlock { .. }
                | Node::BlockQuote(_)
                | Node::UnorderedList(_)
                | Node::OrderedList { .. }
                | Node::ListItem(_)
        )
    }

    /// Node at `path` (child indices from `self`).
    pub fn get(&self, path: &[usize]) -> Option<&Node> {
        let mut node = self;
        for idx in path {
            node = node.children().get(*idx)?;
        }
        Some(node)
    }

    /// Concatenated text of all text and code leaves below `self`.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }
}

fn collect_text(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) | Node::InlineCode(text) => out.push_str(text),
        Node::CodeBlock { code, .. } => out.push_str(code),
        other => {
            for child in other.children() {
                collect_text(child, out);
            }
        }
    }
}
