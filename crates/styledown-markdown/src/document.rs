//! A reusable markdown render core.
//!
//! Parse once into a [`MarkdownDocument`], then render against a [`StyleConfig`] into a
//! [`RenderedMarkdown`]: the flat [`StyledBuffer`] plus the buffer window of every tree node.
//!
//! ```rust
//! use styledown_core::theme::StyleConfig;
//! use styledown_markdown::document::{MarkdownDocument, MarkdownRenderOptions};
//! use styledown_markdown::parse::MarkdownParseOptions;
//!
//! let doc = MarkdownDocument::parse("# Hello\n\nSome *markdown*.", &MarkdownParseOptions::default());
//! let rendered = doc.render(&StyleConfig::default(), &MarkdownRenderOptions::default());
//! assert_eq!(rendered.buffer().text(), "Hello\nSome markdown.\n");
//! assert_eq!(rendered.search("MARK").len(), 1);
//! ```
//!
//! Rendering is a pure function of the tree, the configuration and the options: the same inputs
//! always produce the same buffer, and separate documents can be rendered on separate threads
//! sharing one configuration. Nothing is cached; re-render after every source change and drop
//! stale results yourself.
use styledown_core::buffer::StyledBuffer;
use styledown_core::range::TextRange;
use styledown_core::render::Overlay;
use styledown_core::render::RenderedText;
use styledown_core::render::TerminalRenderOptions;
use styledown_core::render::render_text;
use styledown_core::search::find_matches;
use styledown_core::theme::HeadingLevel;
use styledown_core::theme::StyleConfig;
use url::Url;

use crate::node::Node;
use crate::node::NodeKind;
use crate::parse::MarkdownParseOptions;
use crate::parse::parse_markdown;
use crate::resolve::NodeSpan;
use crate::resolve::resolve;

/// Render-time options.
#[derive(Clone, Debug, Default)]
pub struct MarkdownRenderOptions {
    /// Base for relative link destinations. Without it, relative links render as plain link
    /// text with no destination attached.
    pub base_url: Option<String>,
}

impl MarkdownRenderOptions {
    fn parsed_base_url(&self) -> Option<Url> {
        let raw = self.base_url.as_deref().map(str::trim)?;
        if raw.is_empty() {
            return None;
        }
        match Url::parse(raw) {
            Ok(url) => Some(url),
            Err(err) => {
                tracing::warn!(base_url = raw, error = %err, "ignoring unusable base url");
                None
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct MarkdownDocument {
    source: String,
    root: Node,
}

impl MarkdownDocument {
    pub fn parse(source: impl Into<String>, options: &MarkdownParseOptions) -> Self {
        let source = source.into();
        let root = parse_markdown(&source, options);
        Self { source, root }
    }

    /// Wraps an existing tree, e.g. one produced by another parser.
    pub fn from_tree(root: Node) -> Self {
        Self {
            source: String::new(),
            root,
        }
    }

    /// Returns the original markdown source (empty for [`Self::from_tree`]).
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn render(&self, config: &StyleConfig, options: &MarkdownRenderOptions) -> RenderedMarkdown {
        let base_url = options.parsed_base_url();
        let resolved = resolve(&self.root, config, base_url.as_ref());
        RenderedMarkdown {
            buffer: resolved.buffer,
            spans: resolved.spans,
        }
    }
}

/// A heading and where it landed in the buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeadingEntry {
    pub level: HeadingLevel,
    pub title: String,
    pub path: Vec<usize>,
    pub range: TextRange,
}

#[derive(Clone, Debug, Default)]
pub struct RenderedMarkdown {
    buffer: StyledBuffer,
    spans: Vec<NodeSpan>,
}

impl RenderedMarkdown {
    pub fn buffer(&self) -> &StyledBuffer {
        &self.buffer
    }

    pub fn into_buffer(self) -> StyledBuffer {
        self.buffer
    }

    /// Buffer windows of all nodes, in pre-order.
    pub fn spans(&self) -> &[NodeSpan] {
        &self.spans
    }

    /// Buffer range produced by the node at `path`.
    pub fn range_of(&self, path: &[usize]) -> Option<TextRange> {
        self.spans
            .iter()
            .find(|span| span.path == path)
            .map(|span| span.range)
    }

    /// Headings in document order, with their rendered titles and ranges.
    pub fn outline(&self) -> Vec<HeadingEntry> {
        self.spans
            .iter()
            .filter_map(|span| {
                let NodeKind::Heading(level) = span.kind else {
                    return None;
                };
                let title = self
                    .buffer
                    .slice(span.range)
                    .unwrap_or_default()
                    .trim_end_matches('\n')
                    .to_string();
                Some(HeadingEntry {
                    level,
                    title,
                    path: span.path.clone(),
                    range: span.range,
                })
            })
            .collect()
    }

    /// Case-insensitive, non-overlapping matches of `query` in the rendered text.
    pub fn search(&self, query: &str) -> Vec<TextRange> {
        find_matches(self.buffer.text(), query)
    }

    /// Terminal rendering with highlight overlays composited on top.
    pub fn to_terminal(&self, overlays: &[Overlay], options: &TerminalRenderOptions) -> RenderedText {
        render_text(&self.buffer, overlays, options)
    }
}
