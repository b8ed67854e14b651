//! Style resolution: walks a [`Node`] tree and writes styled runs into a [`Compositor`].
//!
//! The style context is an immutable [`TextAttributes`] value passed down the recursion. A node
//! that changes styling derives a new value for its subtree; siblings keep receiving the
//! parent's value, so nothing has to be restored on the way back up.
//!
//! Combination rules:
//! - strong/emphasis set bold/italic on the *current* font (bold inside a heading is the bold
//!   heading font)
//! - inline code replaces font and colors with the inline-code role; it does not inherit
//!   bold/italic
//! - headings and code blocks bring their own paragraph spacing; blockquotes keep the ambient
//!   paragraph attributes
//! - list items get the configured indent as a paragraph attribute; the indent is the same at
//!   every nesting depth
use styledown_core::buffer::Compositor;
use styledown_core::buffer::StyledBuffer;
use styledown_core::range::TextRange;
use styledown_core::theme::HeadingLevel;
use styledown_core::theme::StyleConfig;
use styledown_core::theme::TextAttributes;
use url::Url;

use crate::node::Node;
use crate::node::NodeKind;

/// The buffer window a node's visit produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeSpan {
    /// Child indices leading from the root to the node; empty for the root.
    pub path: Vec<usize>,
    pub kind: NodeKind,
    pub range: TextRange,
}

/// Output of [`resolve`].
#[derive(Clone, Debug, Default)]
pub struct Resolved {
    pub buffer: StyledBuffer,
    /// One span per visited node, in pre-order.
    pub spans: Vec<NodeSpan>,
}

/// Resolves `root` against `config`.
///
/// Relative link destinations are joined onto `base_url`; without a base they are dropped (the
/// link text still renders). Never fails.
pub fn resolve(root: &Node, config: &StyleConfig, base_url: Option<&Url>) -> Resolved {
    let mut resolver = Resolver {
        config,
        base_url,
        out: Compositor::new(),
        spans: Vec::new(),
        path: Vec::new(),
    };
    let base = config.base_attributes();
    resolver.visit(root, &base, None);

    let buffer = resolver.out.finish();
    tracing::debug!(
        bytes = buffer.len(),
        runs = buffer.runs().len(),
        nodes = resolver.spans.len(),
        "resolved markdown document"
    );
    Resolved {
        buffer,
        spans: resolver.spans,
    }
}

struct Resolver<'a> {
    config: &'a StyleConfig,
    base_url: Option<&'a Url>,
    out: Compositor,
    spans: Vec<NodeSpan>,
    path: Vec<usize>,
}

impl Resolver<'_> {
    fn visit(&mut self, node: &Node, ctx: &TextAttributes, marker: Option<&str>) {
        let span_idx = self.spans.len();
        self.spans.push(NodeSpan {
            path: self.path.clone(),
            kind: node.kind(),
            range: TextRange::empty_at(self.out.offset()),
        });
        let start = self.out.offset();

        match node {
            Node::Document(children) => self.visit_children(children, ctx),
            Node::Paragraph(children) => {
                self.visit_children(children, ctx);
                self.out.push_break(ctx);
            }
            Node::Heading { level, children } => {
                let heading = self.heading_context(ctx, *level);
                self.visit_children(children, &heading);
                self.out.push_break(&heading);
            }
            Node::Text(text) => {
                self.out.push(text, ctx);
            }
            Node::Strong(children) => {
                let strong = TextAttributes {
                    font: ctx.font.bold(),
                    ..ctx.clone()
                };
                self.visit_children(children, &strong);
            }
            Node::Emphasis(children) => {
                let emphasis = TextAttributes {
                    font: ctx.font.italic(),
                    ..ctx.clone()
                };
                self.visit_children(children, &emphasis);
            }
            Node::InlineCode(code) => {
                let role = &self.config.inline_code;
                let code_ctx = TextAttributes {
                    font: role.font,
                    foreground: role.foreground,
                    background: role.background,
                    ..ctx.clone()
                };
                self.out.push(code, &code_ctx);
            }
            Node::CodeBlock { code, .. } => {
                let role = &self.config.code_block;
                let block = TextAttributes {
                    font: role.font,
                    foreground: role.foreground,
                    background: role.background,
                    paragraph: role
                        .paragraph
                        .with_head_indent(ctx.paragraph.head_indent),
                    link: None,
                };
                self.out.push(code, &block);
                self.out.push_break(&block);
            }
            Node::BlockQuote(children) => {
                let role = &self.config.blockquote;
                let quote = TextAttributes {
                    font: role.font,
                    foreground: role.foreground,
                    background: role.background,
                    ..ctx.clone()
                };
                self.visit_children(children, &quote);
            }
            Node::Link {
                destination,
                children,
            } => {
                let link = TextAttributes {
                    foreground: self.config.link.foreground,
                    link: self.resolve_link(destination.as_deref()),
                    ..ctx.clone()
                };
                self.visit_children(children, &link);
            }
            Node::UnorderedList(children) => self.visit_list(children, ctx, None),
            Node::OrderedList { start, children } => {
                self.visit_list(children, ctx, Some(*start))
            }
            Node::ListItem(children) => {
                let bullet;
                let marker = match marker {
                    Some(marker) => marker,
                    None => {
                        bullet = self.bullet_marker();
                        bullet.as_str()
                    }
                };
                self.visit_item(children, ctx, marker);
            }
            Node::Unhandled { tag, children } => {
                tracing::trace!(tag = *tag, "rendering unhandled node through its children");
                self.visit_children(children, ctx);
            }
        }

        self.spans[span_idx].range = self.out.range_since(start);
    }

    fn visit_children(&mut self, children: &[Node], ctx: &TextAttributes) {
        for (idx, child) in children.iter().enumerate() {
            self.path.push(idx);
            self.visit(child, ctx, None);
            self.path.pop();
        }
    }

    /// Numbers direct items from `start` (ordered) or bullets them (unordered). Each list node
    /// owns its counter, so nested and sibling lists count independently.
    fn visit_list(&mut self, children: &[Node], ctx: &TextAttributes, start: Option<u64>) {
        let item_ctx = TextAttributes {
            paragraph: ctx
                .paragraph
                .with_head_indent(self.config.list.indent),
            ..ctx.clone()
        };
        let bullet = self.bullet_marker();
        let mut counter = start;

        for (idx, child) in children.iter().enumerate() {
            self.path.push(idx);
            match child {
                Node::ListItem(_) => {
                    let marker = match counter {
                        Some(n) => format!("{n}. "),
                        None => bullet.clone(),
                    };
                    self.visit(child, &item_ctx, Some(marker.as_str()));
                    counter = counter.map(|n| n.saturating_add(1));
                }
                other => self.visit(other, ctx, None),
            }
            self.path.pop();
        }
    }

    /// Marker, then children. Block children after the first start on a fresh line, and the
    /// item always ends with a paragraph break.
    fn visit_item(&mut self, children: &[Node], ctx: &TextAttributes, marker: &str) {
        self.out.push(marker, ctx);
        for (idx, child) in children.iter().enumerate() {
            if idx > 0 && child.is_block() && !self.out.at_line_start() {
                self.out.push_break(ctx);
            }
            self.path.push(idx);
            self.visit(child, ctx, None);
            self.path.pop();
        }
        if !self.out.at_line_start() {
            self.out.push_break(ctx);
        }
    }

    fn heading_context(&self, ctx: &TextAttributes, level: HeadingLevel) -> TextAttributes {
        let role = self.config.heading(level);
        TextAttributes {
            font: role.font,
            foreground: role.foreground,
            background: role.background,
            paragraph: role
                .paragraph
                .with_head_indent(ctx.paragraph.head_indent),
            link: ctx.link.clone(),
        }
    }

    fn bullet_marker(&self) -> String {
        format!("{} ", self.config.list.bullet)
    }

    fn resolve_link(&self, destination: Option<&str>) -> Option<Url> {
        let dest = destination?;
        match Url::parse(dest) {
            Ok(url) => Some(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => match self.base_url {
                Some(base) => match base.join(dest) {
                    Ok(url) => Some(url),
                    Err(err) => {
                        tracing::debug!(destination = dest, error = %err, "dropping link destination");
                        None
                    }
                },
                None => {
                    tracing::debug!(destination = dest, "dropping relative link without base url");
                    None
                }
            },
            Err(err) => {
                tracing::debug!(destination = dest, error = %err, "dropping malformed link destination");
                None
            }
        }
    }
}
