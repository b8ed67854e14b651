//! Markdown to styled text, with ranges for selection, search and scrolling.
//!
//! The pieces live in two crates, re-exported here:
//!
//! - `styledown-core`: style roles ([`theme`]), [`range::TextRange`], the flat
//!   [`buffer::StyledBuffer`], [`search`], [`selection`] and the `ratatui` adapter ([`render`]).
//! - `styledown-markdown` (feature `markdown`, on by default): the document tree, the
//!   `pulldown-cmark` adapter, the style resolver and [`markdown::view::MarkdownView`].
//!
//! [`viewport`] and [`pane::MarkdownPane`] draw a view into a `ratatui` buffer.
pub use styledown_core::buffer;
pub use styledown_core::error;
pub use styledown_core::range;
pub use styledown_core::render;
pub use styledown_core::search;
pub use styledown_core::selection;
pub use styledown_core::theme;

#[cfg(feature = "markdown")]
pub use styledown_markdown as markdown;

pub mod viewport;

#[cfg(feature = "markdown")]
pub mod pane;
