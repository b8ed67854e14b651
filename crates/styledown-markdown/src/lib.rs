//! Markdown to styled-text rendering for `styledown`.
//!
//! ## Layers
//!
//! - [`parse`]: markdown source to a [`node::Node`] tree (`pulldown-cmark` based).
//! - [`resolve`]: tree plus [`styledown_core::theme::StyleConfig`] to a flat
//!   [`styledown_core::buffer::StyledBuffer`] and per-node buffer ranges.
//! - [`document`]: render core (parse once, render many times, outline, search).
//! - [`view::MarkdownView`]: selection, search navigation and scroll targets on top of a
//!   rendered document.
//!
//! If you bring your own parser, build a [`node::Node`] tree and hand it to
//! [`document::MarkdownDocument::from_tree`].
pub mod document;
pub mod node;
pub mod parse;
pub mod resolve;
pub mod view;
