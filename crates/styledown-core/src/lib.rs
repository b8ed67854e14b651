//! `styledown-core` holds the format-independent half of styledown: the styled-text model that a
//! markdown renderer produces and the range model used to select, search and scroll it.
//!
//! Nothing in this crate knows about markdown. The markdown front end lives in
//! `styledown-markdown`; most users should depend on the facade crate `styledown`.
//!
//! ## Pieces
//!
//! - [`theme::StyleConfig`]: immutable mapping from semantic roles (body, headings, code, ...) to
//!   font/color/paragraph attributes.
//! - [`buffer::Compositor`] / [`buffer::StyledBuffer`]: runs flattened into one string with
//!   contiguous attribute intervals.
//! - [`range::TextRange`]: half-open byte interval shared by selection, search and scrolling.
//! - [`search::find_matches`]: case-insensitive, non-overlapping search over buffer text.
//! - [`selection::Selection`]: anchor/head selection resolved to a [`range::TextRange`].
//! - [`render::render_text`]: `ratatui` adapter compositing highlights over run styles.
//!
//! ## Threading
//!
//! Every type here is plain data. A [`theme::StyleConfig`] behind an `Arc` can be shared by
//! renders running on any number of threads; no call mutates it.
pub mod error;
pub mod theme;

pub mod buffer;
pub mod range;

pub mod render;
pub mod search;
pub mod selection;
