use std::sync::Arc;

use ratatui::style::Modifier;
use ratatui::text::Text;
use styledown_core::error::RangeError;
use styledown_core::range::TextRange;
use styledown_core::render::Overlay;
use styledown_core::render::RenderedText;
use styledown_core::render::TerminalRenderOptions;
use styledown_core::search::SearchState;
use styledown_core::selection::Selection;
use styledown_core::theme::Role;
use styledown_core::theme::StyleConfig;

use crate::document::HeadingEntry;
use crate::document::MarkdownDocument;
use crate::document::MarkdownRenderOptions;
use crate::document::RenderedMarkdown;
use crate::parse::MarkdownParseOptions;

#[derive(Clone, Debug, Default)]
pub struct MarkdownViewOptions {
    pub parse: MarkdownParseOptions,
    pub render: MarkdownRenderOptions,
}

/// Presentation state around one rendered document: selection, search matches and a pending
/// scroll target, all expressed as [`TextRange`]s over the buffer.
///
/// The view does no event handling. Apps translate gestures/keys into calls such as
/// [`Self::set_selection`] or [`Self::next_match`] and poll [`Self::take_scroll_target`] to move
/// their viewport.
#[derive(Clone, Debug)]
pub struct MarkdownView {
    source: String,
    config: Arc<StyleConfig>,
    options: MarkdownViewOptions,
    rendered: RenderedMarkdown,
    selection: Option<Selection>,
    search: SearchState,
    scroll_target: Option<TextRange>,
}

impl Default for MarkdownView {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownView {
    pub fn new() -> Self {
        Self::with_options(Arc::new(StyleConfig::default()), MarkdownViewOptions::default())
    }

    pub fn with_options(config: Arc<StyleConfig>, options: MarkdownViewOptions) -> Self {
        Self {
            source: String::new(),
            config,
            options,
            rendered: RenderedMarkdown::default(),
            selection: None,
            search: SearchState::new(),
            scroll_target: None,
        }
    }

    /// Replaces the source and re-renders the whole document.
    ///
    /// The selection is dropped (its offsets refer to the old buffer) and an active search is
    /// re-run against the new text.
    pub fn set_markdown(&mut self, input: &str) {
        self.source = input.to_string();
        self.rerender();
    }

    pub fn set_config(&mut self, config: Arc<StyleConfig>) {
        self.config = config;
        self.rerender();
    }

    fn rerender(&mut self) {
        let doc = MarkdownDocument::parse(self.source.as_str(), &self.options.parse);
        self.rendered = doc.render(&self.config, &self.options.render);
        self.selection = None;
        self.scroll_target = None;
        if !self.search.query().is_empty() {
            self.search.refresh(self.rendered.buffer().text());
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn rendered(&self) -> &RenderedMarkdown {
        &self.rendered
    }

    pub fn config(&self) -> &StyleConfig {
        &self.config
    }

    /// Selects `range`. Ranges reaching past the end of the buffer are rejected.
    pub fn set_selection(&mut self, range: TextRange) -> Result<(), RangeError> {
        let len = self.rendered.buffer().len();
        match range.validate_against(len) {
            Ok(range) => {
                self.selection = Some(Selection::from_range(range));
                Ok(())
            }
            Err(err) => {
                tracing::debug!(%range, len, "rejecting selection");
                Err(err)
            }
        }
    }

    pub fn select_all(&mut self) {
        self.selection = Some(Selection::select_all(self.rendered.buffer()));
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn selection(&self) -> Option<TextRange> {
        self.selection.map(|sel| sel.range())
    }

    pub fn selected_text(&self) -> Option<String> {
        let sel = self.selection?;
        sel.text(self.rendered.buffer()).map(str::to_string)
    }

    /// Runs a search and targets the first match. Returns the number of matches.
    pub fn set_search_query(&mut self, query: &str) -> usize {
        let count = self.search.search(self.rendered.buffer().text(), query);
        self.scroll_target = self.search.active();
        count
    }

    /// Clears the query and matches. A pending scroll target that points at the active match is
    /// dropped with them.
    pub fn clear_search(&mut self) {
        let active = self.search.active();
        if active.is_some() && self.scroll_target == active {
            self.scroll_target = None;
        }
        self.search.clear();
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    pub fn next_match(&mut self) -> Option<TextRange> {
        let hit = self.search.next();
        if hit.is_some() {
            self.scroll_target = hit;
        }
        hit
    }

    pub fn previous_match(&mut self) -> Option<TextRange> {
        let hit = self.search.previous();
        if hit.is_some() {
            self.scroll_target = hit;
        }
        hit
    }

    pub fn outline(&self) -> Vec<HeadingEntry> {
        self.rendered.outline()
    }

    /// Targets the `index`-th heading of the outline.
    pub fn jump_to_heading(&mut self, index: usize) -> Option<TextRange> {
        let heading = self.rendered.outline().into_iter().nth(index)?;
        self.scroll_target = Some(heading.range);
        Some(heading.range)
    }

    /// Requests scrolling to `range`, clamped into the buffer.
    pub fn scroll_to(&mut self, range: TextRange) {
        self.scroll_target = Some(range.clamp_to(self.rendered.buffer().len()));
    }

    pub fn scroll_target(&self) -> Option<TextRange> {
        self.scroll_target
    }

    pub fn take_scroll_target(&mut self) -> Option<TextRange> {
        self.scroll_target.take()
    }

    /// Highlight overlays in paint order: selection, search matches, then the active match.
    pub fn overlays(&self) -> Vec<Overlay> {
        let mut overlays = Vec::new();
        if let Some(range) = self.selection() {
            overlays.push(Overlay::from_role(
                range,
                self.config.role(Role::SelectionHighlight),
            ));
        }
        let search_role = self.config.role(Role::SearchHighlight);
        for range in self.search.matches() {
            overlays.push(Overlay::from_role(*range, search_role));
        }
        if let Some(active) = self.search.active() {
            let style = Overlay::from_role(active, search_role)
                .style
                .add_modifier(Modifier::REVERSED);
            overlays.push(Overlay::new(active, style));
        }
        overlays
    }

    pub fn to_terminal(&self, options: &TerminalRenderOptions) -> RenderedText {
        self.rendered.to_terminal(&self.overlays(), options)
    }

    pub fn as_text(&self, options: &TerminalRenderOptions) -> Text<'static> {
        self.to_terminal(options).into_text()
    }

    /// Terminal line the pending scroll target starts on.
    pub fn scroll_target_line(&self, options: &TerminalRenderOptions) -> Option<usize> {
        let target = self.scroll_target?;
        self.to_terminal(options).line_for_range(target)
    }
}
