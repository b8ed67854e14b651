use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::style::Stylize;
use ratatui::widgets::StatefulWidget;
use styledown_core::render::TerminalRenderOptions;
use styledown_markdown::view::MarkdownView;

use crate::viewport::ViewportState;
use crate::viewport::render_line_clipped;
use crate::viewport::render_scrollbar;

#[derive(Clone, Copy, Debug)]
pub struct MarkdownPaneOptions {
    pub terminal: TerminalRenderOptions,
    pub style: Style,
    pub show_scrollbar: bool,
    pub scrollbar_style: Style,
}

impl Default for MarkdownPaneOptions {
    fn default() -> Self {
        Self {
            terminal: TerminalRenderOptions::default(),
            style: Style::default(),
            show_scrollbar: true,
            scrollbar_style: Style::default().dark_gray(),
        }
    }
}

/// Draws a [`MarkdownView`] with its selection and search highlights.
///
/// A pending scroll target on the view (set by search navigation, [`MarkdownView::scroll_to`] or
/// [`MarkdownView::jump_to_heading`]) is consumed on render and scrolled into view.
pub struct MarkdownPane<'a> {
    view: &'a mut MarkdownView,
    options: MarkdownPaneOptions,
}

impl<'a> MarkdownPane<'a> {
    pub fn new(view: &'a mut MarkdownView) -> Self {
        Self {
            view,
            options: MarkdownPaneOptions::default(),
        }
    }

    pub fn options(mut self, options: MarkdownPaneOptions) -> Self {
        self.options = options;
        self
    }
}

impl StatefulWidget for MarkdownPane<'_> {
    type State = ViewportState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let (content_area, scrollbar_x) = if self.options.show_scrollbar && area.width >= 2 {
            (
                Rect::new(area.x, area.y, area.width - 1, area.height),
                Some(area.x + area.width - 1),
            )
        } else {
            (area, None)
        };

        let rendered = self.view.to_terminal(&self.options.terminal);
        let (content_w, content_h) = rendered.content_size();
        state.set_viewport(content_area.width, content_area.height);
        state.set_content(content_w, content_h);
        if let Some(target) = self.view.take_scroll_target() {
            if let Some(line) = rendered.line_for_range(target) {
                state.reveal_line(line as u32);
            }
        }

        let lines = &rendered.text().lines;
        for row in 0..content_area.height {
            let y = content_area.y + row;
            buf.set_style(
                Rect::new(content_area.x, y, content_area.width, 1),
                self.options.style,
            );
            let idx = (state.y as usize).saturating_add(row as usize);
            if let Some(line) = lines.get(idx) {
                render_line_clipped(content_area.x, y, state.x, content_area.width, buf, line);
            }
        }

        if let Some(sb_x) = scrollbar_x {
            render_scrollbar(
                Rect::new(sb_x, area.y, 1, area.height),
                buf,
                state,
                self.options.scrollbar_style,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    fn row(buf: &Buffer, y: u16, width: u16) -> String {
        (0..width)
            .filter_map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()))
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    fn numbered(n: usize) -> String {
        (0..n).map(|i| format!("para {i}\n\n")).collect()
    }

    #[test]
    fn renders_visible_lines_and_follows_search() {
        let mut view = MarkdownView::new();
        view.set_markdown(&numbered(10));
        let options = MarkdownPaneOptions {
            show_scrollbar: false,
            terminal: TerminalRenderOptions {
                paragraph_gaps: false,
                ..TerminalRenderOptions::default()
            },
            ..MarkdownPaneOptions::default()
        };
        let area = Rect::new(0, 0, 12, 3);
        let mut state = ViewportState::default();

        let mut buf = Buffer::empty(area);
        MarkdownPane::new(&mut view)
            .options(options)
            .render(area, &mut buf, &mut state);
        assert_eq!(row(&buf, 0, 12), "para 0");
        assert_eq!(state.content_h, 10);

        assert_eq!(view.set_search_query("para 7"), 1);
        let mut buf = Buffer::empty(area);
        MarkdownPane::new(&mut view)
            .options(options)
            .render(area, &mut buf, &mut state);
        assert_eq!(state.y, 5);
        assert_eq!(row(&buf, 2, 12), "para 7");
        assert_eq!(buf.cell((0, 2)).map(|c| c.bg), Some(Color::Yellow));
        assert_eq!(view.scroll_target(), None);
    }

    #[test]
    fn manual_scroll_is_kept_without_a_target() {
        let mut view = MarkdownView::new();
        view.set_markdown(&numbered(10));
        let area = Rect::new(0, 0, 12, 3);
        let mut state = ViewportState::default();
        state.set_viewport(12, 3);
        state.set_content(12, 19);
        state.scroll_y_by(2);

        let mut buf = Buffer::empty(area);
        MarkdownPane::new(&mut view)
            .options(MarkdownPaneOptions {
                show_scrollbar: false,
                ..MarkdownPaneOptions::default()
            })
            .render(area, &mut buf, &mut state);
        assert_eq!(state.y, 2);
        assert_eq!(row(&buf, 0, 12), "para 1");
        assert_eq!(row(&buf, 1, 12), "");
    }

    #[test]
    fn scrollbar_takes_the_last_column() {
        let mut view = MarkdownView::new();
        view.set_markdown(&numbered(20));
        let area = Rect::new(0, 0, 10, 4);
        let mut state = ViewportState::default();
        let mut buf = Buffer::empty(area);
        MarkdownPane::new(&mut view).render(area, &mut buf, &mut state);
        assert_eq!(state.viewport_w, 9);
        assert_eq!(buf.cell((9, 0)).map(|c| c.symbol().to_string()).as_deref(), Some("█"));
    }
}
