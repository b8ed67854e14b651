use ratatui::buffer::Buffer;
use ratatui::layout::Alignment;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

/// Scroll position over rendered lines, in terminal cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewportState {
    pub x: u32,
    pub y: u32,
    pub viewport_w: u16,
    pub viewport_h: u16,
    pub content_w: u32,
    pub content_h: u32,
}

impl ViewportState {
    pub fn set_viewport(&mut self, w: u16, h: u16) {
        self.viewport_w = w;
        self.viewport_h = h;
        self.clamp();
    }

    pub fn set_content(&mut self, w: u32, h: u32) {
        self.content_w = w;
        self.content_h = h;
        self.clamp();
    }

    pub fn clamp(&mut self) {
        self.y = self.y.min(self.max_y());
        self.x = self.x.min(self.max_x());
    }

    /// Scrolls vertically by `delta` lines, clamped to the content.
    pub fn scroll_y_by(&mut self, delta: i32) {
        let next = self.y as i64 + delta as i64;
        self.y = next.clamp(0, self.max_y() as i64) as u32;
    }

    /// Scrolls the least amount needed to show `line`.
    pub fn reveal_line(&mut self, line: u32) {
        if line < self.y {
            self.y = line;
        } else if self.viewport_h > 0 && line >= self.y + self.viewport_h as u32 {
            self.y = line + 1 - self.viewport_h as u32;
        }
        self.clamp();
    }

    fn max_y(&self) -> u32 {
        self.content_h.saturating_sub(self.viewport_h as u32)
    }

    fn max_x(&self) -> u32 {
        self.content_w.saturating_sub(self.viewport_w as u32)
    }
}

pub fn render_scrollbar(area: Rect, buf: &mut Buffer, state: &ViewportState, style: Style) {
    buf.set_style(area, style);
    if area.height == 0 {
        return;
    }
    if state.content_h <= state.viewport_h as u32 || state.content_h == 0 {
        for dy in 0..area.height {
            buf.set_stringn(area.x, area.y + dy, " ", 1, style);
        }
        return;
    }

    let track_h = area.height as f64;
    let thumb_h = ((state.viewport_h as f64 / state.content_h as f64) * track_h)
        .round()
        .clamp(1.0, track_h) as u16;

    let max_y = state
        .content_h
        .saturating_sub(state.viewport_h as u32)
        .max(1) as f64;
    let thumb_top = ((state.y as f64 / max_y) * (track_h - thumb_h as f64))
        .round()
        .clamp(0.0, (track_h - thumb_h as f64).max(0.0)) as u16;

    for dy in 0..area.height {
        let ch = if dy >= thumb_top && dy < thumb_top + thumb_h {
            "█"
        } else {
            " "
        };
        buf.set_stringn(area.x, area.y + dy, ch, 1, style);
    }
}

/// Draws `line` on row `y`, skipping `start_col` cells and honoring the line's alignment.
///
/// Wide characters cut by the left edge are dropped rather than drawn half.
pub fn render_line_clipped(
    x: u16,
    y: u16,
    start_col: u32,
    max_cols: u16,
    buf: &mut Buffer,
    line: &Line<'_>,
) {
    if max_cols == 0 {
        return;
    }

    let line_w = line
        .spans
        .iter()
        .map(|s| UnicodeWidthStr::width(s.content.as_ref()))
        .sum::<usize>();
    let slack = (max_cols as usize).saturating_sub(line_w) as u16;
    let lead = match line.alignment {
        Some(Alignment::Center) => slack / 2,
        Some(Alignment::Right) => slack,
        _ => 0,
    };

    let start_col = start_col as usize;
    let max_cols = (max_cols - lead) as usize;
    let mut col = 0usize;
    let mut out_cols = 0usize;
    let mut dx = lead;

    for span in &line.spans {
        let style = line.style.patch(span.style);
        for ch in span.content.chars() {
            let w = UnicodeWidthChar::width(ch).unwrap_or(0);
            if w == 0 {
                continue;
            }
            if col < start_col {
                col += w;
                continue;
            }
            if out_cols + w > max_cols {
                return;
            }

            if let Some(cell) = buf.cell_mut((x + dx, y)) {
                cell.set_style(style);
                cell.set_symbol(&ch.to_string());
            }
            dx += 1;
            out_cols += 1;
            col += w;

            if w == 2 {
                if let Some(cell) = buf.cell_mut((x + dx, y)) {
                    cell.set_style(style);
                    cell.set_symbol("");
                }
                dx += 1;
                out_cols += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .filter_map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()))
            .collect()
    }

    #[test]
    fn viewport_clamps_both_axes() {
        let mut s = ViewportState::default();
        s.set_viewport(10, 5);
        s.set_content(12, 6);
        s.x = 99;
        s.y = 99;
        s.clamp();
        assert_eq!(s.x, 2);
        assert_eq!(s.y, 1);
    }

    #[test]
    fn reveal_line_scrolls_minimally() {
        let mut s = ViewportState::default();
        s.set_viewport(10, 4);
        s.set_content(10, 20);
        s.reveal_line(2);
        assert_eq!(s.y, 0);
        s.reveal_line(9);
        assert_eq!(s.y, 6);
        s.reveal_line(7);
        assert_eq!(s.y, 6);
        s.reveal_line(1);
        assert_eq!(s.y, 1);
        s.reveal_line(100);
        assert_eq!(s.y, 16);
        s.scroll_y_by(-20);
        assert_eq!(s.y, 0);
        s.scroll_y_by(50);
        assert_eq!(s.y, 16);
    }

    #[test]
    fn clipped_line_skips_columns_and_wide_chars() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 6, 2));
        render_line_clipped(0, 0, 2, 6, &mut buf, &Line::from("abcdefgh"));
        assert_eq!(row(&buf, 0), "cdefgh");
        render_line_clipped(0, 1, 1, 6, &mut buf, &Line::from("你好x"));
        assert_eq!(row(&buf, 1), "好x   ");
    }

    #[test]
    fn clipped_line_honors_alignment() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 6, 1));
        render_line_clipped(0, 0, 0, 6, &mut buf, &Line::from("ab").alignment(Alignment::Right));
        assert_eq!(row(&buf, 0), "    ab");
    }
}
