//! `ratatui` presentation adapter.
//!
//! Terminals are one concrete layout engine for a [`StyledBuffer`]: this module maps resolved
//! attributes to [`Style`]s, splits the buffer into [`Line`]s and composites highlight overlays
//! (selection, search matches) on top of the run styles. Overlays are patched onto the
//! underlying style, so bold/italic/underline from the runs survive highlighting.
use ratatui::layout::Alignment;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::text::Text;
use unicode_width::UnicodeWidthStr;

use crate::buffer::StyledBuffer;
use crate::range::TextRange;
use crate::theme::RoleStyle;
use crate::theme::TextAttributes;

/// A highlight composited over a range of the buffer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Overlay {
    pub range: TextRange,
    pub style: Style,
}

impl Overlay {
    pub fn new(range: TextRange, style: Style) -> Self {
        Self { range, style }
    }

    /// Overlay using the foreground/background of a highlight role.
    pub fn from_role(range: TextRange, role: &RoleStyle) -> Self {
        let mut style = Style::default().fg(role.foreground);
        if let Some(bg) = role.background {
            style = style.bg(bg);
        }
        Self { range, style }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerminalRenderOptions {
    /// Layout units per terminal cell, used to turn head indents into leading cells.
    pub units_per_cell: f32,
    /// Emit a blank line after a paragraph break whose `spacing_after` reaches this value.
    /// Line breaks inside a block (code, hard breaks) never get one.
    pub gap_threshold: f32,
    pub paragraph_gaps: bool,
}

impl Default for TerminalRenderOptions {
    fn default() -> Self {
        Self {
            units_per_cell: 10.0,
            gap_threshold: 8.0,
            paragraph_gaps: true,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct RenderedText {
    text: Text<'static>,
    source_lines: Vec<(usize, TextRange)>,
    content_width: u32,
}

impl RenderedText {
    pub fn text(&self) -> &Text<'static> {
        &self.text
    }

    pub fn into_text(self) -> Text<'static> {
        self.text
    }

    /// Returns `(content_width, content_height)` in terminal cell units.
    pub fn content_size(&self) -> (u32, u32) {
        (self.content_width, self.text.lines.len() as u32)
    }

    /// Buffer range shown by each non-gap line, with that line's index in [`Self::text`].
    pub fn source_lines(&self) -> &[(usize, TextRange)] {
        &self.source_lines
    }

    /// Index of the rendered line showing `offset`. Offsets sitting on a line's `\n` belong to
    /// that line.
    pub fn line_for_offset(&self, offset: usize) -> Option<usize> {
        let idx = self
            .source_lines
            .partition_point(|(_, range)| range.end() < offset);
        let (line, range) = self.source_lines.get(idx)?;
        (range.location() <= offset).then_some(*line)
    }

    /// Line to scroll to so that `range` starts in view.
    pub fn line_for_range(&self, range: TextRange) -> Option<usize> {
        self.line_for_offset(range.location())
    }
}

pub fn attributes_style(attrs: &TextAttributes) -> Style {
    let mut style = Style::default().fg(attrs.foreground);
    if let Some(bg) = attrs.background {
        style = style.bg(bg);
    }
    if attrs.font.bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    if attrs.font.italic {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if attrs.link.is_some() {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    style
}

/// Renders `buffer` into terminal lines, compositing `overlays` in order (later overlays win
/// where they overlap).
pub fn render_text(
    buffer: &StyledBuffer,
    overlays: &[Overlay],
    options: &TerminalRenderOptions,
) -> RenderedText {
    let text = buffer.text();
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut source_lines = Vec::new();
    let mut content_width = 0u32;

    let mut start = 0usize;
    while start < text.len() {
        let end = text[start..]
            .find('\n')
            .map_or(text.len(), |idx| start + idx);
        let has_break = end < text.len();
        let line_range = TextRange::from_bounds(start, end);

        let para_attrs = buffer
            .attributes_at(start)
            .or_else(|| buffer.attributes_at(end));
        let (alignment, indent) = match para_attrs {
            Some(attrs) => (
                attrs.paragraph.alignment,
                indent_cells(attrs.paragraph.head_indent, options.units_per_cell),
            ),
            None => (Alignment::Left, 0),
        };

        let mut spans = Vec::new();
        if indent > 0 {
            spans.push(Span::raw(" ".repeat(indent)));
        }
        for (range, attrs) in buffer.runs_in(line_range) {
            push_overlaid_spans(&mut spans, text, range, attributes_style(attrs), overlays);
        }

        let width = spans
            .iter()
            .map(|s| UnicodeWidthStr::width(s.content.as_ref()) as u32)
            .sum::<u32>();
        content_width = content_width.max(width);

        source_lines.push((lines.len(), line_range));
        lines.push(Line::from(spans).alignment(alignment));

        if has_break && options.paragraph_gaps && buffer.is_paragraph_break(end) {
            let gap = buffer
                .attributes_at(end)
                .is_some_and(|attrs| attrs.paragraph.spacing_after >= options.gap_threshold);
            let more = end + 1 < text.len();
            if gap && more {
                lines.push(Line::default());
            }
        }
        start = end + 1;
    }

    RenderedText {
        text: Text::from(lines),
        source_lines,
        content_width,
    }
}

fn indent_cells(head_indent: f32, units_per_cell: f32) -> usize {
    let cells = (head_indent / units_per_cell).round();
    if units_per_cell <= 0.0 || head_indent <= 0.0 || cells.is_nan() {
        return 0;
    }
    cells.min(f32::from(u16::MAX)) as usize
}

fn push_overlaid_spans(
    out: &mut Vec<Span<'static>>,
    text: &str,
    range: TextRange,
    base: Style,
    overlays: &[Overlay],
) {
    let mut cuts = vec![range.location(), range.end()];
    for overlay in overlays.iter().filter(|o| o.range.intersects(range)) {
        for p in [overlay.range.location(), overlay.range.end()] {
            if range.contains(p) && text.is_char_boundary(p) {
                cuts.push(p);
            }
        }
    }
    cuts.sort_unstable();
    cuts.dedup();

    for pair in cuts.windows(2) {
        let piece = TextRange::from_bounds(pair[0], pair[1]);
        let Some(content) = text.get(piece.as_range()) else {
            continue;
        };
        let style = overlays
            .iter()
            .filter(|o| o.range.intersects(piece))
            .fold(base, |style, o| style.patch(o.style));
        out.push(Span::styled(content.to_string(), style));
    }
}
