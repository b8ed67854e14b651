//! Flattened styled text.
//!
//! A [`Compositor`] receives runs in reading order and concatenates them into a single
//! [`StyledBuffer`]: one `String` plus an ordered list of attribute intervals that covers every
//! byte of it exactly once.
//!
//! Offsets handed out by [`Compositor::offset`] are the only way to map a piece of input back to
//! its place in the buffer. A resolver reads the offset before and after visiting a node and
//! stores the window as a [`TextRange`]; selection, search and scroll targets all rely on those
//! windows being exact.
//!
//! Block ends are recorded separately with [`Compositor::push_break`]. A `\n` inside a code
//! block or from a hard line break is text; only a recorded break ends a paragraph, and only
//! those breaks get paragraph spacing in presentation.
use crate::range::TextRange;
use crate::theme::TextAttributes;

/// A piece of text with the attributes it was produced under.
#[derive(Clone, Debug, PartialEq)]
pub struct StyledRun {
    pub text: String,
    pub attributes: TextAttributes,
}

impl StyledRun {
    pub fn new(text: impl Into<String>, attributes: TextAttributes) -> Self {
        Self {
            text: text.into(),
            attributes,
        }
    }
}

/// One attribute interval of a [`StyledBuffer`].
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeRun {
    pub range: TextRange,
    pub attributes: TextAttributes,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyledBuffer {
    text: String,
    runs: Vec<AttributeRun>,
    breaks: Vec<usize>,
}

impl StyledBuffer {
    /// Builds a buffer from runs in reading order.
    pub fn from_runs<I>(runs: I) -> Self
    where
        I: IntoIterator<Item = StyledRun>,
    {
        let mut compositor = Compositor::new();
        for run in runs {
            compositor.push(&run.text, &run.attributes);
        }
        compositor.finish()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Attribute intervals, ascending, contiguous, covering `[0, len)`.
    pub fn runs(&self) -> &[AttributeRun] {
        &self.runs
    }

    /// Range covering the whole buffer.
    pub fn full_range(&self) -> TextRange {
        TextRange::new(0, self.text.len())
    }

    /// Index of the interval containing `offset`.
    pub fn run_index_at(&self, offset: usize) -> Option<usize> {
        if offset >= self.text.len() {
            return None;
        }
        let idx = self
            .runs
            .partition_point(|run| run.range.end() <= offset);
        (idx < self.runs.len()).then_some(idx)
    }

    pub fn attributes_at(&self, offset: usize) -> Option<&TextAttributes> {
        self.run_index_at(offset).map(|idx| &self.runs[idx].attributes)
    }

    /// Intervals overlapping `range`, clipped to it.
    pub fn runs_in(&self, range: TextRange) -> impl Iterator<Item = (TextRange, &TextAttributes)> {
        let first = self
            .runs
            .partition_point(|run| run.range.end() <= range.location());
        self.runs[first..]
            .iter()
            .take_while(move |run| run.range.location() < range.end())
            .filter_map(move |run| {
                run.range
                    .intersection(range)
                    .map(|clipped| (clipped, &run.attributes))
            })
    }

    /// Offsets of the `\n`s that end a paragraph or block, ascending.
    pub fn paragraph_breaks(&self) -> &[usize] {
        &self.breaks
    }

    pub fn is_paragraph_break(&self, offset: usize) -> bool {
        self.breaks.binary_search(&offset).is_ok()
    }

    /// Text covered by `range`, if it is in bounds and on character boundaries.
    pub fn slice(&self, range: TextRange) -> Option<&str> {
        self.text.get(range.as_range())
    }

    /// Number of `\n`-separated lines (a trailing newline does not start a new line).
    pub fn line_count(&self) -> usize {
        if self.text.is_empty() {
            return 0;
        }
        let breaks = self.text.matches('\n').count();
        if self.text.ends_with('\n') {
            breaks
        } else {
            breaks + 1
        }
    }
}

/// Appends runs and keeps the running offset.
///
/// Empty runs are dropped and a run whose attributes equal the previous run's extends that
/// interval, so every interval in the finished buffer is a maximal span of one style.
#[derive(Clone, Debug, Default)]
pub struct Compositor {
    text: String,
    runs: Vec<AttributeRun>,
    breaks: Vec<usize>,
}

impl Compositor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start offset the next run will receive.
    pub fn offset(&self) -> usize {
        self.text.len()
    }

    /// Returns `true` at the start of the buffer or right after a `\n`.
    pub fn at_line_start(&self) -> bool {
        self.text.is_empty() || self.text.ends_with('\n')
    }

    /// Appends a run and returns the range it occupies.
    pub fn push(&mut self, text: &str, attributes: &TextAttributes) -> TextRange {
        let start = self.text.len();
        if text.is_empty() {
            return TextRange::empty_at(start);
        }
        self.text.push_str(text);
        let end = self.text.len();

        match self.runs.last_mut() {
            Some(last) if last.attributes == *attributes && last.range.end() == start => {
                last.range = TextRange::from_bounds(last.range.location(), end);
            }
            _ => self.runs.push(AttributeRun {
                range: TextRange::from_bounds(start, end),
                attributes: attributes.clone(),
            }),
        }
        TextRange::from_bounds(start, end)
    }

    /// Appends a `\n` that ends a paragraph or block.
    pub fn push_break(&mut self, attributes: &TextAttributes) -> TextRange {
        let range = self.push("\n", attributes);
        self.breaks.push(range.location());
        range
    }

    /// Range between `start` (an earlier [`Self::offset`]) and the current offset.
    pub fn range_since(&self, start: usize) -> TextRange {
        TextRange::from_bounds(start, self.offset())
    }

    pub fn finish(self) -> StyledBuffer {
        StyledBuffer {
            text: self.text,
            runs: self.runs,
            breaks: self.breaks,
        }
    }
}
