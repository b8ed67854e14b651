use crate::buffer::StyledBuffer;
use crate::range::TextRange;

/// A user selection expressed as two buffer offsets.
///
/// `anchor` is where the selection started and `head` where it currently ends; either may come
/// first. Gesture handling is left to the app: it feeds offsets in and reads [`Selection::range`]
/// back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub anchor: usize,
    pub head: usize,
}

impl Selection {
    pub fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    /// A collapsed selection (caret) at `offset`.
    pub fn caret(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    pub fn from_range(range: TextRange) -> Self {
        Self::new(range.location(), range.end())
    }

    pub fn select_all(buffer: &StyledBuffer) -> Self {
        Self::new(0, buffer.len())
    }

    pub fn extend_to(&mut self, head: usize) {
        self.head = head;
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.head
    }

    /// Normalized range, regardless of selection direction.
    pub fn range(&self) -> TextRange {
        TextRange::from_bounds(self.anchor.min(self.head), self.anchor.max(self.head))
    }

    /// The selected text, or `None` when the selection is collapsed, out of bounds, or splits a
    /// character.
    pub fn text<'a>(&self, buffer: &'a StyledBuffer) -> Option<&'a str> {
        if self.is_collapsed() {
            return None;
        }
        buffer.slice(self.range())
    }
}
