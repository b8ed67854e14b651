use std::fmt;
use std::ops::Range;

use crate::error::RangeError;

/// A half-open interval `[location, location + length)` over byte offsets of a rendered buffer.
///
/// The same type is used for selections, search matches and scroll targets. The algebra
/// (`contains`, `intersects`, `intersection`, ...) is defined for any range and never checks
/// bounds against a specific buffer: callers reject or clamp at the boundary with
/// [`TextRange::validate_against`] or [`TextRange::clamp_to`].
///
/// ```
/// use styledown_core::range::TextRange;
///
/// let r = TextRange::new(5, 3);
/// assert!(r.contains(7));
/// assert!(!r.contains(8));
/// assert!(!TextRange::new(0, 5).intersects(TextRange::new(5, 5)));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextRange {
    location: usize,
    length: usize,
}

impl TextRange {
    /// Creates a range. If `location + length` would overflow, the length saturates so that
    /// `end()` is `usize::MAX`; use [`Self::try_new`] to reject that case instead.
    pub const fn new(location: usize, length: usize) -> Self {
        let length = if length > usize::MAX - location {
            usize::MAX - location
        } else {
            length
        };
        Self { location, length }
    }

    pub fn try_new(location: usize, length: usize) -> Result<Self, RangeError> {
        match location.checked_add(length) {
            Some(_) => Ok(Self { location, length }),
            None => Err(RangeError::Overflow { location, length }),
        }
    }

    /// Builds a range from `start..end` bounds. Reversed bounds produce an empty range at `start`.
    pub const fn from_bounds(start: usize, end: usize) -> Self {
        let length = if end > start { end - start } else { 0 };
        Self {
            location: start,
            length,
        }
    }

    pub const fn empty_at(location: usize) -> Self {
        Self {
            location,
            length: 0,
        }
    }

    pub const fn location(self) -> usize {
        self.location
    }

    pub const fn length(self) -> usize {
        self.length
    }

    /// Exclusive end offset.
    pub const fn end(self) -> usize {
        self.location + self.length
    }

    pub const fn is_empty(self) -> bool {
        self.length == 0
    }

    pub const fn contains(self, pos: usize) -> bool {
        self.location <= pos && pos < self.end()
    }

    /// Returns `true` when both ranges share at least one position.
    ///
    /// Adjacent ranges do not intersect, and an empty range intersects nothing (itself included).
    pub const fn intersects(self, other: TextRange) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.location < other.end()
            && other.location < self.end()
    }

    /// Returns `true` when every position of `other` lies inside `self`.
    pub const fn contains_range(self, other: TextRange) -> bool {
        self.location <= other.location && other.end() <= self.end()
    }

    pub fn intersection(self, other: TextRange) -> Option<TextRange> {
        if !self.intersects(other) {
            return None;
        }
        let start = self.location.max(other.location);
        let end = self.end().min(other.end());
        Some(TextRange::from_bounds(start, end))
    }

    /// Smallest range covering both `self` and `other`.
    pub fn cover(self, other: TextRange) -> TextRange {
        let start = self.location.min(other.location);
        let end = self.end().max(other.end());
        TextRange::from_bounds(start, end)
    }

    /// Moves the range by a signed `delta`. Returns `None` if the result would leave `usize`.
    pub fn translate(self, delta: isize) -> Option<TextRange> {
        let location = self.location.checked_add_signed(delta)?;
        TextRange::try_new(location, self.length).ok()
    }

    /// Moves the range forward by `offset`, e.g. to lift a range local to one run into buffer
    /// coordinates.
    pub fn offset_by(self, offset: usize) -> Option<TextRange> {
        let location = self.location.checked_add(offset)?;
        TextRange::try_new(location, self.length).ok()
    }

    /// Clamps the range into `[0, len)`.
    pub fn clamp_to(self, len: usize) -> TextRange {
        let start = self.location.min(len);
        let end = self.end().min(len);
        TextRange::from_bounds(start, end)
    }

    /// Accepts the range only if it fits inside a buffer of `len` bytes.
    pub fn validate_against(self, len: usize) -> Result<TextRange, RangeError> {
        if self.end() > len {
            return Err(RangeError::OutOfBounds { range: self, len });
        }
        Ok(self)
    }

    pub fn as_range(self) -> Range<usize> {
        self.location..self.end()
    }
}

impl From<Range<usize>> for TextRange {
    fn from(value: Range<usize>) -> Self {
        TextRange::from_bounds(value.start, value.end)
    }
}

impl From<TextRange> for Range<usize> {
    fn from(value: TextRange) -> Self {
        value.as_range()
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.location, self.length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let r = TextRange::new(5, 3);
        assert!(!r.contains(4));
        assert!(r.contains(5));
        assert!(r.contains(7));
        assert!(!r.contains(8));
        assert_eq!(r.end(), 8);
    }

    #[test]
    fn adjacent_ranges_do_not_intersect() {
        assert!(!TextRange::new(0, 5).intersects(TextRange::new(5, 5)));
        assert!(!TextRange::new(5, 5).intersects(TextRange::new(0, 5)));
        assert!(TextRange::new(0, 5).intersects(TextRange::new(4, 5)));
        assert!(TextRange::new(4, 5).intersects(TextRange::new(0, 5)));
    }

    #[test]
    fn empty_ranges_intersect_nothing() {
        let empty = TextRange::empty_at(3);
        assert!(!empty.intersects(empty));
        assert!(!empty.intersects(TextRange::new(0, 10)));
        assert!(!TextRange::new(0, 10).intersects(empty));
        let r = TextRange::new(2, 4);
        assert!(r.intersects(r));
    }

    #[test]
    fn intersection_and_cover() {
        let a = TextRange::new(0, 5);
        let b = TextRange::new(3, 5);
        assert_eq!(a.intersection(b), Some(TextRange::new(3, 2)));
        assert_eq!(a.cover(b), TextRange::new(0, 8));
        assert_eq!(a.intersection(TextRange::new(5, 1)), None);
    }

    #[test]
    fn intersection_with_an_empty_range_is_none() {
        let r = TextRange::new(0, 10);
        assert_eq!(r.intersection(TextRange::empty_at(3)), None);
        assert_eq!(TextRange::empty_at(3).intersection(r), None);
        assert_eq!(TextRange::empty_at(3).intersection(TextRange::empty_at(3)), None);
    }

    #[test]
    fn overflow_is_rejected_by_try_new_and_saturated_by_new() {
        assert_eq!(
            TextRange::try_new(usize::MAX, 1),
            Err(RangeError::Overflow {
                location: usize::MAX,
                length: 1
            })
        );
        let r = TextRange::new(usize::MAX - 1, 10);
        assert_eq!(r.length(), 1);
        assert_eq!(r.end(), usize::MAX);
    }

    #[test]
    fn translate_checks_both_directions() {
        let r = TextRange::new(4, 2);
        assert_eq!(r.translate(3), Some(TextRange::new(7, 2)));
        assert_eq!(r.translate(-4), Some(TextRange::new(0, 2)));
        assert_eq!(r.translate(-5), None);
        assert_eq!(r.offset_by(10), Some(TextRange::new(14, 2)));
        assert_eq!(TextRange::new(1, usize::MAX - 1).offset_by(1), None);
    }

    #[test]
    fn boundary_helpers() {
        let r = TextRange::new(8, 10);
        assert_eq!(r.clamp_to(12), TextRange::new(8, 4));
        assert_eq!(r.clamp_to(4), TextRange::empty_at(4));
        assert_eq!(
            r.validate_against(12),
            Err(RangeError::OutOfBounds { range: r, len: 12 })
        );
        assert_eq!(r.validate_against(18), Ok(r));
    }

    #[test]
    fn converts_to_and_from_std_ranges() {
        let r: TextRange = (2..6).into();
        assert_eq!(r, TextRange::new(2, 4));
        let std: Range<usize> = r.into();
        assert_eq!(std, 2..6);
        assert_eq!(r.to_string(), "(2,4)");
    }
}
