//! Error types for range handling at the presentation boundary.
use thiserror::Error;

use crate::range::TextRange;

/// A range that cannot be used as-is.
///
/// The range algebra itself never fails; these errors come from constructors that check for
/// overflow and from validation against a concrete buffer length.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangeError {
    #[error("range overflows: location {location} + length {length}")]
    Overflow { location: usize, length: usize },

    #[error("range {range} is out of bounds for text of length {len}")]
    OutOfBounds { range: TextRange, len: usize },
}
