//! Byte ranges within an arena.

use std::fmt;

/// A non-empty run of arena bytes starting at `start` and `len` bytes long.
///
/// The covered bytes are the closed interval `[first(), last()]`, which is
/// the same set as the half-open `[start, end())`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ByteRange {
    start: usize,
    len: usize,
}

impl ByteRange {
    /// Create a range of `len` bytes beginning at `start`.
    ///
    /// # Panics
    ///
    /// Panics if `len` is zero or `start + len` overflows `usize`.
    pub fn new(start: usize, len: usize) -> Self {
        assert!(len > 0, "byte range must cover at least one byte");
        assert!(start.checked_add(len).is_some(), "byte range overflows usize");
        Self { start, len }
    }

    /// Create a range from inclusive bounds `[first, last]`.
    ///
    /// # Panics
    ///
    /// Panics if `last < first`.
    pub fn from_closed(first: usize, last: usize) -> Self {
        assert!(last >= first, "closed range [{first}, {last}] is inverted");
        Self::new(first, last - first + 1)
    }

    /// First byte covered.
    pub fn first(&self) -> usize {
        self.start
    }

    /// Last byte covered (inclusive).
    pub fn last(&self) -> usize {
        self.start + self.len - 1
    }

    /// One past the last byte covered.
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Number of bytes covered.
    pub fn size(&self) -> usize {
        self.len
    }

    /// Whether `offset` falls inside this range.
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end()
    }

    /// Whether the two ranges share at least one byte.
    pub fn intersects(&self, other: &ByteRange) -> bool {
        self.first() <= other.last() && other.first() <= self.last()
    }
}

impl fmt::Display for ByteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.first(), self.last())
    }
}
