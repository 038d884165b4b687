//! Strongly-typed identifiers: arena handles, slot indices and command numbers.

use std::fmt;
use std::num::NonZeroUsize;

/// Arena byte offset at which a live allocation begins.
///
/// Offset 0 is reserved in every arena, so a handle is never zero. "No
/// address" is spelled `Option<Handle>`; the `NonZeroUsize` niche keeps that
/// the same size as a bare offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(NonZeroUsize);

impl Handle {
    /// Wrap a raw arena offset. Returns `None` for the reserved offset 0.
    pub const fn new(offset: usize) -> Option<Self> {
        match NonZeroUsize::new(offset) {
            Some(n) => Some(Self(n)),
            None => None,
        }
    }

    /// The arena byte offset this handle points at.
    pub const fn offset(self) -> usize {
        self.0.get()
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<NonZeroUsize> for Handle {
    fn from(v: NonZeroUsize) -> Self {
        Self(v)
    }
}

/// Position of an entry in the slot table.
///
/// Slot tables have a fixed capacity set at construction; `SlotIndex(n)`
/// is the n-th entry, counted from zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotIndex(pub usize);

impl fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for SlotIndex {
    fn from(v: usize) -> Self {
        Self(v)
    }
}

/// Zero-based position of a command within an input stream.
///
/// Reports print the zero-based value; free commands refer to their
/// target by the one-based [`ordinal`](CommandIndex::ordinal).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandIndex(pub usize);

impl CommandIndex {
    /// Build an index from a one-based command ordinal. Returns `None` for 0.
    pub fn from_ordinal(ordinal: usize) -> Option<Self> {
        ordinal.checked_sub(1).map(Self)
    }

    /// One-based ordinal of this command.
    pub fn ordinal(self) -> usize {
        self.0 + 1
    }
}

impl fmt::Display for CommandIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for CommandIndex {
    fn from(v: usize) -> Self {
        Self(v)
    }
}
