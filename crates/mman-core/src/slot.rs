//! Live slot records.

use std::fmt;
use std::num::NonZeroUsize;

use crate::id::Handle;
use crate::range::ByteRange;

/// A live allocation: where it starts and how many bytes it occupies.
///
/// Vacant slot table entries are represented by the absence of a `Slot`
/// (`Option<Slot>::None`), so every `Slot` value is live by construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Slot {
    handle: Handle,
    size: NonZeroUsize,
}

impl Slot {
    /// Create a live slot record.
    pub fn new(handle: Handle, size: NonZeroUsize) -> Self {
        Self { handle, size }
    }

    /// The handle (start offset) of this allocation.
    pub fn handle(&self) -> Handle {
        self.handle
    }

    /// Start offset in arena bytes.
    pub fn offset(&self) -> usize {
        self.handle.offset()
    }

    /// Allocation size in bytes.
    pub fn size(&self) -> usize {
        self.size.get()
    }

    /// The bytes this slot occupies.
    pub fn range(&self) -> ByteRange {
        ByteRange::new(self.offset(), self.size())
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Slot(off={}, size={})", self.offset(), self.size())
    }
}
