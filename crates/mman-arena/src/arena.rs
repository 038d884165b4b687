//! The fixed-size backing buffer.
//!
//! An [`Arena`] is a single zero-initialised `Vec<u8>` allocated to full
//! capacity at creation. It never grows, shrinks, or reallocates; every
//! allocation handed out by the allocator is a byte range inside it.

use mman_core::ByteRange;

/// Number of bytes at the start of every arena that are never handed out.
///
/// Offset 0 stays reserved so that no allocation can begin there, which
/// keeps dumped offsets compatible with tools that treat 0 as null.
pub const RESERVED_BYTES: usize = 1;

/// Contiguous, fixed-capacity byte storage.
pub struct Arena {
    /// Backing storage. Allocated to full capacity at creation.
    data: Vec<u8>,
}

impl Arena {
    /// Create a zero-filled arena of `capacity` bytes.
    pub fn new(capacity: usize) -> Self {
        Self {
            data: vec![0; capacity],
        }
    }

    /// Total size in bytes, including the reserved prefix.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Whether `range` lies entirely inside the arena.
    pub fn contains(&self, range: ByteRange) -> bool {
        range.end() <= self.data.len()
    }

    /// Shared view of `range`.
    ///
    /// # Panics
    ///
    /// Panics if `range` extends past the end of the arena.
    pub fn slice(&self, range: ByteRange) -> &[u8] {
        &self.data[range.first()..range.end()]
    }

    /// Mutable view of `range`.
    ///
    /// # Panics
    ///
    /// Panics if `range` extends past the end of the arena.
    pub fn slice_mut(&mut self, range: ByteRange) -> &mut [u8] {
        &mut self.data[range.first()..range.end()]
    }

    /// The whole arena, byte for byte.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}
