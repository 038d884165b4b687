//! Read-only access to allocator state.

use crate::id::SlotIndex;
use crate::slot::Slot;

/// A read-only view of an arena and its slot table.
///
/// Persistence and reporting code is written against this trait rather
/// than a concrete allocator, so it cannot mutate what it inspects.
pub trait ArenaView {
    /// The full arena contents, including the reserved byte at offset 0.
    fn arena_bytes(&self) -> &[u8];

    /// Number of entries in the slot table, live or vacant.
    fn slot_capacity(&self) -> usize;

    /// The live slot at `index`, or `None` if the entry is vacant or out
    /// of range.
    fn slot(&self, index: SlotIndex) -> Option<Slot>;
}
