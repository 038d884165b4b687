//! Fixed-capacity slot table.
//!
//! [`SlotTable`] records which byte ranges of the arena are live. Entries
//! are `Option<Slot>`: `None` is a vacant entry, `Some` a live allocation.
//! The entry count is fixed at construction; a full table is a resource
//! exhaustion condition, not a reason to grow.

use indexmap::IndexMap;
use mman_core::{Handle, Slot, SlotIndex};

/// Slot index → live allocation mapping with exact-offset lookup.
pub struct SlotTable {
    /// One entry per slot, live or vacant, in index order.
    slots: Vec<Option<Slot>>,
    /// Start offset of every live slot → its index. Kept in lockstep with
    /// `slots`; live starts are unique because live ranges are disjoint.
    by_handle: IndexMap<Handle, SlotIndex>,
}

impl SlotTable {
    /// Create a table with `capacity` vacant entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
            by_handle: IndexMap::with_capacity(capacity),
        }
    }

    /// Earliest vacant entry, or `None` if every entry is live.
    pub fn find_vacant_index(&self) -> Option<SlotIndex> {
        self.slots.iter().position(Option::is_none).map(SlotIndex)
    }

    /// Mark a vacant entry live.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range or the entry is already live.
    /// Callers pick `index` with [`find_vacant_index`](Self::find_vacant_index).
    pub fn record(&mut self, index: SlotIndex, slot: Slot) {
        let entry = &mut self.slots[index.0];
        assert!(
            entry.is_none(),
            "slot {index} is already live ({})",
            entry.map(|s| s.to_string()).unwrap_or_default()
        );
        *entry = Some(slot);
        self.by_handle.insert(slot.handle(), index);
    }

    /// Mark an entry vacant, returning the slot it held.
    ///
    /// Clearing an already vacant or out-of-range entry is a no-op.
    pub fn clear(&mut self, index: SlotIndex) -> Option<Slot> {
        let slot = self.slots.get_mut(index.0)?.take()?;
        self.by_handle.swap_remove(&slot.handle());
        Some(slot)
    }

    /// Index of the live slot starting exactly at `handle`.
    ///
    /// A handle pointing inside (but not at the start of) a live range
    /// does not match.
    pub fn find_by_offset(&self, handle: Handle) -> Option<SlotIndex> {
        self.by_handle.get(&handle).copied()
    }

    /// The live slot at `index`, if any.
    pub fn get(&self, index: SlotIndex) -> Option<Slot> {
        self.slots.get(index.0).copied().flatten()
    }

    /// Iterate over live slots in ascending index order.
    pub fn live(&self) -> impl Iterator<Item = (SlotIndex, Slot)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.map(|s| (SlotIndex(i), s)))
    }

    /// Total number of entries, live or vacant.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of live entries.
    pub fn live_count(&self) -> usize {
        self.by_handle.len()
    }

    /// Whether every entry is live.
    pub fn is_full(&self) -> bool {
        self.live_count() == self.capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroUsize;

    fn slot(offset: usize, size: usize) -> Slot {
        Slot::new(
            Handle::new(offset).unwrap(),
            NonZeroUsize::new(size).unwrap(),
        )
    }

    #[test]
    fn new_table_is_all_vacant() {
        let table = SlotTable::new(4);
        assert_eq!(table.capacity(), 4);
        assert_eq!(table.live_count(), 0);
        assert_eq!(table.find_vacant_index(), Some(SlotIndex(0)));
        assert_eq!(table.live().count(), 0);
    }

    #[test]
    fn vacant_search_returns_earliest_hole() {
        let mut table = SlotTable::new(4);
        table.record(SlotIndex(0), slot(1, 2));
        table.record(SlotIndex(1), slot(3, 2));
        table.record(SlotIndex(2), slot(5, 2));
        table.clear(SlotIndex(1));
        assert_eq!(table.find_vacant_index(), Some(SlotIndex(1)));
    }

    #[test]
    fn full_table_has_no_vacancy() {
        let mut table = SlotTable::new(2);
        table.record(SlotIndex(0), slot(1, 1));
        table.record(SlotIndex(1), slot(2, 1));
        assert!(table.is_full());
        assert_eq!(table.find_vacant_index(), None);
    }

    #[test]
    fn find_by_offset_is_exact() {
        let mut table = SlotTable::new(4);
        table.record(SlotIndex(2), slot(10, 5));
        assert_eq!(
            table.find_by_offset(Handle::new(10).unwrap()),
            Some(SlotIndex(2))
        );
        // Inside the range but not its start.
        assert_eq!(table.find_by_offset(Handle::new(12).unwrap()), None);
    }

    #[test]
    fn clear_returns_slot_and_forgets_offset() {
        let mut table = SlotTable::new(4);
        table.record(SlotIndex(0), slot(10, 5));
        assert_eq!(table.clear(SlotIndex(0)), Some(slot(10, 5)));
        assert_eq!(table.find_by_offset(Handle::new(10).unwrap()), None);
        assert_eq!(table.get(SlotIndex(0)), None);
        assert_eq!(table.clear(SlotIndex(0)), None);
    }

    #[test]
    fn clear_out_of_range_is_noop() {
        let mut table = SlotTable::new(1);
        assert_eq!(table.clear(SlotIndex(9)), None);
    }

    #[test]
    fn live_iterates_in_index_order() {
        let mut table = SlotTable::new(4);
        table.record(SlotIndex(3), slot(1, 1));
        table.record(SlotIndex(0), slot(50, 1));
        let order: Vec<_> = table.live().map(|(i, _)| i).collect();
        assert_eq!(order, vec![SlotIndex(0), SlotIndex(3)]);
    }

    #[test]
    #[should_panic(expected = "already live")]
    fn double_record_panics() {
        let mut table = SlotTable::new(2);
        table.record(SlotIndex(0), slot(1, 1));
        table.record(SlotIndex(0), slot(2, 1));
    }
}
