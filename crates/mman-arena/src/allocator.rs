//! The allocator: placement plus slot table over one arena.
//!
//! [`Allocator`] is the single owner of the arena bytes, the slot table and
//! the occupancy index. Every mutating operation takes `&mut self`, so the
//! placement scan and the slot record that follows it can never interleave
//! with another allocation.

use std::num::NonZeroUsize;

use mman_core::{AllocError, ArenaView, ByteRange, Handle, ReleaseError, Slot, SlotIndex};
use tracing::trace;

use crate::arena::Arena;
use crate::config::{ArenaConfig, PlacementStrategy};
use crate::error::ArenaError;
use crate::placement::{scan_first_fit, OccupancyIndex};
use crate::table::SlotTable;
use crate::usage::Usage;

/// First-fit allocator over a fixed-size arena.
///
/// # Examples
///
/// ```
/// use mman_arena::{Allocator, ArenaConfig};
/// use mman_core::AllocError;
///
/// let mut alloc = Allocator::new(ArenaConfig::new(16, 4)).unwrap();
/// let a = alloc.allocate(4).unwrap();
/// let b = alloc.allocate(3).unwrap();
/// assert_eq!((a.offset(), b.offset()), (1, 5));
///
/// // Releasing `a` opens a gap that the next fitting request reuses.
/// alloc.release(a);
/// assert_eq!(alloc.allocate(4).unwrap().offset(), 1);
///
/// assert_eq!(alloc.allocate(20), Err(AllocError::OutOfMemory { requested: 20 }));
/// ```
pub struct Allocator {
    config: ArenaConfig,
    arena: Arena,
    table: SlotTable,
    occupancy: OccupancyIndex,
}

impl Allocator {
    /// Validate `config` and allocate the arena and slot table up front.
    pub fn new(config: ArenaConfig) -> Result<Self, ArenaError> {
        config.validate()?;
        Ok(Self {
            arena: Arena::new(config.total_capacity),
            table: SlotTable::new(config.max_slots),
            occupancy: OccupancyIndex::new(),
            config,
        })
    }

    /// The configuration this allocator was built with.
    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Lowest offset whose following `size` bytes are vacant, using the
    /// configured strategy. Does not modify any state.
    pub fn select_address(&self, size: usize) -> Option<Handle> {
        let capacity = self.arena.capacity();
        match self.config.placement {
            PlacementStrategy::Scan => scan_first_fit(&self.table, capacity, size),
            PlacementStrategy::Indexed => self.occupancy.first_fit(capacity, size),
        }
    }

    /// Allocate `size` zero-filled bytes.
    ///
    /// Placement is resolved before the slot table is consulted, so a
    /// request that fits nowhere reports `OutOfMemory` even when the table
    /// is also full. On any error the allocator is left untouched.
    pub fn allocate(&mut self, size: usize) -> Result<Handle, AllocError> {
        let size_nz = NonZeroUsize::new(size).ok_or(AllocError::ZeroSize)?;

        let Some(handle) = self.select_address(size) else {
            trace!(size, "allocation failed: no vacant run");
            return Err(AllocError::OutOfMemory { requested: size });
        };
        let Some(index) = self.table.find_vacant_index() else {
            trace!(size, "allocation failed: slot table full");
            return Err(AllocError::SlotExhausted {
                max_slots: self.table.capacity(),
            });
        };

        let slot = Slot::new(handle, size_nz);
        self.table.record(index, slot);
        self.occupancy.insert(slot);
        self.arena.slice_mut(slot.range()).fill(0);
        trace!(offset = handle.offset(), size, slot = index.0, "allocated");
        Ok(handle)
    }

    /// Allocate exactly `payload.len()` bytes and copy `payload` into them.
    pub fn allocate_bytes(&mut self, payload: &[u8]) -> Result<Handle, AllocError> {
        let handle = self.allocate(payload.len())?;
        self.arena
            .slice_mut(ByteRange::new(handle.offset(), payload.len()))
            .copy_from_slice(payload);
        Ok(handle)
    }

    /// Release the allocation starting exactly at `handle`.
    ///
    /// Returns the released slot, or `None` if no live slot starts at
    /// `handle`. An unmatched handle, including one that points into the
    /// middle of a live range, leaves all state unchanged. Released bytes
    /// keep their contents until the range is allocated again.
    pub fn release(&mut self, handle: Handle) -> Option<Slot> {
        let Some(index) = self.table.find_by_offset(handle) else {
            trace!(offset = handle.offset(), "release ignored: no live slot at offset");
            return None;
        };
        let slot = self.table.clear(index)?;
        self.occupancy.remove(slot);
        trace!(offset = slot.offset(), size = slot.size(), slot = index.0, "released");
        Some(slot)
    }

    /// Release by raw arena offset.
    ///
    /// Offset 0 is the reserved null address and is rejected; any other
    /// offset behaves like [`release`](Self::release).
    pub fn release_offset(&mut self, offset: usize) -> Result<Option<Slot>, ReleaseError> {
        let handle = Handle::new(offset).ok_or(ReleaseError::NullHandle)?;
        Ok(self.release(handle))
    }

    /// The live slot starting at `handle`, if any.
    pub fn slot(&self, handle: Handle) -> Option<Slot> {
        self.table
            .find_by_offset(handle)
            .and_then(|index| self.table.get(index))
    }

    /// The bytes of the live allocation starting at `handle`.
    pub fn bytes(&self, handle: Handle) -> Option<&[u8]> {
        let slot = self.slot(handle)?;
        Some(self.arena.slice(slot.range()))
    }

    /// Mutable bytes of the live allocation starting at `handle`.
    pub fn bytes_mut(&mut self, handle: Handle) -> Option<&mut [u8]> {
        let slot = self.slot(handle)?;
        Some(self.arena.slice_mut(slot.range()))
    }

    /// Copy `data` into the start of the allocation at `handle`.
    pub fn write(&mut self, handle: Handle, data: &[u8]) -> Result<(), ArenaError> {
        let slot = self
            .slot(handle)
            .ok_or(ArenaError::UnknownHandle { handle })?;
        if data.len() > slot.size() {
            return Err(ArenaError::RegionOverflow {
                handle,
                size: slot.size(),
                requested: data.len(),
            });
        }
        if !data.is_empty() {
            self.arena
                .slice_mut(ByteRange::new(slot.offset(), data.len()))
                .copy_from_slice(data);
        }
        Ok(())
    }

    /// Live slots in ascending slot-index order.
    pub fn live_slots(&self) -> impl Iterator<Item = (SlotIndex, Slot)> + '_ {
        self.table.live()
    }

    /// Number of live allocations.
    pub fn live_count(&self) -> usize {
        self.table.live_count()
    }

    /// Arena size in bytes, including the reserved prefix.
    pub fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    /// Summarise current occupancy.
    pub fn usage(&self) -> Usage {
        Usage {
            live_slots: self.table.live_count(),
            max_slots: self.table.capacity(),
            live_bytes: self.table.live().map(|(_, s)| s.size()).sum(),
            usable_bytes: self.config.usable_bytes(),
            largest_vacant_run: self.occupancy.largest_gap(self.arena.capacity()),
        }
    }
}

impl ArenaView for Allocator {
    fn arena_bytes(&self) -> &[u8] {
        self.arena.as_bytes()
    }

    fn slot_capacity(&self) -> usize {
        self.table.capacity()
    }

    fn slot(&self, index: SlotIndex) -> Option<Slot> {
        self.table.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small(strategy: PlacementStrategy) -> Allocator {
        Allocator::new(ArenaConfig::new(16, 4).with_placement(strategy)).unwrap()
    }

    fn live(alloc: &Allocator) -> Vec<(SlotIndex, Slot)> {
        alloc.live_slots().collect()
    }

    #[test]
    fn gap_reuse_scenario() {
        for strategy in [PlacementStrategy::Scan, PlacementStrategy::Indexed] {
            let mut alloc = small(strategy);
            let a = alloc.allocate(4).unwrap();
            assert_eq!(a.offset(), 1);
            let b = alloc.allocate(3).unwrap();
            assert_eq!(b.offset(), 5);

            assert!(alloc.release(a).is_some());
            assert_eq!(alloc.live_count(), 1);

            let c = alloc.allocate(4).unwrap();
            assert_eq!(c.offset(), 1, "{strategy}: freed gap before [5, 7] reused");

            assert_eq!(
                alloc.allocate(20),
                Err(AllocError::OutOfMemory { requested: 20 })
            );
        }
    }

    #[test]
    fn slot_exhaustion_with_bytes_to_spare() {
        let mut alloc = small(PlacementStrategy::Scan);
        let offsets: Vec<_> = (0..4).map(|_| alloc.allocate(1).unwrap().offset()).collect();
        assert_eq!(offsets, vec![1, 2, 3, 4]);
        assert_eq!(
            alloc.allocate(1),
            Err(AllocError::SlotExhausted { max_slots: 4 })
        );
        assert!(alloc.usage().largest_vacant_run >= 1);
    }

    #[test]
    fn out_of_memory_takes_precedence_over_full_table() {
        let mut alloc = small(PlacementStrategy::Scan);
        for _ in 0..4 {
            alloc.allocate(1).unwrap();
        }
        assert_eq!(
            alloc.allocate(15),
            Err(AllocError::OutOfMemory { requested: 15 })
        );
    }

    #[test]
    fn zero_size_is_rejected() {
        let mut alloc = small(PlacementStrategy::Scan);
        assert_eq!(alloc.allocate(0), Err(AllocError::ZeroSize));
        assert_eq!(alloc.live_count(), 0);
    }

    #[test]
    fn failed_allocation_leaves_state_unchanged() {
        let mut alloc = small(PlacementStrategy::Scan);
        alloc.allocate(10).unwrap();
        let before = live(&alloc);
        let bytes_before = alloc.arena_bytes().to_vec();
        assert!(alloc.allocate(6).is_err());
        assert_eq!(live(&alloc), before);
        assert_eq!(alloc.arena_bytes(), bytes_before.as_slice());
    }

    #[test]
    fn release_unknown_handle_is_noop() {
        let mut alloc = small(PlacementStrategy::Scan);
        let a = alloc.allocate(4).unwrap();
        let before = live(&alloc);

        // Inside [1, 4] but not its start.
        assert_eq!(alloc.release(Handle::new(2).unwrap()), None);
        // Never allocated.
        assert_eq!(alloc.release(Handle::new(9).unwrap()), None);
        assert_eq!(live(&alloc), before);

        assert!(alloc.release(a).is_some());
        // Double release is also a no-op.
        assert_eq!(alloc.release(a), None);
    }

    #[test]
    fn release_offset_rejects_null() {
        let mut alloc = small(PlacementStrategy::Scan);
        assert_eq!(alloc.release_offset(0), Err(ReleaseError::NullHandle));
        let a = alloc.allocate(2).unwrap();
        let released = alloc.release_offset(a.offset()).unwrap();
        assert_eq!(released.map(|s| s.size()), Some(2));
    }

    #[test]
    fn allocate_bytes_copies_payload() {
        let mut alloc = small(PlacementStrategy::Scan);
        let h = alloc.allocate_bytes(b"abc\0").unwrap();
        assert_eq!(alloc.bytes(h), Some(&b"abc\0"[..]));
        assert_eq!(&alloc.arena_bytes()[1..5], b"abc\0");
    }

    #[test]
    fn reallocated_region_is_zeroed() {
        let mut alloc = small(PlacementStrategy::Scan);
        let h = alloc.allocate_bytes(b"xyzw").unwrap();
        alloc.release(h);
        // Released bytes keep their contents...
        assert_eq!(&alloc.arena_bytes()[1..5], b"xyzw");
        // ...until the range is handed out again.
        let h2 = alloc.allocate(4).unwrap();
        assert_eq!(h2, h);
        assert_eq!(alloc.bytes(h2), Some(&[0u8; 4][..]));
    }

    #[test]
    fn write_checks_bounds_and_liveness() {
        let mut alloc = small(PlacementStrategy::Scan);
        let h = alloc.allocate(3).unwrap();
        alloc.write(h, b"ab").unwrap();
        assert_eq!(alloc.bytes(h), Some(&b"ab\0"[..]));
        assert!(matches!(
            alloc.write(h, b"abcd"),
            Err(ArenaError::RegionOverflow { size: 3, requested: 4, .. })
        ));
        let stray = Handle::new(10).unwrap();
        assert_eq!(
            alloc.write(stray, b"a"),
            Err(ArenaError::UnknownHandle { handle: stray })
        );
    }

    #[test]
    fn bytes_mut_edits_in_place() {
        let mut alloc = small(PlacementStrategy::Scan);
        let h = alloc.allocate(2).unwrap();
        alloc.bytes_mut(h).unwrap()[1] = 9;
        assert_eq!(alloc.arena_bytes()[2], 9);
    }

    #[test]
    fn usage_tracks_live_bytes_and_gaps() {
        let mut alloc = small(PlacementStrategy::Scan);
        let a = alloc.allocate(4).unwrap();
        alloc.allocate(3).unwrap();
        alloc.release(a);
        let usage = alloc.usage();
        assert_eq!(usage.live_slots, 1);
        assert_eq!(usage.live_bytes, 3);
        assert_eq!(usage.usable_bytes, 15);
        assert_eq!(usage.vacant_bytes(), 12);
        // [8, 15] is 8 bytes, [1, 4] is 4.
        assert_eq!(usage.largest_vacant_run, 8);
    }

    #[test]
    fn view_exposes_table_in_index_order() {
        let mut alloc = small(PlacementStrategy::Scan);
        let a = alloc.allocate(2).unwrap();
        alloc.allocate(2).unwrap();
        alloc.release(a);
        assert_eq!(alloc.slot_capacity(), 4);
        assert_eq!(ArenaView::slot(&alloc, SlotIndex(0)), None);
        assert_eq!(
            ArenaView::slot(&alloc, SlotIndex(1)).map(|s| s.offset()),
            Some(3)
        );
    }

    #[test]
    fn invalid_config_rejected() {
        assert!(matches!(
            Allocator::new(ArenaConfig::new(1, 4)),
            Err(ArenaError::InvalidConfig { .. })
        ));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Clone, Debug)]
        enum Op {
            Alloc(usize),
            /// Release the n-th live handle (mod live count).
            Free(usize),
            /// Release an arbitrary raw offset.
            Stray(usize),
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                3 => (1usize..12).prop_map(Op::Alloc),
                2 => (0usize..16).prop_map(Op::Free),
                1 => (1usize..64).prop_map(Op::Stray),
            ]
        }

        fn run(strategy: PlacementStrategy, ops: &[Op]) -> (Allocator, Vec<Result<usize, AllocError>>) {
            let mut alloc =
                Allocator::new(ArenaConfig::new(64, 6).with_placement(strategy)).unwrap();
            let mut handles: Vec<Handle> = Vec::new();
            let mut results = Vec::new();
            for op in ops {
                match *op {
                    Op::Alloc(size) => {
                        let r = alloc.allocate(size);
                        if let Ok(h) = r {
                            handles.push(h);
                        }
                        results.push(r.map(Handle::offset));
                    }
                    Op::Free(n) if !handles.is_empty() => {
                        let h = handles.remove(n % handles.len());
                        alloc.release(h);
                    }
                    Op::Free(_) => {}
                    Op::Stray(offset) => {
                        if alloc.release_offset(offset).ok().flatten().is_some() {
                            handles.retain(|h| h.offset() != offset);
                        }
                    }
                }
            }
            (alloc, results)
        }

        proptest! {
            #[test]
            fn live_slots_never_overlap(ops in proptest::collection::vec(op(), 0..60)) {
                let (alloc, _) = run(PlacementStrategy::Scan, &ops);
                let slots: Vec<Slot> = alloc.live_slots().map(|(_, s)| s).collect();
                for (i, a) in slots.iter().enumerate() {
                    prop_assert!(a.offset() >= 1);
                    prop_assert!(a.range().end() <= alloc.capacity());
                    for b in &slots[i + 1..] {
                        prop_assert!(!a.range().intersects(&b.range()), "{a} overlaps {b}");
                    }
                }
            }

            #[test]
            fn strategies_agree_on_every_offset(ops in proptest::collection::vec(op(), 0..60)) {
                let (scan, scan_results) = run(PlacementStrategy::Scan, &ops);
                let (indexed, indexed_results) = run(PlacementStrategy::Indexed, &ops);
                prop_assert_eq!(scan_results, indexed_results);
                prop_assert_eq!(live(&scan), live(&indexed));
            }

            #[test]
            fn identical_histories_are_deterministic(ops in proptest::collection::vec(op(), 0..60)) {
                let (a, ra) = run(PlacementStrategy::Scan, &ops);
                let (b, rb) = run(PlacementStrategy::Scan, &ops);
                prop_assert_eq!(ra, rb);
                prop_assert_eq!(a.arena_bytes(), b.arena_bytes());
            }

            #[test]
            fn release_then_reallocate_returns_same_offset(
                ops in proptest::collection::vec(op(), 0..40),
                size in 1usize..12,
            ) {
                let (mut alloc, _) = run(PlacementStrategy::Scan, &ops);
                if let Ok(h) = alloc.allocate(size) {
                    alloc.release(h);
                    prop_assert_eq!(alloc.allocate(size), Ok(h));
                }
            }

            #[test]
            fn failed_allocation_is_all_or_nothing(
                ops in proptest::collection::vec(op(), 0..60),
                size in 1usize..80,
            ) {
                let (mut alloc, _) = run(PlacementStrategy::Scan, &ops);
                let before = live(&alloc);
                if alloc.allocate(size).is_err() {
                    prop_assert_eq!(live(&alloc), before);
                }
            }
        }
    }
}
