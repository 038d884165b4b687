//! First-fit placement.
//!
//! Both strategies answer the same question: what is the lowest offset
//! `o >= RESERVED_BYTES` such that `[o, o + size)` fits inside the arena and
//! overlaps no live slot?
//!
//! - [`scan_first_fit`] probes candidates one by one through the vacancy
//!   oracle. Cost is `O(capacity × live slots)` in the worst case.
//! - [`OccupancyIndex::first_fit`] walks live ranges in address order and
//!   returns the start of the first gap that is wide enough. Cost is
//!   `O(live slots)`.

use std::collections::BTreeMap;

use mman_core::{ByteRange, Handle, Slot};

use crate::arena::RESERVED_BYTES;
use crate::table::SlotTable;
use crate::vacancy::is_vacant;

/// Reference first-fit: probe every candidate start in ascending order.
///
/// Candidates run from [`RESERVED_BYTES`] through `capacity - size`, the last
/// start at which `size` bytes still fit. Returns `None` for `size == 0`,
/// for sizes that cannot fit at all, and when every candidate overlaps a
/// live slot.
pub fn scan_first_fit(table: &SlotTable, capacity: usize, size: usize) -> Option<Handle> {
    if size == 0 {
        return None;
    }
    let last_start = capacity.checked_sub(size)?;
    (RESERVED_BYTES..=last_start)
        .find(|&candidate| is_vacant(table, ByteRange::new(candidate, size)))
        .and_then(Handle::new)
}

/// Live ranges ordered by start offset.
///
/// Kept in sync with the slot table by the allocator: every `record` is
/// mirrored by [`insert`](Self::insert), every `clear` by
/// [`remove`](Self::remove).
#[derive(Clone, Debug, Default)]
pub struct OccupancyIndex {
    /// start offset → size in bytes.
    occupied: BTreeMap<usize, usize>,
}

impl OccupancyIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a newly live slot.
    pub fn insert(&mut self, slot: Slot) {
        let previous = self.occupied.insert(slot.offset(), slot.size());
        debug_assert!(previous.is_none(), "duplicate live start {}", slot.offset());
    }

    /// Stop tracking a released slot.
    pub fn remove(&mut self, slot: Slot) {
        self.occupied.remove(&slot.offset());
    }

    /// Number of tracked ranges.
    pub fn len(&self) -> usize {
        self.occupied.len()
    }

    /// Whether no ranges are tracked.
    pub fn is_empty(&self) -> bool {
        self.occupied.is_empty()
    }

    /// Vacant runs in ascending address order, as `(start, len)` pairs.
    ///
    /// Covers `[RESERVED_BYTES, capacity)`; zero-length gaps between
    /// adjacent slots are skipped.
    pub fn gaps(&self, capacity: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        let mut cursor = RESERVED_BYTES;
        let mut tail_done = false;
        let mut ranges = self.occupied.iter();
        std::iter::from_fn(move || loop {
            if let Some((&start, &len)) = ranges.next() {
                let gap = (cursor, start.saturating_sub(cursor));
                cursor = cursor.max(start + len);
                if gap.1 > 0 {
                    return Some(gap);
                }
            } else {
                if tail_done {
                    return None;
                }
                tail_done = true;
                let tail = capacity.saturating_sub(cursor);
                return (tail > 0).then_some((cursor, tail));
            }
        })
    }

    /// Lowest start of a vacant run of at least `size` bytes.
    pub fn first_fit(&self, capacity: usize, size: usize) -> Option<Handle> {
        if size == 0 {
            return None;
        }
        self.gaps(capacity)
            .find(|&(_, len)| len >= size)
            .and_then(|(start, _)| Handle::new(start))
    }

    /// Length of the longest vacant run.
    pub fn largest_gap(&self, capacity: usize) -> usize {
        self.gaps(capacity).map(|(_, len)| len).max().unwrap_or(0)
    }
}
