//! Point-in-time allocator usage summary.

use std::fmt;

/// Occupancy figures computed by [`Allocator::usage`](crate::Allocator::usage).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Usage {
    /// Live slot table entries.
    pub live_slots: usize,
    /// Slot table capacity.
    pub max_slots: usize,
    /// Bytes covered by live slots.
    pub live_bytes: usize,
    /// Bytes that can ever be allocated (capacity minus the reserved prefix).
    pub usable_bytes: usize,
    /// Longest contiguous vacant run, i.e. the largest request that would
    /// currently find space.
    pub largest_vacant_run: usize,
}

impl Usage {
    /// Vacant bytes, whether contiguous or not.
    pub fn vacant_bytes(&self) -> usize {
        self.usable_bytes - self.live_bytes
    }
}

impl fmt::Display for Usage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} slots live, {}/{} bytes live, largest vacant run {} bytes",
            self.live_slots,
            self.max_slots,
            self.live_bytes,
            self.usable_bytes,
            self.largest_vacant_run
        )
    }
}
