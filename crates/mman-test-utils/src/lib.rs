//! Test utilities for mman development.
//!
//! Small arena configurations, invariant assertions that work against any
//! [`ArenaView`], and seeded workload generators ([`workload`]) shared by
//! unit tests, integration tests and benches.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod workload;

pub use workload::{apply, churn, command_script, ChurnStats, WorkloadOp};

use mman_arena::{ArenaConfig, PlacementStrategy};
use mman_core::{ArenaView, ByteRange, SlotIndex};

/// 32-byte arena with 4 slots. Small enough to exhaust by hand.
pub fn tiny_config() -> ArenaConfig {
    ArenaConfig::new(32, 4)
}

/// Same as [`tiny_config`] but with the indexed placement strategy.
pub fn tiny_indexed_config() -> ArenaConfig {
    tiny_config().with_placement(PlacementStrategy::Indexed)
}

/// A mid-sized arena for churn workloads.
pub fn churn_config(placement: PlacementStrategy) -> ArenaConfig {
    ArenaConfig::new(4096, 128).with_placement(placement)
}

/// Byte ranges of every live slot, sorted by start offset.
pub fn live_ranges(view: &dyn ArenaView) -> Vec<ByteRange> {
    let mut ranges: Vec<ByteRange> = (0..view.slot_capacity())
        .filter_map(|i| view.slot(SlotIndex(i)))
        .map(|s| s.range())
        .collect();
    ranges.sort_by_key(|r| r.first());
    ranges
}

/// Panic unless every live slot lies in `[1, capacity)` and no two share
/// a byte.
pub fn assert_disjoint(view: &dyn ArenaView) {
    let capacity = view.arena_bytes().len();
    let ranges = live_ranges(view);
    for r in &ranges {
        assert!(
            r.first() >= 1 && r.end() <= capacity,
            "slot {r} outside usable arena of {capacity} bytes"
        );
    }
    for pair in ranges.windows(2) {
        assert!(
            !pair[0].intersects(&pair[1]),
            "slots {} and {} overlap",
            pair[0],
            pair[1]
        );
    }
}
