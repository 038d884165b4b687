//! Hashing utilities for dump comparison.
//!
//! Uses FNV-1a for fast, deterministic fingerprints of arena state. These
//! hashes are not cryptographically secure; they exist so two runs (or a
//! run and a dump on disk) can be compared without diffing a full arena.

use mman_core::{ArenaView, SlotIndex};

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

/// Feed a single byte into an FNV-1a hash state.
#[inline]
fn fnv1a_byte(hash: u64, byte: u8) -> u64 {
    (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
}

/// Feed a u64 (as 8 LE bytes) into an FNV-1a hash state.
#[inline]
fn fnv1a_u64(mut hash: u64, v: u64) -> u64 {
    for &b in &v.to_le_bytes() {
        hash = fnv1a_byte(hash, b);
    }
    hash
}

/// Hash a blob and its slot listing.
///
/// Folds in every blob byte, then the slot count, then each
/// `(offset, size)` pair in the order given, so listing order matters.
pub fn dump_hash(blob: &[u8], slots: impl IntoIterator<Item = (usize, usize)>) -> u64 {
    let mut hash = FNV_OFFSET;
    for &b in blob {
        hash = fnv1a_byte(hash, b);
    }
    let mut count = 0u64;
    let mut listing = FNV_OFFSET;
    for (offset, size) in slots {
        listing = fnv1a_u64(listing, offset as u64);
        listing = fnv1a_u64(listing, size as u64);
        count += 1;
    }
    hash = fnv1a_u64(hash, count);
    fnv1a_u64(hash, listing)
}

/// Hash live allocator state exactly as [`dump_hash`] would hash the dump
/// written from it.
pub fn view_hash(view: &dyn ArenaView) -> u64 {
    let slots = (0..view.slot_capacity())
        .filter_map(|i| view.slot(SlotIndex(i)))
        .map(|s| (s.offset(), s.size()));
    dump_hash(view.arena_bytes(), slots)
}
