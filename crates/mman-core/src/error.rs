//! Error types at the allocator boundary.
//!
//! [`AllocError`] is what a request layer sees when an allocation cannot be
//! serviced; [`ReleaseError`] covers release calls that break the caller
//! contract. A release whose handle matches no live slot is not an error.

use std::error::Error;
use std::fmt;

/// Reasons an allocation request was not satisfied.
///
/// A failed allocation never modifies allocator state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AllocError {
    /// Zero-byte allocations are a caller contract violation.
    ZeroSize,
    /// No vacant contiguous run of the requested size exists in the arena.
    OutOfMemory {
        /// Number of bytes requested.
        requested: usize,
    },
    /// A vacant run exists but every slot table entry is live.
    SlotExhausted {
        /// Capacity of the slot table.
        max_slots: usize,
    },
}

impl AllocError {
    /// Whether this failure was caused by running out of a resource, as
    /// opposed to a malformed request.
    pub fn is_exhaustion(&self) -> bool {
        matches!(self, Self::OutOfMemory { .. } | Self::SlotExhausted { .. })
    }
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroSize => write!(f, "zero-byte allocation requested"),
            Self::OutOfMemory { requested } => {
                write!(f, "out of memory: no vacant run of {requested} bytes")
            }
            Self::SlotExhausted { max_slots } => {
                write!(f, "slot table exhausted: all {max_slots} slots are live")
            }
        }
    }
}

impl Error for AllocError {}

/// Release calls that violate the caller contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReleaseError {
    /// The reserved null offset 0 was passed as a handle.
    NullHandle,
}

impl fmt::Display for ReleaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NullHandle => write!(f, "cannot release the null handle (offset 0)"),
        }
    }
}

impl Error for ReleaseError {}
