//! Arena-specific error types.

use std::error::Error;
use std::fmt;

use mman_core::Handle;

/// Errors from arena construction and direct region access.
///
/// Allocation failures are reported as [`mman_core::AllocError`]; this
/// type covers everything else.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The configuration failed validation.
    InvalidConfig {
        /// Human-readable description of the violated constraint.
        reason: String,
    },
    /// The handle does not start any live slot.
    UnknownHandle {
        /// The handle that was looked up.
        handle: Handle,
    },
    /// A write would run past the end of the handle's slot.
    RegionOverflow {
        /// The slot being written.
        handle: Handle,
        /// Size of the slot in bytes.
        size: usize,
        /// Number of bytes the caller tried to write.
        requested: usize,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig { reason } => write!(f, "invalid arena config: {reason}"),
            Self::UnknownHandle { handle } => {
                write!(f, "handle {handle} does not start a live slot")
            }
            Self::RegionOverflow {
                handle,
                size,
                requested,
            } => {
                write!(
                    f,
                    "write of {requested} bytes overflows slot {handle} of {size} bytes"
                )
            }
        }
    }
}

impl Error for ArenaError {}
