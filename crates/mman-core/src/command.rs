//! Commands consumed by the allocator session.

use crate::id::CommandIndex;
use crate::payload::Payload;

/// One parsed line of the command stream.
///
/// # Examples
///
/// ```
/// use mman_core::{Command, CommandIndex, Payload};
///
/// let store = Command::Store(Payload::Chars("hello".into()));
/// assert_eq!(store.allocation_size(), Some(6));
///
/// // Free the allocation made by the first command.
/// let free = Command::Free { target: CommandIndex(0) };
/// assert_eq!(free.allocation_size(), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Allocate space for a payload and copy it into the arena.
    Store(Payload),
    /// Release the allocation made by an earlier command.
    Free {
        /// The command whose allocation should be released.
        target: CommandIndex,
    },
}

impl Command {
    /// Bytes this command asks the allocator for, if it allocates at all.
    pub fn allocation_size(&self) -> Option<usize> {
        match self {
            Self::Store(payload) => Some(payload.encoded_len()),
            Self::Free { .. } => None,
        }
    }
}
