//! Core types and traits for the mman first-fit arena allocator.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the rest of the workspace: handles and
//! indices, byte ranges, slot records, command payloads, allocation
//! errors, and the read-only [`ArenaView`] trait that persistence
//! consumes.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod command;
pub mod error;
pub mod id;
pub mod payload;
pub mod range;
pub mod slot;
pub mod traits;

pub use command::Command;
pub use error::{AllocError, ReleaseError};
pub use id::{CommandIndex, Handle, SlotIndex};
pub use payload::{Payload, PayloadKind};
pub use range::ByteRange;
pub use slot::Slot;
pub use traits::ArenaView;
