//! Core dump writing, reading and hashing for mman arenas.
//!
//! A core dump is two artifacts written side by side:
//!
//! ```text
//! core_mem   [arena byte 0][arena byte 1] ... [arena byte capacity-1]
//! core_vars  <offset>\t<size>\n   (one line per live slot, slot-index order)
//! ```
//!
//! The blob has no header or length prefix. It is the arena exactly as it
//! sits in memory. Vacant slots produce no
//! listing line.
//!
//! # Architecture
//!
//! - [`dump`] / [`dump_to_paths`] write both artifacts from any [`ArenaView`]
//! - [`CoreImage`] loads them back and validates bounds and disjointness
//! - [`dump_hash`] / [`view_hash`] fingerprint a dump for determinism checks
//!
//! [`ArenaView`]: mman_core::ArenaView

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod hash;
pub mod reader;
pub mod writer;

pub use error::DumpError;
pub use hash::{dump_hash, view_hash};
pub use reader::{read_arena_blob, read_slot_listing, CoreImage, ListedSlot};
pub use writer::{dump, dump_to_paths, DumpPaths, DumpSummary};

/// Default file name for the arena blob.
pub const DEFAULT_MEM_FILE: &str = "core_mem";

/// Default file name for the slot listing.
pub const DEFAULT_VARS_FILE: &str = "core_vars";

/// Field separator in slot listing lines.
pub const DELIMITER: char = '\t';
