//! mman: a first-fit slot arena allocator with core dumps.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all mman sub-crates, and ships the `mman` command-line tool.
//!
//! # Quick start
//!
//! ```rust
//! use mman::prelude::*;
//!
//! let mut alloc = Allocator::new(ArenaConfig::new(32, 4)).unwrap();
//! let a = alloc.allocate(4).unwrap();
//! let b = alloc.allocate(4).unwrap();
//! assert_eq!((a.offset(), b.offset()), (1, 5));
//!
//! alloc.release(a);
//! // First fit: the freed front gap is too small for 6 bytes.
//! assert_eq!(alloc.allocate(6).unwrap().offset(), 9);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `mman-core` | Handles, slots, payloads, commands, errors |
//! | [`arena`] | `mman-arena` | Arena, slot table, placement, allocator |
//! | [`dump`] | `mman-dump` | Core dump writing, reading and hashing |
//! | [`engine`] | `mman-engine` | Command parsing, sessions, reports |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits and IDs (`mman-core`).
pub use mman_core as types;

/// Arena storage and the first-fit allocator (`mman-arena`).
///
/// [`arena::Allocator`] is the main entry point; it is also in the
/// [`prelude`].
pub use mman_arena as arena;

/// Core dump writing, reading and FNV-1a hashing (`mman-dump`).
pub use mman_dump as dump;

/// Command stream processing (`mman-engine`).
///
/// [`engine::run`] drives a whole stream; [`engine::Session`] applies
/// commands one at a time.
pub use mman_engine as engine;

/// Common imports for typical mman usage.
///
/// ```rust
/// use mman::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use mman_core::{
        AllocError, ArenaView, ByteRange, Command, CommandIndex, Handle, Payload, PayloadKind,
        ReleaseError, Slot, SlotIndex,
    };

    // Arena
    pub use mman_arena::{Allocator, ArenaConfig, ArenaError, PlacementStrategy, Usage};

    // Dumps
    pub use mman_dump::{dump_to_paths, view_hash, CoreImage, DumpError, DumpPaths};

    // Engine
    pub use mman_engine::{run, EngineConfig, EngineError, Outcome, RunSummary, Session};
}
