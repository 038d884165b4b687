//! Fixed-size byte arena with a first-fit slot table allocator.
//!
//! All allocations live inside one buffer that is sized once in
//! [`Allocator::new`] and never grows. The slot table is fixed-capacity
//! too; only the occupancy index changes size.
//!
//! # Architecture
//!
//! ```text
//! Allocator (owns everything, single &mut owner)
//! ├── Arena            fixed Vec<u8>, offset 0 reserved
//! ├── SlotTable        Vec<Option<Slot>> + Handle → SlotIndex map
//! └── OccupancyIndex   address-ordered live ranges
//!
//! allocate(n): placement ──▶ vacancy (per candidate) ──▶ SlotTable::record
//! release(h):  SlotTable::find_by_offset ──▶ SlotTable::clear
//! ```
//!
//! # Placement
//!
//! Placement is first-fit by address. [`PlacementStrategy::Scan`] probes
//! every candidate offset against every live slot; [`PlacementStrategy::Indexed`]
//! walks the gaps of the occupancy index. Both pick the same offset for
//! every table state.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod allocator;
pub mod arena;
pub mod config;
pub mod error;
pub mod placement;
pub mod table;
pub mod usage;
pub mod vacancy;

// Public re-exports for the primary API surface.
pub use allocator::Allocator;
pub use arena::{Arena, RESERVED_BYTES};
pub use config::{ArenaConfig, PlacementStrategy};
pub use error::ArenaError;
pub use placement::OccupancyIndex;
pub use table::SlotTable;
pub use usage::Usage;
