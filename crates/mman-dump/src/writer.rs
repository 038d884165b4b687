//! Core dump writer.
//!
//! [`dump`] streams both artifacts to any pair of `Write` sinks;
//! [`dump_to_paths`] creates the two files and wraps them in `BufWriter`s.
//! Neither touches allocator state: they only see an [`ArenaView`].

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use mman_core::{ArenaView, SlotIndex};
use tracing::info;

use crate::error::DumpError;
use crate::{DEFAULT_MEM_FILE, DEFAULT_VARS_FILE, DELIMITER};

/// Where the two dump artifacts are written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DumpPaths {
    /// Destination of the raw arena blob.
    pub mem: PathBuf,
    /// Destination of the slot listing.
    pub vars: PathBuf,
}

impl DumpPaths {
    /// Artifacts with the default file names inside `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            mem: dir.join(DEFAULT_MEM_FILE),
            vars: dir.join(DEFAULT_VARS_FILE),
        }
    }
}

impl Default for DumpPaths {
    fn default() -> Self {
        Self {
            mem: PathBuf::from(DEFAULT_MEM_FILE),
            vars: PathBuf::from(DEFAULT_VARS_FILE),
        }
    }
}

/// What a dump wrote.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DumpSummary {
    /// Bytes written to the blob (always the arena capacity).
    pub blob_bytes: usize,
    /// Lines written to the slot listing (one per live slot).
    pub slots_listed: usize,
}

/// Write the arena blob to `mem` and the slot listing to `vars`.
///
/// # Examples
///
/// ```
/// use mman_arena::{Allocator, ArenaConfig};
///
/// let mut alloc = Allocator::new(ArenaConfig::new(16, 4)).unwrap();
/// alloc.allocate_bytes(b"hi\0").unwrap();
/// alloc.allocate(4).unwrap();
///
/// let (mut mem, mut vars) = (Vec::new(), Vec::new());
/// let summary = mman_dump::dump(&alloc, &mut mem, &mut vars).unwrap();
///
/// assert_eq!(summary.blob_bytes, 16);
/// assert_eq!(&mem[1..4], b"hi\0");
/// assert_eq!(String::from_utf8(vars).unwrap(), "1\t3\n4\t4\n");
/// ```
pub fn dump(
    view: &dyn ArenaView,
    mem: &mut dyn Write,
    vars: &mut dyn Write,
) -> Result<DumpSummary, DumpError> {
    let blob_bytes = write_arena_blob(view, mem)?;
    let slots_listed = write_slot_listing(view, vars)?;
    Ok(DumpSummary {
        blob_bytes,
        slots_listed,
    })
}

/// Create (or truncate) both files in `paths` and dump into them.
///
/// Failure to create or write either file is returned as
/// [`DumpError::Io`]; nothing is retried.
pub fn dump_to_paths(view: &dyn ArenaView, paths: &DumpPaths) -> Result<DumpSummary, DumpError> {
    let mut mem = BufWriter::new(File::create(&paths.mem)?);
    let mut vars = BufWriter::new(File::create(&paths.vars)?);
    let summary = dump(view, &mut mem, &mut vars)?;
    mem.flush()?;
    vars.flush()?;
    info!(
        mem = %paths.mem.display(),
        vars = %paths.vars.display(),
        blob_bytes = summary.blob_bytes,
        slots_listed = summary.slots_listed,
        "core dump written"
    );
    Ok(summary)
}

/// Write every arena byte, in order, with no framing.
pub fn write_arena_blob(view: &dyn ArenaView, w: &mut dyn Write) -> Result<usize, DumpError> {
    let bytes = view.arena_bytes();
    w.write_all(bytes)?;
    Ok(bytes.len())
}

/// Write one `<offset>\t<size>` line per live slot in slot-index order.
pub fn write_slot_listing(view: &dyn ArenaView, w: &mut dyn Write) -> Result<usize, DumpError> {
    let mut lines = 0;
    for index in 0..view.slot_capacity() {
        if let Some(slot) = view.slot(SlotIndex(index)) {
            writeln!(w, "{}{DELIMITER}{}", slot.offset(), slot.size())?;
            lines += 1;
        }
    }
    Ok(lines)
}
