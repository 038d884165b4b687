//! Core dump reader.
//!
//! [`CoreImage`] loads a blob and listing back into memory for inspection.
//! Loading only parses; [`CoreImage::validate`] checks that the listing is
//! consistent with the blob and with itself.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};

use crate::error::DumpError;
use crate::hash::dump_hash;
use crate::writer::DumpPaths;

/// One line of a slot listing, as written. Not yet validated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListedSlot {
    /// Start offset.
    pub offset: usize,
    /// Size in bytes.
    pub size: usize,
}

impl ListedSlot {
    /// One past the last byte, saturating on absurd values.
    pub fn end(&self) -> usize {
        self.offset.saturating_add(self.size)
    }
}

/// Parse a slot listing: one `<offset><whitespace><size>` pair per line.
///
/// Blank lines are skipped. Any other line that does not hold exactly two
/// base-10 integers is rejected with its one-based line number.
pub fn read_slot_listing(reader: impl BufRead) -> Result<Vec<ListedSlot>, DumpError> {
    let mut slots = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = i + 1;
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        let [offset, size] = fields.as_slice() else {
            return Err(DumpError::MalformedListing {
                line: line_no,
                detail: format!("expected 2 fields, found {}", fields.len()),
            });
        };
        let parse = |field: &str, name: &str| {
            field
                .parse::<usize>()
                .map_err(|e| DumpError::MalformedListing {
                    line: line_no,
                    detail: format!("{name} '{field}': {e}"),
                })
        };
        slots.push(ListedSlot {
            offset: parse(*offset, "offset")?,
            size: parse(*size, "size")?,
        });
    }
    Ok(slots)
}

/// Read an entire arena blob.
pub fn read_arena_blob(reader: &mut dyn Read) -> Result<Vec<u8>, DumpError> {
    let mut blob = Vec::new();
    reader.read_to_end(&mut blob)?;
    Ok(blob)
}

/// A core dump loaded back into memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoreImage {
    blob: Vec<u8>,
    slots: Vec<ListedSlot>,
}

impl CoreImage {
    /// Load from a blob source and a listing source.
    pub fn load(mut mem: impl Read, vars: impl BufRead) -> Result<Self, DumpError> {
        let blob = read_arena_blob(&mut mem)?;
        let slots = read_slot_listing(vars)?;
        Ok(Self { blob, slots })
    }

    /// Open and load the two files named by `paths`.
    pub fn open(paths: &DumpPaths) -> Result<Self, DumpError> {
        let mem = BufReader::new(File::open(&paths.mem)?);
        let vars = BufReader::new(File::open(&paths.vars)?);
        Self::load(mem, vars)
    }

    /// The raw arena bytes.
    pub fn blob(&self) -> &[u8] {
        &self.blob
    }

    /// Listed slots in file order (slot-index order when written by this crate).
    pub fn slots(&self) -> &[ListedSlot] {
        &self.slots
    }

    /// The blob bytes covered by `slot`, or `None` if it runs past the end.
    pub fn region(&self, slot: &ListedSlot) -> Option<&[u8]> {
        self.blob.get(slot.offset..slot.end())
    }

    /// Fingerprint of the blob and listing.
    pub fn hash(&self) -> u64 {
        dump_hash(&self.blob, self.slots.iter().map(|s| (s.offset, s.size)))
    }

    /// Check the dump for internal consistency.
    ///
    /// - the blob has `expected_capacity` bytes, when given;
    /// - every slot is non-empty, starts at or after offset 1 and ends
    ///   within the blob;
    /// - no two slots share a byte.
    pub fn validate(&self, expected_capacity: Option<usize>) -> Result<(), DumpError> {
        let capacity = self.blob.len();
        if let Some(expected) = expected_capacity {
            if expected != capacity {
                return Err(DumpError::BlobLength {
                    expected,
                    found: capacity,
                });
            }
        }

        for slot in &self.slots {
            if slot.offset == 0 || slot.size == 0 || slot.end() > capacity {
                return Err(DumpError::SlotOutOfBounds {
                    offset: slot.offset,
                    size: slot.size,
                    capacity,
                });
            }
        }

        let mut by_address: Vec<&ListedSlot> = self.slots.iter().collect();
        by_address.sort_by_key(|s| s.offset);
        for pair in by_address.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if b.offset < a.end() {
                return Err(DumpError::OverlappingSlots {
                    first: (a.offset, a.size),
                    second: (b.offset, b.size),
                });
            }
        }
        Ok(())
    }
}
