//! Error types for core dump writing and reading.

use std::fmt;
use std::io;

/// Errors that can occur while writing or loading a core dump.
#[derive(Debug)]
pub enum DumpError {
    /// An I/O error occurred during read or write.
    Io(io::Error),
    /// A slot listing line could not be parsed.
    MalformedListing {
        /// One-based line number in the listing.
        line: usize,
        /// Human-readable description of what went wrong.
        detail: String,
    },
    /// The arena blob is not the expected length.
    BlobLength {
        /// Expected length in bytes.
        expected: usize,
        /// Length actually read.
        found: usize,
    },
    /// A listed slot starts at the reserved offset or runs past the blob.
    SlotOutOfBounds {
        /// Start offset from the listing.
        offset: usize,
        /// Size from the listing.
        size: usize,
        /// Blob length.
        capacity: usize,
    },
    /// Two listed slots share at least one byte.
    OverlappingSlots {
        /// `(offset, size)` of the earlier listing line.
        first: (usize, usize),
        /// `(offset, size)` of the later listing line.
        second: (usize, usize),
    },
}

impl fmt::Display for DumpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::MalformedListing { line, detail } => {
                write!(f, "malformed slot listing at line {line}: {detail}")
            }
            Self::BlobLength { expected, found } => {
                write!(f, "arena blob is {found} bytes, expected {expected}")
            }
            Self::SlotOutOfBounds {
                offset,
                size,
                capacity,
            } => {
                write!(
                    f,
                    "slot at {offset} of {size} bytes lies outside the usable arena [1, {capacity})"
                )
            }
            Self::OverlappingSlots { first, second } => {
                write!(
                    f,
                    "slots ({}, {}) and ({}, {}) overlap",
                    first.0, first.1, second.0, second.1
                )
            }
        }
    }
}

impl std::error::Error for DumpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for DumpError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
