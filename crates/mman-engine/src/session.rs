//! Command session: the allocator plus one record per processed command.
//!
//! Command numbers are positions in the stream. Every processed line gets
//! a record, including frees and failed allocations, so `f<n>` always
//! names the n-th line that was processed.

use mman_arena::{Allocator, ArenaConfig, ArenaError};
use mman_core::{AllocError, Command, CommandIndex, Handle, Payload, PayloadKind, Slot};
use tracing::{debug, warn};

/// What a processed command was.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandKind {
    /// Stored a payload of this kind (or tried to).
    Store(PayloadKind),
    /// A free, valid or not.
    Free,
}

/// Bookkeeping for one processed command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommandRecord {
    /// What the command was.
    pub kind: CommandKind,
    /// The live allocation this command owns, if any.
    pub handle: Option<Handle>,
    /// Bytes stored by this command while `handle` is live, else 0.
    pub stored_len: usize,
}

/// Result of applying one command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The payload was stored at this handle.
    Stored(Handle),
    /// The allocator refused the request. The run continues.
    AllocFailed(AllocError),
    /// The target's allocation was released.
    Released(Slot),
    /// The free named a command that does not precede it.
    InvalidFree,
    /// The free named a command with no live allocation.
    NothingToFree,
}

/// Running counters for a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Commands processed, of every kind.
    pub commands: usize,
    /// Successful stores.
    pub stored: usize,
    /// Stores the allocator refused.
    pub failed: usize,
    /// Frees that released an allocation.
    pub released: usize,
    /// Frees that were skipped with a warning.
    pub skipped_frees: usize,
}

/// Applies commands to an allocator and remembers who owns what.
pub struct Session {
    alloc: Allocator,
    records: Vec<CommandRecord>,
    stats: SessionStats,
}

impl Session {
    /// Start a session on a fresh arena.
    pub fn new(config: ArenaConfig) -> Result<Self, ArenaError> {
        Ok(Self {
            alloc: Allocator::new(config)?,
            records: Vec::new(),
            stats: SessionStats::default(),
        })
    }

    /// Number the next command will get (one-based).
    pub fn next_number(&self) -> usize {
        self.records.len() + 1
    }

    /// Apply a parsed command and record it.
    pub fn apply(&mut self, command: Command) -> Outcome {
        let number = self.next_number();
        let (record, outcome) = match command {
            Command::Store(payload) => self.store(number, payload),
            Command::Free { target } => self.free(number, target),
        };
        self.records.push(record);
        self.stats.commands += 1;
        outcome
    }

    /// Record a free whose target could not even be parsed.
    ///
    /// It still consumes a command number.
    pub fn skip_invalid_free(&mut self, text: &str) -> Outcome {
        warn!(command = self.next_number(), target = text, "invalid free");
        self.records.push(CommandRecord {
            kind: CommandKind::Free,
            handle: None,
            stored_len: 0,
        });
        self.stats.commands += 1;
        self.stats.skipped_frees += 1;
        Outcome::InvalidFree
    }

    fn store(&mut self, number: usize, payload: Payload) -> (CommandRecord, Outcome) {
        let kind = CommandKind::Store(payload.kind());
        let bytes = payload.encode();
        match self.alloc.allocate_bytes(&bytes) {
            Ok(handle) => {
                self.stats.stored += 1;
                debug!(command = number, %handle, size = bytes.len(), "stored");
                let record = CommandRecord {
                    kind,
                    handle: Some(handle),
                    stored_len: bytes.len(),
                };
                (record, Outcome::Stored(handle))
            }
            Err(e) => {
                self.stats.failed += 1;
                warn!(command = number, size = bytes.len(), error = %e, "allocation failed");
                let record = CommandRecord {
                    kind,
                    handle: None,
                    stored_len: 0,
                };
                (record, Outcome::AllocFailed(e))
            }
        }
    }

    fn free(&mut self, number: usize, target: CommandIndex) -> (CommandRecord, Outcome) {
        let record = CommandRecord {
            kind: CommandKind::Free,
            handle: None,
            stored_len: 0,
        };
        let Some(owner) = self.records.get_mut(target.0) else {
            warn!(command = number, target = target.ordinal(), "invalid free");
            self.stats.skipped_frees += 1;
            return (record, Outcome::InvalidFree);
        };
        let Some(handle) = owner.handle.take() else {
            warn!(
                command = number,
                target = target.ordinal(),
                "free of command with no live allocation"
            );
            self.stats.skipped_frees += 1;
            return (record, Outcome::NothingToFree);
        };
        owner.stored_len = 0;
        match self.alloc.release(handle) {
            Some(slot) => {
                self.stats.released += 1;
                debug!(command = number, target = target.ordinal(), %handle, "released");
                (record, Outcome::Released(slot))
            }
            None => {
                warn!(command = number, %handle, "allocator had no slot for live handle");
                self.stats.skipped_frees += 1;
                (record, Outcome::NothingToFree)
            }
        }
    }

    /// All records in command order.
    pub fn records(&self) -> &[CommandRecord] {
        &self.records
    }

    /// Commands that still own an allocation, in command order.
    pub fn live_entries(&self) -> impl Iterator<Item = (CommandIndex, PayloadKind, Handle)> + '_ {
        self.records
            .iter()
            .enumerate()
            .filter_map(|(i, r)| match (r.kind, r.handle) {
                (CommandKind::Store(kind), Some(h)) => Some((CommandIndex(i), kind, h)),
                _ => None,
            })
    }

    /// Read the payload a command stored, decoded from the arena bytes.
    pub fn stored_payload(&self, index: CommandIndex) -> Option<Payload> {
        let record = self.records.get(index.0)?;
        let CommandKind::Store(kind) = record.kind else {
            return None;
        };
        let bytes = self.alloc.bytes(record.handle?)?;
        Some(Payload::decode(kind, bytes))
    }

    /// The underlying allocator.
    pub fn allocator(&self) -> &Allocator {
        &self.alloc
    }

    /// Running counters.
    pub fn stats(&self) -> SessionStats {
        self.stats
    }
}
