//! Arena configuration parameters.

use std::fmt;
use std::str::FromStr;

use crate::arena::RESERVED_BYTES;
use crate::error::ArenaError;

/// How the allocator searches for a vacant run.
///
/// Both strategies are first-fit by address and return identical offsets;
/// they differ only in how much work each probe costs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PlacementStrategy {
    /// Probe every candidate offset in ascending order, checking each
    /// candidate range against every live slot.
    #[default]
    Scan,
    /// Walk the address-ordered occupancy index and take the first gap
    /// that is large enough.
    Indexed,
}

impl fmt::Display for PlacementStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scan => write!(f, "scan"),
            Self::Indexed => write!(f, "indexed"),
        }
    }
}

impl FromStr for PlacementStrategy {
    type Err = ArenaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "scan" => Ok(Self::Scan),
            "indexed" => Ok(Self::Indexed),
            other => Err(ArenaError::InvalidConfig {
                reason: format!("unknown placement strategy '{other}'"),
            }),
        }
    }
}

/// Configuration for the arena allocator.
///
/// Validated at construction; all values are immutable after creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Size of the arena in bytes, including the reserved byte at offset 0.
    ///
    /// Default: 1_048_576 (1 MiB). Must be at least 2.
    pub total_capacity: usize,

    /// Number of entries in the slot table, i.e. the maximum number of
    /// simultaneously live allocations.
    ///
    /// Default: 1024. Must be at least 1.
    pub max_slots: usize,

    /// Vacancy search strategy. Default: [`PlacementStrategy::Scan`].
    pub placement: PlacementStrategy,
}

impl ArenaConfig {
    /// Default arena size: 1 MiB.
    pub const DEFAULT_TOTAL_CAPACITY: usize = 1_048_576;

    /// Default slot table capacity.
    pub const DEFAULT_MAX_SLOTS: usize = 1024;

    /// Create a config with the given arena size and slot count, using the
    /// default placement strategy.
    pub fn new(total_capacity: usize, max_slots: usize) -> Self {
        Self {
            total_capacity,
            max_slots,
            placement: PlacementStrategy::default(),
        }
    }

    /// Return a copy of this config using `placement`.
    pub fn with_placement(mut self, placement: PlacementStrategy) -> Self {
        self.placement = placement;
        self
    }

    /// Bytes available to allocations (capacity minus the reserved prefix).
    pub fn usable_bytes(&self) -> usize {
        self.total_capacity.saturating_sub(RESERVED_BYTES)
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ArenaError> {
        if self.total_capacity <= RESERVED_BYTES {
            return Err(ArenaError::InvalidConfig {
                reason: format!(
                    "total_capacity {} leaves no usable bytes after the {RESERVED_BYTES}-byte reserved prefix",
                    self.total_capacity
                ),
            });
        }
        if self.max_slots == 0 {
            return Err(ArenaError::InvalidConfig {
                reason: "max_slots must be at least 1".into(),
            });
        }
        Ok(())
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TOTAL_CAPACITY, Self::DEFAULT_MAX_SLOTS)
    }
}
