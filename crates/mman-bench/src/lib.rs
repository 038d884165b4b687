//! Benchmark profiles for the mman arena allocator.
//!
//! - [`reference_profile`]: 64 KiB arena, 1024 slots. Large enough that the
//!   difference between scan and indexed placement shows.
//! - [`stress_profile`]: 1 MiB arena, 4096 slots.
//! - [`engine_profile`]: engine config around a profile, with dumps off.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use mman_arena::{ArenaConfig, PlacementStrategy};
use mman_engine::EngineConfig;

/// 64 KiB arena with 1024 slots.
pub fn reference_profile(placement: PlacementStrategy) -> ArenaConfig {
    ArenaConfig::new(64 * 1024, 1024).with_placement(placement)
}

/// 1 MiB arena with 4096 slots.
pub fn stress_profile(placement: PlacementStrategy) -> ArenaConfig {
    ArenaConfig::new(1024 * 1024, 4096).with_placement(placement)
}

/// Engine config for `arena` with the core dump disabled.
pub fn engine_profile(arena: ArenaConfig) -> EngineConfig {
    EngineConfig {
        arena,
        dump: None,
        ..EngineConfig::default()
    }
}

/// Both placement strategies, for parameterised benches.
pub const STRATEGIES: [PlacementStrategy; 2] = [PlacementStrategy::Scan, PlacementStrategy::Indexed];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_validate() {
        for placement in STRATEGIES {
            reference_profile(placement).validate().unwrap();
            stress_profile(placement).validate().unwrap();
            engine_profile(reference_profile(placement))
                .validate()
                .unwrap();
        }
    }
}
