//! Seeded workload generation.
//!
//! Everything here is driven by a `ChaCha8Rng` seeded from a `u64`, so a
//! seed fully determines the workload on every platform.

use mman_arena::Allocator;
use mman_core::Handle;
use rand::distr::Alphanumeric;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// One step of an allocator churn workload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkloadOp {
    /// Allocate this many bytes.
    Alloc(usize),
    /// Release the live handle at this position (modulo the live count).
    Free(usize),
}

/// Generate `len` churn ops with sizes in `1..=max_size`.
///
/// Roughly 40% of ops are frees, which keeps a busy arena fragmented
/// without draining it.
pub fn churn(seed: u64, len: usize, max_size: usize) -> Vec<WorkloadOp> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len)
        .map(|_| {
            if rng.random_bool(0.4) {
                WorkloadOp::Free(rng.random_range(0..usize::MAX))
            } else {
                WorkloadOp::Alloc(rng.random_range(1..=max_size.max(1)))
            }
        })
        .collect()
}

/// Outcome counters from [`apply`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChurnStats {
    pub allocated: usize,
    pub failed: usize,
    pub released: usize,
}

/// Run `ops` against `alloc`, returning the live handles and counters.
///
/// A `Free` with nothing live is a no-op.
pub fn apply(alloc: &mut Allocator, ops: &[WorkloadOp]) -> (Vec<Handle>, ChurnStats) {
    let mut live: Vec<Handle> = Vec::new();
    let mut stats = ChurnStats::default();
    for op in ops {
        match *op {
            WorkloadOp::Alloc(size) => match alloc.allocate(size) {
                Ok(h) => {
                    live.push(h);
                    stats.allocated += 1;
                }
                Err(_) => stats.failed += 1,
            },
            WorkloadOp::Free(pick) => {
                if live.is_empty() {
                    continue;
                }
                let h = live.swap_remove(pick % live.len());
                if alloc.release(h).is_some() {
                    stats.released += 1;
                }
            }
        }
    }
    (live, stats)
}

/// Generate a command script of `len` lines (`c`, `d` and `f` commands).
///
/// Frees only name earlier commands, but may name one that was already
/// freed or was itself a free, so the script exercises the warning paths.
pub fn command_script(seed: u64, len: usize) -> String {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut out = String::new();
    for number in 1..=len {
        let roll: u8 = rng.random_range(0..10);
        if number > 1 && roll < 3 {
            let target = rng.random_range(1..number);
            out.push_str(&format!("f{target}\n"));
        } else if roll < 7 {
            let n = rng.random_range(1..=24);
            let text: String = (0..n).map(|_| rng.sample(Alphanumeric) as char).collect();
            out.push('c');
            out.push_str(&text);
            out.push('\n');
        } else {
            let n = rng.random_range(1..=6);
            let ints: Vec<String> = (0..n)
                .map(|_| rng.random_range(1..=i32::MAX).to_string())
                .collect();
            out.push('d');
            out.push_str(&ints.join(","));
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assert_disjoint, tiny_config};

    #[test]
    fn churn_is_deterministic_per_seed() {
        assert_eq!(churn(7, 200, 16), churn(7, 200, 16));
        assert_ne!(churn(7, 200, 16), churn(8, 200, 16));
    }

    #[test]
    fn churn_sizes_in_range() {
        for op in churn(1, 500, 9) {
            if let WorkloadOp::Alloc(size) = op {
                assert!((1..=9).contains(&size));
            }
        }
    }

    #[test]
    fn apply_keeps_slots_disjoint() {
        let mut alloc = Allocator::new(tiny_config()).unwrap();
        let (live, stats) = apply(&mut alloc, &churn(3, 300, 12));
        assert_eq!(live.len(), alloc.live_count());
        assert_eq!(stats.allocated - stats.released, live.len());
        assert_disjoint(&alloc);
    }

    #[test]
    fn script_lines_are_well_formed() {
        let script = command_script(11, 100);
        assert_eq!(script.lines().count(), 100);
        for (i, line) in script.lines().enumerate() {
            assert!(line.len() >= 2, "line {i} too short: {line:?}");
            match line.as_bytes()[0] {
                b'c' | b'd' => {}
                b'f' => {
                    let n: usize = line[1..].parse().unwrap();
                    assert!(n >= 1 && n <= i, "free of {n} at line {}", i + 1);
                }
                other => panic!("unexpected command byte {other}"),
            }
        }
    }
}
