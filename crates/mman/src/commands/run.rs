//! Run command - process a command stream and report what survives.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use mman_arena::{ArenaConfig, PlacementStrategy};
use mman_dump::DumpPaths;
use mman_engine::EngineConfig;

/// Flag values for the run subcommand.
pub struct RunArgs {
    pub capacity: usize,
    pub max_slots: usize,
    pub placement: PlacementStrategy,
    pub max_line_len: usize,
    pub max_commands: usize,
    pub mem_out: PathBuf,
    pub vars_out: PathBuf,
    pub no_dump: bool,
}

/// Map flags onto an engine config.
pub fn build_config(args: RunArgs) -> EngineConfig {
    EngineConfig {
        arena: ArenaConfig::new(args.capacity, args.max_slots).with_placement(args.placement),
        max_line_len: args.max_line_len,
        max_commands: args.max_commands,
        dump: (!args.no_dump).then_some(DumpPaths {
            mem: args.mem_out,
            vars: args.vars_out,
        }),
    }
}

/// Run the command stream from `input` (stdin when `None`).
pub fn run(config: &EngineConfig, input: Option<&Path>) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = match input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open input: {}", path.display()))?;
            mman_engine::run(config, BufReader::new(file), &mut out)
        }
        None => mman_engine::run(config, io::stdin().lock(), &mut out),
    }
    .context("run failed")?;
    out.flush()?;

    tracing::debug!(
        state_hash = %format!("{:016x}", summary.state_hash),
        rows = summary.report_rows,
        "report written"
    );
    Ok(())
}
