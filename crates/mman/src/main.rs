//! mman CLI: run command streams against the arena allocator and inspect
//! the core dumps they leave behind.

mod commands;
mod logging;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use mman_arena::{ArenaConfig, PlacementStrategy};
use mman_engine::EngineConfig;

/// First-fit slot arena allocator simulator.
#[derive(Parser)]
#[command(name = "mman")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a command stream, print the report and write a core dump
    Run {
        /// Read commands from this file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Arena size in bytes, including the reserved byte at offset 0
        #[arg(long, default_value_t = ArenaConfig::DEFAULT_TOTAL_CAPACITY)]
        capacity: usize,

        /// Maximum number of simultaneously live allocations
        #[arg(long, default_value_t = ArenaConfig::DEFAULT_MAX_SLOTS)]
        max_slots: usize,

        /// Vacancy search strategy (scan or indexed)
        #[arg(long, default_value_t = PlacementStrategy::Scan)]
        placement: PlacementStrategy,

        /// Bytes kept per input line
        #[arg(long, default_value_t = EngineConfig::DEFAULT_MAX_LINE_LEN)]
        max_line_len: usize,

        /// Commands processed before the rest of the input is ignored
        #[arg(long, default_value_t = EngineConfig::DEFAULT_MAX_COMMANDS)]
        max_commands: usize,

        /// Path of the raw arena dump
        #[arg(long, default_value = mman_dump::DEFAULT_MEM_FILE)]
        mem_out: PathBuf,

        /// Path of the slot listing dump
        #[arg(long, default_value = mman_dump::DEFAULT_VARS_FILE)]
        vars_out: PathBuf,

        /// Skip writing the core dump
        #[arg(long)]
        no_dump: bool,
    },

    /// Validate a core dump and list its live slots
    Inspect {
        /// Path of the raw arena dump
        #[arg(long, default_value = mman_dump::DEFAULT_MEM_FILE)]
        mem: PathBuf,

        /// Path of the slot listing dump
        #[arg(long, default_value = mman_dump::DEFAULT_VARS_FILE)]
        vars: PathBuf,

        /// Expected arena size in bytes
        #[arg(long)]
        capacity: Option<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    match cli.command {
        Commands::Run {
            input,
            capacity,
            max_slots,
            placement,
            max_line_len,
            max_commands,
            mem_out,
            vars_out,
            no_dump,
        } => {
            let config = commands::run::build_config(commands::run::RunArgs {
                capacity,
                max_slots,
                placement,
                max_line_len,
                max_commands,
                mem_out,
                vars_out,
                no_dump,
            });
            commands::run::run(&config, input.as_deref())
        }
        Commands::Inspect {
            mem,
            vars,
            capacity,
        } => commands::inspect::run(&mem, &vars, capacity),
    }
}
