//! Command stream processing for the mman arena allocator.
//!
//! A run reads `c`/`d`/`f` command lines, applies them to a fresh
//! [`Session`], prints the report of what is still allocated, and
//! optionally writes a core dump:
//!
//! ```text
//! input ──▶ LineReader ──▶ parse_line ──▶ Session ──▶ write_report
//!                                            │
//!                                            └──▶ dump_to_paths
//! ```
//!
//! Allocation failures and bad free targets are warnings; malformed lines
//! and I/O failures end the run with an [`EngineError`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod input;
pub mod parse;
pub mod report;
pub mod session;

pub use config::{ConfigError, EngineConfig};
pub use error::{EngineError, ParseError};
pub use input::{InputLine, LineReader};
pub use parse::{parse_ints, parse_line};
pub use report::write_report;
pub use session::{CommandKind, CommandRecord, Outcome, Session, SessionStats};

use std::io::{BufRead, Write};

use mman_dump::{view_hash, DumpSummary};
use tracing::{info, warn};

/// What a completed run did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Session counters at the end of the stream.
    pub stats: SessionStats,
    /// Rows printed in the report.
    pub report_rows: usize,
    /// Whether input remained after the command limit was reached.
    pub hit_command_limit: bool,
    /// Dump output, when a dump was configured.
    pub dump: Option<DumpSummary>,
    /// Fingerprint of the final arena and slot table.
    pub state_hash: u64,
}

/// Process `input` under `config`, writing the report to `out`.
///
/// # Examples
///
/// ```
/// use mman_engine::{run, EngineConfig};
///
/// let config = EngineConfig { dump: None, ..EngineConfig::default() };
/// let mut out = Vec::new();
/// let summary = run(&config, "chello\nd1,2\nf1\n".as_bytes(), &mut out).unwrap();
///
/// assert_eq!(summary.report_rows, 1);
/// assert!(String::from_utf8(out).unwrap().ends_with("1\t7\tints: 1, 2\n"));
/// ```
pub fn run(
    config: &EngineConfig,
    input: impl BufRead,
    out: &mut dyn Write,
) -> Result<RunSummary, EngineError> {
    config.validate()?;
    let mut session = Session::new(config.arena.clone()).map_err(ConfigError::from)?;
    let mut lines = LineReader::new(input, config.max_line_len);

    while session.stats().commands < config.max_commands {
        let Some(line) = lines.next_line()? else {
            break;
        };
        match parse_line(&line.bytes) {
            Ok(command) => {
                session.apply(command);
            }
            Err(ParseError::InvalidFreeTarget { text }) => {
                session.skip_invalid_free(&text);
            }
            Err(error) => {
                return Err(EngineError::Parse {
                    line: line.number,
                    error,
                })
            }
        }
    }

    let hit_command_limit =
        session.stats().commands == config.max_commands && lines.next_line()?.is_some();
    if hit_command_limit {
        warn!(
            limit = config.max_commands,
            "command limit reached, remaining input ignored"
        );
    }

    let report_rows = write_report(&session, out)?;
    out.flush()?;

    let dump = match &config.dump {
        Some(paths) => Some(mman_dump::dump_to_paths(session.allocator(), paths)?),
        None => None,
    };

    let stats = session.stats();
    info!(
        commands = stats.commands,
        stored = stats.stored,
        failed = stats.failed,
        released = stats.released,
        skipped_frees = stats.skipped_frees,
        live = session.allocator().live_count(),
        "run complete"
    );
    Ok(RunSummary {
        stats,
        report_rows,
        hit_command_limit,
        dump,
        state_hash: view_hash(session.allocator()),
    })
}
