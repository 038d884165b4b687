//! Tracing subscriber setup for the CLI.
//!
//! Logs go to stderr so stdout carries only the report. `RUST_LOG`
//! overrides the verbosity flag when set.

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter for a verbosity count (`-v`, `-vv`, ...).
pub fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "mman=info",
        1 => "mman=debug",
        _ => "mman=trace",
    }
}

/// Install the global subscriber.
pub fn init(verbosity: u8) -> Result<()> {
    let directives =
        std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter(verbosity).to_string());
    // Events are emitted from the sub-crates, so one target prefix is not
    // enough: widen "mman" to every mman_* crate.
    let directives = widen_targets(&directives);
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .context("failed to initialize tracing subscriber")
}

/// Expand each bare `mman=<level>` directive to cover the sub-crates.
fn widen_targets(directives: &str) -> String {
    directives
        .split(',')
        .flat_map(|d| match d.trim().strip_prefix("mman=") {
            Some(level) => ["mman", "mman_arena", "mman_dump", "mman_engine"]
                .iter()
                .map(|target| format!("{target}={level}"))
                .collect::<Vec<_>>(),
            None => vec![d.trim().to_string()],
        })
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(default_filter(0), "mman=info");
        assert_eq!(default_filter(1), "mman=debug");
        assert_eq!(default_filter(5), "mman=trace");
    }

    #[test]
    fn bare_target_covers_sub_crates() {
        let widened = widen_targets("mman=debug,warn");
        assert!(widened.contains("mman_engine=debug"));
        assert!(widened.contains("mman_arena=debug"));
        assert!(widened.ends_with(",warn"));
    }

    #[test]
    fn other_directives_pass_through() {
        assert_eq!(widen_targets("warn"), "warn");
        assert_eq!(widen_targets("mman_dump=trace"), "mman_dump=trace");
    }
}
