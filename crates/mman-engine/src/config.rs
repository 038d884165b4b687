//! Engine configuration and validation.
//!
//! [`EngineConfig`] bundles the arena layout with the limits applied to
//! the command stream. [`validate()`](EngineConfig::validate) runs before
//! any input is read.

use std::error::Error;
use std::fmt;

use mman_arena::{ArenaConfig, ArenaError};
use mman_dump::DumpPaths;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`EngineConfig::validate()`].
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Arena configuration is invalid.
    Arena(ArenaError),
    /// `max_line_len` is zero, so no command could ever be read.
    LineLengthZero,
    /// `max_commands` is zero.
    CommandLimitZero,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arena(e) => write!(f, "arena: {e}"),
            Self::LineLengthZero => write!(f, "max_line_len must be at least 1"),
            Self::CommandLimitZero => write!(f, "max_commands must be at least 1"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Arena(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ArenaError> for ConfigError {
    fn from(e: ArenaError) -> Self {
        Self::Arena(e)
    }
}

// ── EngineConfig ───────────────────────────────────────────────────

/// Everything needed to run one command stream.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    /// Arena size, slot count and placement strategy.
    pub arena: ArenaConfig,
    /// Bytes kept per input line; the rest is dropped with a warning.
    /// Default: 5000.
    pub max_line_len: usize,
    /// Commands processed before further input is ignored. Default: 100000.
    pub max_commands: usize,
    /// Where to write the core dump at the end of the run. `None` skips it.
    pub dump: Option<DumpPaths>,
}

impl EngineConfig {
    /// Default per-line byte limit.
    pub const DEFAULT_MAX_LINE_LEN: usize = 5000;

    /// Default command limit.
    pub const DEFAULT_MAX_COMMANDS: usize = 100_000;

    /// Check structural invariants of the whole config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.arena.validate()?;
        if self.max_line_len == 0 {
            return Err(ConfigError::LineLengthZero);
        }
        if self.max_commands == 0 {
            return Err(ConfigError::CommandLimitZero);
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            arena: ArenaConfig::default(),
            max_line_len: Self::DEFAULT_MAX_LINE_LEN,
            max_commands: Self::DEFAULT_MAX_COMMANDS,
            dump: Some(DumpPaths::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_line_len, 5000);
        assert_eq!(config.max_commands, 100_000);
        assert_eq!(config.dump, Some(DumpPaths::default()));
    }

    #[test]
    fn arena_errors_are_wrapped() {
        let config = EngineConfig {
            arena: ArenaConfig::new(1, 4),
            ..EngineConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Arena(_))));
    }

    #[test]
    fn zero_limits_rejected() {
        let no_lines = EngineConfig {
            max_line_len: 0,
            ..EngineConfig::default()
        };
        assert_eq!(no_lines.validate(), Err(ConfigError::LineLengthZero));

        let no_commands = EngineConfig {
            max_commands: 0,
            ..EngineConfig::default()
        };
        assert_eq!(no_commands.validate(), Err(ConfigError::CommandLimitZero));
    }
}
