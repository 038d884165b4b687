//! Error types for command parsing and whole runs.

use std::error::Error;
use std::fmt;
use std::io;

use mman_dump::DumpError;

use crate::config::ConfigError;

/// Why a command line could not be turned into a command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The line has fewer than two bytes.
    TooShort {
        /// The offending line, lossily decoded.
        line: String,
    },
    /// The first byte is not a known command.
    UnknownCommand {
        /// The leading byte.
        byte: u8,
    },
    /// An integer-list token is not a base-10 `i32`.
    NotAnInteger {
        /// The token as written.
        token: String,
    },
    /// An integer-list token parsed but is zero or negative.
    NonPositive {
        /// The parsed value.
        value: i32,
    },
    /// An integer-list command has no tokens at all.
    EmptyIntList,
    /// A free command does not name a command number of 1 or more.
    InvalidFreeTarget {
        /// The text after the command byte.
        text: String,
    },
}

impl ParseError {
    /// Whether the run must stop. Only a bad free target is survivable.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::InvalidFreeTarget { .. })
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { line } => write!(f, "invalid line {line:?}"),
            Self::UnknownCommand { byte } => {
                write!(f, "invalid input {:?}", char::from(*byte))
            }
            Self::NotAnInteger { token } => write!(f, "non-int {token:?}"),
            Self::NonPositive { value } => write!(f, "non-positive int {value}"),
            Self::EmptyIntList => write!(f, "integer list is empty"),
            Self::InvalidFreeTarget { text } => write!(f, "invalid free target {text:?}"),
        }
    }
}

impl Error for ParseError {}

/// Errors that abort a run.
#[derive(Debug)]
pub enum EngineError {
    /// The configuration failed validation.
    Config(ConfigError),
    /// A command line was fatally malformed.
    Parse {
        /// One-based input line number.
        line: usize,
        /// What was wrong with it.
        error: ParseError,
    },
    /// Reading input or writing the report failed.
    Io(io::Error),
    /// Writing the core dump failed.
    Dump(DumpError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Parse { line, error } => write!(f, "line {line}: {error}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Dump(e) => write!(f, "core dump: {e}"),
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Parse { error, .. } => Some(error),
            Self::Io(e) => Some(e),
            Self::Dump(e) => Some(e),
        }
    }
}

impl From<ConfigError> for EngineError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<io::Error> for EngineError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<DumpError> for EngineError {
    fn from(e: DumpError) -> Self {
        Self::Dump(e)
    }
}
