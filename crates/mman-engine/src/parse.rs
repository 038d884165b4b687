//! Command line parsing.
//!
//! The first byte selects the command:
//!
//! | Byte | Command | Argument |
//! |------|---------|----------|
//! | `c`  | store characters | the rest of the line as raw bytes, up to any NUL |
//! | `d`  | store integers | comma-separated positive `i32`s |
//! | `f`  | free | one-based number of an earlier command, read from leading digits |

use mman_core::payload::IntList;
use mman_core::{Command, CommandIndex, Payload};

use crate::error::ParseError;

/// Command byte for a character string.
pub const STORE_CHARS: u8 = b'c';
/// Command byte for an integer list.
pub const STORE_INTS: u8 = b'd';
/// Command byte for a free.
pub const FREE: u8 = b'f';
/// Separator between integers in a `d` command.
pub const INT_DELIMITER: char = ',';

/// Parse one input line (without its terminator).
///
/// A `c` argument is stored byte for byte and need not be UTF-8. It ends at
/// the first NUL, since the stored string is NUL-terminated.
///
/// Free targets are only checked for being a number of 1 or more here;
/// whether that command exists is up to the session.
///
/// # Examples
///
/// ```
/// use mman_core::{Command, CommandIndex, Payload};
/// use mman_engine::parse_line;
///
/// assert_eq!(
///     parse_line(b"chi").unwrap(),
///     Command::Store(Payload::Chars("hi".into()))
/// );
/// assert_eq!(
///     parse_line(b"f3").unwrap(),
///     Command::Free { target: CommandIndex(2) }
/// );
/// ```
pub fn parse_line(line: &[u8]) -> Result<Command, ParseError> {
    if line.len() < 2 {
        return Err(ParseError::TooShort {
            line: String::from_utf8_lossy(line).into_owned(),
        });
    }
    let rest = &line[1..];
    match line[0] {
        STORE_CHARS => {
            let text = rest.split(|&b| b == 0).next().unwrap_or_default();
            Ok(Command::Store(Payload::Chars(text.to_vec())))
        }
        STORE_INTS => {
            let arg = String::from_utf8_lossy(rest);
            parse_ints(&arg).map(|v| Command::Store(Payload::Ints(v)))
        }
        FREE => {
            let arg = String::from_utf8_lossy(rest);
            parse_free_target(&arg).map(|target| Command::Free { target })
        }
        byte => Err(ParseError::UnknownCommand { byte }),
    }
}

/// Parse a comma-delimited list of positive integers.
///
/// Empty tokens (`1,,2`, a trailing comma) are skipped. Surrounding ASCII
/// whitespace on a token is ignored.
pub fn parse_ints(text: &str) -> Result<IntList, ParseError> {
    let mut values = IntList::new();
    for token in text.split(INT_DELIMITER).map(str::trim) {
        if token.is_empty() {
            continue;
        }
        let value: i32 = token.parse().map_err(|_| ParseError::NotAnInteger {
            token: token.to_string(),
        })?;
        if value <= 0 {
            return Err(ParseError::NonPositive { value });
        }
        values.push(value);
    }
    if values.is_empty() {
        return Err(ParseError::EmptyIntList);
    }
    Ok(values)
}

/// Read a free target from its leading digits.
///
/// Leading whitespace and one `+` are skipped, and anything after the
/// digits is ignored, so `3x` and ` 3` both name command 3. No digits, a
/// zero, or a value too large for `usize` is invalid.
fn parse_free_target(text: &str) -> Result<CommandIndex, ParseError> {
    let unsigned = text.trim_start();
    let unsigned = unsigned.strip_prefix('+').unwrap_or(unsigned);
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    unsigned[..end]
        .parse::<usize>()
        .ok()
        .and_then(CommandIndex::from_ordinal)
        .ok_or_else(|| ParseError::InvalidFreeTarget {
            text: text.to_string(),
        })
}
