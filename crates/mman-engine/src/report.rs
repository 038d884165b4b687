//! End-of-run report.
//!
//! ```text
//! Cmd#	Offset	Value
//! ====	======	=====
//! 1	5	ints: 1, 2
//! ```
//!
//! Command numbers here are zero-based, unlike the one-based numbers that
//! `f` commands use.

use std::io::{self, Write};

use crate::session::Session;

/// Column headings.
pub const HEADER: &str = "Cmd#\tOffset\tValue";
/// Underline for the column headings.
pub const RULE: &str = "====\t======\t=====";

/// Write the report for every command still holding an allocation.
///
/// Returns the number of rows written, excluding the two heading lines.
pub fn write_report(session: &Session, out: &mut dyn Write) -> io::Result<usize> {
    writeln!(out, "{HEADER}")?;
    writeln!(out, "{RULE}")?;
    let mut rows = 0;
    for (index, _, handle) in session.live_entries() {
        let Some(payload) = session.stored_payload(index) else {
            continue;
        };
        writeln!(out, "{index}\t{handle}\t{payload}")?;
        rows += 1;
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mman_core::{Command, CommandIndex, Payload};
    use mman_test_utils::tiny_config;
    use smallvec::smallvec;

    fn render(session: &Session) -> String {
        let mut out = Vec::new();
        write_report(session, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn empty_session_prints_headings_only() {
        let s = Session::new(tiny_config()).unwrap();
        assert_eq!(render(&s), "Cmd#\tOffset\tValue\n====\t======\t=====\n");
    }

    #[test]
    fn rows_follow_command_order_with_zero_based_numbers() {
        let mut s = Session::new(tiny_config()).unwrap();
        s.apply(Command::Store(Payload::Chars("abc".into())));
        s.apply(Command::Store(Payload::Ints(smallvec![1, 2])));
        s.apply(Command::Free {
            target: CommandIndex(0),
        });
        s.apply(Command::Store(Payload::Chars("z".into())));

        let report = render(&s);
        let rows: Vec<&str> = report.lines().skip(2).collect();
        assert_eq!(rows, vec!["1\t5\tints: 1, 2", "3\t1\tchars: z"]);
    }
}
