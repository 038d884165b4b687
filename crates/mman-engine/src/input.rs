//! Bounded line input.
//!
//! [`LineReader`] splits a byte stream on `\n` and keeps at most
//! `max_len` bytes of each line. The excess is consumed and counted but
//! never buffered, so one enormous line costs no more memory than a
//! normal one.

use std::io::{self, BufRead};

use tracing::warn;

/// One line of input with its terminator stripped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputLine {
    /// One-based line number.
    pub number: usize,
    /// The kept bytes.
    pub bytes: Vec<u8>,
    /// Bytes dropped past the length limit.
    pub truncated: usize,
}

/// Reads `\n`-terminated lines, truncating each to a byte limit.
///
/// A final line without a terminator is still returned. An empty line
/// in the middle of the stream is returned as an empty line; only the
/// end of the stream yields `None`.
pub struct LineReader<R> {
    inner: R,
    max_len: usize,
    lines_read: usize,
}

impl<R: BufRead> LineReader<R> {
    /// Wrap `inner`, keeping at most `max_len` bytes per line.
    pub fn new(inner: R, max_len: usize) -> Self {
        Self {
            inner,
            max_len,
            lines_read: 0,
        }
    }

    /// Lines returned so far.
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    /// Read the next line, or `None` at end of input.
    pub fn next_line(&mut self) -> io::Result<Option<InputLine>> {
        let mut bytes = Vec::new();
        let mut truncated = 0;
        let mut saw_any = false;
        loop {
            let available = self.inner.fill_buf()?;
            if available.is_empty() {
                break;
            }
            saw_any = true;
            let newline = available.iter().position(|&b| b == b'\n');
            let chunk = &available[..newline.unwrap_or(available.len())];
            let keep = chunk.len().min(self.max_len - bytes.len());
            bytes.extend_from_slice(&chunk[..keep]);
            truncated += chunk.len() - keep;
            let used = chunk.len() + usize::from(newline.is_some());
            self.inner.consume(used);
            if newline.is_some() {
                break;
            }
        }
        if !saw_any {
            return Ok(None);
        }

        self.lines_read += 1;
        if truncated > 0 {
            warn!(
                line = self.lines_read,
                dropped = truncated,
                limit = self.max_len,
                "line over limit, truncated"
            );
        }
        Ok(Some(InputLine {
            number: self.lines_read,
            bytes,
            truncated,
        }))
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = io::Result<InputLine>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}
