//! Values stored in the arena by the command stream.
//!
//! A [`Payload`] knows its encoded size and how to lay itself out as raw
//! arena bytes. Character strings are kept as the bytes that were read,
//! with no UTF-8 requirement, and stored NUL-terminated; integer lists are
//! packed native-endian `i32`s with no length prefix, so decoding needs
//! the slot size from the slot table.

use std::fmt;

use smallvec::SmallVec;

/// Integer list storage. Most command lines carry only a few values.
pub type IntList = SmallVec<[i32; 8]>;

/// Width in bytes of one stored integer.
pub const INT_WIDTH: usize = std::mem::size_of::<i32>();

/// Which interpretation a stored region has.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    /// NUL-terminated character string.
    Chars,
    /// Packed native-endian `i32` values.
    Ints,
}

/// A value destined for arena storage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Payload {
    /// A character string as raw bytes, stored with a trailing NUL byte.
    ///
    /// The bytes should not contain NUL themselves; decoding stops at the
    /// first one.
    Chars(Vec<u8>),
    /// A list of integers, stored as consecutive `i32`s.
    Ints(IntList),
}

impl Payload {
    /// The kind tag for this payload.
    pub fn kind(&self) -> PayloadKind {
        match self {
            Self::Chars(_) => PayloadKind::Chars,
            Self::Ints(_) => PayloadKind::Ints,
        }
    }

    /// Number of arena bytes needed to store this payload.
    pub fn encoded_len(&self) -> usize {
        match self {
            Self::Chars(text) => text.len() + 1,
            Self::Ints(values) => values.len() * INT_WIDTH,
        }
    }

    /// Encode into the raw byte layout written to the arena.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        match self {
            Self::Chars(text) => {
                out.extend_from_slice(text);
                out.push(0);
            }
            Self::Ints(values) => {
                for v in values {
                    out.extend_from_slice(&v.to_ne_bytes());
                }
            }
        }
        out
    }

    /// Decode a stored region back into a payload of the given kind.
    ///
    /// Character regions stop at the first NUL byte (or the end of the
    /// region) and keep their bytes as stored. Integer regions ignore a
    /// trailing partial word.
    pub fn decode(kind: PayloadKind, bytes: &[u8]) -> Self {
        match kind {
            PayloadKind::Chars => {
                let text = bytes.split(|&b| b == 0).next().unwrap_or_default();
                Self::Chars(text.to_vec())
            }
            PayloadKind::Ints => Self::Ints(
                bytes
                    .chunks_exact(INT_WIDTH)
                    .map(|w| i32::from_ne_bytes([w[0], w[1], w[2], w[3]]))
                    .collect(),
            ),
        }
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chars(text) => write!(f, "chars: {}", String::from_utf8_lossy(text)),
            Self::Ints(values) => {
                write!(f, "ints: ")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn chars_reserve_a_nul_byte() {
        let p = Payload::Chars("hello".into());
        assert_eq!(p.encoded_len(), 6);
        assert_eq!(p.encode(), b"hello\0");
    }

    #[test]
    fn ints_are_four_bytes_each() {
        let p = Payload::Ints(smallvec![1, 2, 3]);
        assert_eq!(p.encoded_len(), 12);
        assert_eq!(p.encode().len(), 12);
        assert_eq!(&p.encode()[..4], &1i32.to_ne_bytes());
    }

    #[test]
    fn decode_chars_stops_at_nul() {
        let decoded = Payload::decode(PayloadKind::Chars, b"abc\0stale");
        assert_eq!(decoded, Payload::Chars("abc".into()));
    }

    #[test]
    fn decode_ints_reads_stored_layout() {
        let p = Payload::Ints(smallvec![7, 300, 65536]);
        assert_eq!(Payload::decode(PayloadKind::Ints, &p.encode()), p);
    }

    #[test]
    fn display_matches_report_format() {
        assert_eq!(Payload::Chars("hi".into()).to_string(), "chars: hi");
        assert_eq!(Payload::Chars(vec![b'a', 0xff]).to_string(), "chars: a\u{fffd}");
        assert_eq!(
            Payload::Ints(smallvec![1, 22, 333]).to_string(),
            "ints: 1, 22, 333"
        );
    }

    #[test]
    fn chars_store_raw_bytes() {
        let p = Payload::Chars(vec![b'a', 0xff, 0xfe]);
        assert_eq!(p.encoded_len(), 4);
        assert_eq!(p.encode(), [b'a', 0xff, 0xfe, 0]);
        assert_eq!(Payload::decode(PayloadKind::Chars, &p.encode()), p);
    }
}
