//! Newline sentinel escaping for single-line file payloads.
//!
//! SEND requests and FILE replies carry a whole file on one wire line. Real
//! newlines are written as the two-character sentinel `//` and restored on
//! the other side. Bodies that themselves contain `//` (or a `/` directly
//! before a newline) do not survive the round trip unchanged.

/// Two-byte stand-in for `\n` inside escaped payloads.
pub const NEWLINE_SENTINEL: &[u8] = b"//";

/// Replace every `\n` in `body` with [`NEWLINE_SENTINEL`].
///
/// # Examples
///
/// ```
/// use hubchat_proto::escape_newlines;
///
/// assert_eq!(escape_newlines(b"a\nb"), b"a//b");
/// ```
pub fn escape_newlines(body: &[u8]) -> Vec<u8> {
    let newlines = body.iter().filter(|b| **b == b'\n').count();
    let mut out = Vec::with_capacity(body.len() + newlines);

    for &byte in body {
        if byte == b'\n' {
            out.extend_from_slice(NEWLINE_SENTINEL);
        } else {
            out.push(byte);
        }
    }

    out
}

/// Replace every [`NEWLINE_SENTINEL`] in `body` with `\n`, scanning left to right.
pub fn unescape_newlines(body: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(body.len());
    let mut i = 0;

    while i < body.len() {
        if body[i..].starts_with(NEWLINE_SENTINEL) {
            out.push(b'\n');
            i += NEWLINE_SENTINEL.len();
        } else {
            out.push(body[i]);
            i += 1;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape_newlines(b"one\ntwo\n"), b"one//two//");
        assert_eq!(escape_newlines(b"plain"), b"plain");
        assert!(escape_newlines(b"").is_empty());
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape_newlines(b"one//two//"), b"one\ntwo\n");
        assert_eq!(unescape_newlines(b"a/b"), b"a/b");
        // Odd run of slashes: the leading pair becomes the newline.
        assert_eq!(unescape_newlines(b"a///b"), b"a\n/b");
    }

    #[test]
    fn test_crlf_keeps_carriage_return() {
        assert_eq!(escape_newlines(b"a\r\nb"), b"a\r//b");
        assert_eq!(unescape_newlines(b"a\r//b"), b"a\r\nb");
    }
}
