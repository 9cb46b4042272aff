//! Server-to-client reply lines.

use std::fmt;

use bytes::{BufMut, Bytes, BytesMut};

use crate::escape::escape_newlines;

/// Prefix of every status line sent by the server.
pub const REPLY_MARKER: &str = "->> ";

/// One outbound line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Status line reporting success: `->> <text>`.
    Notice(String),
    /// Status line reporting a rejected command: `->> ERR: <text>`.
    Error(String),
    /// Channel broadcast or direct message: `<from>: <body>`.
    Chat {
        /// Sender label, normally a username with its sigil.
        from: String,
        /// Raw message body.
        body: Bytes,
    },
    /// File payload: `FILE <name> <escaped body>`.
    File {
        /// Stored file name.
        name: String,
        /// Unescaped file body; escaped on encode.
        body: Bytes,
    },
}

impl Reply {
    /// Shorthand for [`Reply::Notice`].
    pub fn notice(text: impl Into<String>) -> Self {
        Reply::Notice(text.into())
    }

    /// Shorthand for [`Reply::Error`].
    pub fn error(text: impl fmt::Display) -> Self {
        Reply::Error(text.to_string())
    }

    /// Append the wire form of this reply, including the trailing newline.
    pub fn encode(&self, dst: &mut BytesMut) {
        match self {
            Reply::Notice(text) => {
                dst.reserve(REPLY_MARKER.len() + text.len() + 1);
                dst.put_slice(REPLY_MARKER.as_bytes());
                dst.put_slice(text.as_bytes());
            }
            Reply::Error(text) => {
                dst.reserve(REPLY_MARKER.len() + text.len() + 6);
                dst.put_slice(REPLY_MARKER.as_bytes());
                dst.put_slice(b"ERR: ");
                dst.put_slice(text.as_bytes());
            }
            Reply::Chat { from, body } => {
                dst.reserve(from.len() + body.len() + 3);
                dst.put_slice(from.as_bytes());
                dst.put_slice(b": ");
                dst.put_slice(body);
            }
            Reply::File { name, body } => {
                let escaped = escape_newlines(body);
                dst.reserve(name.len() + escaped.len() + 7);
                dst.put_slice(b"FILE ");
                dst.put_slice(name.as_bytes());
                dst.put_u8(b' ');
                dst.put_slice(&escaped);
            }
        }
        dst.put_u8(b'\n');
    }

    /// Encode into a standalone buffer.
    ///
    /// Used for fan-out, where one encoded line is shared by every member.
    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::new();
        self.encode(&mut buf);
        buf.freeze()
    }
}
