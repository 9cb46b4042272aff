//! # hubchat-proto
//!
//! Wire protocol for the hubchat server.
//!
//! ## Features
//!
//! - Case-insensitive command keywords parsed into a typed [`Command`]
//! - Length-prefixed MSG bodies that may carry embedded newlines
//! - `//` newline sentinel escaping for single-line file payloads
//! - Optional Tokio codec ([`CommandCodec`]) that frames the inbound byte
//!   stream and encodes outbound [`Reply`] lines
//!
//! ## Quick Start
//!
//! ```rust
//! use hubchat_proto::{Command, Recipient};
//!
//! let cmd = Command::parse(b"MSG #general 5\r\nhello").unwrap();
//! assert_eq!(
//!     cmd,
//!     Command::Msg {
//!         recipient: Recipient::Channel("#general".to_string()),
//!         body: "hello".into(),
//!     }
//! );
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod command;
pub mod error;
pub mod escape;
pub mod reply;
pub mod sigil;

#[cfg(feature = "tokio")]
pub mod codec;

pub use self::command::{Command, CommandKind, Recipient};
pub use self::error::{ParseError, ProtocolError};
pub use self::escape::{escape_newlines, unescape_newlines, NEWLINE_SENTINEL};
pub use self::reply::{Reply, REPLY_MARKER};
pub use self::sigil::{SigilExt, CHANNEL_SIGIL, USER_SIGIL};

#[cfg(feature = "tokio")]
pub use self::codec::{CommandCodec, DEFAULT_MAX_BODY_LEN, DEFAULT_MAX_LINE_LEN};
