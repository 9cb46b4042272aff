//! Client command types and parsing.
//!
//! - `types`: [`Command`], [`CommandKind`] and [`Recipient`]
//! - `parse`: frame-to-command parser and the MSG framing helper used by the codec

mod parse;
mod types;

pub use self::types::{Command, CommandKind, Recipient};

#[cfg(feature = "tokio")]
pub(crate) use self::parse::{is_msg_header, msg_body_span};
