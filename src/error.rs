//! Unified error handling for hubchat.
//!
//! Parse errors live in `hubchat_proto` and never reach the hub. This module
//! covers the precondition failures the hub detects while applying a
//! command, each of which becomes an error reply to the sender.

use hubchat_proto::Reply;
use thiserror::Error;

/// Errors that can occur during command handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HubError {
    #[error("REG Denied: already registered as {0}")]
    AlreadyRegistered(String),

    #[error("REG Denied: {0} was already taken")]
    UsernameTaken(String),

    #[error("user isn't registered")]
    NotRegistered,

    #[error("channel {0} doesn't exist")]
    NoSuchChannel(String),

    #[error("{user} isn't a member of {channel}")]
    NotMember { user: String, channel: String },

    #[error("{0} is not a registered user")]
    NoSuchUser(String),

    #[error("file {file} already exists in {channel}")]
    FileExists { file: String, channel: String },

    #[error("file {file} doesn't exist in {channel}")]
    NoSuchFile { file: String, channel: String },

    /// The hub task has stopped; only seen by connections.
    #[error("hub is not running")]
    HubUnavailable,
}

impl HubError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyRegistered(_) => "already_registered",
            Self::UsernameTaken(_) => "username_taken",
            Self::NotRegistered => "not_registered",
            Self::NoSuchChannel(_) => "no_such_channel",
            Self::NotMember { .. } => "not_member",
            Self::NoSuchUser(_) => "no_such_user",
            Self::FileExists { .. } => "file_exists",
            Self::NoSuchFile { .. } => "no_such_file",
            Self::HubUnavailable => "hub_unavailable",
        }
    }

    /// Convert to the error line sent back to the client.
    pub fn to_reply(&self) -> Reply {
        Reply::error(self)
    }
}

/// Result type for hub command handlers.
pub type HandlerResult = Result<(), HubError>;
