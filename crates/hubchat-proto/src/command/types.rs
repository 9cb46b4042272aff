//! Command type definitions.

use std::fmt;
use std::str::FromStr;

use bytes::Bytes;

use crate::error::ParseError;
use crate::sigil::{CHANNEL_SIGIL, USER_SIGIL};

/// Keyword of a client command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// `REG @name`
    Reg,
    /// `JOIN #channel`
    Join,
    /// `LEAVE #channel`
    Leave,
    /// `MSG <recipient> <length>\r\n<body>`
    Msg,
    /// `FILES #channel`
    Files,
    /// `SEND #channel <filename> >> <body>`
    Send,
    /// `GET #channel <filename>`
    Get,
    /// `CHNS`
    Chns,
    /// `USRS`
    Usrs,
}

impl CommandKind {
    /// All command kinds, in protocol order.
    pub const ALL: [CommandKind; 9] = [
        CommandKind::Reg,
        CommandKind::Join,
        CommandKind::Leave,
        CommandKind::Msg,
        CommandKind::Files,
        CommandKind::Send,
        CommandKind::Get,
        CommandKind::Chns,
        CommandKind::Usrs,
    ];

    /// Canonical (uppercase) keyword.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reg => "REG",
            Self::Join => "JOIN",
            Self::Leave => "LEAVE",
            Self::Msg => "MSG",
            Self::Files => "FILES",
            Self::Send => "SEND",
            Self::Get => "GET",
            Self::Chns => "CHNS",
            Self::Usrs => "USRS",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseError::UnknownCommand(s.to_ascii_uppercase()))
    }
}

/// Target of a MSG command.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Recipient {
    /// A channel, stored with its `#` sigil.
    Channel(String),
    /// A user, stored with its `@` sigil.
    User(String),
}

impl Recipient {
    /// Classify a recipient token by its sigil.
    pub fn parse(token: &str) -> Result<Self, ParseError> {
        let recipient = match token.chars().next() {
            Some(CHANNEL_SIGIL) => Recipient::Channel(token.to_owned()),
            Some(USER_SIGIL) => Recipient::User(token.to_owned()),
            _ => return Err(ParseError::InvalidRecipient),
        };

        if token.len() == 1 {
            return Err(ParseError::BlankRecipient);
        }

        Ok(recipient)
    }

    /// The recipient name including its sigil.
    pub fn name(&self) -> &str {
        match self {
            Recipient::Channel(name) | Recipient::User(name) => name,
        }
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A parsed client command.
///
/// Produced once per frame by [`Command::parse`]; the sender travels alongside
/// it rather than inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Claim a username.
    Reg {
        /// Requested name, including the `@` sigil.
        username: String,
    },
    /// Join (creating if needed) a channel.
    Join {
        /// Channel name, including the `#` sigil.
        channel: String,
    },
    /// Leave a channel.
    Leave {
        /// Channel name, including the `#` sigil.
        channel: String,
    },
    /// Send a message to a channel or a user.
    Msg {
        /// Where the body goes.
        recipient: Recipient,
        /// Raw body bytes, possibly containing newlines.
        body: Bytes,
    },
    /// List files stored in a channel.
    Files {
        /// Channel name.
        channel: String,
    },
    /// Store a file in a channel.
    Send {
        /// Channel name.
        channel: String,
        /// Name of the file within the channel.
        filename: String,
        /// File body with the newline sentinel already reversed.
        body: Bytes,
    },
    /// Fetch a stored file.
    Get {
        /// Channel name.
        channel: String,
        /// Name of the file within the channel.
        filename: String,
    },
    /// List all channels.
    Chns,
    /// List all registered users.
    Usrs,
}

impl Command {
    /// The keyword this command was parsed from.
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Reg { .. } => CommandKind::Reg,
            Command::Join { .. } => CommandKind::Join,
            Command::Leave { .. } => CommandKind::Leave,
            Command::Msg { .. } => CommandKind::Msg,
            Command::Files { .. } => CommandKind::Files,
            Command::Send { .. } => CommandKind::Send,
            Command::Get { .. } => CommandKind::Get,
            Command::Chns => CommandKind::Chns,
            Command::Usrs => CommandKind::Usrs,
        }
    }

    /// The channel or user this command addresses, if any.
    pub fn target(&self) -> Option<&str> {
        match self {
            Command::Reg { username } => Some(username),
            Command::Join { channel }
            | Command::Leave { channel }
            | Command::Files { channel }
            | Command::Send { channel, .. }
            | Command::Get { channel, .. } => Some(channel),
            Command::Msg { recipient, .. } => Some(recipient.name()),
            Command::Chns | Command::Usrs => None,
        }
    }
}
