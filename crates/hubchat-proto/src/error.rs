//! Error types for the hubchat protocol library.
//!
//! [`ParseError`] covers everything a client can get wrong inside a single
//! frame. Its `Display` text is sent back to the client verbatim, so keep the
//! messages user-facing. [`ProtocolError`] is what the codec surfaces for
//! conditions that end the stream.

use thiserror::Error;

use crate::command::CommandKind;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Stream-level protocol errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error during reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors encountered while parsing one client frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// Frame contained no keyword.
    #[error("Empty command")]
    EmptyCommand,

    /// Keyword did not match any known command.
    #[error("Unknown command {0}")]
    UnknownCommand(String),

    /// Command header was not valid UTF-8.
    #[error("{0} arguments must be valid UTF-8")]
    InvalidUtf8(CommandKind),

    /// REG without a name, or with only the sigil.
    #[error("Username cannot be blank")]
    BlankUsername,

    /// REG name without the leading `@`.
    #[error("Username must begin with '@'")]
    MissingUserSigil,

    /// REG name containing whitespace or control characters.
    #[error("Username {0} contains invalid characters")]
    InvalidUsername(String),

    /// Channel argument missing or consisting only of the sigil.
    #[error("Channel must have a name ('#name')")]
    BlankChannel,

    /// Channel argument without the leading `#`.
    #[error("Channel must begin with '#'")]
    MissingChannelSigil,

    /// Channel argument containing whitespace or control characters.
    #[error("Channel {0} contains invalid characters")]
    InvalidChannel(String),

    /// MSG recipient without a `#` or `@` sigil.
    #[error("Recipient must be a channel ('#name') or a user ('@user')")]
    InvalidRecipient,

    /// MSG recipient consisting only of the sigil.
    #[error("Recipient must have a name")]
    BlankRecipient,

    /// MSG without a decimal body length.
    #[error("Body length must be present")]
    MissingLength,

    /// MSG body length that does not fit the platform's integer width.
    #[error("Body length {0} is not a valid number")]
    InvalidLength(String),

    /// MSG body length of zero.
    #[error("Body length must be at least 1")]
    ZeroLength,

    /// MSG body length not followed by the frame delimiter.
    #[error("Body length must be followed by \\r\\n")]
    MissingDelimiter,

    /// Fewer body bytes were available than the declared length.
    #[error("Body truncated: expected {expected} bytes, got {got}")]
    TruncatedBody {
        /// Declared body length.
        expected: usize,
        /// Bytes actually available.
        got: usize,
    },

    /// Declared MSG body length above the configured limit.
    #[error("Body length {actual} exceeds the limit of {limit} bytes")]
    BodyTooLong {
        /// Declared body length.
        actual: usize,
        /// Maximum allowed body length.
        limit: usize,
    },

    /// Line exceeded the configured maximum length.
    #[error("Line too long: {actual} bytes (limit: {limit})")]
    LineTooLong {
        /// Bytes seen before giving up on the line.
        actual: usize,
        /// Maximum allowed line length.
        limit: usize,
    },

    /// SEND without a filename.
    #[error("File must be saved with a name")]
    MissingFilename,

    /// GET without a filename.
    #[error("Filename must be provided")]
    MissingGetFilename,

    /// SEND without the ` >> ` marker between filename and body.
    #[error("File body must follow a '>>' marker")]
    MissingBodyMarker,
}

impl ParseError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyCommand => "empty_command",
            Self::UnknownCommand(_) => "unknown_command",
            Self::InvalidUtf8(_) => "invalid_utf8",
            Self::BlankUsername => "blank_username",
            Self::MissingUserSigil => "missing_user_sigil",
            Self::InvalidUsername(_) => "invalid_username",
            Self::BlankChannel => "blank_channel",
            Self::MissingChannelSigil => "missing_channel_sigil",
            Self::InvalidChannel(_) => "invalid_channel",
            Self::InvalidRecipient => "invalid_recipient",
            Self::BlankRecipient => "blank_recipient",
            Self::MissingLength => "missing_length",
            Self::InvalidLength(_) => "invalid_length",
            Self::ZeroLength => "zero_length",
            Self::MissingDelimiter => "missing_delimiter",
            Self::TruncatedBody { .. } => "truncated_body",
            Self::BodyTooLong { .. } => "body_too_long",
            Self::LineTooLong { .. } => "line_too_long",
            Self::MissingFilename => "missing_filename",
            Self::MissingGetFilename => "missing_filename",
            Self::MissingBodyMarker => "missing_body_marker",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ParseError::TruncatedBody {
            expected: 10,
            got: 3,
        };
        assert_eq!(
            format!("{}", err),
            "Body truncated: expected 10 bytes, got 3"
        );

        let err = ParseError::UnknownCommand("PING".to_string());
        assert_eq!(format!("{}", err), "Unknown command PING");

        let err = ParseError::InvalidUtf8(CommandKind::Reg);
        assert_eq!(format!("{}", err), "REG arguments must be valid UTF-8");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(ParseError::ZeroLength.error_code(), "zero_length");
        assert_eq!(
            ParseError::LineTooLong {
                actual: 10,
                limit: 5
            }
            .error_code(),
            "line_too_long"
        );
    }

    #[test]
    fn test_error_conversion() {
        let io_err =
            std::io::Error::new(std::io::ErrorKind::ConnectionReset, "connection reset");
        let protocol_err: ProtocolError = io_err.into();

        match protocol_err {
            ProtocolError::Io(_) => {} // Expected
        }

        let source = std::error::Error::source(&protocol_err);
        assert!(source.is_some());
        assert_eq!(source.unwrap().to_string(), "connection reset");
    }
}
