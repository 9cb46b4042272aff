//! Frame-to-command parsing.
//!
//! A frame is one complete protocol unit as cut by the codec: a single line
//! for fixed-form commands, or a MSG header line followed by its
//! length-prefixed body. Parsing works on bytes because MSG and SEND bodies
//! are not required to be UTF-8; only the header tokens are.

use bytes::Bytes;

use super::types::{Command, CommandKind, Recipient};
use crate::error::ParseError;
use crate::escape::unescape_newlines;
use crate::sigil::{SigilExt, CHANNEL_SIGIL, USER_SIGIL};

/// Delimiter between a MSG body length and the body.
const CRLF: &[u8] = b"\r\n";

/// The same delimiter typed as text (`\r\n` as four characters).
const LITERAL_CRLF: &[u8] = b"\\r\\n";

/// Token separating a SEND filename from the escaped body.
const BODY_MARKER: &[u8] = b">>";

fn is_blank(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

/// Index of the first non-whitespace byte at or after `from`.
fn skip_whitespace(bytes: &[u8], from: usize) -> usize {
    from + bytes[from..]
        .iter()
        .take_while(|b| b.is_ascii_whitespace())
        .count()
}

/// Index one past the end of the token starting at `from`.
fn token_end(bytes: &[u8], from: usize) -> usize {
    from + bytes[from..]
        .iter()
        .take_while(|b| !b.is_ascii_whitespace())
        .count()
}

fn header_str(kind: CommandKind, bytes: &[u8]) -> Result<&str, ParseError> {
    std::str::from_utf8(bytes).map_err(|_| ParseError::InvalidUtf8(kind))
}

/// Returns true if the line's first token is the MSG keyword.
#[cfg_attr(not(feature = "tokio"), allow(dead_code))]
pub(crate) fn is_msg_header(line: &[u8]) -> bool {
    let start = skip_whitespace(line, 0);
    let end = token_end(line, start);
    line[start..end].eq_ignore_ascii_case(CommandKind::Msg.as_str().as_bytes())
}

/// How a MSG length is separated from its body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Delimiter {
    /// `\r\n` bytes; the body may span lines.
    Crlf,
    /// A bare `\n`; the body may span lines.
    Newline,
    /// `\r\n` typed as four characters. The whole frame is one line, so
    /// the body ends at that line's newline.
    Typed,
}

impl Delimiter {
    /// Whether the body is confined to the header's line.
    pub(crate) fn is_line_bound(self) -> bool {
        self == Delimiter::Typed
    }
}

/// Position of a MSG body within its frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BodySpan {
    /// Offset of the first body byte.
    pub start: usize,
    /// Declared body length.
    pub len: usize,
    pub delimiter: Delimiter,
}

/// Locate the body of a MSG frame.
///
/// The body itself does not need to be present yet.
#[cfg_attr(not(feature = "tokio"), allow(dead_code))]
pub(crate) fn msg_body_span(frame: &[u8]) -> Result<BodySpan, ParseError> {
    let keyword_start = skip_whitespace(frame, 0);
    let keyword_end = token_end(frame, keyword_start);
    let recipient_start = skip_whitespace(frame, keyword_end);
    let recipient_end = token_end(frame, recipient_start);

    let span = length_prefix(&frame[recipient_end..])?;
    Ok(BodySpan {
        start: recipient_end + span.start,
        ..span
    })
}

/// Parse `<length><delimiter>`, allowing leading and trailing blanks.
fn length_prefix(bytes: &[u8]) -> Result<BodySpan, ParseError> {
    let digits_start = bytes.iter().take_while(|b| is_blank(**b)).count();
    let digits_len = bytes[digits_start..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();

    if digits_len == 0 {
        return Err(ParseError::MissingLength);
    }

    let digits = &bytes[digits_start..digits_start + digits_len];
    let len: usize = std::str::from_utf8(digits)
        .ok()
        .and_then(|d| d.parse().ok())
        .ok_or_else(|| ParseError::InvalidLength(String::from_utf8_lossy(digits).into_owned()))?;

    if len == 0 {
        return Err(ParseError::ZeroLength);
    }

    let mut pos = digits_start + digits_len;
    pos += bytes[pos..].iter().take_while(|b| is_blank(**b)).count();

    let tail = &bytes[pos..];
    let (delimiter, width) = if tail.starts_with(CRLF) {
        (Delimiter::Crlf, CRLF.len())
    } else if tail.starts_with(LITERAL_CRLF) {
        (Delimiter::Typed, LITERAL_CRLF.len())
    } else if tail.starts_with(b"\n") {
        (Delimiter::Newline, 1)
    } else {
        return Err(ParseError::MissingDelimiter);
    };

    Ok(BodySpan {
        start: pos + width,
        len,
        delimiter,
    })
}

/// Validate a channel argument, returning it owned.
fn channel_arg(token: &str) -> Result<String, ParseError> {
    if token.is_empty() || token == CHANNEL_SIGIL.to_string() {
        return Err(ParseError::BlankChannel);
    }
    if !token.starts_with(CHANNEL_SIGIL) {
        return Err(ParseError::MissingChannelSigil);
    }
    if !token.is_channel_name() {
        return Err(ParseError::InvalidChannel(token.to_owned()));
    }
    Ok(token.to_owned())
}

fn parse_reg(args: &str) -> Result<Command, ParseError> {
    if args.is_empty() {
        return Err(ParseError::BlankUsername);
    }
    if !args.starts_with(USER_SIGIL) {
        return Err(ParseError::MissingUserSigil);
    }
    if args.len() == USER_SIGIL.len_utf8() {
        return Err(ParseError::BlankUsername);
    }
    if !args.is_user_name() {
        return Err(ParseError::InvalidUsername(args.to_owned()));
    }

    Ok(Command::Reg {
        username: args.to_owned(),
    })
}

fn parse_msg(rest: &[u8]) -> Result<Command, ParseError> {
    let recipient_start = skip_whitespace(rest, 0);
    let recipient_end = token_end(rest, recipient_start);
    let token = header_str(CommandKind::Msg, &rest[recipient_start..recipient_end])?;
    let recipient = Recipient::parse(token)?;

    let after = &rest[recipient_end..];
    let BodySpan {
        start,
        len,
        delimiter,
    } = length_prefix(after)?;
    let mut body = &after[start..];
    if delimiter.is_line_bound() {
        body = body.strip_suffix(b"\n").unwrap_or(body);
        body = body.strip_suffix(b"\r").unwrap_or(body);
    }

    if body.len() < len {
        return Err(ParseError::TruncatedBody {
            expected: len,
            got: body.len(),
        });
    }

    Ok(Command::Msg {
        recipient,
        body: Bytes::copy_from_slice(&body[..len]),
    })
}

fn parse_send(rest: &[u8]) -> Result<Command, ParseError> {
    let channel_start = skip_whitespace(rest, 0);
    let channel_end = token_end(rest, channel_start);
    let channel = channel_arg(header_str(
        CommandKind::Send,
        &rest[channel_start..channel_end],
    )?)?;

    let filename_start = skip_whitespace(rest, channel_end);
    let filename_end = token_end(rest, filename_start);
    let filename = &rest[filename_start..filename_end];
    if filename.is_empty() || filename == BODY_MARKER {
        return Err(ParseError::MissingFilename);
    }
    let filename = header_str(CommandKind::Send, filename)?.to_owned();

    let marker_start = skip_whitespace(rest, filename_end);
    let marker_end = token_end(rest, marker_start);
    if &rest[marker_start..marker_end] != BODY_MARKER {
        return Err(ParseError::MissingBodyMarker);
    }

    let mut body = &rest[marker_end..];
    if let Some(stripped) = body.strip_prefix(b" ") {
        body = stripped;
    }
    if let Some(stripped) = body.strip_suffix(b"\n") {
        body = stripped;
    }
    if let Some(stripped) = body.strip_suffix(b"\r") {
        body = stripped;
    }

    Ok(Command::Send {
        channel,
        filename,
        body: Bytes::from(unescape_newlines(body)),
    })
}

fn parse_get(args: &str) -> Result<Command, ParseError> {
    let (channel, filename) = args.split_once(char::is_whitespace).unwrap_or((args, ""));
    let channel = channel_arg(channel)?;

    let filename = filename.trim();
    if filename.is_empty() {
        return Err(ParseError::MissingGetFilename);
    }

    Ok(Command::Get {
        channel,
        filename: filename.to_owned(),
    })
}

impl Command {
    /// Parse one complete frame into a command.
    ///
    /// The keyword is matched case-insensitively. Fixed-form arguments are
    /// trimmed, so a trailing `\r\n` is harmless.
    ///
    /// # Examples
    ///
    /// ```
    /// use hubchat_proto::Command;
    ///
    /// assert_eq!(
    ///     Command::parse(b"join #rust\r\n").unwrap(),
    ///     Command::Join { channel: "#rust".to_string() }
    /// );
    /// assert!(Command::parse(b"JOIN rust").is_err());
    /// ```
    #[must_use = "command parsing result should be handled"]
    pub fn parse(frame: &[u8]) -> Result<Command, ParseError> {
        let keyword_start = skip_whitespace(frame, 0);
        let keyword_end = token_end(frame, keyword_start);
        let keyword = &frame[keyword_start..keyword_end];

        if keyword.is_empty() {
            return Err(ParseError::EmptyCommand);
        }

        let kind: CommandKind = std::str::from_utf8(keyword)
            .map_err(|_| {
                ParseError::UnknownCommand(String::from_utf8_lossy(keyword).to_ascii_uppercase())
            })?
            .parse()?;

        let rest = &frame[keyword_end..];
        let args = || header_str(kind, rest).map(str::trim);

        match kind {
            CommandKind::Reg => parse_reg(args()?),
            CommandKind::Join => Ok(Command::Join {
                channel: channel_arg(args()?)?,
            }),
            CommandKind::Leave => Ok(Command::Leave {
                channel: channel_arg(args()?)?,
            }),
            CommandKind::Files => Ok(Command::Files {
                channel: channel_arg(args()?)?,
            }),
            CommandKind::Msg => parse_msg(rest),
            CommandKind::Send => parse_send(rest),
            CommandKind::Get => parse_get(args()?),
            CommandKind::Chns => Ok(Command::Chns),
            CommandKind::Usrs => Ok(Command::Usrs),
        }
    }
}
