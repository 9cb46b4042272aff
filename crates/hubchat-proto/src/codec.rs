//! Tokio codec for the hubchat wire protocol.
//!
//! Inbound, the byte stream is cut into frames: one line for fixed-form
//! commands, or a MSG header followed by exactly the number of body bytes it
//! declares. Each frame is parsed into a [`Command`]; a malformed frame comes
//! out as an `Err` item so the connection can report it and keep reading.
//!
//! Outbound, [`Reply`] values are written as single lines.

use bytes::{Buf, BytesMut};
use tokio_util::codec::{Decoder, Encoder};
use tracing::debug;

use crate::command::{is_msg_header, msg_body_span, Command};
use crate::error::{self, ParseError};
use crate::reply::Reply;

/// Default maximum length of a command line, in bytes.
pub const DEFAULT_MAX_LINE_LEN: usize = 64 * 1024;

/// Default maximum declared length of a MSG body, in bytes.
pub const DEFAULT_MAX_BODY_LEN: usize = 64 * 1024;

/// Bytes still to be thrown away after an oversized frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Discard {
    /// Rest of an over-long line, up to and including its newline.
    UntilNewline,
    /// Remaining bytes of an oversized MSG body.
    Bytes(usize),
}

/// Frame decoder and reply encoder.
#[derive(Debug)]
pub struct CommandCodec {
    /// Index of next byte to check for newline
    next_index: usize,
    max_line_len: usize,
    max_body_len: usize,
    discard: Option<Discard>,
}

impl Default for CommandCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandCodec {
    /// Create a codec with the default limits.
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_MAX_LINE_LEN, DEFAULT_MAX_BODY_LEN)
    }

    /// Create a codec with custom line and MSG body limits.
    pub fn with_limits(max_line_len: usize, max_body_len: usize) -> Self {
        Self {
            next_index: 0,
            max_line_len,
            max_body_len,
            discard: None,
        }
    }

    /// Throw away pending discard bytes. Returns false if more input is needed.
    fn drain_discard(&mut self, src: &mut BytesMut) -> bool {
        match self.discard {
            None => true,
            Some(Discard::UntilNewline) => match src.iter().position(|b| *b == b'\n') {
                Some(pos) => {
                    src.advance(pos + 1);
                    self.discard = None;
                    true
                }
                None => {
                    src.clear();
                    false
                }
            },
            Some(Discard::Bytes(remaining)) => {
                let take = remaining.min(src.len());
                src.advance(take);
                if take < remaining {
                    self.discard = Some(Discard::Bytes(remaining - take));
                    false
                } else {
                    self.discard = None;
                    true
                }
            }
        }
    }
}

fn is_blank_frame(frame: &[u8]) -> bool {
    frame.iter().all(u8::is_ascii_whitespace)
}

impl Decoder for CommandCodec {
    type Item = Result<Command, ParseError>;
    type Error = error::ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> error::Result<Option<Self::Item>> {
        loop {
            if !self.drain_discard(src) || src.is_empty() {
                return Ok(None);
            }

            let newline = src[self.next_index..]
                .iter()
                .position(|b| *b == b'\n')
                .map(|offset| self.next_index + offset + 1);
            let header = &src[..newline.unwrap_or(src.len())];

            // A body with a typed-out delimiter never leaves the header's line.
            let mut line_bound_len = None;

            if is_msg_header(header) {
                if let Ok(span) = msg_body_span(header) {
                    if span.delimiter.is_line_bound() {
                        line_bound_len = Some(span.len);
                    } else {
                        self.next_index = 0;

                        if span.len > self.max_body_len {
                            debug!(
                                declared = span.len,
                                limit = self.max_body_len,
                                "discarding oversized MSG body"
                            );
                            src.advance(span.start);
                            self.discard = Some(Discard::Bytes(span.len));
                            return Ok(Some(Err(ParseError::BodyTooLong {
                                actual: span.len,
                                limit: self.max_body_len,
                            })));
                        }

                        let frame_len = span.start + span.len;
                        if src.len() < frame_len {
                            src.reserve(frame_len - src.len());
                            return Ok(None);
                        }

                        let frame = src.split_to(frame_len);
                        return Ok(Some(Command::parse(&frame)));
                    }
                }
            }

            match newline {
                Some(line_end) => {
                    self.next_index = 0;
                    let line = src.split_to(line_end);

                    if line.len() > self.max_line_len {
                        return Ok(Some(Err(ParseError::LineTooLong {
                            actual: line.len(),
                            limit: self.max_line_len,
                        })));
                    }
                    if is_blank_frame(&line) {
                        continue;
                    }
                    if let Some(declared) = line_bound_len.filter(|len| *len > self.max_body_len) {
                        return Ok(Some(Err(ParseError::BodyTooLong {
                            actual: declared,
                            limit: self.max_body_len,
                        })));
                    }

                    return Ok(Some(Command::parse(&line)));
                }
                None => {
                    // No complete line yet - remember where we stopped
                    self.next_index = src.len();

                    if src.len() > self.max_line_len {
                        let actual = src.len();
                        debug!(actual, limit = self.max_line_len, "discarding over-long line");
                        src.clear();
                        self.next_index = 0;
                        self.discard = Some(Discard::UntilNewline);
                        return Ok(Some(Err(ParseError::LineTooLong {
                            actual,
                            limit: self.max_line_len,
                        })));
                    }

                    return Ok(None);
                }
            }
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> error::Result<Option<Self::Item>> {
        if let Some(item) = self.decode(src)? {
            return Ok(Some(item));
        }

        self.next_index = 0;
        if self.discard.take().is_some() || is_blank_frame(src) {
            src.clear();
            return Ok(None);
        }

        // Unterminated last line, or a MSG whose body never fully arrived.
        let frame = src.split();
        Ok(Some(Command::parse(&frame)))
    }
}

impl Encoder<Reply> for CommandCodec {
    type Error = error::ProtocolError;

    fn encode(&mut self, reply: Reply, dst: &mut BytesMut) -> error::Result<()> {
        reply.encode(dst);
        Ok(())
    }
}
