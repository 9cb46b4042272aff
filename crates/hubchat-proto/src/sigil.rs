//! Sigil utilities for channel and user names.
//!
//! Every name on the wire carries its namespace in its first character:
//! `#` for channels and `@` for users. The sigil is part of the name and is
//! stored with it.

/// Leading character of every channel name.
pub const CHANNEL_SIGIL: char = '#';

/// Leading character of every username.
pub const USER_SIGIL: char = '@';

/// Extension trait for checking sigil-prefixed names.
pub trait SigilExt {
    /// Check if this string is a well-formed channel name.
    ///
    /// Valid channel names:
    /// - Start with `#`
    /// - Have at least one character after the sigil
    /// - Contain no whitespace or control characters
    fn is_channel_name(&self) -> bool;

    /// Check if this string is a well-formed username (`@` plus a name).
    fn is_user_name(&self) -> bool;
}

fn has_sigil_and_name(s: &str, sigil: char) -> bool {
    let mut chars = s.chars();

    if chars.next() != Some(sigil) {
        return false;
    }

    let mut rest = chars.peekable();
    if rest.peek().is_none() {
        return false;
    }

    rest.all(|c| !c.is_whitespace() && !c.is_control())
}

impl SigilExt for &str {
    fn is_channel_name(&self) -> bool {
        has_sigil_and_name(self, CHANNEL_SIGIL)
    }

    fn is_user_name(&self) -> bool {
        has_sigil_and_name(self, USER_SIGIL)
    }
}

impl SigilExt for String {
    fn is_channel_name(&self) -> bool {
        self.as_str().is_channel_name()
    }

    fn is_user_name(&self) -> bool {
        self.as_str().is_user_name()
    }
}
