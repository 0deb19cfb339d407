//! IRC message tokeniser.
//!
//! Splits one terminator-stripped line into prefix, command and parameters
//! per RFC 1459 §2.3.1. This is a purely syntactic pass: no semantic
//! checking, no allocation in the borrowed form, safe to run concurrently
//! on distinct inputs.

use std::fmt;

use crate::error::ParseError;
use crate::MAX_IRC_PARAMS;

/// A tokenised message borrowing the input line.
///
/// All fields alias the line passed to [`MessageRef::parse`] and live only
/// as long as it does. Callers that hand messages past the read callback
/// (or reuse the read buffer) should [`MessageRef::to_owned`] first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRef<'a> {
    /// Message source, without the leading `:`.
    pub prefix: Option<&'a str>,
    /// Command name: a run of ASCII letters, or exactly three digits.
    pub command: &'a str,
    /// Up to fifteen parameters; a trailing `:`-parameter may contain spaces.
    pub params: Vec<&'a str>,
}

/// An owned tokenised message.
///
/// `Display` renders the RFC wire form including the `\r\n` terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Message source, without the leading `:`.
    pub prefix: Option<String>,
    /// Command name.
    pub command: String,
    /// Parameters in order.
    pub params: Vec<String>,
}

#[inline]
fn skip_spaces(s: &str) -> &str {
    s.trim_start_matches(' ')
}

/// Index of the first space in `s`, or its length.
#[inline]
fn until_space(s: &str) -> usize {
    s.find(' ').unwrap_or(s.len())
}

impl<'a> MessageRef<'a> {
    /// Tokenise one IRC line, already stripped of `\r\n`.
    ///
    /// Grammar, after skipping leading spaces:
    ///
    /// 1. optional prefix: `:` followed by a non-empty run of non-spaces;
    /// 2. command: three ASCII digits, or one-or-more ASCII letters, each
    ///    terminated by a space or end of input;
    /// 3. at most [`MAX_IRC_PARAMS`] parameters; a parameter starting with
    ///    `:` swallows the rest of the line, spaces included. Runs of
    ///    separator spaces never produce empty parameters.
    pub fn parse(line: &'a str) -> Result<Self, ParseError> {
        let mut rest = skip_spaces(line);

        let mut prefix = None;
        if let Some(after_colon) = rest.strip_prefix(':') {
            let end = until_space(after_colon);
            if end == 0 {
                return Err(ParseError::EmptyPrefix);
            }
            if end == after_colon.len() {
                // The sender announced a prefix and nothing else.
                return Err(ParseError::MissingCommand);
            }
            prefix = Some(&after_colon[..end]);
            rest = &after_colon[end + 1..];
        }

        rest = skip_spaces(rest);
        if rest.is_empty() {
            return Err(ParseError::MissingCommand);
        }

        let bytes = rest.as_bytes();
        let command;
        if bytes[0].is_ascii_digit() {
            if bytes.len() >= 3
                && bytes[1].is_ascii_digit()
                && bytes[2].is_ascii_digit()
                && (bytes.len() == 3 || bytes[3] == b' ')
            {
                command = &rest[..3];
                rest = &rest[3..];
            } else {
                return Err(ParseError::InvalidCommand);
            }
        } else {
            let end = bytes
                .iter()
                .position(|b| !b.is_ascii_alphabetic())
                .unwrap_or(bytes.len());
            if end == 0 || (end < bytes.len() && bytes[end] != b' ') {
                return Err(ParseError::InvalidCommand);
            }
            command = &rest[..end];
            rest = &rest[end..];
        }

        let mut params = Vec::new();
        loop {
            rest = skip_spaces(rest);
            if rest.is_empty() {
                break;
            }
            if let Some(trailing) = rest.strip_prefix(':') {
                // The RFC does not allow spaces right after the `:`, but
                // accepting and stripping them is harmless.
                let trailing = skip_spaces(trailing);
                if !trailing.is_empty() {
                    if params.len() == MAX_IRC_PARAMS {
                        return Err(ParseError::TooManyParams);
                    }
                    params.push(trailing);
                }
                break;
            }
            if params.len() == MAX_IRC_PARAMS {
                return Err(ParseError::TooManyParams);
            }
            let end = until_space(rest);
            params.push(&rest[..end]);
            rest = &rest[end..];
        }

        Ok(Self {
            prefix,
            command,
            params,
        })
    }

    /// Copy the tokens out of the input buffer into an owned [`Message`].
    pub fn to_owned(&self) -> Message {
        Message {
            prefix: self.prefix.map(str::to_owned),
            command: self.command.to_owned(),
            params: self.params.iter().map(|p| (*p).to_owned()).collect(),
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(prefix) = &self.prefix {
            write!(f, ":{prefix} ")?;
        }
        f.write_str(&self.command)?;
        if let Some((last, rest)) = self.params.split_last() {
            for param in rest {
                write!(f, " {param}")?;
            }
            if last.is_empty() || last.contains(' ') || last.starts_with(':') {
                write!(f, " :{last}")?;
            } else {
                write!(f, " {last}")?;
            }
        }
        f.write_str("\r\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_privmsg_with_prefix() {
        let msg = MessageRef::parse(":alice!a@h PRIVMSG #room :hi all").unwrap();
        assert_eq!(msg.prefix, Some("alice!a@h"));
        assert_eq!(msg.command, "PRIVMSG");
        assert_eq!(msg.params, vec!["#room", "hi all"]);
    }

    #[test]
    fn parse_numeric_command() {
        let msg = MessageRef::parse("001 bob :Welcome").unwrap();
        assert_eq!(msg.prefix, None);
        assert_eq!(msg.command, "001");
        assert_eq!(msg.params, vec!["bob", "Welcome"]);
    }

    #[test]
    fn parse_bare_command() {
        let msg = MessageRef::parse("QUIT").unwrap();
        assert_eq!(msg.command, "QUIT");
        assert!(msg.params.is_empty());
    }

    #[test]
    fn parse_skips_extra_separator_spaces() {
        let msg = MessageRef::parse("  PING   a   b  ").unwrap();
        assert_eq!(msg.command, "PING");
        assert_eq!(msg.params, vec!["a", "b"]);
    }

    #[test]
    fn parse_rejects_empty_prefix() {
        assert_eq!(MessageRef::parse(":   "), Err(ParseError::EmptyPrefix));
        assert_eq!(MessageRef::parse(": PING x"), Err(ParseError::EmptyPrefix));
    }

    #[test]
    fn parse_rejects_prefix_only() {
        assert_eq!(
            MessageRef::parse(":alice!a@h"),
            Err(ParseError::MissingCommand)
        );
    }

    #[test]
    fn parse_rejects_bad_commands() {
        assert_eq!(MessageRef::parse(""), Err(ParseError::MissingCommand));
        assert_eq!(MessageRef::parse("12 x"), Err(ParseError::InvalidCommand));
        assert_eq!(MessageRef::parse("1234 x"), Err(ParseError::InvalidCommand));
        assert_eq!(MessageRef::parse("00a x"), Err(ParseError::InvalidCommand));
        assert_eq!(
            MessageRef::parse("PRIV#MSG x"),
            Err(ParseError::InvalidCommand)
        );
    }

    #[test]
    fn parse_fifteen_params_ok_sixteen_rejected() {
        let fifteen = format!("CMD {}", (0..15).map(|i| i.to_string()).collect::<Vec<_>>().join(" "));
        let msg = MessageRef::parse(&fifteen).unwrap();
        assert_eq!(msg.params.len(), 15);

        let sixteen = format!("{fifteen} extra");
        assert_eq!(
            MessageRef::parse(&sixteen),
            Err(ParseError::TooManyParams)
        );

        // A trailing parameter counts toward the limit too.
        let trailing_over = format!("{fifteen} :extra words");
        assert_eq!(
            MessageRef::parse(&trailing_over),
            Err(ParseError::TooManyParams)
        );
    }

    #[test]
    fn parse_empty_trailing_produces_no_param() {
        let msg = MessageRef::parse("PRIVMSG bob :").unwrap();
        assert_eq!(msg.params, vec!["bob"]);
    }

    #[test]
    fn parse_is_total_on_junk() {
        // Anything must either tokenise or return an error; no panics.
        for line in [
            "\u{0}\u{1}\u{2}",
            ":::::",
            "   :   ",
            "ping\twith\ttabs",
            "🦀 PRIVMSG",
            &"a".repeat(1024),
        ] {
            let _ = MessageRef::parse(line);
        }
    }

    #[test]
    fn display_round_trip() {
        let msg = MessageRef::parse(":srv 001 bob :Welcome home")
            .unwrap()
            .to_owned();
        assert_eq!(msg.to_string(), ":srv 001 bob :Welcome home\r\n");

        let msg = MessageRef::parse("PONG srv token").unwrap().to_owned();
        assert_eq!(msg.to_string(), "PONG srv token\r\n");
    }
}
