//! # lark-proto
//!
//! Wire-protocol primitives for the larkd IRC daemon, per RFC 1459:
//!
//! - Nickname alphabet codec with the RFC case equivalences
//!   (`{`=`[`, `}`=`]`, `|`=`\`, ASCII case folding)
//! - Message tokeniser, borrowed ([`MessageRef`]) and owned ([`Message`])
//! - Line reassembler turning fragmented reads into framed messages
//! - Numeric reply codes as the [`Response`] enum
//!
//! This crate is pure: it performs no I/O and never suspends. The server
//! crate owns all sockets and drives the reassembler with raw reads.

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod alphabet;
pub mod error;
pub mod line;
pub mod message;
pub mod response;

pub use self::alphabet::{Alphabet, CommandAlphabet, NickAlphabet};
pub use self::error::ParseError;
pub use self::line::{Frame, LineReassembler};
pub use self::message::{Message, MessageRef};
pub use self::response::Response;

/// Maximum message size, including the terminating `\r\n` (RFC 1459 §2.3).
pub const MAX_MSG_SIZE: usize = 512;

/// Maximum number of parameters in a message (RFC 1459 §2.3).
pub const MAX_IRC_PARAMS: usize = 15;

/// Maximum nickname length (RFC 1459 §1.2).
pub const MAX_NICK_LENGTH: usize = 9;

/// Width of a numeric reply code.
pub const NUMERIC_WIDTH: usize = 3;
