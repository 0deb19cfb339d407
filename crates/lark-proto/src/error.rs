//! Protocol error types.

use thiserror::Error;

/// Syntax errors raised by the message tokeniser.
///
/// The parser is purely syntactic: every variant corresponds to a violation
/// of the RFC 1459 §2.3.1 message grammar. Semantic problems (unknown
/// command, wrong arity) are for higher layers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A `:` announced a prefix but no prefix characters followed.
    #[error("empty prefix")]
    EmptyPrefix,

    /// The message ended before a command was found.
    #[error("missing command")]
    MissingCommand,

    /// The command was neither three ASCII digits nor a run of ASCII letters.
    #[error("invalid command")]
    InvalidCommand,

    /// More than the permitted number of parameters.
    #[error("too many parameters")]
    TooManyParams,
}
