//! Command handling errors and their numeric replies.

use lark_proto::Response;
use thiserror::Error;

/// Errors that can occur while handling a client command.
///
/// Handlers return these instead of formatting replies inline; the worker
/// translates each into its RFC numeric with [`HandlerError::to_reply`]
/// and queues it on the offending connection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    #[error("no nickname given")]
    NoNicknameGiven,

    #[error("erroneous nickname: {0}")]
    ErroneousNickname(String),

    #[error("nickname in use: {0}")]
    NicknameInUse(String),

    #[error("not registered")]
    NotRegistered,

    #[error("already registered")]
    AlreadyRegistered,

    #[error("not enough parameters for {0}")]
    NeedMoreParams(String),

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("no such nick: {0}")]
    NoSuchNick(String),

    #[error("no recipient for {0}")]
    NoRecipient(String),

    #[error("no text to send")]
    NoTextToSend,

    #[error("no origin specified")]
    NoOrigin,

    /// The client asked to leave; no numeric, the worker closes the link.
    #[error("client quit: {0:?}")]
    Quit(Option<String>),
}

/// Result type for command handlers.
pub type HandlerResult = Result<(), HandlerError>;

impl HandlerError {
    /// The numeric this error maps to, when it has one.
    fn numeric(&self) -> Option<Response> {
        match self {
            Self::NoNicknameGiven => Some(Response::ERR_NONICKNAMEGIVEN),
            Self::ErroneousNickname(_) => Some(Response::ERR_ERRONEUSNICKNAME),
            Self::NicknameInUse(_) => Some(Response::ERR_NICKNAMEINUSE),
            Self::NotRegistered => Some(Response::ERR_NOTREGISTERED),
            Self::AlreadyRegistered => Some(Response::ERR_ALREADYREGISTRED),
            Self::NeedMoreParams(_) => Some(Response::ERR_NEEDMOREPARAMS),
            Self::UnknownCommand(_) => Some(Response::ERR_UNKNOWNCOMMAND),
            Self::NoSuchNick(_) => Some(Response::ERR_NOSUCHNICK),
            Self::NoRecipient(_) => Some(Response::ERR_NORECIPIENT),
            Self::NoTextToSend => Some(Response::ERR_NOTEXTTOSEND),
            Self::NoOrigin => Some(Response::ERR_NOORIGIN),
            Self::Quit(_) => None,
        }
    }

    /// Format the numeric reply line for this error, terminator included.
    ///
    /// Returns `None` for errors that end the connection instead of
    /// producing a reply. `nick` is the client's current nickname, or
    /// `*` before one is set.
    pub fn to_reply(&self, server: &str, nick: &str) -> Option<String> {
        let numeric = self.numeric()?;
        let body = match self {
            Self::NoNicknameGiven => ":No nickname given".to_string(),
            Self::ErroneousNickname(bad) => format!("{bad} :Erroneous nickname"),
            Self::NicknameInUse(bad) => format!("{bad} :Nickname is already in use"),
            Self::NotRegistered => ":You have not registered".to_string(),
            Self::AlreadyRegistered => ":You may not reregister".to_string(),
            Self::NeedMoreParams(cmd) => format!("{cmd} :Not enough parameters"),
            Self::UnknownCommand(cmd) => format!("{cmd} :Unknown command"),
            Self::NoSuchNick(target) => format!("{target} :No such nick/channel"),
            Self::NoRecipient(cmd) => format!(":No recipient given ({cmd})"),
            Self::NoTextToSend => ":No text to send".to_string(),
            Self::NoOrigin => ":No origin specified".to_string(),
            Self::Quit(_) => return None,
        };
        Some(format!(":{server} {numeric} {nick} {body}\r\n"))
    }
}
