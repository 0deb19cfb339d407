//! IRC numeric reply codes as defined in RFC 1459.
//!
//! Numerics are three-digit codes sent by the server to report command
//! results and errors. `Display` renders the zero-padded wire form, so a
//! reply line can be formatted directly from a variant.
//!
//! # Reference
//! - RFC 1459 §6: Replies

#![allow(non_camel_case_types)]

use std::fmt;

/// IRC server response code.
///
/// Categories:
/// - 001-004: registration welcome burst
/// - 200-399: command replies
/// - 400-599: error replies
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
#[non_exhaustive]
pub enum Response {
    // === Connection registration (001-004) ===
    /// 001 - Welcome to the IRC network
    RPL_WELCOME = 1,
    /// 002 - Your host is running version
    RPL_YOURHOST = 2,
    /// 003 - Server creation date
    RPL_CREATED = 3,
    /// 004 - Server info (name, version, user modes, channel modes)
    RPL_MYINFO = 4,

    // === Command responses (200-399) ===

    // Trace replies
    /// 200 - Trace link
    RPL_TRACELINK = 200,
    /// 201 - Trace connecting
    RPL_TRACECONNECTING = 201,
    /// 202 - Trace handshake
    RPL_TRACEHANDSHAKE = 202,
    /// 203 - Trace unknown
    RPL_TRACEUNKNOWN = 203,
    /// 204 - Trace operator
    RPL_TRACEOPERATOR = 204,
    /// 205 - Trace user
    RPL_TRACEUSER = 205,
    /// 206 - Trace server
    RPL_TRACESERVER = 206,
    /// 208 - Trace new type
    RPL_TRACENEWTYPE = 208,
    /// 261 - Trace log
    RPL_TRACELOG = 261,

    // Stats replies
    /// 211 - Stats link info
    RPL_STATSLINKINFO = 211,
    /// 212 - Stats commands
    RPL_STATSCOMMANDS = 212,
    /// 213 - Stats C-line
    RPL_STATSCLINE = 213,
    /// 214 - Stats N-line
    RPL_STATSNLINE = 214,
    /// 215 - Stats I-line
    RPL_STATSILINE = 215,
    /// 216 - Stats K-line
    RPL_STATSKLINE = 216,
    /// 218 - Stats Y-line
    RPL_STATSYLINE = 218,
    /// 219 - End of stats
    RPL_ENDOFSTATS = 219,
    /// 241 - Stats L-line
    RPL_STATSLLINE = 241,
    /// 242 - Stats uptime
    RPL_STATSUPTIME = 242,
    /// 243 - Stats O-line
    RPL_STATSOLINE = 243,
    /// 244 - Stats H-line
    RPL_STATSHLINE = 244,

    /// 221 - User mode string
    RPL_UMODEIS = 221,

    // Luser replies
    /// 251 - Luser client count
    RPL_LUSERCLIENT = 251,
    /// 252 - Luser operator count
    RPL_LUSEROP = 252,
    /// 253 - Luser unknown connections
    RPL_LUSERUNKNOWN = 253,
    /// 254 - Luser channel count
    RPL_LUSERCHANNELS = 254,
    /// 255 - Luser local info
    RPL_LUSERME = 255,

    // Admin replies
    /// 256 - Admin info start
    RPL_ADMINME = 256,
    /// 257 - Admin location, broad
    RPL_ADMINLOC1 = 257,
    /// 258 - Admin location, specific
    RPL_ADMINLOC2 = 258,
    /// 259 - Admin contact email
    RPL_ADMINEMAIL = 259,

    /// 300 - Dummy reply, unused
    RPL_NONE = 300,
    /// 301 - Target is away
    RPL_AWAY = 301,
    /// 302 - Userhost reply
    RPL_USERHOST = 302,
    /// 303 - Ison reply
    RPL_ISON = 303,
    /// 305 - No longer marked away
    RPL_UNAWAY = 305,
    /// 306 - Now marked away
    RPL_NOWAWAY = 306,

    // Whois/whowas replies
    /// 311 - Whois user
    RPL_WHOISUSER = 311,
    /// 312 - Whois server
    RPL_WHOISSERVER = 312,
    /// 313 - Whois operator
    RPL_WHOISOPERATOR = 313,
    /// 314 - Whowas user
    RPL_WHOWASUSER = 314,
    /// 315 - End of WHO list
    RPL_ENDOFWHO = 315,
    /// 317 - Whois idle time
    RPL_WHOISIDLE = 317,
    /// 318 - End of whois
    RPL_ENDOFWHOIS = 318,
    /// 319 - Whois channel list
    RPL_WHOISCHANNELS = 319,

    // List replies
    /// 321 - List start
    RPL_LISTSTART = 321,
    /// 322 - List entry
    RPL_LIST = 322,
    /// 323 - List end
    RPL_LISTEND = 323,
    /// 324 - Channel mode string
    RPL_CHANNELMODEIS = 324,

    // Topic replies
    /// 331 - No topic set
    RPL_NOTOPIC = 331,
    /// 332 - Channel topic
    RPL_TOPIC = 332,

    /// 341 - Invite passed on
    RPL_INVITING = 341,
    /// 342 - Summoning user
    RPL_SUMMONING = 342,
    /// 351 - Server version details
    RPL_VERSION = 351,
    /// 352 - WHO reply
    RPL_WHOREPLY = 352,
    /// 353 - NAMES reply
    RPL_NAMREPLY = 353,
    /// 364 - Links entry
    RPL_LINKS = 364,
    /// 365 - End of links
    RPL_ENDOFLINKS = 365,
    /// 366 - End of NAMES
    RPL_ENDOFNAMES = 366,
    /// 367 - Ban list entry
    RPL_BANLIST = 367,
    /// 368 - End of ban list
    RPL_ENDOFBANLIST = 368,
    /// 369 - End of whowas
    RPL_ENDOFWHOWAS = 369,

    // Info and MOTD replies
    /// 371 - Info entry
    RPL_INFO = 371,
    /// 372 - MOTD line
    RPL_MOTD = 372,
    /// 374 - End of info
    RPL_ENDOFINFO = 374,
    /// 375 - MOTD start
    RPL_MOTDSTART = 375,
    /// 376 - End of MOTD
    RPL_ENDOFMOTD = 376,

    /// 381 - You are now an operator
    RPL_YOUREOPER = 381,
    /// 382 - Rehashing configuration
    RPL_REHASHING = 382,
    /// 391 - Server local time
    RPL_TIME = 391,
    /// 392 - Users start
    RPL_USERSSTART = 392,
    /// 393 - Users entry
    RPL_USERS = 393,
    /// 394 - End of users
    RPL_ENDOFUSERS = 394,
    /// 395 - No users logged in
    RPL_NOUSERS = 395,

    // === Error replies (400-599) ===
    /// 401 - No such nickname
    ERR_NOSUCHNICK = 401,
    /// 402 - No such server
    ERR_NOSUCHSERVER = 402,
    /// 403 - No such channel
    ERR_NOSUCHCHANNEL = 403,
    /// 404 - Cannot send to channel
    ERR_CANNOTSENDTOCHAN = 404,
    /// 405 - Joined too many channels
    ERR_TOOMANYCHANNELS = 405,
    /// 406 - No whowas history for nickname
    ERR_WASNOSUCHNICK = 406,
    /// 407 - Duplicate user@host targets
    ERR_TOOMANYTARGETS = 407,
    /// 409 - PING/PONG missing origin
    ERR_NOORIGIN = 409,
    /// 411 - No recipient given
    ERR_NORECIPIENT = 411,
    /// 412 - No text to send
    ERR_NOTEXTTOSEND = 412,
    /// 413 - No top-level domain in mask
    ERR_NOTOPLEVEL = 413,
    /// 414 - Wildcard in top-level domain
    ERR_WILDTOPLEVEL = 414,
    /// 421 - Unknown command
    ERR_UNKNOWNCOMMAND = 421,
    /// 422 - MOTD file missing
    ERR_NOMOTD = 422,
    /// 423 - No admin info available
    ERR_NOADMININFO = 423,
    /// 424 - File operation failed
    ERR_FILEERROR = 424,
    /// 431 - No nickname given
    ERR_NONICKNAMEGIVEN = 431,
    /// 432 - Erroneous nickname
    ERR_ERRONEUSNICKNAME = 432,
    /// 433 - Nickname already in use
    ERR_NICKNAMEINUSE = 433,
    /// 436 - Nickname collision (server-to-server)
    ERR_NICKCOLLISION = 436,
    /// 441 - Target not on that channel
    ERR_USERNOTINCHANNEL = 441,
    /// 442 - You're not on that channel
    ERR_NOTONCHANNEL = 442,
    /// 444 - Summon target not logged in
    ERR_NOLOGIN = 444,
    /// 445 - SUMMON disabled
    ERR_SUMMONDISABLED = 445,
    /// 446 - USERS disabled
    ERR_USERSDISABLED = 446,
    /// 451 - Not registered
    ERR_NOTREGISTERED = 451,
    /// 461 - Not enough parameters
    ERR_NEEDMOREPARAMS = 461,
    /// 462 - Already registered
    ERR_ALREADYREGISTRED = 462,
    /// 463 - Host not permitted
    ERR_NOPERMFORHOST = 463,
    /// 464 - Password mismatch
    ERR_PASSWDMISMATCH = 464,
    /// 465 - Banned from server
    ERR_YOUREBANNEDCREEP = 465,
    /// 467 - Channel key already set
    ERR_KEYSET = 467,
    /// 471 - Channel is full
    ERR_CHANNELISFULL = 471,
    /// 472 - Unknown mode character
    ERR_UNKNOWNMODE = 472,
    /// 473 - Invite-only channel
    ERR_INVITEONLYCHAN = 473,
    /// 474 - Banned from channel
    ERR_BANNEDFROMCHAN = 474,
    /// 475 - Bad channel key
    ERR_BADCHANNELKEY = 475,
    /// 481 - Operator privileges required
    ERR_NOPRIVILEGES = 481,
    /// 482 - Channel operator privileges required
    ERR_CHANOPRIVSNEEDED = 482,
    /// 483 - Cannot KILL a server
    ERR_CANTKILLSERVER = 483,
    /// 491 - No O-line for your host
    ERR_NOOPERHOST = 491,
    /// 501 - Unknown user mode flag
    ERR_UMODEUNKNOWNFLAG = 501,
    /// 502 - Cannot change mode for other users
    ERR_USERSDONTMATCH = 502,
}

impl Response {
    /// The numeric value of this code.
    #[inline]
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Whether this is an error reply (4xx/5xx).
    #[inline]
    pub const fn is_error(self) -> bool {
        self.code() >= 400
    }
}

impl fmt::Display for Response {
    /// The three-digit, zero-padded wire form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.code())
    }
}
