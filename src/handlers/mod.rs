//! Command dispatch.
//!
//! The worker hands each parsed message to [`Dispatcher::dispatch`] with a
//! [`Context`] naming the issuing client. Handlers never write to sockets:
//! replies go through the client's own queue-and-doorbell path, the same
//! one cross-worker deliveries use, and errors come back as
//! [`HandlerError`] values for the worker to translate into numerics.
//!
//! Everything here is non-suspending; the only awaits in a worker are its
//! event-loop waits.

mod messaging;
mod motd;
mod nick;
mod ping;
mod replies;
mod user;

use std::sync::Arc;

use lark_proto::{CommandAlphabet, Message, Response};
use tracing::debug;

use crate::error::{HandlerError, HandlerResult};
use crate::state::{Client, ServerState, Trie};

/// Everything a handler may touch while processing one command.
pub struct Context<'a> {
    /// Shared server state.
    pub state: &'a ServerState,
    /// The client that issued the command.
    pub client: &'a Arc<Client>,
}

impl Context<'_> {
    /// The server name used in reply prefixes.
    pub fn server_name(&self) -> &str {
        &self.state.info.name
    }

    /// The client's nickname for reply addressing, `*` before NICK.
    pub fn nick_or_star(&self) -> String {
        self.client.nick().unwrap_or_else(|| "*".to_string())
    }

    /// Queue a raw line on the issuing client's own connection.
    ///
    /// A full queue means the client is not reading its own replies;
    /// the line is dropped and the condition logged.
    pub fn send(&self, line: &str) {
        if self.client.notify(line).is_err() {
            debug!(nick = %self.nick_or_star(), "own send queue full; dropping reply");
        }
    }

    /// Queue a numeric reply addressed to the issuing client.
    pub fn send_numeric(&self, numeric: Response, body: &str) {
        let line = format!(
            ":{} {} {} {}\r\n",
            self.server_name(),
            numeric,
            self.nick_or_star(),
            body
        );
        self.send(&line);
    }
}

/// The commands this server understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommandKind {
    Nick,
    User,
    Ping,
    Pong,
    Privmsg,
    Notice,
    Motd,
    Quit,
}

impl CommandKind {
    /// Whether an unregistered client may issue this command.
    fn allowed_before_registration(self) -> bool {
        matches!(
            self,
            Self::Nick | Self::User | Self::Ping | Self::Pong | Self::Quit
        )
    }
}

/// Maps command names to handlers and enforces the registration gate.
///
/// The table is a trie over the letters-only command alphabet, so lookup
/// is case-insensitive without per-message allocation. Numeric command
/// names contain digits, fall outside the alphabet and miss; clients
/// have no business sending numerics anyway.
pub struct Dispatcher {
    commands: Trie<CommandKind, CommandAlphabet>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    /// Build the command table.
    pub fn new() -> Self {
        let mut commands = Trie::new(CommandAlphabet);
        for (name, kind) in [
            ("NICK", CommandKind::Nick),
            ("USER", CommandKind::User),
            ("PING", CommandKind::Ping),
            ("PONG", CommandKind::Pong),
            ("PRIVMSG", CommandKind::Privmsg),
            ("NOTICE", CommandKind::Notice),
            ("MOTD", CommandKind::Motd),
            ("QUIT", CommandKind::Quit),
        ] {
            commands
                .insert(name, kind)
                .expect("command table entries are valid and distinct");
        }
        Self { commands }
    }

    /// Process one message from `ctx.client`.
    pub fn dispatch(&self, ctx: &Context, msg: &Message) -> HandlerResult {
        let Some(&kind) = self.commands.get(&msg.command) else {
            return Err(HandlerError::UnknownCommand(msg.command.clone()));
        };

        if !kind.allowed_before_registration() && !ctx.client.info().registered {
            return Err(HandlerError::NotRegistered);
        }

        match kind {
            CommandKind::Nick => nick::handle(ctx, msg),
            CommandKind::User => user::handle(ctx, msg),
            CommandKind::Ping => ping::handle(ctx, msg),
            CommandKind::Pong => Ok(()),
            CommandKind::Privmsg => messaging::handle(ctx, msg, false),
            CommandKind::Notice => messaging::handle(ctx, msg, true),
            CommandKind::Motd => motd::handle(ctx),
            CommandKind::Quit => Err(HandlerError::Quit(msg.params.first().cloned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use lark_proto::MessageRef;

    fn test_state() -> ServerState {
        let config: Config = toml::from_str(
            r#"
            [server]
            name = "irc.test"

            [motd]
            lines = ["first line", "second line"]
            "#,
        )
        .unwrap();
        ServerState::new(&config)
    }

    fn parse(line: &str) -> Message {
        MessageRef::parse(line).unwrap().to_owned()
    }

    fn drain(client: &Arc<Client>) -> Vec<String> {
        let mut out = Vec::new();
        while let Some(l) = client.dequeue() {
            out.push(l);
        }
        out
    }

    fn register(d: &Dispatcher, ctx: &Context, nick: &str) {
        d.dispatch(ctx, &parse(&format!("NICK {nick}"))).unwrap();
        d.dispatch(ctx, &parse(&format!("USER {nick} 0 * :Real Name")))
            .unwrap();
        drain(ctx.client);
    }

    #[test]
    fn unknown_command_is_reported() {
        let state = test_state();
        let client = Arc::new(Client::new("h".into()));
        let ctx = Context {
            state: &state,
            client: &client,
        };
        let d = Dispatcher::new();
        assert_eq!(
            d.dispatch(&ctx, &parse("BOGUS x")),
            Err(HandlerError::UnknownCommand("BOGUS".into()))
        );
    }

    #[test]
    fn command_lookup_ignores_case() {
        let state = test_state();
        let client = Arc::new(Client::new("h".into()));
        let ctx = Context {
            state: &state,
            client: &client,
        };
        let d = Dispatcher::new();
        assert!(d.dispatch(&ctx, &parse("quit :bye")).is_err());
        assert!(matches!(
            d.dispatch(&ctx, &parse("Quit")),
            Err(HandlerError::Quit(None))
        ));
    }

    #[test]
    fn registration_gate_blocks_messaging() {
        let state = test_state();
        let client = Arc::new(Client::new("h".into()));
        let ctx = Context {
            state: &state,
            client: &client,
        };
        let d = Dispatcher::new();
        assert_eq!(
            d.dispatch(&ctx, &parse("PRIVMSG bob :hi")),
            Err(HandlerError::NotRegistered)
        );
    }

    #[test]
    fn nick_then_user_completes_registration() {
        let state = test_state();
        let client = Arc::new(Client::new("h".into()));
        let ctx = Context {
            state: &state,
            client: &client,
        };
        let d = Dispatcher::new();

        d.dispatch(&ctx, &parse("NICK alice")).unwrap();
        assert!(!client.info().registered);
        d.dispatch(&ctx, &parse("USER alice 0 * :Alice Liddell"))
            .unwrap();
        assert!(client.info().registered);

        let lines = drain(&client);
        // Welcome burst then MOTD.
        assert!(lines[0].starts_with(":irc.test 001 alice :Welcome"));
        assert!(lines.iter().any(|l| l.contains(" 004 ")));
        assert!(lines.iter().any(|l| l.contains(" 375 ")));
        assert_eq!(lines.iter().filter(|l| l.contains(" 372 ")).count(), 2);
        assert!(lines.last().unwrap().contains(" 376 "));
    }

    #[test]
    fn user_before_nick_also_registers() {
        let state = test_state();
        let client = Arc::new(Client::new("h".into()));
        let ctx = Context {
            state: &state,
            client: &client,
        };
        let d = Dispatcher::new();

        d.dispatch(&ctx, &parse("USER bob 0 * :Bob")).unwrap();
        assert!(!client.info().registered);
        d.dispatch(&ctx, &parse("NICK bob")).unwrap();
        assert!(client.info().registered);
    }

    #[test]
    fn nick_collision_and_case_fold() {
        let state = test_state();
        let d = Dispatcher::new();
        let c1 = Arc::new(Client::new("h1".into()));
        let ctx1 = Context {
            state: &state,
            client: &c1,
        };
        register(&d, &ctx1, "Bob{");

        let c2 = Arc::new(Client::new("h2".into()));
        let ctx2 = Context {
            state: &state,
            client: &c2,
        };
        assert_eq!(
            d.dispatch(&ctx2, &parse("NICK bob[")),
            Err(HandlerError::NicknameInUse("bob[".into()))
        );
    }

    #[test]
    fn bad_nicknames_are_erroneous() {
        let state = test_state();
        let client = Arc::new(Client::new("h".into()));
        let ctx = Context {
            state: &state,
            client: &client,
        };
        let d = Dispatcher::new();
        assert_eq!(
            d.dispatch(&ctx, &parse("NICK bad_nick")),
            Err(HandlerError::ErroneousNickname("bad_nick".into()))
        );
        assert_eq!(
            d.dispatch(&ctx, &parse("NICK toolongnick")),
            Err(HandlerError::ErroneousNickname("toolongnick".into()))
        );
        assert_eq!(
            d.dispatch(&ctx, &parse("NICK")),
            Err(HandlerError::NoNicknameGiven)
        );
    }

    #[test]
    fn nick_change_releases_old_name() {
        let state = test_state();
        let d = Dispatcher::new();
        let c1 = Arc::new(Client::new("h1".into()));
        let ctx1 = Context {
            state: &state,
            client: &c1,
        };
        register(&d, &ctx1, "alice");

        d.dispatch(&ctx1, &parse("NICK alicia")).unwrap();
        assert_eq!(c1.nick().as_deref(), Some("alicia"));
        // The change is echoed back with the old identity as prefix.
        let lines = drain(&c1);
        assert!(lines.iter().any(|l| l.starts_with(":alice!") && l.contains("NICK")));

        // The old name is free again.
        let c2 = Arc::new(Client::new("h2".into()));
        let ctx2 = Context {
            state: &state,
            client: &c2,
        };
        assert!(d.dispatch(&ctx2, &parse("NICK alice")).is_ok());
    }

    #[test]
    fn nick_change_to_own_spelling_variant() {
        let state = test_state();
        let d = Dispatcher::new();
        let c = Arc::new(Client::new("h".into()));
        let ctx = Context {
            state: &state,
            client: &c,
        };
        register(&d, &ctx, "bob");

        // Changing only the case of one's own nick must not collide.
        d.dispatch(&ctx, &parse("NICK BOB")).unwrap();
        assert_eq!(c.nick().as_deref(), Some("BOB"));
        assert_eq!(state.registry.len(), 1);
    }

    #[test]
    fn ping_gets_pong_with_token() {
        let state = test_state();
        let d = Dispatcher::new();
        let c = Arc::new(Client::new("h".into()));
        let ctx = Context {
            state: &state,
            client: &c,
        };
        d.dispatch(&ctx, &parse("PING :abc123")).unwrap();
        let lines = drain(&c);
        assert_eq!(lines, vec![":irc.test PONG irc.test :abc123\r\n".to_string()]);

        assert_eq!(
            d.dispatch(&ctx, &parse("PING")),
            Err(HandlerError::NoOrigin)
        );
    }

    #[test]
    fn privmsg_is_delivered_to_folded_target() {
        let state = test_state();
        let d = Dispatcher::new();
        let c1 = Arc::new(Client::new("h1".into()));
        let ctx1 = Context {
            state: &state,
            client: &c1,
        };
        register(&d, &ctx1, "alice");
        let c2 = Arc::new(Client::new("h2".into()));
        let ctx2 = Context {
            state: &state,
            client: &c2,
        };
        register(&d, &ctx2, "Bob{");

        d.dispatch(&ctx1, &parse("PRIVMSG BOB[ :hello there"))
            .unwrap();
        let lines = drain(&c2);
        assert_eq!(
            lines,
            vec![":alice!alice@h1 PRIVMSG BOB[ :hello there\r\n".to_string()]
        );
    }

    #[test]
    fn privmsg_errors() {
        let state = test_state();
        let d = Dispatcher::new();
        let c = Arc::new(Client::new("h".into()));
        let ctx = Context {
            state: &state,
            client: &c,
        };
        register(&d, &ctx, "alice");

        assert_eq!(
            d.dispatch(&ctx, &parse("PRIVMSG nobody :hi")),
            Err(HandlerError::NoSuchNick("nobody".into()))
        );
        assert_eq!(
            d.dispatch(&ctx, &parse("PRIVMSG")),
            Err(HandlerError::NoRecipient("PRIVMSG".into()))
        );
        assert_eq!(
            d.dispatch(&ctx, &parse("PRIVMSG bob")),
            Err(HandlerError::NoTextToSend)
        );
        // NOTICE reports nothing back, even for a missing target.
        assert_eq!(d.dispatch(&ctx, &parse("NOTICE nobody :hi")), Ok(()));
    }

    #[test]
    fn motd_on_demand() {
        let state = test_state();
        let d = Dispatcher::new();
        let c = Arc::new(Client::new("h".into()));
        let ctx = Context {
            state: &state,
            client: &c,
        };
        register(&d, &ctx, "alice");

        d.dispatch(&ctx, &parse("MOTD")).unwrap();
        let lines = drain(&c);
        assert!(lines.first().unwrap().contains(" 375 "));
        assert!(lines.last().unwrap().contains(" 376 "));
    }
}
