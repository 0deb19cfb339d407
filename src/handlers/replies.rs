//! Server reply sequences: the registration welcome burst and the MOTD.

use lark_proto::Response;

use super::Context;

/// Mark the client registered and greet it.
///
/// Called exactly once per connection, by whichever of NICK/USER arrives
/// second.
pub(super) fn complete_registration(ctx: &Context) {
    ctx.client.update_info(|i| i.registered = true);

    let info = ctx.client.info();
    let nick = info.nick.as_deref().unwrap_or("*");
    let name = ctx.server_name();
    let version = crate::VERSION;

    ctx.send_numeric(
        Response::RPL_WELCOME,
        &format!(
            ":Welcome to the Internet Relay Network {}!{}@{}",
            nick, info.username, info.hostname
        ),
    );
    ctx.send_numeric(
        Response::RPL_YOURHOST,
        &format!(":Your host is {name}, running version larkd-{version}"),
    );
    ctx.send_numeric(
        Response::RPL_CREATED,
        &format!(":This server was created {}", ctx.state.info.created),
    );
    ctx.send_numeric(
        Response::RPL_MYINFO,
        &format!("{name} larkd-{version} o o"),
    );

    send_motd(ctx);
}

/// Send the configured MOTD, or 422 when there is none.
pub(super) fn send_motd(ctx: &Context) {
    let motd = &ctx.state.info.motd;
    if motd.is_empty() {
        ctx.send_numeric(Response::ERR_NOMOTD, ":MOTD File is missing");
        return;
    }
    let name = ctx.server_name().to_string();
    ctx.send_numeric(
        Response::RPL_MOTDSTART,
        &format!(":- {name} Message of the day - "),
    );
    for line in motd {
        ctx.send_numeric(Response::RPL_MOTD, &format!(":- {line}"));
    }
    ctx.send_numeric(Response::RPL_ENDOFMOTD, ":End of /MOTD command");
}
