//! PING: answer with a PONG carrying the client's token.

use lark_proto::Message;

use crate::error::{HandlerError, HandlerResult};

use super::Context;

pub(super) fn handle(ctx: &Context, msg: &Message) -> HandlerResult {
    let origin = msg.params.first().ok_or(HandlerError::NoOrigin)?;
    let name = ctx.server_name();
    let line = format!(":{name} PONG {name} :{origin}\r\n");
    ctx.send(&line);
    Ok(())
}
