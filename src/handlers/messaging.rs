//! PRIVMSG and NOTICE: point-to-point message delivery.
//!
//! Delivery is the registry's atomic find-and-apply around the target's
//! queue-and-doorbell: the recipient cannot deregister between the lookup
//! and the enqueue. A full recipient queue means the reader is too slow;
//! the message is dropped and the drop logged, which keeps memory bounded
//! without punishing the sender for the receiver's backlog.

use lark_proto::Message;
use tracing::warn;

use crate::error::{HandlerError, HandlerResult};

use super::Context;

pub(super) fn handle(ctx: &Context, msg: &Message, notice: bool) -> HandlerResult {
    let cmd = if notice { "NOTICE" } else { "PRIVMSG" };
    let result = deliver(ctx, msg, cmd);
    if notice {
        // NOTICE never generates automatic replies, errors included.
        Ok(())
    } else {
        result
    }
}

fn deliver(ctx: &Context, msg: &Message, cmd: &str) -> HandlerResult {
    let target = msg
        .params
        .first()
        .ok_or_else(|| HandlerError::NoRecipient(cmd.to_string()))?;
    let text = msg.params.get(1).ok_or(HandlerError::NoTextToSend)?;

    let info = ctx.client.info();
    let nick = info.nick.as_deref().unwrap_or("*");
    let line = format!(
        ":{}!{}@{} {} {} :{}\r\n",
        nick, info.username, info.hostname, cmd, target, text
    );

    match ctx.state.registry.find_and_apply(target, |to| to.notify(&line)) {
        None => Err(HandlerError::NoSuchNick(target.clone())),
        Some(Err(_full)) => {
            warn!(from = %nick, to = %target, "recipient queue full; message dropped");
            Ok(())
        }
        Some(Ok(())) => Ok(()),
    }
}
