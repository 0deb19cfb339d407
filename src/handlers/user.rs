//! USER: supply username and real name during registration.

use lark_proto::Message;

use crate::error::{HandlerError, HandlerResult};

use super::{replies, Context};

pub(super) fn handle(ctx: &Context, msg: &Message) -> HandlerResult {
    if ctx.client.info().registered {
        return Err(HandlerError::AlreadyRegistered);
    }
    if msg.params.len() < 4 {
        return Err(HandlerError::NeedMoreParams("USER".to_string()));
    }
    let username = msg.params[0].clone();
    let realname = msg.params[3].clone();
    ctx.client.update_info(|i| {
        i.username = username;
        i.realname = realname;
    });

    if ctx.client.info().nick.is_some() {
        replies::complete_registration(ctx);
    }
    Ok(())
}
