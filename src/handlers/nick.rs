//! NICK: claim or change a nickname.
//!
//! The registry claim is atomic; on a change, the new name is claimed
//! before the old one is released so there is never a moment where the
//! client holds neither.

use lark_proto::{Message, NickAlphabet};

use crate::error::{HandlerError, HandlerResult};
use crate::state::RegistryError;

use super::{replies, Context};

pub(super) fn handle(ctx: &Context, msg: &Message) -> HandlerResult {
    let new_nick = msg
        .params
        .first()
        .ok_or(HandlerError::NoNicknameGiven)?
        .clone();
    let info = ctx.client.info();
    let alphabet = NickAlphabet;

    // A respelling of the current nick ("bob" -> "BOB") keys identically
    // in the registry; only the stored spelling changes.
    let respelling = match (&info.nick, alphabet.fold_str(&new_nick)) {
        (Some(old), Some(new_key)) => alphabet.fold_str(old).as_deref() == Some(new_key.as_str()),
        _ => false,
    };

    if !respelling {
        ctx.state
            .registry
            .add(ctx.client, &new_nick)
            .map_err(|e| match e {
                RegistryError::InvalidNick => HandlerError::ErroneousNickname(new_nick.clone()),
                RegistryError::NicknameInUse => HandlerError::NicknameInUse(new_nick.clone()),
            })?;
        if let Some(old) = &info.nick {
            ctx.state.registry.remove_nick(old);
        }
    }

    ctx.client.update_info(|i| i.nick = Some(new_nick.clone()));

    if info.registered {
        // Echo the change with the old identity as source.
        if let Some(old) = &info.nick {
            let line = format!(
                ":{}!{}@{} NICK :{}\r\n",
                old, info.username, info.hostname, new_nick
            );
            ctx.send(&line);
        }
    } else if !info.username.is_empty() {
        replies::complete_registration(ctx);
    }
    Ok(())
}
