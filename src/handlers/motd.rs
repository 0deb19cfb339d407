//! MOTD: resend the message of the day.

use crate::error::HandlerResult;

use super::{replies, Context};

pub(super) fn handle(ctx: &Context) -> HandlerResult {
    replies::send_motd(ctx);
    Ok(())
}
