//! The per-connection client record.
//!
//! One `Client` exists per accepted connection, created before
//! registration (so the nickname starts out empty) and shared as an
//! `Arc`: the owning worker holds one reference, the registry another
//! while the client is registered. The record is destroyed when the
//! socket has closed and the registry no longer references it, which
//! ownership expresses for free.

use std::sync::RwLock;

use tokio::sync::Notify;

use crate::state::queue::{QueueFull, SendQueue};

/// Registration state, mutated by the owning worker and read by anyone
/// formatting a reply about this client.
#[derive(Debug, Default, Clone)]
pub struct UserInfo {
    /// Current nickname; `None` until the first successful NICK.
    pub nick: Option<String>,
    /// Username from USER.
    pub username: String,
    /// Hostname (the peer address, filled in by the accept path).
    pub hostname: String,
    /// Real name from USER.
    pub realname: String,
    /// Whether NICK and USER have both completed.
    pub registered: bool,
}

/// A connected client: identity, outbound queue, and the doorbell other
/// workers ring to wake this client's event loop.
#[derive(Debug)]
pub struct Client {
    info: RwLock<UserInfo>,
    sendq: SendQueue,
    doorbell: Notify,
}

impl Client {
    /// A fresh, unregistered client for a connection from `hostname`.
    pub fn new(hostname: String) -> Self {
        Self {
            info: RwLock::new(UserInfo {
                hostname,
                ..UserInfo::default()
            }),
            sendq: SendQueue::new(),
            doorbell: Notify::new(),
        }
    }

    /// Snapshot of the registration state.
    pub fn info(&self) -> UserInfo {
        self.info.read().expect("client info lock poisoned").clone()
    }

    /// Current nickname, if one has been set.
    pub fn nick(&self) -> Option<String> {
        self.info
            .read()
            .expect("client info lock poisoned")
            .nick
            .clone()
    }

    /// Mutate the registration state.
    pub fn update_info<F: FnOnce(&mut UserInfo)>(&self, f: F) {
        let mut info = self.info.write().expect("client info lock poisoned");
        f(&mut info);
    }

    /// Queue `line` for delivery on this client's socket and ring its
    /// doorbell.
    ///
    /// Callable from any worker. The doorbell coalesces (many rings may
    /// wake the target once), so the queue is the durable work list and
    /// the signal only a hint; the queue mutex is never held across the
    /// signal. After a successful call the target observes a non-empty
    /// queue on its next loop turn.
    pub fn notify(&self, line: &str) -> Result<(), QueueFull> {
        self.sendq.push(line)?;
        self.doorbell.notify_one();
        Ok(())
    }

    /// Wait until another worker rings this client's doorbell.
    ///
    /// Only the owning worker calls this. A ring delivered while the
    /// worker was busy elsewhere is not lost: `Notify` stores one permit,
    /// and the wakeup handler drains the queue to empty regardless.
    pub async fn wakeup(&self) {
        self.doorbell.notified().await;
    }

    /// Remove the oldest queued outbound line.
    pub fn dequeue(&self) -> Option<String> {
        self.sendq.pop()
    }

    /// Whether any outbound lines are waiting.
    pub fn has_pending(&self) -> bool {
        !self.sendq.is_empty()
    }
}
