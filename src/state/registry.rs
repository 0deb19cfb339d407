//! The global nickname registry.
//!
//! One instance exists per server, created by the bootstrap before any
//! connection is accepted and shared with every worker as an
//! `Arc<ClientRegistry>`. It wraps the nickname trie in a single
//! exclusive lock; the interesting operation is [`find_and_apply`],
//! which runs a caller-supplied action on the matching client *while the
//! lock is held*. Splitting lookup from use would leave a window where
//! the target deregisters in between; collapsing them closes it.
//!
//! [`find_and_apply`]: ClientRegistry::find_and_apply

use std::sync::{Arc, Mutex};

use lark_proto::{NickAlphabet, MAX_NICK_LENGTH};
use thiserror::Error;

use crate::state::client::Client;
use crate::state::trie::{Trie, TrieError};

/// Errors from registering a nickname.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The nickname is empty, too long, or contains characters outside
    /// the permitted alphabet.
    #[error("invalid nickname")]
    InvalidNick,

    /// An equivalent nickname (after case folding) is already registered.
    #[error("nickname in use")]
    NicknameInUse,
}

/// Thread-safe nickname → client map with atomic lookup-and-act.
pub struct ClientRegistry {
    clients: Mutex<Trie<Arc<Client>, NickAlphabet>>,
}

impl Default for ClientRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientRegistry {
    /// An empty registry. Call once from the bootstrap, before workers.
    pub fn new() -> Self {
        Self {
            clients: Mutex::new(Trie::new(NickAlphabet)),
        }
    }

    /// Register `client` under `nick`, atomically.
    ///
    /// Does not update `client`'s own idea of its nickname; that is the
    /// caller's job once the claim succeeds. `nick` is validated here so
    /// not-yet-checked input can be offered directly.
    pub fn add(&self, client: &Arc<Client>, nick: &str) -> Result<(), RegistryError> {
        if nick.is_empty() || nick.len() > MAX_NICK_LENGTH {
            return Err(RegistryError::InvalidNick);
        }
        let mut clients = self.clients.lock().expect("registry lock poisoned");
        match clients.insert(nick, Arc::clone(client)) {
            Ok(()) => Ok(()),
            Err(TrieError::AlreadyExists) => Err(RegistryError::NicknameInUse),
            Err(TrieError::InvalidWord) => Err(RegistryError::InvalidNick),
        }
    }

    /// Deregister `client`'s current nickname. A no-op for clients that
    /// never registered one.
    pub fn remove(&self, client: &Arc<Client>) {
        if let Some(nick) = client.nick() {
            let mut clients = self.clients.lock().expect("registry lock poisoned");
            clients.remove(&nick);
        }
    }

    /// Release a nickname by name, atomically. Used for nick changes,
    /// where the old key must go while the client stays.
    pub fn remove_nick(&self, nick: &str) {
        let mut clients = self.clients.lock().expect("registry lock poisoned");
        clients.remove(nick);
    }

    /// Look up `nick` and, if present, run `f` on the client while the
    /// registry lock is held.
    ///
    /// Returns `None` when no such nickname is registered, `Some(r)` with
    /// `f`'s result otherwise, so "not found" and "found, but `f`
    /// produced nothing" stay distinguishable.
    ///
    /// Contract on `f`: it runs under the registry's exclusive lock. It
    /// must be brief, must not take locks that other registry callers may
    /// hold, must not re-enter the registry, and must not unwind;
    /// breaking these rules can deadlock or abort the whole daemon.
    /// Queue operations on *other* clients are fine (that is the point).
    pub fn find_and_apply<R>(&self, nick: &str, f: impl FnOnce(&Arc<Client>) -> R) -> Option<R> {
        let clients = self.clients.lock().expect("registry lock poisoned");
        clients.get(nick).map(f)
    }

    /// Collect up to `limit` registered nicknames starting with `prefix`,
    /// in canonical spelling and order. An invalid prefix matches nothing.
    ///
    /// Backed by the trie's resumable cursor so the lock is held for one
    /// bounded page, not an unbounded walk.
    pub fn match_prefix(&self, prefix: &str, limit: usize) -> Vec<String> {
        let clients = self.clients.lock().expect("registry lock poisoned");
        let mut out = Vec::new();
        let Ok(mut cursor) = clients.prefix_cursor(prefix, MAX_NICK_LENGTH) else {
            return out;
        };
        while out.len() < limit {
            match cursor.next() {
                Some((nick, _)) => out.push(nick),
                None => break,
            }
        }
        out
    }

    /// Number of registered nicknames.
    pub fn len(&self) -> usize {
        let clients = self.clients.lock().expect("registry lock poisoned");
        let mut n = 0;
        clients.for_each(|_| n += 1);
        n
    }

    /// Whether no nickname is registered.
    pub fn is_empty(&self) -> bool {
        let clients = self.clients.lock().expect("registry lock poisoned");
        clients.is_empty()
    }
}
