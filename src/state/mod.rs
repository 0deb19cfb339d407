//! Shared server state: the client registry and per-connection records.

pub mod client;
pub mod queue;
pub mod registry;
pub mod trie;

pub use client::{Client, UserInfo};
pub use queue::{QueueFull, SendQueue, SEND_QUEUE_CAPACITY};
pub use registry::{ClientRegistry, RegistryError};
pub use trie::{PrefixCursor, Trie, TrieError};

use chrono::Utc;

use crate::config::Config;

/// Immutable identity of this server, derived from configuration at
/// startup and used by every reply formatter.
#[derive(Debug, Clone)]
pub struct ServerInfo {
    /// Server name, as it appears in reply prefixes.
    pub name: String,
    /// Human-readable startup timestamp for RPL_CREATED.
    pub created: String,
    /// MOTD body lines.
    pub motd: Vec<String>,
}

/// Everything the workers share: server identity plus the nickname
/// registry. Created once by the bootstrap, before the gateway accepts,
/// and handed to each worker as an `Arc`.
pub struct ServerState {
    /// Server identity.
    pub info: ServerInfo,
    /// The global nickname registry.
    pub registry: ClientRegistry,
}

impl ServerState {
    /// Build the shared state from loaded configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            info: ServerInfo {
                name: config.server.name.clone(),
                created: Utc::now().to_rfc2822(),
                motd: config.motd.lines.clone(),
            },
            registry: ClientRegistry::new(),
        }
    }
}
