//! larkd, a small RFC 1459 IRC daemon.
//!
//! The interesting machinery is the concurrent core: a trie-indexed
//! nickname registry with atomic lookup-and-act, bounded per-connection
//! send queues, and a coalescing doorbell that lets any worker put bytes
//! on any other worker's socket. Wire-protocol primitives (framing,
//! tokenising, numerics) live in the `lark-proto` crate.

pub mod config;
pub mod error;
pub mod handlers;
pub mod network;
pub mod state;

/// Server version string, taken from the crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
