//! Network plumbing: the accept loop and per-connection workers.

mod connection;
mod gateway;

pub use connection::Connection;
pub use gateway::Gateway;
