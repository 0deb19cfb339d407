//! Gateway: the TCP listener that accepts incoming connections.
//!
//! Binds a socket and spawns one [`Connection`] worker task per client.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{error, info};

use crate::handlers::Dispatcher;
use crate::network::Connection;
use crate::state::ServerState;

/// Accepts incoming TCP connections and spawns workers.
pub struct Gateway {
    listener: TcpListener,
    state: Arc<ServerState>,
    dispatcher: Arc<Dispatcher>,
}

impl Gateway {
    /// Bind the gateway to the specified address.
    pub async fn bind(addr: SocketAddr, state: Arc<ServerState>) -> std::io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        let dispatcher = Arc::new(Dispatcher::new());
        info!(%addr, "gateway listening");
        Ok(Self {
            listener,
            state,
            dispatcher,
        })
    }

    /// The address actually bound, useful when binding port 0.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept connections forever.
    pub async fn run(self) -> std::io::Result<()> {
        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    info!(%addr, "connection accepted");
                    let state = Arc::clone(&self.state);
                    let dispatcher = Arc::clone(&self.dispatcher);
                    tokio::spawn(async move {
                        let connection = Connection::new(stream, addr, state, dispatcher);
                        if let Err(e) = connection.run().await {
                            error!(%addr, error = %e, "connection error");
                        }
                        info!(%addr, "connection closed");
                    });
                }
                Err(e) => {
                    error!(error = %e, "failed to accept connection");
                }
            }
        }
    }
}
