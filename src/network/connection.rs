//! The per-connection worker.
//!
//! Each accepted socket gets one task owning one [`Client`] and one
//! [`LineReassembler`]. The loop waits on two events:
//!
//! - **socket readable**: feed the reassembler, then pull frames until it
//!   runs dry, parsing and dispatching each complete message;
//! - **doorbell**: another worker queued outbound lines for this client;
//!   drain the queue to the socket until empty. The doorbell coalesces,
//!   so draining to empty (not "one line per ring") is what keeps the
//!   queue and the signal consistent.
//!
//! Shutdown is ordered: stop reading, flush the queue best-effort, close
//! the socket, then deregister the nickname. Deregistration last means a
//! PRIVMSG racing the disconnect either finds the client (and the line
//! lands in a queue about to be flushed or dropped) or misses cleanly.

use std::net::SocketAddr;
use std::sync::Arc;

use lark_proto::{Frame, LineReassembler, Message, MessageRef};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

use crate::error::HandlerError;
use crate::handlers::{Context, Dispatcher};
use crate::state::{Client, ServerState};

/// One client connection and its event loop.
pub struct Connection {
    client: Arc<Client>,
    stream: TcpStream,
    state: Arc<ServerState>,
    dispatcher: Arc<Dispatcher>,
    addr: SocketAddr,
}

impl Connection {
    /// Wrap an accepted socket in a fresh, unregistered client.
    pub fn new(
        stream: TcpStream,
        addr: SocketAddr,
        state: Arc<ServerState>,
        dispatcher: Arc<Dispatcher>,
    ) -> Self {
        let client = Arc::new(Client::new(addr.ip().to_string()));
        Self {
            client,
            stream,
            state,
            dispatcher,
            addr,
        }
    }

    /// Run the event loop until the peer disconnects or quits.
    pub async fn run(mut self) -> std::io::Result<()> {
        let (mut rd, mut wr) = self.stream.split();
        let mut reasm = LineReassembler::new();
        // Set when the client sent QUIT; carries its parting message.
        let mut quit: Option<Option<String>> = None;

        'outer: loop {
            tokio::select! {
                res = rd.read(reasm.read_buf()) => {
                    match res {
                        Ok(0) => break 'outer,
                        Ok(n) => {
                            reasm.commit(n);
                            loop {
                                let msg = match reasm.next_message() {
                                    Frame::Line(raw) => parse_line(raw),
                                    // Malformed resets the buffer and logs;
                                    // the connection itself stays up.
                                    Frame::Incomplete | Frame::Malformed => break,
                                };
                                let Some(msg) = msg else { continue };
                                let ctx = Context {
                                    state: &self.state,
                                    client: &self.client,
                                };
                                if let Err(e) = self.dispatcher.dispatch(&ctx, &msg) {
                                    if let HandlerError::Quit(reason) = e {
                                        quit = Some(reason);
                                        break 'outer;
                                    }
                                    let nick = ctx.nick_or_star();
                                    if let Some(reply) = e.to_reply(ctx.server_name(), &nick) {
                                        ctx.send(&reply);
                                    }
                                }
                            }
                        }
                        Err(e) => {
                            debug!(error = %e, "read error");
                            break 'outer;
                        }
                    }
                }
                _ = self.client.wakeup() => {
                    while let Some(line) = self.client.dequeue() {
                        if let Err(e) = wr.write_all(line.as_bytes()).await {
                            debug!(error = %e, "write error");
                            break 'outer;
                        }
                    }
                }
            }
        }

        // Flush whatever is still queued, best-effort.
        while let Some(line) = self.client.dequeue() {
            if wr.write_all(line.as_bytes()).await.is_err() {
                break;
            }
        }
        if let Some(reason) = quit {
            let text = reason.as_deref().unwrap_or("Client quit");
            let farewell = format!("ERROR :Closing Link: {} ({})\r\n", self.addr.ip(), text);
            let _ = wr.write_all(farewell.as_bytes()).await;
        }
        let _ = wr.shutdown().await;

        self.state.registry.remove(&self.client);
        Ok(())
    }
}

/// Strip the terminator, decode and tokenise one framed line, copying the
/// tokens out so the reassembler buffer can be reused immediately.
///
/// Lines that are not UTF-8 or not grammatical are dropped with a log;
/// there is no RFC numeric for syntax errors.
fn parse_line(raw: &[u8]) -> Option<Message> {
    let body = &raw[..raw.len() - 2];
    let text = match std::str::from_utf8(body) {
        Ok(t) => t,
        Err(e) => {
            debug!(error = %e, "dropping non-UTF-8 line");
            return None;
        }
    };
    match MessageRef::parse(text) {
        Ok(msg) => Some(msg.to_owned()),
        Err(e) => {
            debug!(error = %e, line = %text, "dropping unparseable line");
            None
        }
    }
}
