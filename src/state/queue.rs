//! Per-connection outbound message queue.
//!
//! Any worker may need to put bytes on any other worker's socket (a
//! PRIVMSG crossing connections, for instance). The sender cannot write
//! directly, so it enqueues here and rings the target's doorbell; the
//! owning worker drains the queue to its socket.
//!
//! The queue is bounded: a slow reader's queue fills up and producers see
//! [`QueueFull`] instead of growing memory without limit. What to do about
//! the failed delivery is the caller's policy.
//!
//! Every operation takes the internal mutex for the shortest possible
//! critical section and never suspends, so it is safe to call from inside
//! registry callbacks and async tasks alike.

use std::collections::VecDeque;
use std::sync::Mutex;

use thiserror::Error;

/// Capacity of each connection's outbound queue.
pub const SEND_QUEUE_CAPACITY: usize = 64;

/// The target queue was full; the message was not enqueued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("send queue full")]
pub struct QueueFull;

/// Bounded FIFO of outbound lines, owned copies inside.
#[derive(Debug)]
pub struct SendQueue {
    inner: Mutex<VecDeque<String>>,
    capacity: usize,
}

impl Default for SendQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl SendQueue {
    /// A queue with the standard capacity.
    pub fn new() -> Self {
        Self::with_capacity(SEND_QUEUE_CAPACITY)
    }

    /// A queue with a custom capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    /// Append a copy of `line`. Fails when the queue is at capacity,
    /// leaving the contents untouched.
    pub fn push(&self, line: &str) -> Result<(), QueueFull> {
        let mut q = self.inner.lock().expect("send queue lock poisoned");
        if q.len() == self.capacity {
            return Err(QueueFull);
        }
        q.push_back(line.to_owned());
        Ok(())
    }

    /// Remove and return the oldest line.
    pub fn pop(&self) -> Option<String> {
        let mut q = self.inner.lock().expect("send queue lock poisoned");
        q.pop_front()
    }

    /// Whether the queue currently holds nothing.
    pub fn is_empty(&self) -> bool {
        let q = self.inner.lock().expect("send queue lock poisoned");
        q.is_empty()
    }

    /// Atomically remove every queued line and hand each to `f` in FIFO
    /// order. The removal is one critical section; `f` runs after the
    /// lock is released, so it may freely touch other queues.
    pub fn drain<F: FnMut(String)>(&self, mut f: F) {
        let drained = {
            let mut q = self.inner.lock().expect("send queue lock poisoned");
            std::mem::take(&mut *q)
        };
        for line in drained {
            f(line);
        }
    }
}
