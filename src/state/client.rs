//! Client identity and outbound handles.
//!
//! The hub and channels never own a connection. They hold a [`ClientHandle`]:
//! the client's id, its peer address and the sending side of its outbound
//! queue. The connection's writer task owns the receiving side.

use std::fmt;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};

use hubchat_proto::Reply;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, warn};

/// Process-unique identifier for one connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClientId(u64);

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// Hands out [`ClientId`]s in increasing order.
#[derive(Debug, Default)]
pub struct ClientIdGenerator {
    counter: AtomicU64,
}

impl ClientIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id.
    pub fn next(&self) -> ClientId {
        ClientId(self.counter.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

/// Reference to a connected client, cheap to clone.
#[derive(Debug, Clone)]
pub struct ClientHandle {
    id: ClientId,
    addr: SocketAddr,
    outbound: mpsc::Sender<Reply>,
}

impl ClientHandle {
    pub fn new(id: ClientId, addr: SocketAddr, outbound: mpsc::Sender<Reply>) -> Self {
        Self { id, addr, outbound }
    }

    pub fn id(&self) -> ClientId {
        self.id
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Queue a reply without waiting.
    ///
    /// A full queue drops the line; a closed one means the connection is
    /// already going away. Returns whether the line was queued.
    pub fn send(&self, reply: Reply) -> bool {
        match self.outbound.try_send(reply) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                warn!(client = %self.id, addr = %self.addr, "Send queue full - dropping line");
                false
            }
            Err(TrySendError::Closed(_)) => {
                debug!(client = %self.id, "Send queue closed");
                false
            }
        }
    }

    /// Queue replies that only make sense together: all of them or none.
    pub fn send_all(&self, replies: Vec<Reply>) -> bool {
        let count = replies.len();
        match self.outbound.try_reserve_many(count) {
            Ok(permits) => {
                for (permit, reply) in permits.zip(replies) {
                    permit.send(reply);
                }
                true
            }
            Err(TrySendError::Full(())) => {
                warn!(
                    client = %self.id,
                    addr = %self.addr,
                    lines = count,
                    "Send queue full - dropping reply group"
                );
                false
            }
            Err(TrySendError::Closed(())) => {
                debug!(client = %self.id, "Send queue closed");
                false
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{drain, handle};
    use super::*;

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let generator = ClientIdGenerator::new();
        let a = generator.next();
        let b = generator.next();
        assert!(a < b);
        assert_eq!(a.to_string(), "c1");
        assert_eq!(b.to_string(), "c2");
    }

    #[test]
    fn test_send_queues_reply() {
        let (client, mut rx) = handle(1, 4);
        assert!(client.send(Reply::notice("hello")));
        assert_eq!(drain(&mut rx), vec!["->> hello\n"]);
    }

    #[test]
    fn test_send_drops_when_full() {
        let (client, mut rx) = handle(1, 1);
        assert!(client.send(Reply::notice("first")));
        assert!(!client.send(Reply::notice("second")));
        assert_eq!(drain(&mut rx), vec!["->> first\n"]);
    }

    #[test]
    fn test_send_all_is_all_or_nothing() {
        let (client, mut rx) = handle(1, 2);
        assert!(client.send(Reply::notice("first")));
        assert!(!client.send_all(vec![Reply::notice("a"), Reply::notice("b")]));
        assert_eq!(drain(&mut rx), vec!["->> first\n"]);

        assert!(client.send_all(vec![Reply::notice("a"), Reply::notice("b")]));
        assert_eq!(drain(&mut rx), vec!["->> a\n", "->> b\n"]);
    }

    #[test]
    fn test_send_after_close() {
        let (client, rx) = handle(1, 1);
        drop(rx);
        assert!(!client.send(Reply::notice("gone")));
    }
}
