//! Broker - the message ingestion loop
//!
//! The Broker composes the UDP listener and the queue store: receive one
//! datagram, decode, classify by kind tag, append or discard, repeat.

use std::net::SocketAddr;
use std::sync::Arc;

use relayq_storage::QueueStore;
use relayq_types::{wire, Message, MessageKind, Result};
use tracing::{debug, info, warn};

use crate::transport::UdpListener;

/// Main message broker
///
/// Processing is strictly sequential: one datagram is received, decoded,
/// classified, and applied before the next receive. The queue is only ever
/// mutated from this loop.
pub struct Broker {
    /// Bound listening socket
    listener: UdpListener,
    /// Queue fed by accepted commit messages
    queue: Arc<dyn QueueStore>,
}

impl Broker {
    /// Create a broker from a bound listener and a queue store
    pub fn new(listener: UdpListener, queue: Arc<dyn QueueStore>) -> Self {
        info!("Initializing RelayQ broker");
        Self { listener, queue }
    }

    /// Address the broker is listening on
    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Run the ingestion loop until the hosting task is cancelled.
    ///
    /// Per-datagram failures are logged and never terminate the loop; a
    /// single malformed datagram must not take the broker down.
    pub async fn run(&self) -> Result<()> {
        info!(addr = %self.listener.local_addr()?, "Broker listening");
        loop {
            self.step().await;
        }
    }

    /// One full receive/decode/classify/apply cycle
    pub async fn step(&self) {
        let (text, peer) = match self.listener.recv_one().await {
            Ok(received) => received,
            Err(e) => {
                warn!(error = %e, "Receive failed");
                return;
            }
        };

        if let Err(e) = self.dispatch(&text).await {
            warn!(error = %e, %peer, "Dropping datagram");
        }
    }

    async fn dispatch(&self, text: &str) -> Result<()> {
        let frame = wire::decode(text)?;

        match MessageKind::from_tag(&frame.kind) {
            Some(MessageKind::Commit) => {
                let message = Message::new(MessageKind::Commit, frame.auth, frame.capacity);
                self.queue.append(message).await?;
            }
            Some(MessageKind::Response) => {
                info!(auth = %frame.auth, "Response frame received, not queued");
            }
            None => {
                debug!(kind = %frame.kind, "Ignoring frame with unrecognized kind");
            }
        }

        Ok(())
    }
}
