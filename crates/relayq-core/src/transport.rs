//! UDP transport for RelayQ
//!
//! [`UdpListener`] owns the broker-side receive/acknowledge cycle;
//! [`UdpSender`] is the one-shot client used by the commiter role. Both
//! carry UTF-8 text; framing and classification live elsewhere.

use std::net::SocketAddr;
use std::time::Duration;

use relayq_types::{Error, Result};
use tokio::net::UdpSocket;
use tracing::debug;

/// Default broker port
pub const DEFAULT_PORT: u16 = 30303;

/// Default bound on the sender's reply wait
pub const DEFAULT_REPLY_TIMEOUT: Duration = Duration::from_secs(5);

/// Receive buffer size; larger datagrams are truncated
const MAX_DATAGRAM: usize = 1024;

/// Acknowledgment bytes sent for every received datagram
const ACK: &[u8] = b"received";

/// Listening side of the transport, bound to loopback only
#[derive(Debug)]
pub struct UdpListener {
    socket: UdpSocket,
}

impl UdpListener {
    /// Bind on `127.0.0.1` at `port` (0 lets the OS pick)
    pub async fn bind(port: u16) -> Result<Self> {
        let addr = SocketAddr::from(([127, 0, 0, 1], port));
        let socket = UdpSocket::bind(addr)
            .await
            .map_err(|source| Error::Bind { addr, source })?;
        Ok(Self { socket })
    }

    /// Address this listener is bound to
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    /// Receive exactly one datagram and return its text and sender address.
    ///
    /// The `received` acknowledgment goes back as soon as the bytes arrive,
    /// before any validation: it means "bytes arrived", not "payload
    /// understood". UTF-8 validation happens after the ack and fails with
    /// [`Error::Utf8`].
    pub async fn recv_one(&self) -> Result<(String, SocketAddr)> {
        let mut buf = [0u8; MAX_DATAGRAM];
        let (len, peer) = self.socket.recv_from(&mut buf).await?;

        self.socket.send_to(ACK, peer).await?;
        debug!(%peer, len, "Datagram acknowledged");

        let text = std::str::from_utf8(&buf[..len])?.to_owned();
        Ok((text, peer))
    }
}

/// One-shot sending side of the transport
///
/// Sends a single datagram, then waits for a single reply. The wait is
/// bounded by a timeout so a silent peer cannot hang the caller.
pub struct UdpSender {
    reply_timeout: Duration,
}

impl UdpSender {
    /// Create a sender with the default reply timeout
    pub fn new() -> Self {
        Self {
            reply_timeout: DEFAULT_REPLY_TIMEOUT,
        }
    }

    /// Create a sender that waits at most `reply_timeout` for the reply
    pub fn with_reply_timeout(reply_timeout: Duration) -> Self {
        Self { reply_timeout }
    }

    /// Send `payload` as one datagram to `remote` and wait for one reply,
    /// returned as text.
    pub async fn send_once(&self, payload: &str, remote: SocketAddr) -> Result<String> {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        socket.send_to(payload.as_bytes(), remote).await?;

        let mut buf = [0u8; MAX_DATAGRAM];
        let (len, _) = tokio::time::timeout(self.reply_timeout, socket.recv_from(&mut buf))
            .await
            .map_err(|_| Error::ReplyTimeout(self.reply_timeout))??;

        Ok(std::str::from_utf8(&buf[..len])?.to_owned())
    }
}

impl Default for UdpSender {
    fn default() -> Self {
        Self::new()
    }
}
