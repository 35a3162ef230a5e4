//! Error types for RelayQ
//!
//! Defines all error types used throughout the application.

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

/// Main error type for RelayQ operations
#[derive(Error, Debug)]
pub enum Error {
    /// Listening port could not be acquired at startup
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// Socket send/receive failure
    #[error("socket error: {0}")]
    Io(#[from] std::io::Error),

    /// Datagram bytes are not valid UTF-8
    #[error("datagram is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Payload is not valid JSON or lacks a required field
    #[error("malformed frame: {0}")]
    Decode(#[from] serde_json::Error),

    /// Payload parsed as JSON but is not a frame envelope
    #[error("invalid frame: {0}")]
    InvalidFrame(String),

    /// Queue reached its configured message cap
    #[error("queue is full: limit of {0} messages reached")]
    QueueFull(usize),

    /// No reply arrived within the sender's wait window
    #[error("no reply within {0:?}")]
    ReplyTimeout(Duration),
}

/// Result type alias for RelayQ operations
pub type Result<T> = std::result::Result<T, Error>;
