//! RelayQ Core - Broker logic for the message relay
//!
//! This crate contains the broker implementation including:
//! - Broker: the UDP ingestion loop
//! - Transport: the listening socket and the one-shot sender

pub mod broker;
pub mod transport;

// Re-exports
pub use broker::Broker;
pub use transport::{UdpListener, UdpSender, DEFAULT_PORT};
