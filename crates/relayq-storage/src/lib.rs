//! RelayQ Storage - Queue store backends for the message relay
//!
//! This crate provides the queue store seam and its implementations.
//! Currently supports:
//! - In-memory queue (default)

pub mod traits;

#[cfg(feature = "memory")]
pub mod memory;

// Re-exports
pub use traits::QueueStore;

#[cfg(feature = "memory")]
pub use memory::MemoryQueue;
