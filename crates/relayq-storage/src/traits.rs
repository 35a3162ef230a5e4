//! Queue store trait definition
//!
//! Defines the interface that all queue backends must implement.

use async_trait::async_trait;
use relayq_types::{Message, Result};

/// Queue store trait - all backends implement this
///
/// The queue is an insertion-ordered sequence of accepted messages. Append
/// is the only mutating operation; there is no dequeue. `len` and `snapshot`
/// exist for observability and do not affect broker semantics.
#[async_trait]
pub trait QueueStore: Send + Sync {
    /// Append a message to the tail, preserving arrival order
    async fn append(&self, message: Message) -> Result<()>;

    /// Number of messages currently queued
    async fn len(&self) -> Result<usize>;

    /// Copy of the queued messages in arrival order
    async fn snapshot(&self) -> Result<Vec<Message>>;
}
