//! In-memory queue backend
//!
//! Fast, non-persistent storage. The queue lives only for the broker
//! process's lifetime; all data is lost when the process exits.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::RwLock;
use relayq_types::{Error, Message, Result};
use tracing::info;

use crate::traits::QueueStore;

/// In-memory queue implementation
///
/// Unbounded by default; [`MemoryQueue::bounded`] enforces a message cap,
/// failing appends with [`Error::QueueFull`] once the cap is reached.
pub struct MemoryQueue {
    /// Queued messages in arrival order
    messages: RwLock<VecDeque<Message>>,
    /// Maximum number of messages (0 = unbounded)
    max_messages: usize,
}

impl MemoryQueue {
    /// Create a new unbounded in-memory queue
    pub fn new() -> Self {
        info!("Initializing in-memory queue");
        Self {
            messages: RwLock::new(VecDeque::new()),
            max_messages: 0,
        }
    }

    /// Create a queue that holds at most `max_messages` messages
    pub fn bounded(max_messages: usize) -> Self {
        info!(max_messages, "Initializing bounded in-memory queue");
        Self {
            messages: RwLock::new(VecDeque::new()),
            max_messages,
        }
    }
}

impl Default for MemoryQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QueueStore for MemoryQueue {
    async fn append(&self, message: Message) -> Result<()> {
        let mut messages = self.messages.write();

        if self.max_messages > 0 && messages.len() >= self.max_messages {
            return Err(Error::QueueFull(self.max_messages));
        }

        let auth = message.auth().to_owned();
        messages.push_back(message);

        info!(
            auth = %auth,
            queued = messages.len(),
            "Message appended"
        );

        Ok(())
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.messages.read().len())
    }

    async fn snapshot(&self) -> Result<Vec<Message>> {
        Ok(self.messages.read().iter().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_append_and_len() {
        let queue = MemoryQueue::new();
        assert_eq!(queue.len().await.unwrap(), 0);

        queue
            .append(Message::commit("alice", vec![json!({"k": "v"})]))
            .await
            .unwrap();

        assert_eq!(queue.len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_append_preserves_arrival_order() {
        let queue = MemoryQueue::new();

        queue
            .append(Message::commit("alice", vec![json!({"n": 1})]))
            .await
            .unwrap();
        queue
            .append(Message::commit("bob", vec![json!({"n": 2})]))
            .await
            .unwrap();

        let snapshot = queue.snapshot().await.unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].auth(), "alice");
        assert_eq!(snapshot[1].auth(), "bob");
    }

    #[tokio::test]
    async fn test_bounded_queue_rejects_at_cap() {
        let queue = MemoryQueue::bounded(1);

        queue
            .append(Message::commit("alice", vec![]))
            .await
            .unwrap();

        let err = queue
            .append(Message::commit("bob", vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::QueueFull(1)));

        // The rejected message must not displace the accepted one
        assert_eq!(queue.len().await.unwrap(), 1);
        assert_eq!(queue.snapshot().await.unwrap()[0].auth(), "alice");
    }

    #[tokio::test]
    async fn test_snapshot_is_a_copy() {
        let queue = MemoryQueue::new();
        queue
            .append(Message::commit("alice", vec![]))
            .await
            .unwrap();

        let before = queue.snapshot().await.unwrap();
        queue.append(Message::commit("bob", vec![])).await.unwrap();

        assert_eq!(before.len(), 1);
        assert_eq!(queue.len().await.unwrap(), 2);
    }
}
