//! Message types for RelayQ
//!
//! Defines the core Message struct and its kind tags.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kind tag of a message
///
/// Only these two tags are ever produced or recognized. Inbound frames
/// carrying any other tag stay at the [`crate::wire::Frame`] level; what to
/// do with them is the broker's decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// Producer payload destined for the queue
    Commit,
    /// Reply traffic, logged and discarded by the broker
    Response,
}

impl MessageKind {
    /// Parse a wire tag; `None` for anything outside the recognized set
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "commit" => Some(Self::Commit),
            "response" => Some(Self::Response),
            _ => None,
        }
    }

    /// The tag written on the wire
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::Commit => "commit",
            Self::Response => "response",
        }
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// A message accepted by the broker
///
/// Immutable once constructed; the kind is fixed for the message's lifetime.
/// `auth` is the claimed sender identity, carried verbatim and never checked
/// against any whitelist.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    auth: String,
    kind: MessageKind,
    payload: Vec<Value>,
}

impl Message {
    /// Create a message with the given kind
    pub fn new(kind: MessageKind, auth: impl Into<String>, payload: Vec<Value>) -> Self {
        Self {
            auth: auth.into(),
            kind,
            payload,
        }
    }

    /// Create a commit message
    pub fn commit(auth: impl Into<String>, payload: Vec<Value>) -> Self {
        Self::new(MessageKind::Commit, auth, payload)
    }

    /// Create a response message
    pub fn response(auth: impl Into<String>, payload: Vec<Value>) -> Self {
        Self::new(MessageKind::Response, auth, payload)
    }

    /// Claimed sender identity
    pub fn auth(&self) -> &str {
        &self.auth
    }

    /// Kind tag fixed at construction
    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    /// Opaque payload records, forwarded verbatim
    pub fn payload(&self) -> &[Value] {
        &self.payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_tags() {
        assert_eq!(MessageKind::from_tag("commit"), Some(MessageKind::Commit));
        assert_eq!(
            MessageKind::from_tag("response"),
            Some(MessageKind::Response)
        );
        assert_eq!(MessageKind::from_tag("fetch"), None);
        assert_eq!(MessageKind::from_tag(""), None);

        assert_eq!(MessageKind::Commit.as_tag(), "commit");
        assert_eq!(MessageKind::Response.as_tag(), "response");
    }

    #[test]
    fn test_message_creation() {
        let msg = Message::commit("alice", vec![json!({"k": "v"})]);
        assert_eq!(msg.auth(), "alice");
        assert_eq!(msg.kind(), MessageKind::Commit);
        assert_eq!(msg.payload(), &[json!({"k": "v"})]);
    }

    #[test]
    fn test_response_message() {
        let msg = Message::response("broker", vec![]);
        assert_eq!(msg.kind(), MessageKind::Response);
        assert!(msg.payload().is_empty());
    }
}
