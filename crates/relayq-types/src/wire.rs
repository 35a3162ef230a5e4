//! Wire codec for RelayQ frames
//!
//! The wire format is UTF-8 JSON: a one-element array wrapping an object
//! with `auth`, `type`, and `capacity` fields. Producers in the wild also
//! emit the bare object without the array envelope, so [`decode`] accepts
//! both shapes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::message::{Message, MessageKind};

/// A decoded frame whose kind tag has not yet been classified
///
/// The tag is kept exactly as received; frames with tags outside the
/// recognized set decode fine and are left for the broker to classify.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Claimed sender identity
    pub auth: String,
    /// Raw kind tag as it appeared on the wire
    #[serde(rename = "type")]
    pub kind: String,
    /// Opaque payload records
    pub capacity: Vec<Value>,
}

impl Frame {
    /// Convert into a [`Message`]; `None` if the tag is unrecognized
    pub fn into_message(self) -> Option<Message> {
        let kind = MessageKind::from_tag(&self.kind)?;
        Some(Message::new(kind, self.auth, self.capacity))
    }
}

/// Encode a message as wire text: a JSON array containing one frame object.
///
/// Deterministic for identical input; no whitespace or field-order guarantee
/// beyond valid JSON.
pub fn encode(message: &Message) -> Result<String> {
    let frame = Frame {
        auth: message.auth().to_owned(),
        kind: message.kind().as_tag().to_owned(),
        capacity: message.payload().to_vec(),
    };
    Ok(serde_json::to_string(&[frame])?)
}

/// Decode wire text into a [`Frame`].
///
/// Fails on invalid JSON, an empty envelope, or missing required fields.
/// An unrecognized kind tag is not a failure.
pub fn decode(text: &str) -> Result<Frame> {
    let value: Value = serde_json::from_str(text)?;
    let frame = match value {
        Value::Array(items) => items
            .into_iter()
            .next()
            .ok_or_else(|| Error::InvalidFrame("empty envelope".to_owned()))?,
        other => other,
    };
    Ok(serde_json::from_value(frame)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_round_trip() {
        let msg = Message::commit("alice", vec![json!({"k": "v"}), json!({"n": 1})]);
        let text = encode(&msg).unwrap();

        let decoded = decode(&text).unwrap().into_message();
        assert_eq!(decoded, Some(msg));
    }

    #[test]
    fn test_round_trip_response() {
        let msg = Message::response("broker", vec![json!({"status": "ok"})]);
        let text = encode(&msg).unwrap();

        assert_eq!(decode(&text).unwrap().into_message(), Some(msg));
    }

    #[test]
    fn test_encode_is_array_envelope() {
        let msg = Message::commit("alice", vec![]);
        let text = encode(&msg).unwrap();

        let value: Value = serde_json::from_str(&text).unwrap();
        let items = value.as_array().expect("array envelope");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["auth"], "alice");
        assert_eq!(items[0]["type"], "commit");
        assert!(items[0]["capacity"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_decode_bare_object() {
        let frame =
            decode(r#"{"auth":"alice","type":"commit","capacity":[{"k":"v"}]}"#).unwrap();
        assert_eq!(frame.auth, "alice");
        assert_eq!(frame.kind, "commit");
        assert_eq!(frame.capacity, vec![json!({"k": "v"})]);
    }

    #[test]
    fn test_decode_unrecognized_kind() {
        let frame = decode(r#"{"auth":"bob","type":"fetch","capacity":[]}"#).unwrap();
        assert_eq!(frame.kind, "fetch");
        assert_eq!(frame.into_message(), None);
    }

    #[test]
    fn test_decode_invalid_json() {
        assert!(matches!(decode("not json"), Err(Error::Decode(_))));
    }

    #[test]
    fn test_decode_missing_fields() {
        assert!(decode(r#"{"auth":"alice","type":"commit"}"#).is_err());
        assert!(decode(r#"[{"type":"commit","capacity":[]}]"#).is_err());
    }

    #[test]
    fn test_decode_empty_envelope() {
        assert!(matches!(decode("[]"), Err(Error::InvalidFrame(_))));
    }
}
