use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unit handed to a [`crate::MessageProducer`].
///
/// - `topic` selects the stream (one per resource).
/// - `key` is the record identifier, so a partitioned broker keeps per-record order.
/// - `payload` is the JSON-encoded event body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    message_id: Uuid,
    topic: String,
    key: String,
    event_type: String,
    payload: serde_json::Value,
}

impl Message {
    pub fn new(
        topic: impl Into<String>,
        key: impl Into<String>,
        event_type: impl Into<String>,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            message_id: Uuid::now_v7(),
            topic: topic.into(),
            key: key.into(),
            event_type: event_type.into(),
            payload,
        }
    }

    pub fn message_id(&self) -> Uuid {
        self.message_id
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn payload(&self) -> &serde_json::Value {
        &self.payload
    }

    pub fn into_payload(self) -> serde_json::Value {
        self.payload
    }
}
