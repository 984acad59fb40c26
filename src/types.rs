//! Common types shared by the Chatwoot and Voiceflow sides of the gateway.

use serde::{Deserialize, Deserializer, Serialize};

/// Kind of webhook event delivered by Chatwoot.
///
/// Only the events the agent bots react to are named; everything else
/// decodes to [`EventKind::Other`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EventKind {
    MessageCreated,
    WebwidgetTriggered,
    #[default]
    #[serde(other)]
    Other,
}

/// Direction of a Chatwoot message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MessageType {
    /// Sent by the visitor
    Incoming,
    /// Sent by an agent or bot
    Outgoing,
    #[default]
    #[serde(other)]
    Other,
}

/// Reference to a Chatwoot entity by id. A missing entity decodes to id 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    #[serde(default)]
    pub id: u64,
}

impl EntityRef {
    pub fn is_present(self) -> bool {
        self.id != 0
    }
}

/// Decoded Chatwoot agent-bot webhook payload.
///
/// Chatwoot sends `null` for absent entities, so those fields fall back to their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InboundEvent {
    pub event: EventKind,
    pub message_type: MessageType,
    pub content: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub sender: EntityRef,
    #[serde(deserialize_with = "null_as_default")]
    pub account: EntityRef,
    #[serde(deserialize_with = "null_as_default")]
    pub conversation: EntityRef,
    #[serde(deserialize_with = "null_as_default")]
    pub current_conversation: EntityRef,
    #[serde(deserialize_with = "null_as_default")]
    pub source_id: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl InboundEvent {
    /// Message text, empty when Chatwoot sent `null` (e.g. attachment-only messages).
    pub fn content(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }
}

/// Conversation as returned by Chatwoot.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Conversation {
    pub id: u64,
    #[serde(default)]
    pub source_id: Option<String>,
    #[serde(default)]
    pub inbox_id: Option<u64>,
}

/// Body for creating a conversation bound to a contact inbox source.
#[derive(Debug, Clone, Serialize)]
pub struct CreateConversationRequest {
    pub source_id: String,
    pub inbox_id: u64,
}

/// Payload of a single Voiceflow trace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogPayload {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
}

/// One entry of the ordered trace list returned by the Voiceflow interact API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogResponse {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub payload: DialogPayload,
}

impl DialogResponse {
    pub const TEXT: &'static str = "text";
    pub const SPEAK: &'static str = "speak";

    /// Builds a text trace, mostly useful for fakes.
    pub fn text(message: impl Into<String>) -> Self {
        Self::with_kind(Self::TEXT, message)
    }

    pub fn with_kind(kind: &str, message: impl Into<String>) -> Self {
        Self {
            kind: kind.to_string(),
            payload: DialogPayload {
                kind: "message".to_string(),
                message: message.into(),
            },
        }
    }

    pub fn is_text(&self) -> bool {
        self.kind == Self::TEXT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_incoming_message_event() -> Result<(), serde_json::Error> {
        let event: InboundEvent = serde_json::from_str(
            r#"{
                "event": "message_created",
                "message_type": "incoming",
                "content": "hello",
                "sender": {"id": 7, "name": "visitor"},
                "account": {"id": 1},
                "conversation": {"id": 42, "status": "pending"},
                "source_id": "abc"
            }"#,
        )?;

        assert_eq!(event.event, EventKind::MessageCreated);
        assert_eq!(event.message_type, MessageType::Incoming);
        assert_eq!(event.content(), "hello");
        assert_eq!(event.conversation.id, 42);
        assert!(!event.current_conversation.is_present());
        Ok(())
    }

    #[test]
    fn unknown_event_and_null_content_decode() -> Result<(), serde_json::Error> {
        let event: InboundEvent = serde_json::from_str(
            r#"{"event": "conversation_status_changed", "message_type": "template", "content": null}"#,
        )?;

        assert_eq!(event.event, EventKind::Other);
        assert_eq!(event.message_type, MessageType::Other);
        assert_eq!(event.content(), "");
        Ok(())
    }

    #[test]
    fn null_entities_decode_as_absent() -> Result<(), serde_json::Error> {
        let event: InboundEvent = serde_json::from_str(
            r#"{"event": "webwidget_triggered", "current_conversation": null, "conversation": null, "source_id": null}"#,
        )?;

        assert_eq!(event.event, EventKind::WebwidgetTriggered);
        assert!(!event.current_conversation.is_present());
        assert!(event.source_id.is_empty());
        Ok(())
    }

    #[test]
    fn decodes_traces_without_message_payload() -> Result<(), serde_json::Error> {
        let responses: Vec<DialogResponse> = serde_json::from_str(
            r#"[
                {"type": "text", "payload": {"slate": {}, "message": "hi"}},
                {"type": "path", "payload": {"path": "reference"}},
                {"type": "end"},
                {"type": "flow", "payload": null}
            ]"#,
        )?;

        assert_eq!(responses.len(), 4);
        assert!(responses[0].is_text());
        assert_eq!(responses[0].payload.message, "hi");
        assert_eq!(responses[2].kind, "end");
        assert!(responses[2].payload.message.is_empty());
        Ok(())
    }

    #[test]
    fn event_kind_displays_as_wire_tag() {
        assert_eq!(EventKind::WebwidgetTriggered.to_string(), "webwidget_triggered");
        assert_eq!(MessageType::Incoming.to_string(), "incoming");
    }
}
