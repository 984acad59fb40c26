//! Pure classification of inbound webhook events.

use crate::types::{EventKind, InboundEvent, MessageType};

/// What an inbound event asks the bot to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum FlowKind {
    /// Nothing to do for this event
    Ignored,
    /// The web widget opened; greet the visitor in a fresh conversation
    StartFlow,
    /// The visitor wrote a message in an existing conversation
    MessageFlow,
}

/// Classifies an event. Rules are checked in order and the first match wins.
pub fn classify(event: &InboundEvent, start_trigger_enabled: bool) -> FlowKind {
    match (event.event, event.message_type) {
        (EventKind::WebwidgetTriggered, _) if start_trigger_enabled => FlowKind::StartFlow,
        (EventKind::MessageCreated, MessageType::Incoming) => FlowKind::MessageFlow,
        _ => FlowKind::Ignored,
    }
}
