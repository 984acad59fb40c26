//! Agent bots relaying Chatwoot webhook events to a dialog engine.

mod classify;
mod conversation;
mod echo;
mod escalation;
mod handler;
mod router;

#[cfg(test)]
mod testing;

use async_trait::async_trait;

use crate::types::InboundEvent;

pub use classify::{FlowKind, classify};
pub use conversation::create_conversation;
pub use echo::EchoAgentBot;
pub use escalation::{ERROR_LABEL, escalate};
pub use handler::VoiceflowAgentBot;
pub use router::{normalize_message, route, send_response};

/// An agent bot consuming Chatwoot webhook events.
///
/// Implementations never fail towards the caller: every error is logged
/// and, where a conversation exists, escalated on that conversation.
#[async_trait]
pub trait AgentBot: Send + Sync {
    async fn handle(&self, event: &InboundEvent);
}
