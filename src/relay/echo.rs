use std::sync::Arc;

use async_trait::async_trait;
use log::{error, info};

use crate::chatwoot::ChatPlatform;
use crate::types::InboundEvent;

use super::AgentBot;
use super::classify::{FlowKind, classify};

/// Agent bot replying with the visitor's own message. Useful to check the webhook wiring.
pub struct EchoAgentBot {
    chat: Arc<dyn ChatPlatform>,
}

impl EchoAgentBot {
    pub fn new(chat: Arc<dyn ChatPlatform>) -> Self {
        Self { chat }
    }

    pub fn reply_to(message: &str) -> String {
        message.to_string()
    }
}

#[async_trait]
impl AgentBot for EchoAgentBot {
    async fn handle(&self, event: &InboundEvent) {
        if classify(event, false) != FlowKind::MessageFlow {
            return;
        }

        info!("Received: {}", event.content());
        let reply = Self::reply_to(event.content());

        if let Err(e) = self
            .chat
            .create_outgoing_message(event.conversation.id, &reply)
            .await
        {
            error!(
                "Could not echo message to conversation {}: {}",
                event.conversation.id, e
            );
        }
    }
}
