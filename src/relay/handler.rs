//! Voiceflow agent bot: drives conversation start and message relay.

use std::sync::Arc;

use async_trait::async_trait;
use log::{error, info};

use crate::chatwoot::ChatPlatform;
use crate::config::AgentBotConfig;
use crate::types::InboundEvent;
use crate::voiceflow::DialogBackend;

use super::AgentBot;
use super::classify::{FlowKind, classify};
use super::conversation::create_conversation;
use super::escalation::escalate;
use super::router::route;

/// Message sent to Voiceflow to start a new dialog.
const START_MESSAGE: &str = "start";

pub struct VoiceflowAgentBot {
    chat: Arc<dyn ChatPlatform>,
    dialog: Arc<dyn DialogBackend>,
    config: AgentBotConfig,
}

impl VoiceflowAgentBot {
    pub fn new(
        chat: Arc<dyn ChatPlatform>,
        dialog: Arc<dyn DialogBackend>,
        config: AgentBotConfig,
    ) -> Self {
        Self {
            chat,
            dialog,
            config,
        }
    }

    /// Greets a visitor who opened the web widget, in a newly created conversation.
    async fn start_flow(&self, event: &InboundEvent) {
        info!("Web widget triggered for source {}", event.source_id);

        if event.current_conversation.is_present() {
            info!(
                "A conversation already exists with id {}. No new conversation is created.",
                event.current_conversation.id
            );
            return;
        }

        let conversation_id = match create_conversation(
            self.chat.as_ref(),
            &event.source_id,
            self.config.inbox_id,
        )
        .await
        {
            Ok(id) => id,
            Err(e) => {
                error!(
                    "Could not create conversation for source {} ({}): {}",
                    event.source_id,
                    e.kind(),
                    e
                );
                return;
            }
        };

        let responses = match self.dialog.converse(conversation_id, START_MESSAGE).await {
            Ok(responses) => responses,
            Err(e) => {
                error!(
                    "Voiceflow failed to start conversation {} ({}): {}",
                    conversation_id,
                    e.kind(),
                    e
                );
                return;
            }
        };

        if responses.is_empty() {
            error!("No response from Voiceflow for conversation {}", conversation_id);
            return;
        }

        if let Err(e) = route(self.chat.as_ref(), conversation_id, &responses).await {
            error!(
                "Could not send greeting to conversation {}: {}",
                conversation_id, e
            );
        }
    }

    /// Answers a visitor message in its existing conversation.
    async fn message_flow(&self, event: &InboundEvent) {
        let conversation_id = event.conversation.id;
        info!(
            "Received message in conversation {}: {}",
            conversation_id,
            event.content()
        );

        let responses = match self.dialog.converse(conversation_id, event.content()).await {
            Ok(responses) => responses,
            Err(e) => {
                error!(
                    "Voiceflow failed for conversation {} ({}): {}",
                    conversation_id,
                    e.kind(),
                    e
                );
                self.escalate(conversation_id).await;
                return;
            }
        };

        if let Err(e) = route(self.chat.as_ref(), conversation_id, &responses).await {
            error!(
                "The message could not be sent back to Chatwoot for conversation {} ({}): {}",
                conversation_id,
                e.kind(),
                e
            );
            self.escalate(conversation_id).await;
        }
    }

    async fn escalate(&self, conversation_id: u64) {
        escalate(
            self.chat.as_ref(),
            conversation_id,
            &self.config.fallback_error_message,
        )
        .await;
    }
}

#[async_trait]
impl AgentBot for VoiceflowAgentBot {
    async fn handle(&self, event: &InboundEvent) {
        let flow = classify(event, self.config.start_trigger_enabled);
        info!("Received '{}' event, flow: {}", event.event, flow);

        match flow {
            FlowKind::StartFlow => self.start_flow(event).await,
            FlowKind::MessageFlow => self.message_flow(event).await,
            FlowKind::Ignored => {}
        }
    }
}
