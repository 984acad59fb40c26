use log::{error, warn};

use crate::chatwoot::ChatPlatform;
use crate::types::DialogResponse;

use super::router::send_response;

/// Label marking conversations the bot failed to answer.
pub const ERROR_LABEL: &str = "agent_bot_error";

/// Labels the conversation and sends the fallback message, once each.
///
/// Both steps are best-effort: failures are logged and never returned.
pub async fn escalate(chat: &dyn ChatPlatform, conversation_id: u64, fallback_message: &str) {
    warn!("Escalating conversation {}", conversation_id);

    if let Err(e) = chat.add_label(conversation_id, ERROR_LABEL).await {
        error!(
            "Could not label conversation {} with '{}' ({}): {}",
            conversation_id,
            ERROR_LABEL,
            e.kind(),
            e
        );
    }

    let fallback = DialogResponse::with_kind(DialogResponse::SPEAK, fallback_message);
    if let Err(e) = send_response(chat, conversation_id, &fallback).await {
        error!(
            "Could not send fallback message to conversation {} ({}): {}",
            conversation_id,
            e.kind(),
            e
        );
    }
}
