//! Forwarding of Voiceflow traces as outgoing Chatwoot messages.

use log::{debug, error, info};

use crate::chatwoot::ChatPlatform;
use crate::error::Result;
use crate::types::DialogResponse;

/// Expands the literal `\n` escapes Voiceflow leaves in message text.
pub fn normalize_message(message: &str) -> String {
    message.replace("\\n", "\n")
}

/// Sends one trace as an outgoing message, regardless of its kind.
///
/// An empty message after normalization is skipped and counts as success.
///
/// # Errors
///
/// Returns the transport or API error if Chatwoot rejects the message.
pub async fn send_response(
    chat: &dyn ChatPlatform,
    conversation_id: u64,
    response: &DialogResponse,
) -> Result<()> {
    let text = normalize_message(&response.payload.message);

    if text.is_empty() {
        info!(
            "Empty response for conversation {}, no message is created",
            conversation_id
        );
        return Ok(());
    }

    debug!("Response text for conversation {}: {}", conversation_id, text);

    chat.create_outgoing_message(conversation_id, &text)
        .await
        .inspect_err(|e| {
            error!("Could not send message to conversation {conversation_id}: {e}");
        })?;

    Ok(())
}

/// Forwards the text traces of a Voiceflow reply in order.
///
/// Stops at the first failed send; the remaining traces are dropped.
///
/// # Errors
///
/// Returns the first send failure.
pub async fn route(
    chat: &dyn ChatPlatform,
    conversation_id: u64,
    responses: &[DialogResponse],
) -> Result<()> {
    for response in responses {
        if !response.is_text() {
            debug!("Skipping '{}' trace", response.kind);
            continue;
        }
        send_response(chat, conversation_id, response).await?;
    }
    Ok(())
}
