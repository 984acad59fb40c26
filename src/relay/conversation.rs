use log::{debug, info};

use crate::chatwoot::ChatPlatform;
use crate::error::Result;
use crate::types::CreateConversationRequest;

/// Asks Chatwoot for a new conversation on `inbox_id` for the contact behind `source_id`.
///
/// Always creates; callers skip this when the event already carries a conversation.
pub async fn create_conversation(
    chat: &dyn ChatPlatform,
    source_id: &str,
    inbox_id: u64,
) -> Result<u64> {
    debug!("Creating conversation for source {} in inbox {}", source_id, inbox_id);

    let conversation = chat
        .create_new_conversation(&CreateConversationRequest {
            source_id: source_id.to_string(),
            inbox_id,
        })
        .await?;

    info!(
        "Created conversation {} for source {}",
        conversation.id, source_id
    );
    Ok(conversation.id)
}
