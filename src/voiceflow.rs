use async_trait::async_trait;
use log::{debug, error, info, warn};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;

use crate::config::{CONVERSATION_PLACEHOLDER, VoiceflowConfig};
use crate::error::Result;
use crate::types::DialogResponse;

/// Dialog engine that answers a visitor message with an ordered list of traces.
#[async_trait]
pub trait DialogBackend: Send + Sync {
    async fn converse(&self, conversation_id: u64, message: &str) -> Result<Vec<DialogResponse>>;
}

#[derive(Debug, Serialize)]
struct InteractRequest<'a> {
    action: Action<'a>,
}

#[derive(Debug, Serialize)]
struct Action<'a> {
    #[serde(rename = "type")]
    action_type: &'static str,
    payload: &'a str,
}

pub struct VoiceflowClient {
    client: reqwest::Client,
    interact_url: String,
    api_key: String,
}

impl VoiceflowClient {
    pub fn new(config: &VoiceflowConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            interact_url: config.interact_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// The Voiceflow user id is the Chatwoot conversation id.
    fn url_for(&self, conversation_id: u64) -> String {
        self.interact_url
            .replacen(CONVERSATION_PLACEHOLDER, &conversation_id.to_string(), 1)
    }
}

#[async_trait]
impl DialogBackend for VoiceflowClient {
    async fn converse(&self, conversation_id: u64, message: &str) -> Result<Vec<DialogResponse>> {
        let request = InteractRequest {
            action: Action {
                action_type: "text",
                payload: message,
            },
        };
        let url = self.url_for(conversation_id);
        debug!(
            "Sending message to Voiceflow for conversation {}: {}",
            conversation_id, message
        );

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, &self.api_key)
            .json(&request)
            .send()
            .await
            .inspect_err(|e| {
                error!("Voiceflow request for conversation {conversation_id} failed: {e}");
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Voiceflow answered {} for conversation {}", status, conversation_id);
        }

        let body = response.text().await.inspect_err(|e| {
            error!("Could not read Voiceflow response body: {e}");
        })?;

        // An undecodable body means "nothing to say", not a failure.
        let responses: Vec<DialogResponse> = match serde_json::from_str(&body) {
            Ok(responses) => responses,
            Err(e) => {
                error!("Can not decode Voiceflow response ({e}): {body}");
                Vec::new()
            }
        };

        info!(
            "Received {} responses from Voiceflow for conversation {}",
            responses.len(),
            conversation_id
        );
        Ok(responses)
    }
}
