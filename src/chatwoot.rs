//! Chatwoot application API client used by the agent bots.

use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::ChatwootConfig;
use crate::error::{GatewayError, Result};
use crate::types::{Conversation, CreateConversationRequest};

const ACCESS_TOKEN_HEADER: &str = "api_access_token";

/// Operations the gateway performs against the chat platform.
#[async_trait]
pub trait ChatPlatform: Send + Sync {
    /// Posts an outgoing (bot) message and returns its id.
    async fn create_outgoing_message(&self, conversation_id: u64, content: &str) -> Result<u64>;

    async fn create_new_conversation(
        &self,
        request: &CreateConversationRequest,
    ) -> Result<Conversation>;

    async fn add_label(&self, conversation_id: u64, label: &str) -> Result<()>;
}

#[derive(Debug, Serialize)]
struct CreateMessageRequest<'a> {
    content: &'a str,
    message_type: &'static str,
}

#[derive(Debug, Serialize)]
struct AddLabelsRequest<'a> {
    labels: [&'a str; 1],
}

#[derive(Debug, Deserialize)]
struct CreatedMessage {
    id: u64,
}

pub struct ChatwootClient {
    client: reqwest::Client,
    base_url: Url,
    api_token: String,
    account_id: u64,
}

impl ChatwootClient {
    /// # Errors
    ///
    /// Returns an error if the configured base URL cannot be parsed.
    pub fn new(config: &ChatwootConfig) -> Result<Self> {
        let mut base = config.base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }

        Ok(Self {
            client: reqwest::Client::new(),
            base_url: Url::parse(&base)?,
            api_token: config.api_token.clone(),
            account_id: config.account_id,
        })
    }

    fn conversations_url(&self, suffix: &str) -> Result<Url> {
        let path = format!("api/v1/accounts/{}/conversations{}", self.account_id, suffix);
        Ok(self.base_url.join(&path)?)
    }

    async fn post<B: Serialize + ?Sized>(&self, url: Url, body: &B) -> Result<reqwest::Response> {
        debug!("POST {}", url);

        let response = self
            .client
            .post(url)
            .header(ACCESS_TOKEN_HEADER, &self.api_token)
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .text()
                .await
                .unwrap_or_else(|e| format!("Failed to read error response: {}", e));
            return Err(GatewayError::ChatwootApi { status, message });
        }

        Ok(response)
    }
}

#[async_trait]
impl ChatPlatform for ChatwootClient {
    async fn create_outgoing_message(&self, conversation_id: u64, content: &str) -> Result<u64> {
        let url = self.conversations_url(&format!("/{conversation_id}/messages"))?;
        let body = CreateMessageRequest {
            content,
            message_type: "outgoing",
        };

        let created: CreatedMessage = self.post(url, &body).await?.json().await?;
        debug!(
            "Created message {} in conversation {}",
            created.id, conversation_id
        );
        Ok(created.id)
    }

    async fn create_new_conversation(
        &self,
        request: &CreateConversationRequest,
    ) -> Result<Conversation> {
        let url = self.conversations_url("")?;
        let conversation: Conversation = self.post(url, request).await?.json().await?;
        debug!(
            "Created conversation {} for source {}",
            conversation.id, request.source_id
        );
        Ok(conversation)
    }

    async fn add_label(&self, conversation_id: u64, label: &str) -> Result<()> {
        let url = self.conversations_url(&format!("/{conversation_id}/labels"))?;
        self.post(url, &AddLabelsRequest { labels: [label] }).await?;
        Ok(())
    }
}
