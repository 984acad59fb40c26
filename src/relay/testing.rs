//! Recording fakes of the Chatwoot and Voiceflow clients.

use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::chatwoot::ChatPlatform;
use crate::error::{GatewayError, Result};
use crate::types::{Conversation, CreateConversationRequest, DialogResponse};
use crate::voiceflow::DialogBackend;

#[derive(Default)]
pub struct FakeChat {
    pub fail_create: bool,
    pub fail_label: bool,
    /// Every send attempt fails
    pub fail_sends: bool,
    /// Only the send attempt with this zero-based index fails
    pub fail_send_at: Option<usize>,
    pub(crate) sends: Mutex<Vec<(u64, String)>>,
    pub(crate) labels: Mutex<Vec<(u64, String)>>,
    pub(crate) conversations: Mutex<Vec<(String, u64)>>,
}

impl FakeChat {
    pub const CREATED_CONVERSATION_ID: u64 = 1001;

    /// All send attempts, failed ones included.
    pub fn sends(&self) -> Vec<(u64, String)> {
        self.sends.lock().unwrap().clone()
    }

    pub fn sent_texts(&self) -> Vec<String> {
        self.sends().into_iter().map(|(_, text)| text).collect()
    }

    pub fn labels(&self) -> Vec<(u64, String)> {
        self.labels.lock().unwrap().clone()
    }

    pub fn created_conversations(&self) -> Vec<(String, u64)> {
        self.conversations.lock().unwrap().clone()
    }
}

fn api_error(message: &str) -> GatewayError {
    GatewayError::ChatwootApi {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: message.to_string(),
    }
}

#[async_trait]
impl ChatPlatform for FakeChat {
    async fn create_outgoing_message(&self, conversation_id: u64, content: &str) -> Result<u64> {
        let mut sends = self.sends.lock().unwrap();
        let index = sends.len();
        sends.push((conversation_id, content.to_string()));

        if self.fail_sends || self.fail_send_at == Some(index) {
            return Err(api_error("send failed"));
        }
        Ok(index as u64 + 1)
    }

    async fn create_new_conversation(
        &self,
        request: &CreateConversationRequest,
    ) -> Result<Conversation> {
        self.conversations
            .lock()
            .unwrap()
            .push((request.source_id.clone(), request.inbox_id));

        if self.fail_create {
            return Err(api_error("create failed"));
        }
        Ok(Conversation {
            id: Self::CREATED_CONVERSATION_ID,
            source_id: Some(request.source_id.clone()),
            inbox_id: Some(request.inbox_id),
        })
    }

    async fn add_label(&self, conversation_id: u64, label: &str) -> Result<()> {
        self.labels
            .lock()
            .unwrap()
            .push((conversation_id, label.to_string()));

        if self.fail_label {
            return Err(api_error("label failed"));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeDialog {
    pub responses: Vec<DialogResponse>,
    pub fail: bool,
    pub(crate) calls: Mutex<Vec<(u64, String)>>,
}

impl FakeDialog {
    pub fn replying(responses: Vec<DialogResponse>) -> Self {
        Self {
            responses,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<(u64, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DialogBackend for FakeDialog {
    async fn converse(&self, conversation_id: u64, message: &str) -> Result<Vec<DialogResponse>> {
        self.calls
            .lock()
            .unwrap()
            .push((conversation_id, message.to_string()));

        if self.fail {
            return Err(GatewayError::VoiceflowApi {
                status: StatusCode::BAD_GATEWAY,
                message: "dialog failed".to_string(),
            });
        }
        Ok(self.responses.clone())
    }
}
