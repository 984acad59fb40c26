use std::env;
use std::net::SocketAddr;

use log::{debug, error, info};

use crate::error::{GatewayError, Result};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_ERROR_MESSAGE: &str =
    "Sorry, something went wrong. A human agent will take over shortly.";

/// Placeholder in the Voiceflow interact URL replaced by the conversation id.
pub const CONVERSATION_PLACEHOLDER: &str = "{}";

/// Which agent bot answers the webhook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BotKind {
    Voiceflow,
    Echo,
}

#[derive(Debug, Clone)]
pub struct ChatwootConfig {
    pub base_url: String,
    pub api_token: String,
    pub account_id: u64,
}

#[derive(Debug, Clone)]
pub struct VoiceflowConfig {
    pub interact_url: String,
    pub api_key: String,
}

/// Settings of the Voiceflow agent bot. Fixed for the process lifetime.
#[derive(Debug, Clone)]
pub struct AgentBotConfig {
    pub inbox_id: u64,
    pub start_trigger_enabled: bool,
    pub fallback_error_message: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub bot: BotKind,
    pub chatwoot: ChatwootConfig,
    pub voiceflow: Option<VoiceflowConfig>,
    pub agent_bot: Option<AgentBotConfig>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        debug!("Loading configuration from environment");
        dotenvy::dotenv().ok();

        let bind_addr = optional_var("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| GatewayError::Config(format!("BIND_ADDR is not a socket address: {e}")))?;

        let bot = match optional_var("AGENT_BOT") {
            Some(value) => value
                .parse::<BotKind>()
                .map_err(|_| GatewayError::Config(format!("Unknown AGENT_BOT '{value}'")))?,
            None => BotKind::Voiceflow,
        };

        let chatwoot = ChatwootConfig {
            base_url: required_var("CHATWOOT_URL")?,
            api_token: required_var("CHATWOOT_API_TOKEN")?,
            account_id: parse_id("CHATWOOT_ACCOUNT_ID", &required_var("CHATWOOT_ACCOUNT_ID")?)?,
        };

        let (voiceflow, agent_bot) = match bot {
            BotKind::Voiceflow => {
                let interact_url = required_var("VOICEFLOW_INTERACT_URL")?;
                validate_interact_url(&interact_url)?;

                let voiceflow = VoiceflowConfig {
                    interact_url,
                    api_key: required_var("VOICEFLOW_API_KEY")?,
                };

                let agent_bot = AgentBotConfig {
                    inbox_id: parse_id("CHATWOOT_INBOX_ID", &required_var("CHATWOOT_INBOX_ID")?)?,
                    start_trigger_enabled: optional_var("WEBWIDGET_TRIGGERS_START_MESSAGE")
                        .map(|v| parse_bool("WEBWIDGET_TRIGGERS_START_MESSAGE", &v))
                        .transpose()?
                        .unwrap_or(false),
                    fallback_error_message: optional_var("ERROR_MESSAGE")
                        .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string()),
                };

                (Some(voiceflow), Some(agent_bot))
            }
            BotKind::Echo => (None, None),
        };

        info!("Configuration loaded successfully");
        debug!("Agent bot: {}", bot);
        debug!("Bind address: {}", bind_addr);
        debug!("Chatwoot URL: {}", chatwoot.base_url);
        debug!(
            "Chatwoot API token length: {} characters",
            chatwoot.api_token.len()
        );
        if let Some(ref voiceflow) = voiceflow {
            debug!("Voiceflow interact URL: {}", voiceflow.interact_url);
            debug!(
                "Voiceflow API key length: {} characters",
                voiceflow.api_key.len()
            );
        }
        if let Some(ref agent_bot) = agent_bot {
            debug!(
                "Inbox id: {}, web widget start trigger: {}",
                agent_bot.inbox_id, agent_bot.start_trigger_enabled
            );
        }

        Ok(Self {
            bind_addr,
            bot,
            chatwoot,
            voiceflow,
            agent_bot,
        })
    }
}

fn required_var(key: &str) -> Result<String> {
    env::var(key).map_err(|e| {
        error!("Failed to load {} from environment: {}", key, e);
        GatewayError::EnvVar(e)
    })
}

fn optional_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_id(key: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse()
        .map_err(|e| GatewayError::Config(format!("{key} is not a valid id: {e}")))
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(GatewayError::Config(format!(
            "{key} must be a boolean, got '{other}'"
        ))),
    }
}

/// The interact URL is a template with exactly one conversation id placeholder.
pub fn validate_interact_url(template: &str) -> Result<()> {
    match template.matches(CONVERSATION_PLACEHOLDER).count() {
        1 => Ok(()),
        n => Err(GatewayError::Config(format!(
            "VOICEFLOW_INTERACT_URL must contain exactly one '{CONVERSATION_PLACEHOLDER}' placeholder, found {n}"
        ))),
    }
}
