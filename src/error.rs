use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Chatwoot API error ({status}): {message}")]
    ChatwootApi { status: StatusCode, message: String },

    #[error("Voiceflow API error ({status}): {message}")]
    VoiceflowApi { status: StatusCode, message: String },

    #[error("JSON decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of a failure, used when logging swallowed errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    Transport,
    Decode,
    Api,
    Config,
}

impl GatewayError {
    /// Returns the failure class this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            GatewayError::Config(_) | GatewayError::EnvVar(_) | GatewayError::InvalidUrl(_) => {
                ErrorKind::Config
            }
            GatewayError::Reqwest(e) if e.is_decode() => ErrorKind::Decode,
            GatewayError::Reqwest(_) | GatewayError::Io(_) => ErrorKind::Transport,
            GatewayError::ChatwootApi { .. } | GatewayError::VoiceflowApi { .. } => ErrorKind::Api,
            GatewayError::Decode(_) => ErrorKind::Decode,
        }
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
