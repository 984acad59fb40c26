pub mod chatwoot;
pub mod config;
pub mod error;
pub mod relay;
pub mod server;
pub mod types;
pub mod voiceflow;

use std::sync::Arc;

use log::{debug, info};

use chatwoot::{ChatPlatform, ChatwootClient};
use config::{BotKind, Config};
use error::{GatewayError, Result};
use relay::{AgentBot, EchoAgentBot, VoiceflowAgentBot};
use voiceflow::VoiceflowClient;

/// Run the agent bot gateway.
pub async fn run() -> Result<()> {
    info!("Initializing gateway");
    let config = Config::from_env()?;

    debug!("Initializing Chatwoot client");
    let chat: Arc<dyn ChatPlatform> = Arc::new(ChatwootClient::new(&config.chatwoot)?);

    let bot = build_bot(&config, chat)?;
    info!("Serving the {} agent bot", config.bot);

    server::serve(config.bind_addr, bot).await
}

fn build_bot(config: &Config, chat: Arc<dyn ChatPlatform>) -> Result<Arc<dyn AgentBot>> {
    match config.bot {
        BotKind::Echo => Ok(Arc::new(EchoAgentBot::new(chat))),
        BotKind::Voiceflow => {
            let (Some(voiceflow), Some(agent_bot)) = (&config.voiceflow, &config.agent_bot)
            else {
                return Err(GatewayError::Config(
                    "Voiceflow agent bot requires Voiceflow settings".to_string(),
                ));
            };

            debug!("Initializing Voiceflow client");
            let dialog = Arc::new(VoiceflowClient::new(voiceflow));
            Ok(Arc::new(VoiceflowAgentBot::new(
                chat,
                dialog,
                agent_bot.clone(),
            )))
        }
    }
}
