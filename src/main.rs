#[tokio::main]
async fn main() -> agent_bot_gateway::error::Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("agent_bot_gateway=info,tower_http=warn"),
    )
    .init();
    log::info!("Starting agent bot gateway");

    match agent_bot_gateway::run().await {
        Ok(()) => {
            log::info!("Gateway shut down successfully");
            Ok(())
        }
        Err(e) => {
            log::error!("Gateway encountered an error: {}", e);
            Err(e)
        }
    }
}
