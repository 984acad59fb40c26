//! HTTP endpoint receiving Chatwoot agent-bot webhooks.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use log::{debug, error, info};
use serde_json::json;
use tokio::net::TcpListener;

use crate::error::Result;
use crate::relay::AgentBot;
use crate::types::InboundEvent;

pub const WEBHOOK_ENDPOINT: &str = "/webhook";
pub const HEALTH_ENDPOINT: &str = "/health";

type BotState = Arc<dyn AgentBot>;

pub fn router(bot: BotState) -> Router {
    Router::new()
        .route(WEBHOOK_ENDPOINT, post(handle_webhook))
        .route(HEALTH_ENDPOINT, get(|| async { "ok" }))
        .with_state(bot)
}

/// Decodes the event and runs the bot to completion before answering.
async fn handle_webhook(State(bot): State<BotState>, body: Bytes) -> Response {
    let event: InboundEvent = match serde_json::from_slice(&body) {
        Ok(event) => event,
        Err(e) => {
            error!("Could not decode Chatwoot event: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "500", "message": e.to_string()})),
            )
                .into_response();
        }
    };

    debug!("Received the request: {:?}", event);
    bot.handle(&event).await;

    StatusCode::OK.into_response()
}

/// Serves the webhook until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the listener cannot be bound or the server fails.
pub async fn serve(addr: SocketAddr, bot: BotState) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(
        "Listening for Chatwoot webhooks on {}{}",
        listener.local_addr()?,
        WEBHOOK_ENDPOINT
    );

    axum::serve(listener, router(bot))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received, shutting down...");
        })
        .await?;

    Ok(())
}
