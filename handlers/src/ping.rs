//! Liveness command: answers /ping with pong.

use async_trait::async_trait;
use relay_core::{Handler, HandlerResponse, Result, UpdateContext};
use tracing::info;

/// Replies "pong" to the /ping command; passes everything else on.
pub struct PingHandler;

#[async_trait]
impl Handler for PingHandler {
    async fn handle(&self, ctx: &UpdateContext) -> Result<HandlerResponse> {
        match ctx.update.message_text() {
            Some(text) if text.trim() == "/ping" => {
                ctx.reply("pong").await?;
                info!(
                    user_id = ctx.update.from.as_ref().map(|u| u.id),
                    "Answered ping"
                );
                Ok(HandlerResponse::Reply("pong".to_string()))
            }
            _ => Ok(HandlerResponse::Continue),
        }
    }
}
