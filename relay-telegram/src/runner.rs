//! Dispatcher runner: converts teloxide updates to core contexts and drives
//! the handler chain. Runs until SIGINT/SIGTERM.

use std::sync::Arc;

use anyhow::Result;
use handler_chain::HandlerChain;
use relay_core::UpdateContext;
use teloxide::dptree;
use teloxide::prelude::*;
use teloxide::types::ChatId;
use tracing::{error, info, instrument};

use crate::adapters::{TelegramUpdateWrapper, ToCoreUpdate};
use crate::config::TelegramConfig;
use crate::replier::TelegramReplier;

/// Builds a teloxide Bot from config; supports a custom API endpoint.
pub fn build_bot(config: &TelegramConfig) -> Result<teloxide::Bot> {
    let bot = teloxide::Bot::new(config.bot_token.clone());
    match &config.api_url {
        Some(url) => Ok(bot.set_api_url(reqwest::Url::parse(url)?)),
        None => Ok(bot),
    }
}

/// Runs the dispatcher until a termination signal arrives. Every update kind
/// (messages, callback queries, the rest) is converted to a core context and
/// run through the chain. Chain failures are logged here as a backstop; the
/// logging middleware has already recorded them with full context.
#[instrument(skip(bot, chain))]
pub async fn run_dispatcher(bot: teloxide::Bot, chain: HandlerChain) -> Result<()> {
    if let Ok(me) = bot.get_me().await {
        info!(username = ?me.user.username, "Bot authenticated");
    }

    let handler = dptree::entry().endpoint(
        |bot: teloxide::Bot,
         update: teloxide::types::Update,
         chain: Arc<HandlerChain>| async move {
            let core = TelegramUpdateWrapper(&update).to_core();
            let mut ctx = match core.chat.as_ref().map(|c| ChatId(c.id)) {
                Some(chat_id) => UpdateContext::with_replier(
                    core,
                    Arc::new(TelegramReplier::new(bot, chat_id)),
                ),
                None => UpdateContext::new(core),
            };

            if let Err(e) = chain.handle(&mut ctx).await {
                error!(error = %e, "Handler chain failed");
            }
            respond(())
        },
    );

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![Arc::new(chain)])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Dispatcher stopped");
    Ok(())
}
