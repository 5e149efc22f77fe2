//! teloxide-backed reply capability, bound to one chat. Production code sends
//! messages via Telegram; tests substitute another Replier impl.

use async_trait::async_trait;
use relay_core::{BotError, Replier, ReplyOptions, Result, SentMessage};
use teloxide::prelude::*;
use teloxide::types::{ChatId, MessageId, ReplyParameters};

/// Sends replies into a fixed chat through a teloxide Bot.
pub struct TelegramReplier {
    bot: teloxide::Bot,
    chat_id: ChatId,
}

impl TelegramReplier {
    pub fn new(bot: teloxide::Bot, chat_id: ChatId) -> Self {
        Self { bot, chat_id }
    }
}

#[async_trait]
impl Replier for TelegramReplier {
    async fn reply(&self, text: &str, opts: &ReplyOptions) -> Result<SentMessage> {
        let mut request = self.bot.send_message(self.chat_id, text.to_string());
        if let Some(message_id) = opts.reply_to_message_id {
            request = request.reply_parameters(ReplyParameters::new(MessageId(message_id as i32)));
        }
        if opts.disable_notification {
            request = request.disable_notification(true);
        }
        let sent = request
            .await
            .map_err(|e| BotError::Transport(e.to_string()))?;
        Ok(SentMessage {
            id: i64::from(sent.id.0),
        })
    }
}
