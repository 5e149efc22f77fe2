//! Core types: update envelope, per-update context, handler trait.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{BotError, Result};
use crate::replier::{Replier, ReplyOptions, SentMessage};

/// User identity attached to an update, when the platform provides one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Chat the update originated from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub chat_type: String,
}

/// Payload classification of an update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum UpdateKind {
    Message { text: Option<String> },
    EditedMessage { text: Option<String> },
    CallbackQuery { data: Option<String> },
    Other,
}

/// One inbound event delivered by the messaging platform. Every envelope field
/// is optional; consumers degrade to "absent" instead of failing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Update {
    pub id: Option<i64>,
    pub chat: Option<Chat>,
    pub from: Option<User>,
    pub kind: UpdateKind,
}

impl Update {
    /// Classification string used in log records.
    pub fn update_type(&self) -> &'static str {
        match self.kind {
            UpdateKind::Message { .. } => "message",
            UpdateKind::EditedMessage { .. } => "edited_message",
            UpdateKind::CallbackQuery { .. } => "callback_query",
            UpdateKind::Other => "unknown",
        }
    }

    /// Text of a new message. Edited messages and other kinds return None.
    pub fn message_text(&self) -> Option<&str> {
        match &self.kind {
            UpdateKind::Message { text } => text.as_deref(),
            _ => None,
        }
    }

    /// Callback payload of a callback query.
    pub fn callback_data(&self) -> Option<&str> {
        match &self.kind {
            UpdateKind::CallbackQuery { data } => data.as_deref(),
            _ => None,
        }
    }
}

/// Per-update value bundling the update with the capability to send a reply.
///
/// Middleware may swap the replier for a decorated one via [`set_replier`];
/// the swap is scoped to this context and never outlives the update.
///
/// [`set_replier`]: UpdateContext::set_replier
pub struct UpdateContext {
    pub update: Update,
    replier: Option<Arc<dyn Replier>>,
}

impl UpdateContext {
    /// Context without a reply capability (e.g. channel posts the bot cannot answer).
    pub fn new(update: Update) -> Self {
        Self {
            update,
            replier: None,
        }
    }

    /// Context with a reply capability bound to the update's chat.
    pub fn with_replier(update: Update, replier: Arc<dyn Replier>) -> Self {
        Self {
            update,
            replier: Some(replier),
        }
    }

    /// Current reply capability, if any.
    pub fn replier(&self) -> Option<Arc<dyn Replier>> {
        self.replier.clone()
    }

    /// Replaces the reply capability for the remainder of this update.
    pub fn set_replier(&mut self, replier: Arc<dyn Replier>) {
        self.replier = Some(replier);
    }

    /// Sends a reply through the current replier.
    pub async fn reply(&self, text: &str) -> Result<SentMessage> {
        self.reply_with(text, &ReplyOptions::default()).await
    }

    /// Sends a reply with extra parameters through the current replier.
    pub async fn reply_with(&self, text: &str, opts: &ReplyOptions) -> Result<SentMessage> {
        match &self.replier {
            Some(replier) => replier.reply(text, opts).await,
            None => Err(BotError::Transport(
                "update context has no reply capability".to_string(),
            )),
        }
    }
}

/// Handler result for the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to the next handler.
    Continue,
    /// Stop the chain; no response body.
    Stop,
    /// Stop the chain and record the reply text that was sent.
    Reply(String),
}

/// Processes one update. Handlers run in registration order; the first
/// Stop or Reply ends the handler phase.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, _ctx: &UpdateContext) -> Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }
}
