//! Reply capability: the outbound half of an update context.
//!
//! [`Replier`] is the seam the logging middleware decorates; implementations
//! map to a transport (relay-telegram) or wrap another replier.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Extra parameters for an outgoing reply.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplyOptions {
    pub reply_to_message_id: Option<i64>,
    pub disable_notification: bool,
}

/// Identifier of a sent message, as reported by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentMessage {
    pub id: i64,
}

/// Capability to send a reply for the current update.
///
/// Decorators must pass arguments through untouched and surface the inner
/// outcome unchanged, both on success and on failure.
#[async_trait]
pub trait Replier: Send + Sync {
    async fn reply(&self, text: &str, opts: &ReplyOptions) -> Result<SentMessage>;
}
