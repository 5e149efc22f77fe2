//! Test doubles shared by the request-logger and reply-interceptor tests:
//! a recording sink, a scriptable replier, and context builders.

mod request_logger_test;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use handler_chain::HandlerChain;
use relay_core::{
    BotError, Chat, Handler, HandlerResponse, Replier, ReplyOptions, Result, SentMessage, Update,
    UpdateContext, UpdateKind, User,
};

use crate::record::{LogLevel, LogRecord};
use crate::request_logger::RequestLogger;
use crate::sink::LogSink;

/// Captures every emitted record for assertions.
pub(crate) struct RecordingSink {
    events: Mutex<Vec<(LogLevel, LogRecord, String)>>,
}

impl RecordingSink {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            events: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn events(&self) -> Vec<(LogLevel, LogRecord, String)> {
        self.events.lock().unwrap().clone()
    }

    pub(crate) fn messages(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|(_, _, message)| message.clone())
            .collect()
    }
}

impl LogSink for RecordingSink {
    fn emit(&self, level: LogLevel, record: &LogRecord, message: &str) {
        self.events
            .lock()
            .unwrap()
            .push((level, record.clone(), message.to_string()));
    }
}

/// Replier double: optional delay, optional failure, records every call.
pub(crate) struct FakeReplier {
    pub(crate) delay: Duration,
    pub(crate) fail: bool,
    pub(crate) calls: Mutex<Vec<(String, ReplyOptions)>>,
}

impl FakeReplier {
    pub(crate) fn instant() -> Arc<Self> {
        Arc::new(Self {
            delay: Duration::ZERO,
            fail: false,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn slow(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delay,
            fail: false,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn failing() -> Arc<Self> {
        Arc::new(Self {
            delay: Duration::ZERO,
            fail: true,
            calls: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl Replier for FakeReplier {
    async fn reply(&self, text: &str, opts: &ReplyOptions) -> Result<SentMessage> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), opts.clone()));
        if self.fail {
            Err(BotError::Transport("send failed".to_string()))
        } else {
            Ok(SentMessage { id: 77 })
        }
    }
}

/// Handler double: optional delay, optional reply, optional failure.
pub(crate) struct ScriptedHandler {
    pub(crate) delay: Duration,
    pub(crate) reply_text: Option<String>,
    pub(crate) fail_with: Option<String>,
}

impl ScriptedHandler {
    pub(crate) fn quiet() -> Self {
        Self {
            delay: Duration::ZERO,
            reply_text: None,
            fail_with: None,
        }
    }

    pub(crate) fn replying(text: &str) -> Self {
        Self {
            reply_text: Some(text.to_string()),
            ..Self::quiet()
        }
    }

    pub(crate) fn sleeping(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::quiet()
        }
    }

    pub(crate) fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::quiet()
        }
    }
}

#[async_trait]
impl Handler for ScriptedHandler {
    async fn handle(&self, ctx: &UpdateContext) -> Result<HandlerResponse> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if let Some(text) = &self.reply_text {
            ctx.reply(text).await?;
        }
        if let Some(message) = &self.fail_with {
            return Err(BotError::Other(message.clone()));
        }
        Ok(HandlerResponse::Continue)
    }
}

pub(crate) fn message_update(text: Option<&str>) -> Update {
    Update {
        id: Some(42),
        chat: Some(Chat {
            id: 100,
            chat_type: "private".to_string(),
        }),
        from: Some(User {
            id: 7,
            username: Some("alice".to_string()),
            first_name: Some("Alice".to_string()),
            last_name: None,
        }),
        kind: UpdateKind::Message {
            text: text.map(|t| t.to_string()),
        },
    }
}

pub(crate) fn callback_update(data: &str) -> Update {
    Update {
        kind: UpdateKind::CallbackQuery {
            data: Some(data.to_string()),
        },
        ..message_update(None)
    }
}

/// Update with nothing identifiable: no id, no chat, no sender.
pub(crate) fn anonymous_update() -> Update {
    Update {
        id: None,
        chat: None,
        from: None,
        kind: UpdateKind::Other,
    }
}

/// Runs one update through a chain of just the logger and the given handler.
pub(crate) async fn run_update(
    logger: RequestLogger,
    ctx: &mut UpdateContext,
    handler: ScriptedHandler,
) -> Result<HandlerResponse> {
    let chain = HandlerChain::new()
        .add_middleware(Arc::new(logger))
        .add_handler(Arc::new(handler));
    chain.handle(ctx).await
}
