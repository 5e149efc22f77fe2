//! Timing and tracing wrapper around the rest of the handler chain.
//!
//! For every update: establishes a trace id, decorates the reply capability so
//! reply latency is captured, runs the continuation, and emits exactly one
//! terminal record whether the continuation succeeds or fails. A failure is
//! additionally logged immediately with its error detail, then re-raised.

use std::env;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use handler_chain::{Middleware, Next};
use relay_core::{HandlerResponse, Result, UpdateContext};
use tokio::sync::Mutex;

use crate::record::{round2, ErrorInfo, LogContext, LogLevel, LogRecord, Status};
use crate::reply_interceptor::{MeasuredReplier, ReplyMetricsCell};
use crate::sink::{Emitter, LogSink, TracingSink};

/// Environment variable selecting production behavior: `BOT_ENV=production`
/// lowers default verbosity, disables content logging, and switches the
/// console format to JSON.
pub const ENV_FLAG: &str = "BOT_ENV";

/// Returns true when [`ENV_FLAG`] selects production behavior.
pub fn is_production() -> bool {
    env::var(ENV_FLAG).map(|v| v == "production").unwrap_or(false)
}

/// Options for [`RequestLogger`].
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Minimum severity emitted to the sink.
    pub level: LogLevel,
    /// Whether raw message text may be attached to terminal records.
    pub log_message_content: bool,
    /// Durations above this many milliseconds escalate records to warnings.
    pub slow_threshold_ms: f64,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Debug,
            log_message_content: true,
            slow_threshold_ms: 1000.0,
        }
    }
}

impl LoggerConfig {
    /// Defaults driven by the production flag: production lowers the minimum
    /// level to `info` and disables message content logging.
    pub fn from_env() -> Self {
        if is_production() {
            Self {
                level: LogLevel::Info,
                log_message_content: false,
                slow_threshold_ms: 1000.0,
            }
        } else {
            Self::default()
        }
    }
}

/// Logging middleware: one terminal record per update, plus immediate records
/// for handler failures, slow replies, and failed replies.
pub struct RequestLogger {
    config: LoggerConfig,
    emitter: Emitter,
}

impl RequestLogger {
    /// Logger emitting through the global tracing subscriber.
    pub fn new(config: LoggerConfig) -> Self {
        Self::with_sink(config, Arc::new(TracingSink))
    }

    /// Logger emitting through the given sink. Tests substitute a recorder.
    pub fn with_sink(config: LoggerConfig, sink: Arc<dyn LogSink>) -> Self {
        let emitter = Emitter::new(sink, config.level);
        Self { config, emitter }
    }
}

#[async_trait]
impl Middleware for RequestLogger {
    async fn handle(&self, ctx: &mut UpdateContext, next: Next<'_>) -> Result<HandlerResponse> {
        let trace_id = match ctx.update.id {
            Some(id) => id.to_string(),
            None => format!("manual-{}", Utc::now().timestamp_millis()),
        };
        let context = LogContext {
            trace_id,
            chat_id: ctx.update.chat.as_ref().map(|c| c.id),
            user_id: ctx.update.from.as_ref().map(|u| u.id),
            username: ctx.update.from.as_ref().and_then(|u| u.username.clone()),
            update_type: ctx.update.update_type().to_string(),
        };
        let start = Instant::now();

        // Fresh metrics cell per update; the interceptor writes, the terminal
        // record below reads.
        let reply_metrics: ReplyMetricsCell = Arc::new(Mutex::new(None));
        if let Some(original) = ctx.replier() {
            ctx.set_replier(Arc::new(MeasuredReplier::new(
                original,
                context.clone(),
                Arc::clone(&reply_metrics),
                self.emitter.clone(),
                self.config.slow_threshold_ms,
            )));
        }

        let result = next.run(ctx).await;

        if let Err(err) = &result {
            let mut record = LogRecord::with_context(context.clone());
            record.err = Some(ErrorInfo::from_error(err));
            self.emitter.emit(LogLevel::Error, &record, "Handler error");
        }

        let duration_ms = round2(start.elapsed().as_secs_f64() * 1000.0);
        let is_slow = duration_ms > self.config.slow_threshold_ms;

        let mut record = LogRecord::with_context(context);
        record.duration_ms = Some(duration_ms);
        record.status = Some(if result.is_err() {
            Status::Error
        } else {
            Status::Success
        });
        record.reply = reply_metrics.lock().await.clone();

        // Message text first, callback data only when no text was attached.
        if self.config.log_message_content && ctx.update.message_text().is_some() {
            record.message_text = ctx.update.message_text().map(str::to_string);
        } else if let Some(data) = ctx.update.callback_data() {
            record.callback_data = Some(data.to_string());
        }

        if result.is_err() {
            self.emitter
                .emit(LogLevel::Error, &record, "Update finished with error");
        } else if is_slow {
            self.emitter
                .emit(LogLevel::Warn, &record, "Update finished slowly");
        } else {
            self.emitter.emit(LogLevel::Info, &record, "Update finished");
        }

        result
    }
}
