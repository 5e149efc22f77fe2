//! Decorates the context's reply capability so each reply call is measured.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use relay_core::{Replier, ReplyOptions, Result, SentMessage};
use tokio::sync::Mutex;

use crate::record::{round2, LogContext, LogLevel, LogRecord, ReplyMetrics};
use crate::sink::Emitter;

/// Latest reply metrics for the current update, shared with the wrapper that
/// folds them into the terminal record. Fresh per update; never crosses updates.
pub(crate) type ReplyMetricsCell = Arc<Mutex<Option<ReplyMetrics>>>;

/// Replier decorator: delegates with the arguments untouched, records duration
/// and outcome of each call, and retains only the most recent call's metrics.
pub(crate) struct MeasuredReplier {
    inner: Arc<dyn Replier>,
    context: LogContext,
    metrics: ReplyMetricsCell,
    emitter: Emitter,
    slow_threshold_ms: f64,
}

impl MeasuredReplier {
    pub(crate) fn new(
        inner: Arc<dyn Replier>,
        context: LogContext,
        metrics: ReplyMetricsCell,
        emitter: Emitter,
        slow_threshold_ms: f64,
    ) -> Self {
        Self {
            inner,
            context,
            metrics,
            emitter,
            slow_threshold_ms,
        }
    }
}

#[async_trait]
impl Replier for MeasuredReplier {
    async fn reply(&self, text: &str, opts: &ReplyOptions) -> Result<SentMessage> {
        let start = Instant::now();
        let result = self.inner.reply(text, opts).await;
        let duration_ms = round2(start.elapsed().as_secs_f64() * 1000.0);

        match result {
            Ok(sent) => {
                let metrics = ReplyMetrics {
                    duration_ms,
                    success: true,
                    text_length: Some(text.len()),
                    error: None,
                };
                *self.metrics.lock().await = Some(metrics.clone());

                if duration_ms > self.slow_threshold_ms {
                    let mut record = LogRecord::with_context(self.context.clone());
                    record.reply = Some(metrics);
                    self.emitter
                        .emit(LogLevel::Warn, &record, "Slow reply detected");
                }

                Ok(sent)
            }
            Err(err) => {
                let metrics = ReplyMetrics {
                    duration_ms,
                    success: false,
                    text_length: None,
                    error: Some(err.to_string()),
                };
                *self.metrics.lock().await = Some(metrics.clone());

                let mut record = LogRecord::with_context(self.context.clone());
                record.reply = Some(metrics);
                self.emitter.emit(LogLevel::Error, &record, "Reply failed");

                Err(err)
            }
        }
    }
}
