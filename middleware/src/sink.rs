//! Log sink seam. The request logger writes every record through a
//! [`LogSink`]; production forwards to the global tracing subscriber, tests
//! substitute a recording sink.

use std::sync::Arc;

use crate::record::{LogLevel, LogRecord};

/// Receives every record the request logger emits, after level gating.
pub trait LogSink: Send + Sync {
    fn emit(&self, level: LogLevel, record: &LogRecord, message: &str);
}

macro_rules! forward {
    ($event:ident, $record:expr, $message:expr) => {
        tracing::$event!(
            trace_id = %$record.context.trace_id,
            chat_id = $record.context.chat_id,
            user_id = $record.context.user_id,
            username = $record.context.username.as_deref(),
            update_type = %$record.context.update_type,
            duration_ms = $record.duration_ms,
            status = $record.status.map(|s| s.as_str()),
            reply = $record.reply.as_ref().map(tracing::field::debug),
            message_text = $record.message_text.as_deref(),
            callback_data = $record.callback_data.as_deref(),
            err = $record.err.as_ref().map(tracing::field::debug),
            "{}",
            $message
        )
    };
}

/// Forwards records to `tracing` at the mapped severity, with the record's
/// fields attached flat to the event. Absent fields are not recorded.
pub struct TracingSink;

impl LogSink for TracingSink {
    fn emit(&self, level: LogLevel, record: &LogRecord, message: &str) {
        match level {
            LogLevel::Debug => forward!(debug, record, message),
            LogLevel::Info => forward!(info, record, message),
            LogLevel::Warn => forward!(warn, record, message),
            LogLevel::Error => forward!(error, record, message),
        }
    }
}

/// Sink plus the configured minimum severity; shared between the wrapper and
/// the reply interceptor so both gate emission the same way.
#[derive(Clone)]
pub(crate) struct Emitter {
    sink: Arc<dyn LogSink>,
    min_level: LogLevel,
}

impl Emitter {
    pub(crate) fn new(sink: Arc<dyn LogSink>, min_level: LogLevel) -> Self {
        Self { sink, min_level }
    }

    pub(crate) fn emit(&self, level: LogLevel, record: &LogRecord, message: &str) {
        if level >= self.min_level {
            self.sink.emit(level, record, message);
        }
    }
}
