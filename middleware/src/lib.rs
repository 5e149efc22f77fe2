//! # middleware
//!
//! Request logging middleware for the relay bot. [`RequestLogger`] wraps each
//! update with a trace id and timing, decorates the context's reply capability
//! so reply latency and outcome are captured, and emits structured records
//! through a pluggable [`LogSink`]. Exactly one terminal record per update;
//! failures are logged and re-raised, never swallowed.

mod record;
mod reply_interceptor;
mod request_logger;
mod sink;

#[cfg(test)]
mod test;

pub use record::{ErrorInfo, LogContext, LogLevel, LogRecord, ReplyMetrics, Status};
pub use request_logger::{is_production, LoggerConfig, RequestLogger, ENV_FLAG};
pub use sink::{LogSink, TracingSink};
