//! Structured record model for the request logger.

use relay_core::BotError;
use serde::Serialize;

/// Severity of an emitted record. Ordered so a minimum level can gate emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Outcome of one update's processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Success => "success",
            Status::Error => "error",
        }
    }
}

/// Per-update identity, assembled once at entry and cloned into every record
/// emitted while processing that update.
#[derive(Debug, Clone, Serialize)]
pub struct LogContext {
    pub trace_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub update_type: String,
}

/// Timing and outcome of the most recent reply call within an update.
/// `text_length` is set on success, `error` on failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplyMetrics {
    pub duration_ms: f64,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Failure detail attached to "Handler error" records. Rust errors carry no
/// stack string; `chain` records the error's source chain instead.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub message: String,
    pub name: String,
    pub chain: Vec<String>,
}

impl ErrorInfo {
    pub fn from_error(err: &BotError) -> Self {
        let mut chain = Vec::new();
        let mut source = std::error::Error::source(err);
        while let Some(cause) = source {
            chain.push(cause.to_string());
            source = cause.source();
        }
        Self {
            message: err.to_string(),
            name: err.name().to_string(),
            chain,
        }
    }
}

/// The structured payload handed to the log sink. Context fields are flattened
/// so the serialized form is one flat mapping; absent fields are skipped.
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    #[serde(flatten)]
    pub context: LogContext,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<ReplyMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub err: Option<ErrorInfo>,
}

impl LogRecord {
    /// Record carrying only the per-update identity.
    pub fn with_context(context: LogContext) -> Self {
        Self {
            context,
            duration_ms: None,
            status: None,
            reply: None,
            message_text: None,
            callback_data: None,
            err: None,
        }
    }
}

/// Rounds a millisecond duration to two decimals.
pub(crate) fn round2(ms: f64) -> f64 {
    (ms * 100.0).round() / 100.0
}
