//! Unit tests for [`RequestLogger`]: terminal record emission, severity
//! escalation, failure handling, trace-id fallback, and content logging policy.

use std::time::Duration;

use relay_core::{BotError, UpdateContext};

use super::{
    anonymous_update, callback_update, message_update, run_update, FakeReplier, RecordingSink,
    ScriptedHandler,
};
use crate::record::{LogLevel, Status};
use crate::request_logger::{LoggerConfig, RequestLogger};

/// **Test: a fast successful update emits exactly one terminal record at info.**
#[tokio::test]
async fn test_success_emits_single_info_record() {
    let sink = RecordingSink::new();
    let logger = RequestLogger::with_sink(LoggerConfig::default(), sink.clone());

    let mut ctx = UpdateContext::new(message_update(Some("hi")));
    run_update(logger, &mut ctx, ScriptedHandler::quiet())
        .await
        .unwrap();

    let events = sink.events();
    assert_eq!(events.len(), 1);
    let (level, record, message) = &events[0];
    assert_eq!(*level, LogLevel::Info);
    assert_eq!(message, "Update finished");
    assert_eq!(record.context.trace_id, "42");
    assert_eq!(record.context.chat_id, Some(100));
    assert_eq!(record.context.user_id, Some(7));
    assert_eq!(record.context.username.as_deref(), Some("alice"));
    assert_eq!(record.context.update_type, "message");
    assert_eq!(record.status, Some(Status::Success));
    assert!(record.duration_ms.unwrap() >= 0.0);
    assert!(record.reply.is_none());
    assert!(record.err.is_none());
}

/// **Test: a slow update's terminal record is escalated to warn.**
#[tokio::test]
async fn test_slow_update_escalates_to_warn() {
    let sink = RecordingSink::new();
    let config = LoggerConfig {
        slow_threshold_ms: 10.0,
        ..LoggerConfig::default()
    };
    let logger = RequestLogger::with_sink(config, sink.clone());

    let mut ctx = UpdateContext::new(message_update(Some("hi")));
    run_update(
        logger,
        &mut ctx,
        ScriptedHandler::sleeping(Duration::from_millis(50)),
    )
    .await
    .unwrap();

    let events = sink.events();
    assert_eq!(events.len(), 1);
    let (level, record, message) = &events[0];
    assert_eq!(*level, LogLevel::Warn);
    assert_eq!(message, "Update finished slowly");
    assert_eq!(record.status, Some(Status::Success));
    assert!(record.duration_ms.unwrap() > 10.0);
}

/// **Test: a handler failure produces an immediate error record with the error
/// detail, then a terminal error record; the error reaches the caller unchanged.**
#[tokio::test]
async fn test_failure_emits_error_then_terminal_and_reraises() {
    let sink = RecordingSink::new();
    let logger = RequestLogger::with_sink(LoggerConfig::default(), sink.clone());

    let mut ctx = UpdateContext::new(message_update(Some("hi")));
    let result = run_update(logger, &mut ctx, ScriptedHandler::failing("boom")).await;

    match result {
        Err(BotError::Other(msg)) => assert_eq!(msg, "boom"),
        other => panic!("expected Other(boom), got {:?}", other),
    }

    let events = sink.events();
    assert_eq!(events.len(), 2);

    let (level, record, message) = &events[0];
    assert_eq!(*level, LogLevel::Error);
    assert_eq!(message, "Handler error");
    let err = record.err.as_ref().unwrap();
    assert_eq!(err.message, "boom");
    assert_eq!(err.name, "Other");
    assert!(record.duration_ms.is_none());

    let (level, record, message) = &events[1];
    assert_eq!(*level, LogLevel::Error);
    assert_eq!(message, "Update finished with error");
    assert_eq!(record.status, Some(Status::Error));
    assert!(record.duration_ms.is_some());
    assert!(record.err.is_none());
}

/// **Test: an update with no identifier gets a synthetic manual trace id.**
#[tokio::test]
async fn test_missing_update_id_gets_manual_trace_id() {
    let sink = RecordingSink::new();
    let logger = RequestLogger::with_sink(LoggerConfig::default(), sink.clone());

    let mut ctx = UpdateContext::new(anonymous_update());
    run_update(logger, &mut ctx, ScriptedHandler::quiet())
        .await
        .unwrap();

    let events = sink.events();
    assert_eq!(events.len(), 1);
    let record = &events[0].1;
    let suffix = record.context.trace_id.strip_prefix("manual-").unwrap();
    assert!(!suffix.is_empty());
    assert!(suffix.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(record.context.chat_id, None);
    assert_eq!(record.context.user_id, None);
    assert_eq!(record.context.username, None);
    assert_eq!(record.context.update_type, "unknown");
}

/// **Test: message text is attached only when content logging is enabled.**
#[tokio::test]
async fn test_message_text_respects_content_flag() {
    for (enabled, expected) in [(true, Some("hi".to_string())), (false, None)] {
        let sink = RecordingSink::new();
        let config = LoggerConfig {
            log_message_content: enabled,
            ..LoggerConfig::default()
        };
        let logger = RequestLogger::with_sink(config, sink.clone());

        let mut ctx = UpdateContext::new(message_update(Some("hi")));
        run_update(logger, &mut ctx, ScriptedHandler::quiet())
            .await
            .unwrap();

        let record = &sink.events()[0].1;
        assert_eq!(record.message_text, expected);
        assert!(record.callback_data.is_none());
    }
}

/// **Test: callback data is attached regardless of the content flag.**
#[tokio::test]
async fn test_callback_data_attached_independently_of_content_flag() {
    for enabled in [true, false] {
        let sink = RecordingSink::new();
        let config = LoggerConfig {
            log_message_content: enabled,
            ..LoggerConfig::default()
        };
        let logger = RequestLogger::with_sink(config, sink.clone());

        let mut ctx = UpdateContext::new(callback_update("page:2"));
        run_update(logger, &mut ctx, ScriptedHandler::quiet())
            .await
            .unwrap();

        let record = &sink.events()[0].1;
        assert_eq!(record.context.update_type, "callback_query");
        assert_eq!(record.callback_data.as_deref(), Some("page:2"));
        assert!(record.message_text.is_none());
    }
}

/// **Test: records below the configured minimum level are not emitted.**
#[tokio::test]
async fn test_minimum_level_gates_emission() {
    let sink = RecordingSink::new();
    let config = LoggerConfig {
        level: LogLevel::Warn,
        ..LoggerConfig::default()
    };
    let logger = RequestLogger::with_sink(config, sink.clone());

    let mut ctx = UpdateContext::new(message_update(Some("hi")));
    run_update(logger, &mut ctx, ScriptedHandler::quiet())
        .await
        .unwrap();

    assert!(sink.events().is_empty());
}

/// **Test: reply metrics never leak between sequential updates through the
/// same middleware instance.**
#[tokio::test]
async fn test_reply_metrics_do_not_leak_across_updates() {
    use async_trait::async_trait;
    use handler_chain::HandlerChain;
    use relay_core::{Handler, HandlerResponse, Result};
    use std::sync::Arc;

    /// Replies only to the first update's text.
    struct ReplyOnFirst;

    #[async_trait]
    impl Handler for ReplyOnFirst {
        async fn handle(&self, ctx: &UpdateContext) -> Result<HandlerResponse> {
            if ctx.update.message_text() == Some("first") {
                ctx.reply("pong").await?;
            }
            Ok(HandlerResponse::Continue)
        }
    }

    let sink = RecordingSink::new();
    let logger = RequestLogger::with_sink(LoggerConfig::default(), sink.clone());
    let chain = HandlerChain::new()
        .add_middleware(Arc::new(logger))
        .add_handler(Arc::new(ReplyOnFirst));

    let mut first =
        UpdateContext::with_replier(message_update(Some("first")), FakeReplier::instant());
    chain.handle(&mut first).await.unwrap();

    let mut second =
        UpdateContext::with_replier(message_update(Some("second")), FakeReplier::instant());
    chain.handle(&mut second).await.unwrap();

    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert!(events[0].1.reply.is_some());
    assert!(events[1].1.reply.is_none());
}
