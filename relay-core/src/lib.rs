//! # relay-core
//!
//! Core types and traits for the relay bot: the [`Update`] envelope, the per-update
//! [`UpdateContext`], the [`Replier`] capability, [`Handler`], the error taxonomy,
//! and tracing initialization. Transport-agnostic; used by relay-telegram and handler-chain.

pub mod error;
pub mod logger;
pub mod replier;
pub mod types;

pub use error::{BotError, HandlerError, Result};
pub use logger::init_tracing;
pub use replier::{Replier, ReplyOptions, SentMessage};
pub use types::{Chat, Handler, HandlerResponse, Update, UpdateContext, UpdateKind, User};
