//! # relay-telegram
//!
//! Telegram transport layer for the relay bot: env config, conversion from
//! teloxide updates to the core envelope, the Telegram [`TelegramReplier`],
//! and the dispatcher runner with signal-based shutdown. Only Telegram
//! connectivity and chain execution live here; no business logic.

mod adapters;
mod config;
mod replier;
mod runner;

pub use adapters::{TelegramUpdateWrapper, TelegramUserWrapper, ToCoreUpdate, ToCoreUser};
pub use config::TelegramConfig;
pub use replier::TelegramReplier;
pub use runner::{build_bot, run_dispatcher};
