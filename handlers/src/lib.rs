//! # Handlers for the relay bot
//!
//! Minimal handler set: a /ping responder and a no-op terminal handler, plus
//! [`setup_handlers`] to register them on a chain.

mod noop;
mod ping;


use std::sync::Arc;

use handler_chain::HandlerChain;

pub use noop::NoopHandler;
pub use ping::PingHandler;

/// Registers the default handler set on the chain.
pub fn setup_handlers(chain: HandlerChain) -> HandlerChain {
    chain
        .add_handler(Arc::new(PingHandler))
        .add_handler(Arc::new(NoopHandler::new()))
}
