//! No-op handler: always continues. Used as the terminal handler while the
//! bot has no real business logic.

use async_trait::async_trait;
use relay_core::{Handler, HandlerResponse, Result, UpdateContext};

/// Handler that does nothing; always continues.
#[derive(Clone)]
pub struct NoopHandler;

impl NoopHandler {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoopHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Handler for NoopHandler {
    async fn handle(&self, _ctx: &UpdateContext) -> Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }
}
