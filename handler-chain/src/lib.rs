//! # Handler chain
//!
//! Runs the registered middleware and handlers for each update. Middleware are
//! continuation-passing: each receives the context and a [`Next`] holding the
//! rest of the chain, and wraps work around `next.run(ctx)`. Handlers run after
//! all middleware; the first handler that returns Stop or Reply ends handler
//! execution.

use std::sync::Arc;

use async_trait::async_trait;
use relay_core::{Handler, HandlerResponse, Result, UpdateContext};
use tracing::debug;

/// Wraps the processing of one update. `next.run(ctx)` invokes the remaining
/// middleware and then the handlers; whatever it returns (or fails with) must
/// be passed back out unchanged unless the middleware deliberately intervenes.
#[async_trait]
pub trait Middleware: Send + Sync {
    async fn handle(&self, ctx: &mut UpdateContext, next: Next<'_>) -> Result<HandlerResponse>;
}

/// The remainder of the chain: middleware not yet run, then the handlers.
pub struct Next<'a> {
    middleware: &'a [Arc<dyn Middleware>],
    handlers: &'a [Arc<dyn Handler>],
}

impl Next<'_> {
    /// Runs the rest of the chain to completion.
    pub async fn run(mut self, ctx: &mut UpdateContext) -> Result<HandlerResponse> {
        if let Some((mw, rest)) = self.middleware.split_first() {
            self.middleware = rest;
            return mw.handle(ctx, self).await;
        }

        for handler in self.handlers {
            let handler_name = std::any::type_name_of_val(handler.as_ref());
            let response = handler.handle(ctx).await?;
            debug!(
                handler = %handler_name,
                response = ?response,
                "Handler processed"
            );
            match response {
                HandlerResponse::Continue => continue,
                HandlerResponse::Stop | HandlerResponse::Reply(_) => return Ok(response),
            }
        }

        Ok(HandlerResponse::Continue)
    }
}

/// Ordered middleware and handlers for one bot process. Cheap to clone; shared
/// across concurrently processed updates.
#[derive(Clone, Default)]
pub struct HandlerChain {
    middleware: Vec<Arc<dyn Middleware>>,
    handlers: Vec<Arc<dyn Handler>>,
}

impl HandlerChain {
    /// Creates an empty chain (no middleware, no handlers).
    pub fn new() -> Self {
        Self {
            middleware: Vec::new(),
            handlers: Vec::new(),
        }
    }

    /// Appends a middleware. Middleware run in registration order, each
    /// wrapping everything registered after it.
    pub fn add_middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
        self.middleware.push(middleware);
        self
    }

    /// Appends a handler (runs after all middleware; first Stop/Reply ends the
    /// handler phase).
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Processes one update through the full chain.
    pub async fn handle(&self, ctx: &mut UpdateContext) -> Result<HandlerResponse> {
        Next {
            middleware: &self.middleware,
            handlers: &self.handlers,
        }
        .run(ctx)
        .await
    }
}
