//! Match-before-dispatch pipeline pieces
//!
//! The router itself never runs a middleware pipeline; it only provides the
//! stages an external pipeline composes. [`RouterMatchMiddleware`] resolves
//! the request and attaches the extracted parameters and matched handler,
//! so intermediate stages can inspect them; [`RouteDispatchMiddleware`]
//! ends the pipeline by invoking the previously matched handler.

use crate::error::{RouterError, RouterResult};
use crate::handler::BoxFuture;
use crate::router::Router;
use crate::types::{Request, Response};
use std::future::Future;
use std::sync::Arc;

/// Next stage in a middleware pipeline.
pub type Next = Arc<dyn Fn(Request) -> BoxFuture<'static, RouterResult<Response>> + Send + Sync>;

/// A pipeline stage: process the request, optionally delegating to `next`.
pub trait Middleware: Send + Sync {
    /// Process the request, optionally calling `next`.
    fn process(&self, request: Request, next: Next) -> BoxFuture<'_, RouterResult<Response>>;
}

/// Closures with the stage signature are middleware as-is.
impl<F, Fut> Middleware for F
where
    F: Fn(Request, Next) -> Fut + Send + Sync,
    Fut: Future<Output = RouterResult<Response>> + Send + 'static,
{
    fn process(&self, request: Request, next: Next) -> BoxFuture<'_, RouterResult<Response>> {
        Box::pin(self(request, next))
    }
}

/// Wrap an async function into a shareable middleware stage.
pub fn from_fn<F, Fut>(f: F) -> Arc<dyn Middleware>
where
    F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = RouterResult<Response>> + Send + 'static,
{
    Arc::new(f)
}

/// Matches the request and forwards it enriched with route parameters and
/// the matched handler; does not dispatch.
///
/// Misses propagate as [`RouterError::NotFound`] /
/// [`RouterError::MethodNotAllowed`] — fallback handlers are applied by the
/// compiled dispatcher, not by match stages.
pub struct RouterMatchMiddleware {
    router: Arc<Router>,
}

impl RouterMatchMiddleware {
    /// Create a match stage over a shared router.
    pub fn new(router: Arc<Router>) -> Self {
        Self { router }
    }
}

impl Middleware for RouterMatchMiddleware {
    fn process(&self, request: Request, next: Next) -> BoxFuture<'_, RouterResult<Response>> {
        Box::pin(async move {
            let matcher = self.router.compile_matcher()?;
            let (handler, request) = matcher.match_request(request)?;
            next(request.with_matched_handler(handler)).await
        })
    }
}

/// Dispatches the handler attached by a preceding match stage; the
/// pipeline ends here and `next` is never called.
pub struct RouteDispatchMiddleware;

impl Middleware for RouteDispatchMiddleware {
    fn process(&self, request: Request, _next: Next) -> BoxFuture<'_, RouterResult<Response>> {
        Box::pin(async move {
            let handler = request
                .matched_handler()
                .map(Arc::clone)
                .ok_or(RouterError::MissingMatchedHandler)?;
            handler.handle(request).await
        })
    }
}
