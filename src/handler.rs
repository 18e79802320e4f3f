//! Handler contract and adapters
//!
//! A handler is one required operation: take a [`Request`], produce a
//! [`Response`] or fail. Two shapes are accepted at registration time:
//!
//! - typed closures returning `RouterResult<Response>`, adapted once by
//!   [`from_fn`] (or implicitly through [`IntoHandler`]);
//! - loose callables returning a raw JSON value, wrapped by
//!   [`CallableHandler`], which validates the value against the response
//!   descriptor on every call.
//!
//! Adapting happens once when the route is registered, never per request.

use crate::error::{RouterError, RouterResult};
use crate::types::{Request, Response};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::warn;

/// Boxed future returned by handler and middleware invocations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Request handler capability.
///
/// Object-safe; handlers are stored and shared as `Arc<dyn Handler>`.
pub trait Handler: Send + Sync {
    /// Process the request and produce a response, or fail.
    fn handle(&self, request: Request) -> BoxFuture<'_, RouterResult<Response>>;
}

impl std::fmt::Debug for dyn Handler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn Handler")
    }
}

struct FnHandler<F> {
    f: F,
}

impl<F, Fut> Handler for FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = RouterResult<Response>> + Send + 'static,
{
    fn handle(&self, request: Request) -> BoxFuture<'_, RouterResult<Response>> {
        Box::pin((self.f)(request))
    }
}

/// Wrap a typed async closure into a shareable handler.
pub fn from_fn<F, Fut>(f: F) -> Arc<dyn Handler>
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = RouterResult<Response>> + Send + 'static,
{
    Arc::new(FnHandler { f })
}

/// Adapter for loosely-typed callables.
///
/// The callable returns a raw `serde_json::Value`; the adapter requires the
/// value to deserialize into a [`Response`] descriptor and fails the call
/// with [`RouterError::HandlerContract`] otherwise.
#[derive(Clone)]
pub struct CallableHandler {
    callable: Arc<
        dyn Fn(Request) -> BoxFuture<'static, RouterResult<serde_json::Value>> + Send + Sync,
    >,
}

impl CallableHandler {
    /// Wrap a callable returning a raw JSON value.
    pub fn from_fn<F, Fut>(f: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = RouterResult<serde_json::Value>> + Send + 'static,
    {
        Self {
            callable: Arc::new(move |request| Box::pin(f(request))),
        }
    }
}

impl Handler for CallableHandler {
    fn handle(&self, request: Request) -> BoxFuture<'_, RouterResult<Response>> {
        let fut = (self.callable)(request);
        Box::pin(async move {
            let value = fut.await?;
            serde_json::from_value::<Response>(value).map_err(|e| {
                warn!(error = %e, "callable handler returned an invalid response descriptor");
                RouterError::HandlerContract {
                    reason: e.to_string(),
                }
            })
        })
    }
}

/// Conversion into the shared handler representation, applied once at
/// registration.
pub trait IntoHandler {
    /// Convert into a shareable handler.
    fn into_handler(self) -> Arc<dyn Handler>;
}

impl IntoHandler for Arc<dyn Handler> {
    fn into_handler(self) -> Arc<dyn Handler> {
        self
    }
}

impl IntoHandler for CallableHandler {
    fn into_handler(self) -> Arc<dyn Handler> {
        Arc::new(self)
    }
}

impl<F, Fut> IntoHandler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = RouterResult<Response>> + Send + 'static,
{
    fn into_handler(self) -> Arc<dyn Handler> {
        from_fn(self)
    }
}
