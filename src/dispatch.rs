//! Compiled dispatcher
//!
//! The immutable artifact produced by `Router::compile`. Resolves each
//! request with the shared lookup algorithm, then invokes the winning
//! handler — or the configured not-found / method-not-allowed fallback,
//! which fully replaces the corresponding error path when present.

use crate::error::{RouterError, RouterResult};
use crate::handler::{BoxFuture, Handler};
use crate::matcher::{MatchOutcome, lookup};
use crate::table::RouteTables;
use crate::types::{Request, Response};
use std::sync::Arc;

/// Optimized, read-only router compiled from the route definitions.
///
/// Safe to share and call concurrently; never mutated after construction.
/// Superseded, not modified, when the route table changes — in-flight
/// dispatches keep the snapshot they started with.
#[derive(Debug)]
pub struct CompiledRouter {
    tables: Arc<RouteTables>,
    not_found: Option<Arc<dyn Handler>>,
    method_not_allowed: Option<Arc<dyn Handler>>,
}

impl CompiledRouter {
    pub(crate) fn new(
        tables: Arc<RouteTables>,
        not_found: Option<Arc<dyn Handler>>,
        method_not_allowed: Option<Arc<dyn Handler>>,
    ) -> Self {
        Self {
            tables,
            not_found,
            method_not_allowed,
        }
    }
}

impl Handler for CompiledRouter {
    fn handle(&self, request: Request) -> BoxFuture<'_, RouterResult<Response>> {
        Box::pin(async move {
            match lookup(&self.tables, request.method(), request.path()) {
                MatchOutcome::Found { handler, params } => {
                    let request = match params {
                        Some(params) => request.with_params(params),
                        None => request,
                    };
                    handler.handle(request).await
                }
                MatchOutcome::MethodNotAllowed { path, allowed } => {
                    match &self.method_not_allowed {
                        Some(fallback) => fallback.handle(request).await,
                        None => Err(RouterError::MethodNotAllowed { path, allowed }),
                    }
                }
                MatchOutcome::NotFound { method, path } => match &self.not_found {
                    Some(fallback) => fallback.handle(request).await,
                    None => Err(RouterError::NotFound { method, path }),
                },
            }
        })
    }
}
