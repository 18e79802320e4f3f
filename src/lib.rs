#![warn(missing_docs)]
//! # Atomic Router
//!
//! A high-performance, framework-agnostic request-path router with
//! compile-ahead optimization.
//!
//! - Collect routes via [`Router::add`]
//! - Compile into an optimized matcher once (lazy on first dispatch)
//! - Dispatch quickly with precompiled static maps and pattern lists
//!
//! ## Matching model
//!
//! Paths are matched against the percent-decoded request path (decoded per
//! segment, so boundaries survive and multi-byte identifiers work):
//!
//! 1. Exact static paths always win, regardless of registration order.
//! 2. Dynamic templates (`/users/{id}`, `/posts/{id:\d+}`) are tried in
//!    registration order; the first full match wins — overlapping
//!    templates must be registered in priority order.
//! 3. A miss on a statically registered path with other methods present is
//!    method-not-allowed; everything else is not-found. Both can be
//!    replaced by fallback handlers.
//!
//! Recompilation is lazy: any registration or fallback change drops the
//! cached artifact and the next dispatch rebuilds it. Compiled artifacts
//! are immutable and safe to share across threads.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use atomic_router::prelude::*;
//! use serde_json::json;
//!
//! let mut router = Router::new();
//! router.add("GET", "/users/{id:\\d+}", |req: Request| async move {
//!     let id = req.params().unwrap().get("id").unwrap().to_string();
//!     Ok(Response::ok().with_body(json!({ "id": id })))
//! })?;
//!
//! let response = router.dispatch(Request::new("GET", "/users/7")).await?;
//! assert_eq!(response.status, 200);
//! ```
//!
//! ## Match-before-dispatch pipelines
//!
//! For pipelines that need to inspect route parameters before the final
//! handler runs, [`Router::compile_matcher`] returns a bare
//! [`RouterMatcher`], and the [`middleware`] module provides the two
//! pipeline stages built on it.
//!
//! ## Module structure
//!
//! - [`Router`] — registration front-end with lazy compile caching
//! - [`CompiledRouter`] — immutable compiled dispatcher
//! - [`RouterMatcher`] — match-without-dispatch for pipelines
//! - [`pattern`] — path template compilation
//! - [`middleware`] — match / dispatch pipeline stages
//! - [`RouterError`] — error taxonomy

mod dispatch;
mod error;
mod handler;
mod matcher;
pub mod middleware;
pub mod pattern;
mod route;
mod router;
mod table;
pub mod types;

#[cfg(test)]
mod tests;

pub use dispatch::CompiledRouter;
pub use error::{RouterError, RouterResult};
pub use handler::{BoxFuture, CallableHandler, Handler, IntoHandler, from_fn};
pub use matcher::RouterMatcher;
pub use middleware::{Middleware, Next, RouteDispatchMiddleware, RouterMatchMiddleware};
pub use pattern::CompiledPattern;
pub use router::{IntoMethods, Router};
pub use types::{Request, Response, RouteParams};

/// Prelude for convenient imports.
///
/// ```rust,ignore
/// use atomic_router::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        CallableHandler, CompiledPattern, CompiledRouter, Handler, IntoHandler, IntoMethods,
        Middleware, Next, Request, Response, RouteDispatchMiddleware, RouteParams, Router,
        RouterError, RouterMatchMiddleware, RouterMatcher, RouterResult, from_fn,
    };
}
