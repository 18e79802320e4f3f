//! Router front-end
//!
//! Collects routes during a setup phase, then lazily compiles them into an
//! immutable dispatcher (or bare matcher) on first use. The compiled
//! artifacts live behind atomically-swapped snapshot references: readers
//! are wait-free, a dispatch in flight always completes against one
//! fully-formed snapshot, and any table mutation drops the cache so the
//! next access rebuilds.

use crate::dispatch::CompiledRouter;
use crate::error::{RouterError, RouterResult};
use crate::handler::{Handler, IntoHandler};
use crate::matcher::RouterMatcher;
use crate::route::Route;
use crate::table::build_tables;
use crate::types::{Request, Response};
use arc_swap::ArcSwapOption;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Conversion into a normalized method set, applied at registration.
///
/// Accepts a single token (`"GET"`), a `|`-delimited string
/// (`"PUT|PATCH"`), or an explicit list. Tokens are trimmed, uppercased,
/// and deduplicated; empty tokens are dropped.
pub trait IntoMethods {
    /// Produce the normalized method list.
    fn into_methods(self) -> Vec<String>;
}

fn normalize<I>(tokens: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut methods: Vec<String> = Vec::new();
    for token in tokens {
        let token = token.as_ref().trim().to_ascii_uppercase();
        if token.is_empty() || methods.contains(&token) {
            continue;
        }
        methods.push(token);
    }
    methods
}

impl IntoMethods for &str {
    fn into_methods(self) -> Vec<String> {
        normalize(self.split('|'))
    }
}

impl IntoMethods for String {
    fn into_methods(self) -> Vec<String> {
        self.as_str().into_methods()
    }
}

impl IntoMethods for &[&str] {
    fn into_methods(self) -> Vec<String> {
        normalize(self.iter().copied())
    }
}

impl<const N: usize> IntoMethods for [&str; N] {
    fn into_methods(self) -> Vec<String> {
        normalize(self)
    }
}

impl IntoMethods for Vec<&str> {
    fn into_methods(self) -> Vec<String> {
        normalize(self)
    }
}

impl IntoMethods for Vec<String> {
    fn into_methods(self) -> Vec<String> {
        normalize(self)
    }
}

/// High-performance router with compile-ahead optimization.
///
/// Collect routes via [`add`](Router::add), compile once (lazily on first
/// dispatch), and serve every subsequent request from precompiled static
/// maps and pattern lists.
///
/// ```rust,ignore
/// let mut router = Router::new();
/// router.add("GET", "/users/{id:\\d+}", get_user)?;
/// router.add("PUT|PATCH", "/users/{id:\\d+}", update_user)?;
///
/// let response = router.dispatch(Request::new("GET", "/users/7")).await?;
/// ```
pub struct Router {
    routes: Vec<Route>,
    not_found: Option<Arc<dyn Handler>>,
    method_not_allowed: Option<Arc<dyn Handler>>,
    compiled: ArcSwapOption<CompiledRouter>,
    matcher: ArcSwapOption<RouterMatcher>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// Create an empty router.
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            not_found: None,
            method_not_allowed: None,
            compiled: ArcSwapOption::new(None),
            matcher: ArcSwapOption::new(None),
        }
    }

    /// Register a route.
    ///
    /// `methods` is one or more HTTP methods (`"GET"`, `"PUT|PATCH"`, or an
    /// explicit list); matching is case-insensitive on both sides. `path`
    /// is a static path or a template with `{name}` / `{name:regex}`
    /// placeholders. Fails with [`RouterError::InvalidMethodSet`] when no
    /// usable method token remains after normalization; the route table is
    /// left untouched in that case. Template errors are deferred to compile
    /// time.
    pub fn add<M, P, H>(&mut self, methods: M, path: P, handler: H) -> RouterResult<()>
    where
        M: IntoMethods,
        P: Into<String>,
        H: IntoHandler,
    {
        let methods = methods.into_methods();
        if methods.is_empty() {
            return Err(RouterError::InvalidMethodSet);
        }
        self.routes.push(Route {
            methods,
            path: path.into(),
            handler: handler.into_handler(),
        });
        self.invalidate();
        Ok(())
    }

    /// Set or clear the fallback invoked instead of failing with
    /// [`RouterError::NotFound`].
    pub fn set_not_found_handler(&mut self, handler: Option<Arc<dyn Handler>>) {
        self.not_found = handler;
        self.invalidate();
    }

    /// Set or clear the fallback invoked instead of failing with
    /// [`RouterError::MethodNotAllowed`].
    pub fn set_method_not_allowed_handler(&mut self, handler: Option<Arc<dyn Handler>>) {
        self.method_not_allowed = handler;
        self.invalidate();
    }

    fn invalidate(&self) {
        self.compiled.store(None);
        self.matcher.store(None);
    }

    /// Compile the route table into an optimized dispatcher.
    ///
    /// Idempotent and identity-stable: repeated calls without an
    /// intervening mutation return the same `Arc`, which callers may rely
    /// on for reference-equality caching of their own.
    pub fn compile(&self) -> RouterResult<Arc<CompiledRouter>> {
        let current = self.compiled.load();
        if let Some(compiled) = current.as_ref() {
            return Ok(Arc::clone(compiled));
        }

        let tables = Arc::new(build_tables(&self.routes)?);
        debug!(
            routes = self.routes.len(),
            static_paths = tables.static_path_count(),
            dynamic_routes = tables.dynamic_route_count(),
            "compiled router"
        );
        let built = Arc::new(CompiledRouter::new(
            tables,
            self.not_found.clone(),
            self.method_not_allowed.clone(),
        ));

        // Concurrent compiles race benignly; the first stored snapshot
        // wins so every caller observes the same artifact.
        let previous = self
            .compiled
            .compare_and_swap(&current, Some(Arc::clone(&built)));
        match previous.as_ref() {
            Some(existing) => Ok(Arc::clone(existing)),
            None => Ok(built),
        }
    }

    /// Compile and return a lightweight matcher for route-aware middleware
    /// pipelines. Same caching discipline as [`compile`](Router::compile),
    /// on a separate snapshot.
    pub fn compile_matcher(&self) -> RouterResult<Arc<RouterMatcher>> {
        let current = self.matcher.load();
        if let Some(matcher) = current.as_ref() {
            return Ok(Arc::clone(matcher));
        }

        let tables = Arc::new(build_tables(&self.routes)?);
        debug!(
            routes = self.routes.len(),
            static_paths = tables.static_path_count(),
            dynamic_routes = tables.dynamic_route_count(),
            "compiled matcher"
        );
        let built = Arc::new(RouterMatcher::new(tables));

        let previous = self
            .matcher
            .compare_and_swap(&current, Some(Arc::clone(&built)));
        match previous.as_ref() {
            Some(existing) => Ok(Arc::clone(existing)),
            None => Ok(built),
        }
    }

    /// Dispatch the request through the compiled router, failing with the
    /// routing error on 404/405 unless a fallback handler is configured.
    pub async fn dispatch(&self, request: Request) -> RouterResult<Response> {
        self.compile()?.handle(request).await
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes.len())
            .field("compiled", &self.compiled.load().is_some())
            .finish()
    }
}
