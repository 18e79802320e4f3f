//! Lookup algorithm and the bare matcher
//!
//! One pass over the compiled tables, first success wins: uppercase the
//! method, percent-decode the path per segment, check the static map, scan
//! the per-method dynamic list in registration order, then distinguish
//! method-not-allowed from not-found. [`RouterMatcher`] exposes this as
//! match-without-dispatch for middleware pipelines; it never applies
//! fallback handlers — those live on the dispatcher.

use crate::error::{RouterError, RouterResult};
use crate::handler::Handler;
use crate::table::RouteTables;
use crate::types::{Request, RouteParams};
use std::borrow::Cow;
use std::sync::Arc;
use tracing::trace;

/// Percent-decode one segment, keeping it raw when the decoded bytes are
/// not valid UTF-8. Malformed escape sequences pass through unchanged.
fn decode_segment(segment: &str) -> Cow<'_, str> {
    match urlencoding::decode(segment) {
        Ok(decoded) => decoded,
        Err(_) => Cow::Borrowed(segment),
    }
}

/// Percent-decode a path segment by segment so that segment boundaries
/// survive decoding and multi-byte identifiers work.
pub(crate) fn decode_path(raw: &str) -> String {
    if !raw.contains('%') {
        return raw.to_string();
    }
    raw.split('/')
        .map(decode_segment)
        .collect::<Vec<_>>()
        .join("/")
}

/// Outcome of one lookup against the compiled tables.
pub(crate) enum MatchOutcome {
    /// A route matched; `params` is present for dynamic matches only.
    Found {
        handler: Arc<dyn Handler>,
        params: Option<RouteParams>,
    },
    /// The path has static registrations, but not for this method.
    MethodNotAllowed { path: String, allowed: Vec<String> },
    /// Nothing matched.
    NotFound { method: String, path: String },
}

/// Resolve a (method, raw path) pair against the tables.
pub(crate) fn lookup(tables: &RouteTables, raw_method: &str, raw_path: &str) -> MatchOutcome {
    let method = raw_method.to_ascii_uppercase();
    let path = decode_path(raw_path);

    // Static fast path: exact hits always beat patterns.
    if let Some(handler) = tables.static_map.get(&method).and_then(|m| m.get(&path)) {
        trace!(method = %method, path = %path, "static route matched");
        return MatchOutcome::Found {
            handler: Arc::clone(handler),
            params: None,
        };
    }

    // Dynamic list, registration order, first full match wins.
    if let Some(candidates) = tables.dynamic_list.get(&method) {
        for candidate in candidates {
            if let Some(params) = candidate.pattern.match_path(&path) {
                trace!(
                    method = %method,
                    path = %path,
                    pattern = candidate.pattern.as_str(),
                    "dynamic route matched"
                );
                return MatchOutcome::Found {
                    handler: Arc::clone(&candidate.handler),
                    params: Some(params),
                };
            }
        }
    }

    // Method-not-allowed covers statically registered paths only; a path
    // that exists only as a pattern for other methods falls through.
    if let Some(methods) = tables.static_path_methods.get(&path)
        && !methods.contains(&method)
    {
        trace!(method = %method, path = %path, "method not allowed");
        return MatchOutcome::MethodNotAllowed {
            path,
            allowed: methods.iter().cloned().collect(),
        };
    }

    trace!(method = %method, path = %path, "no route matched");
    MatchOutcome::NotFound { method, path }
}

/// Read-only matcher for match-before-dispatch pipelines.
///
/// Returns the matched handler together with the request carrying extracted
/// parameters, leaving dispatch to a later stage. Always fails with the
/// routing error on a miss; fallback handlers are a dispatcher concern.
pub struct RouterMatcher {
    tables: Arc<RouteTables>,
}

impl RouterMatcher {
    pub(crate) fn new(tables: Arc<RouteTables>) -> Self {
        Self { tables }
    }

    /// Match the request, returning the handler and the request with route
    /// parameters attached.
    pub fn match_request(&self, request: Request) -> RouterResult<(Arc<dyn Handler>, Request)> {
        match lookup(&self.tables, request.method(), request.path()) {
            MatchOutcome::Found { handler, params } => {
                let request = match params {
                    Some(params) => request.with_params(params),
                    None => request,
                };
                Ok((handler, request))
            }
            MatchOutcome::MethodNotAllowed { path, allowed } => {
                Err(RouterError::MethodNotAllowed { path, allowed })
            }
            MatchOutcome::NotFound { method, path } => Err(RouterError::NotFound { method, path }),
        }
    }
}
