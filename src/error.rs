//! Error types for route registration, compilation, and matching
//!
//! Matching is deterministic and pure, so every failure here is final:
//! nothing in this crate retries. Fallback handlers registered on the
//! [`Router`](crate::Router) replace the [`NotFound`](RouterError::NotFound)
//! and [`MethodNotAllowed`](RouterError::MethodNotAllowed) error paths
//! entirely; all other variants always surface to the caller.

use thiserror::Error;

/// Result alias used throughout the router.
pub type RouterResult<T> = Result<T, RouterError>;

/// Errors produced while registering, compiling, or matching routes.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RouterError {
    /// Registration supplied an empty or unparseable method set.
    ///
    /// Raised by [`Router::add`](crate::Router::add) before the route table
    /// is touched; the table is unchanged.
    #[error("at least one HTTP method must be provided")]
    InvalidMethodSet,

    /// A path template contained a malformed placeholder sub-expression.
    ///
    /// Raised at compile time (first dispatch or explicit compile after
    /// registration), not at registration time. Duplicate parameter names
    /// within one template land here too: the regex engine rejects
    /// duplicate capture-group names.
    #[error("invalid placeholder pattern in route `{template}`: {source}")]
    PatternCompile {
        /// The offending path template as registered.
        template: String,
        /// The underlying regex engine error.
        #[source]
        source: Box<regex::Error>,
    },

    /// No static or dynamic route matched the request.
    #[error("no route matched for {method} {path}")]
    NotFound {
        /// Uppercased request method.
        method: String,
        /// Percent-decoded request path.
        path: String,
    },

    /// The path has at least one static registration, but none for the
    /// requested method.
    #[error("method not allowed for {path}; allowed: {}", .allowed.join(", "))]
    MethodNotAllowed {
        /// Percent-decoded request path.
        path: String,
        /// Sorted list of methods registered for this exact path.
        allowed: Vec<String>,
    },

    /// A callable-style handler returned a value that is not a valid
    /// response descriptor.
    #[error("callable handler returned an invalid response descriptor: {reason}")]
    HandlerContract {
        /// Why the returned value was rejected.
        reason: String,
    },

    /// A matched handler failed while producing its response.
    #[error("handler error: {message}")]
    Handler {
        /// Handler-supplied failure description.
        message: String,
    },

    /// A dispatch-stage middleware ran without a preceding match stage
    /// attaching a handler to the request.
    #[error("no matched route handler available for dispatch")]
    MissingMatchedHandler,
}

impl RouterError {
    /// Create a [`RouterError::Handler`] from any displayable failure.
    pub fn handler(message: impl Into<String>) -> Self {
        Self::Handler {
            message: message.into(),
        }
    }

    /// Returns true for [`RouterError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true for [`RouterError::MethodNotAllowed`].
    pub fn is_method_not_allowed(&self) -> bool {
        matches!(self, Self::MethodNotAllowed { .. })
    }
}
