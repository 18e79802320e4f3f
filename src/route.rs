//! Route definition value
//!
//! Immutable container describing a single registration: normalized method
//! set, raw path template, and the adapted handler. Instances are created
//! by `Router::add` and consumed at compile time; once the compiled tables
//! exist, the route itself is never consulted again.

use crate::handler::Handler;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct Route {
    /// Uppercase method tokens, duplicates collapsed, registration order.
    pub(crate) methods: Vec<String>,
    /// Raw path template as registered.
    pub(crate) path: String,
    /// Handler to execute on match.
    pub(crate) handler: Arc<dyn Handler>,
}
