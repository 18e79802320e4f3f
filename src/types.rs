//! Request and response descriptors shared by handlers and middleware
//!
//! These are deliberately thin: the router only ever reads a method and a
//! path, and attaches two pieces of request-scoped metadata on a match —
//! the extracted route parameters and the matched handler. Everything else
//! about a request (body, headers the caller cares about) rides along as an
//! opaque JSON value.

use crate::handler::Handler;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Route parameters extracted from a dynamic match, in template order.
///
/// Backed by an ordered list rather than a map so iteration yields the
/// placeholders exactly as they appear in the path template.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteParams {
    entries: Vec<(String, String)>,
}

impl RouteParams {
    pub(crate) fn push(&mut self, name: String, value: String) {
        self.entries.push((name, value));
    }

    /// Look up a parameter by placeholder name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over `(name, value)` pairs in template order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Number of extracted parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no parameters were extracted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Incoming request descriptor.
///
/// Built once by the caller, then extended immutably by the router: a
/// dynamic match yields a new `Request` carrying [`RouteParams`], and the
/// match middleware attaches the matched handler the same way. The builders
/// consume `self`; clone first if the original is still needed.
#[derive(Clone)]
pub struct Request {
    method: String,
    path: String,
    body: Value,
    params: Option<Arc<RouteParams>>,
    matched: Option<Arc<dyn Handler>>,
}

impl Request {
    /// Create a request descriptor from a method token and a raw URI path.
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            body: Value::Null,
            params: None,
            matched: None,
        }
    }

    /// Attach an opaque JSON body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = body;
        self
    }

    /// Request method as supplied by the caller (not yet uppercased).
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Raw URI path as supplied by the caller (not yet percent-decoded).
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Opaque request body.
    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Attach extracted route parameters.
    pub fn with_params(mut self, params: RouteParams) -> Self {
        self.params = Some(Arc::new(params));
        self
    }

    /// Route parameters, present after a dynamic match.
    pub fn params(&self) -> Option<&RouteParams> {
        self.params.as_deref()
    }

    /// Attach the matched route handler for a later dispatch stage.
    pub fn with_matched_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.matched = Some(handler);
        self
    }

    /// Handler attached by a match stage, if any.
    pub fn matched_handler(&self) -> Option<&Arc<dyn Handler>> {
        self.matched.as_ref()
    }
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("body", &self.body)
            .field("params", &self.params)
            .field("matched", &self.matched.is_some())
            .finish()
    }
}

/// Response descriptor produced by handlers.
///
/// Serde-backed so loosely-typed callable handlers can be checked against
/// it: a JSON value is a valid response descriptor iff it deserializes into
/// this shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Opaque response body.
    #[serde(default)]
    pub body: Value,
}

impl Response {
    /// Create a response with the given status and an empty body.
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Value::Null,
        }
    }

    /// Create a `200 OK` response.
    pub fn ok() -> Self {
        Self::new(200)
    }

    /// Set the response body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = body;
        self
    }

    /// Add a response header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn params_preserve_template_order() {
        let mut params = RouteParams::default();
        params.push("userId".to_string(), "7".to_string());
        params.push("slug".to_string(), "hello-world".to_string());

        let collected: Vec<_> = params.iter().collect();
        assert_eq!(
            collected,
            vec![("userId", "7"), ("slug", "hello-world")]
        );
        assert_eq!(params.get("slug"), Some("hello-world"));
        assert_eq!(params.get("missing"), None);
    }

    #[test]
    fn response_descriptor_roundtrips_through_json() {
        let value = json!({ "status": 201, "body": { "id": 9 } });
        let response: Response = serde_json::from_value(value).unwrap();
        assert_eq!(response.status, 201);
        assert_eq!(response.body, json!({ "id": 9 }));
        assert!(response.headers.is_empty());
    }

    #[test]
    fn bare_value_is_not_a_response_descriptor() {
        assert!(serde_json::from_value::<Response>(json!("ok")).is_err());
        assert!(serde_json::from_value::<Response>(json!({ "body": {} })).is_err());
    }

    #[test]
    fn request_builders_do_not_disturb_method_or_path() {
        let request = Request::new("get", "/users/7").with_body(json!({ "a": 1 }));
        let mut params = RouteParams::default();
        params.push("id".to_string(), "7".to_string());
        let request = request.with_params(params);

        assert_eq!(request.method(), "get");
        assert_eq!(request.path(), "/users/7");
        assert_eq!(request.params().unwrap().get("id"), Some("7"));
    }
}
