//! The response value.

use serde::{Deserialize, Serialize};

use crate::headers::Headers;

/// An outbound response.
///
/// Produced by the origin or the cache; the response annotator mutates
/// headers in place and must leave status and body untouched. A response
/// can also be generated directly by an edge function as a terminal
/// response that short-circuits origin fetch and cache lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// HTTP status code.
    status: u16,
    /// Reason phrase accompanying the status code.
    status_description: String,
    /// Response headers.
    pub headers: Headers,
    /// Response body.
    body: String,
}

impl Response {
    /// Create a response with a status code and reason phrase.
    pub fn new(status: u16, status_description: impl Into<String>) -> Self {
        Self {
            status,
            status_description: status_description.into(),
            headers: Headers::new(),
            body: String::new(),
        }
    }

    /// Create a 200 OK response with a body.
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, "OK").with_body(body)
    }

    /// Create a 403 Forbidden response.
    pub fn forbidden() -> Self {
        Self::new(403, "Forbidden")
    }

    /// Create a 404 Not Found response.
    pub fn not_found() -> Self {
        Self::new(404, "Not Found")
    }

    /// Set the body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Set a header, replacing any existing value.
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers.set(name, value);
        self
    }

    /// Set a header in place, replacing any existing value.
    pub fn set_header(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.headers.set(name, value);
    }

    /// Get a header value (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// The status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// The reason phrase.
    pub fn status_description(&self) -> &str {
        &self.status_description
    }

    /// The body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Whether the status code is a client error (4xx).
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }
}
