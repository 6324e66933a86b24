//! The immutable request value.

use serde::{Deserialize, Serialize};

use crate::headers::Headers;
use crate::query::QueryParams;

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Delete,
    Patch,
    Options,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
            Self::Options => "OPTIONS",
        };
        write!(f, "{}", s)
    }
}

/// Error parsing an HTTP method.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown HTTP method: {0}")]
pub struct MethodParseError(String);

impl std::str::FromStr for Method {
    type Err = MethodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "HEAD" => Ok(Self::Head),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            "PATCH" => Ok(Self::Patch),
            "OPTIONS" => Ok(Self::Options),
            other => Err(MethodParseError(other.to_string())),
        }
    }
}

/// An inbound request as seen by the edge functions.
///
/// Constructed by the surrounding platform per client request; the core
/// only reads it. The query string is never stripped on the allow path,
/// so cache-key derivation still sees the version parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// HTTP method.
    pub method: Method,
    /// Request path (no query string).
    path: String,
    /// Query string parameters.
    query: QueryParams,
    /// Request headers.
    headers: Headers,
}

impl Request {
    /// Create a new GET request for a path.
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            query: QueryParams::new(),
            headers: Headers::new(),
        }
    }

    /// Parse a request target of the form `/path?query`.
    pub fn from_target(target: &str) -> Self {
        match target.split_once('?') {
            Some((path, raw_query)) => Self::get(path).with_query(QueryParams::parse(raw_query)),
            None => Self::get(target),
        }
    }

    /// Replace the query parameters.
    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Parse and replace the query parameters from a raw query string.
    pub fn with_query_str(self, raw: &str) -> Self {
        self.with_query(QueryParams::parse(raw))
    }

    /// Set a request header.
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers.set(name, value);
        self
    }

    /// The request path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The query parameters.
    pub fn query(&self) -> &QueryParams {
        &self.query
    }

    /// The request headers.
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Get a header value by name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// The full request target (`/path?query`).
    pub fn target(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query.to_query_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_target_with_query() {
        let request = Request::from_target("/logo.png?v=3&utm_source=x");
        assert_eq!(request.path(), "/logo.png");
        assert_eq!(request.query().first("v"), Some("3"));
        assert_eq!(request.target(), "/logo.png?v=3&utm_source=x");
    }

    #[test]
    fn test_from_target_without_query() {
        let request = Request::from_target("/index.html");
        assert_eq!(request.path(), "/index.html");
        assert!(request.query().is_empty());
        assert_eq!(request.target(), "/index.html");
    }

    #[test]
    fn test_method_parse() {
        assert_eq!("get".parse::<Method>().ok(), Some(Method::Get));
        assert!("TRACE".parse::<Method>().is_err());
    }

    #[test]
    fn test_header_access() {
        let request = Request::get("/a.png").with_header("Accept-Encoding", "gzip, br");
        assert_eq!(request.header("accept-encoding"), Some("gzip, br"));
    }
}
