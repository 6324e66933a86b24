//! Case-insensitive header map.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// HTTP headers.
///
/// Names are stored lowercased, so lookups are case-insensitive and
/// inserting a header that already exists overwrites it rather than
/// appending a duplicate. The overwrite semantics are what make the
/// response annotator idempotent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headers(HashMap<String, String>);

impl Headers {
    /// Create an empty header map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a header value, replacing any existing value for the name.
    pub fn set(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.0.insert(name.as_ref().to_lowercase(), value.into());
    }

    /// Get a header value by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(&name.to_lowercase()).map(|v| v.as_str())
    }

    /// Check whether a header is present.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(&name.to_lowercase())
    }

    /// Iterate over `(name, value)` pairs (names are lowercased).
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Number of headers.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_lookup() {
        let mut headers = Headers::new();
        headers.set("Cache-Control", "no-store");
        assert_eq!(headers.get("cache-control"), Some("no-store"));
        assert_eq!(headers.get("CACHE-CONTROL"), Some("no-store"));
    }

    #[test]
    fn test_set_overwrites() {
        let mut headers = Headers::new();
        headers.set("Cache-Control", "no-store");
        headers.set("cache-control", "public, max-age=60");
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("Cache-Control"), Some("public, max-age=60"));
    }

    #[test]
    fn test_missing_header() {
        let headers = Headers::new();
        assert_eq!(headers.get("accept-encoding"), None);
        assert!(!headers.contains("accept-encoding"));
    }
}
