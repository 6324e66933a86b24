//! Query string parameters.

use serde::{Deserialize, Serialize};

/// Query string parameters.
///
/// Stored as a list of `(name, value)` pairs: a name may appear more than
/// once, and the original order is preserved for cache-key normalization.
/// Lookup by name is order-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    /// Create an empty parameter list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw query string (`"v=3&utm_source=x"`).
    ///
    /// A parameter without `=` is kept with an empty value, matching how
    /// CDN platforms surface bare query keys.
    pub fn parse(raw: &str) -> Self {
        let mut params = Vec::new();
        for pair in raw.split('&').filter(|p| !p.is_empty()) {
            match pair.split_once('=') {
                Some((name, value)) => params.push((name.to_string(), value.to_string())),
                None => params.push((pair.to_string(), String::new())),
            }
        }
        Self(params)
    }

    /// Append a parameter, keeping any existing values for the same name.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    /// Get the first value for a name.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Get all values for a name, in insertion order.
    pub fn all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> {
        self.0
            .iter()
            .filter(move |(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Check whether a name is present with at least one non-empty value.
    ///
    /// A bare `?v=` counts as absent: presence of the key alone is not a
    /// version marker.
    pub fn has_nonempty(&self, name: &str) -> bool {
        self.all(name).any(|v| !v.is_empty())
    }

    /// Iterate over all `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Re-encode as a raw query string in insertion order.
    pub fn to_query_string(&self) -> String {
        self.0
            .iter()
            .map(|(n, v)| {
                if v.is_empty() {
                    n.clone()
                } else {
                    format!("{}={}", n, v)
                }
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let params = QueryParams::parse("v=3&utm_source=x");
        assert_eq!(params.first("v"), Some("3"));
        assert_eq!(params.first("utm_source"), Some("x"));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_parse_repeated_name() {
        let params = QueryParams::parse("v=1&v=2");
        assert_eq!(params.first("v"), Some("1"));
        assert_eq!(params.all("v").collect::<Vec<_>>(), vec!["1", "2"]);
    }

    #[test]
    fn test_empty_value_is_not_nonempty() {
        let params = QueryParams::parse("v=&h=abc");
        assert!(!params.has_nonempty("v"));
        assert!(params.has_nonempty("h"));
    }

    #[test]
    fn test_bare_key_is_not_nonempty() {
        let params = QueryParams::parse("v");
        assert_eq!(params.first("v"), Some(""));
        assert!(!params.has_nonempty("v"));
    }

    #[test]
    fn test_roundtrip_preserves_order() {
        let raw = "b=2&a=1&b=3";
        assert_eq!(QueryParams::parse(raw).to_query_string(), raw);
    }

    #[test]
    fn test_parse_empty_string() {
        let params = QueryParams::parse("");
        assert!(params.is_empty());
    }
}
