//! Wildcard path patterns for routing.

use serde::{Deserialize, Serialize};

use crate::policy::{PolicyError, PolicyResult};

/// A path pattern with `*` wildcards, as used by CDN distribution
/// behaviors.
///
/// Examples:
/// - `*.png` - any path ending in `.png`
/// - `/static/*` - any path under `/static/`
/// - `*` - catch-all
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathPattern(String);

impl PathPattern {
    /// Create a pattern.
    ///
    /// Construction never fails; emptiness is caught by [`validate`],
    /// which table validation calls on every rule.
    ///
    /// [`validate`]: PathPattern::validate
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    /// Reject the empty pattern, which would match nothing.
    pub fn validate(&self) -> PolicyResult<()> {
        if self.0.is_empty() {
            return Err(PolicyError::EmptyPattern);
        }
        Ok(())
    }

    /// The raw pattern string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the catch-all pattern `*`.
    pub fn is_catch_all(&self) -> bool {
        self.0 == "*"
    }

    /// Check whether a path matches this pattern.
    pub fn matches(&self, path: &str) -> bool {
        let pattern = self.0.as_str();
        if !pattern.contains('*') {
            return path == pattern;
        }

        let parts: Vec<&str> = pattern.split('*').collect();
        if parts.len() == 2 {
            let prefix = parts[0];
            let suffix = parts[1];
            if prefix.is_empty() && suffix.is_empty() {
                // Catch-all
                true
            } else if prefix.is_empty() {
                // Pattern like "*.png"
                path.ends_with(suffix)
            } else if suffix.is_empty() {
                // Pattern like "/static/*"
                path.starts_with(prefix)
            } else {
                // Pattern like "/img/*.png"
                path.starts_with(prefix)
                    && path.ends_with(suffix)
                    && path.len() >= prefix.len() + suffix.len()
            }
        } else {
            // Multiple wildcards: require the literal segments in order.
            let mut rest = path;
            for (i, part) in parts.iter().enumerate() {
                if part.is_empty() {
                    continue;
                }
                match rest.find(part) {
                    Some(pos) => {
                        if i == 0 && pos != 0 {
                            return false;
                        }
                        rest = &rest[pos + part.len()..];
                    }
                    None => return false,
                }
            }
            parts.last().is_some_and(|p| p.is_empty()) || rest.is_empty()
        }
    }
}

impl std::fmt::Display for PathPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(p: &str) -> PathPattern {
        PathPattern::new(p)
    }

    #[test]
    fn test_suffix_pattern() {
        let p = pattern("*.png");
        assert!(p.matches("/logo.png"));
        assert!(p.matches("/img/deep/logo.png"));
        assert!(!p.matches("/logo.jpg"));
        assert!(!p.matches("/logo.png.html"));
    }

    #[test]
    fn test_exact_pattern() {
        let p = pattern("/favicon.ico");
        assert!(p.matches("/favicon.ico"));
        assert!(!p.matches("/favicon.ico2"));
    }

    #[test]
    fn test_prefix_pattern() {
        let p = pattern("/static/*");
        assert!(p.matches("/static/app.css"));
        assert!(!p.matches("/app.css"));
    }

    #[test]
    fn test_prefix_suffix_pattern() {
        let p = pattern("/img/*.png");
        assert!(p.matches("/img/logo.png"));
        assert!(!p.matches("/logo.png"));
        assert!(!p.matches("/img/logo.jpg"));
    }

    #[test]
    fn test_catch_all() {
        let p = pattern("*");
        assert!(p.is_catch_all());
        assert!(p.matches("/anything"));
        assert!(p.matches(""));
    }

    #[test]
    fn test_empty_pattern_rejected() {
        assert!(matches!(
            PathPattern::new("").validate(),
            Err(PolicyError::EmptyPattern)
        ));
        assert!(pattern("*.png").validate().is_ok());
    }
}
