//! Declarative cache policies.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// One year in seconds - the TTL used for versioned static assets.
pub const ONE_YEAR: Duration = Duration::from_secs(31_536_000);

/// Result type for policy operations.
pub type PolicyResult<T> = Result<T, PolicyError>;

/// Errors from policy and routing-table validation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PolicyError {
    #[error("policy '{name}': ttl bounds out of order (min={min_secs}s, default={default_secs}s, max={max_secs}s)")]
    TtlBoundsOutOfOrder {
        name: String,
        min_secs: u64,
        default_secs: u64,
        max_secs: u64,
    },

    #[error("policy '{0}' requires a version marker but lists no cache-key query parameters")]
    MarkerWithoutKeyParams(String),

    #[error("empty path pattern")]
    EmptyPattern,

    #[error("rule {0} uses a catch-all pattern; catch-all belongs in the table default")]
    CatchAllRule(usize),
}

/// Content encodings a policy accepts for cache-key bucketing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentEncoding {
    /// Brotli (`br`).
    Brotli,
    /// Gzip.
    Gzip,
    /// No encoding.
    Identity,
}

impl ContentEncoding {
    /// The token used in `Accept-Encoding` / `Content-Encoding` headers.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Brotli => "br",
            Self::Gzip => "gzip",
            Self::Identity => "identity",
        }
    }

    /// Pick the encoding bucket for a request.
    ///
    /// Intersects the client's `Accept-Encoding` tokens with the accepted
    /// list, preferring the accepted list's order. Falls back to identity
    /// when nothing matches or no header was sent. Two requests landing in
    /// the same bucket share a cache entry.
    pub fn negotiate(accept_encoding: Option<&str>, accepted: &[ContentEncoding]) -> Self {
        let Some(header) = accept_encoding else {
            return Self::Identity;
        };
        let offered: Vec<&str> = header
            .split(',')
            .map(|t| t.trim())
            .map(|t| t.split(';').next().unwrap_or(t).trim())
            .collect();

        accepted
            .iter()
            .copied()
            .find(|e| offered.contains(&e.token()))
            .unwrap_or(Self::Identity)
    }
}

impl std::fmt::Display for ContentEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// A declarative cache policy: TTL bounds plus cache-key composition.
///
/// Consumed by the CDN's cache-lookup stage (via [`CacheKey::derive`]) and
/// by the response annotator (via [`CachePolicy::cache_control_header`]).
/// The image policy forces `min == default == max` at one year, so the
/// cache never revalidates before the TTL elapses: invalidation rides
/// entirely on the version query parameter.
///
/// [`CacheKey::derive`]: crate::CacheKey::derive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachePolicy {
    /// Policy name, for routing-table config and diagnostics.
    pub name: String,
    /// TTL applied when the origin supplies no caching headers.
    #[serde(with = "duration_secs")]
    pub default_ttl: Duration,
    /// Lower TTL bound.
    #[serde(with = "duration_secs")]
    pub min_ttl: Duration,
    /// Upper TTL bound.
    #[serde(with = "duration_secs")]
    pub max_ttl: Duration,
    /// Query parameters that participate in the cache key (allow-list).
    #[serde(default)]
    pub key_query_params: Vec<String>,
    /// Headers that participate in the cache key (allow-list).
    #[serde(default)]
    pub key_headers: Vec<String>,
    /// Whether cookies participate in the cache key.
    #[serde(default)]
    pub cookies_in_key: bool,
    /// Content encodings accepted for the encoding bucket.
    #[serde(default)]
    pub accepted_encodings: Vec<ContentEncoding>,
    /// Whether requests under this policy must carry a non-empty version
    /// marker (one of `key_query_params`) to be served at all.
    #[serde(default)]
    pub require_version_marker: bool,
}

impl CachePolicy {
    /// The one-year immutable policy for versioned static images.
    ///
    /// All three TTL bounds are forced to one year and the cache key is
    /// `{v, h}` only, so tracking parameters never fragment the cache.
    pub fn versioned_images() -> Self {
        Self {
            name: "images-one-year".to_string(),
            default_ttl: ONE_YEAR,
            min_ttl: ONE_YEAR,
            max_ttl: ONE_YEAR,
            key_query_params: vec!["v".to_string(), "h".to_string()],
            key_headers: Vec::new(),
            cookies_in_key: false,
            accepted_encodings: vec![ContentEncoding::Brotli, ContentEncoding::Gzip],
            require_version_marker: true,
        }
    }

    /// The catch-all policy: nothing is retained, every response must
    /// revalidate.
    pub fn no_cache() -> Self {
        Self {
            name: "default-no-cache".to_string(),
            default_ttl: Duration::ZERO,
            min_ttl: Duration::ZERO,
            max_ttl: Duration::ZERO,
            key_query_params: Vec::new(),
            key_headers: Vec::new(),
            cookies_in_key: false,
            accepted_encodings: vec![ContentEncoding::Brotli, ContentEncoding::Gzip],
            require_version_marker: false,
        }
    }

    /// Add a cache-key query parameter.
    pub fn with_key_query_param(mut self, name: impl Into<String>) -> Self {
        self.key_query_params.push(name.into());
        self
    }

    /// Add a cache-key header.
    pub fn with_key_header(mut self, name: impl Into<String>) -> Self {
        self.key_headers.push(name.into());
        self
    }

    /// Check the policy invariants.
    pub fn validate(&self) -> PolicyResult<()> {
        if self.min_ttl > self.default_ttl || self.default_ttl > self.max_ttl {
            return Err(PolicyError::TtlBoundsOutOfOrder {
                name: self.name.clone(),
                min_secs: self.min_ttl.as_secs(),
                default_secs: self.default_ttl.as_secs(),
                max_secs: self.max_ttl.as_secs(),
            });
        }
        if self.require_version_marker && self.key_query_params.is_empty() {
            return Err(PolicyError::MarkerWithoutKeyParams(self.name.clone()));
        }
        Ok(())
    }

    /// Whether this policy retains anything at all.
    pub fn allows_caching(&self) -> bool {
        self.max_ttl > Duration::ZERO
    }

    /// The `Cache-Control` value the annotator writes for this policy.
    ///
    /// Version-gated assets get long-lived immutable caching; everything
    /// else must revalidate on every use and is never retained.
    pub fn cache_control_header(&self) -> String {
        if !self.allows_caching() {
            return "public, max-age=0, must-revalidate".to_string();
        }
        let mut value = format!("public, max-age={}", self.max_ttl.as_secs());
        if self.require_version_marker {
            value.push_str(", immutable");
        }
        value
    }
}

mod duration_secs {
    //! Serialize `Duration` as whole seconds, for readable TOML config.

    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_secs(u64::deserialize(deserializer)?))
    }
}
