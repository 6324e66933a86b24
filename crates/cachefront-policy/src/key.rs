//! Cache-key derivation.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use cachefront_http::Request;

use crate::policy::{CachePolicy, ContentEncoding};

/// A cache key uniquely identifying a cacheable variant.
///
/// Derived from the normalized path, the policy's allow-listed query
/// parameters and headers, and the negotiated encoding bucket. Query
/// parameters outside the allow-list never reach the key, so tracking
/// parameters cannot fragment the cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey {
    /// The computed key string.
    key: String,
    /// Components that went into the key (for debugging).
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    components: Vec<String>,
}

impl CacheKey {
    /// Derive the cache key for a request under a policy.
    pub fn derive(policy: &CachePolicy, request: &Request) -> Self {
        let mut parts = Vec::new();
        let mut components = Vec::new();

        let path = normalize_path(request.path());
        components.push(format!("path:{}", path));
        parts.push(path);

        for name in &policy.key_query_params {
            for value in request.query().all(name) {
                if value.is_empty() {
                    continue;
                }
                parts.push(format!("q:{}={}", name, value));
                components.push(format!("query:{}={}", name, value));
            }
        }

        for name in &policy.key_headers {
            if let Some(value) = request.header(name) {
                parts.push(format!("h:{}={}", name.to_lowercase(), value));
                components.push(format!("header:{}", name.to_lowercase()));
            }
        }

        let encoding = ContentEncoding::negotiate(
            request.header("accept-encoding"),
            &policy.accepted_encodings,
        );
        parts.push(format!("enc:{}", encoding));
        components.push(format!("encoding:{}", encoding));

        let key = format!("{:x}", simple_hash(&parts.join("|")));
        Self { key, components }
    }

    /// The key string.
    pub fn as_str(&self) -> &str {
        &self.key
    }

    /// The key components (for debugging).
    pub fn components(&self) -> &[String] {
        &self.components
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key)
    }
}

/// Normalize a path for keying: ensure a leading slash, collapse repeated
/// slashes and drop a trailing slash (except for the root).
pub fn normalize_path(path: &str) -> String {
    let mut normalized = String::with_capacity(path.len() + 1);
    normalized.push('/');
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        if !normalized.ends_with('/') {
            normalized.push('/');
        }
        normalized.push_str(segment);
    }
    normalized
}

// Simple non-cryptographic hash for cache keys
fn simple_hash(s: &str) -> u64 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    s.hash(&mut hasher);
    hasher.finish()
}
