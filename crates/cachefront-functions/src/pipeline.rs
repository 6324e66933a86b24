//! In-memory simulation of the CDN control flow.
//!
//! The real cache lookup, origin fetch and store belong to the
//! surrounding platform; this module reproduces that flow for tests and
//! the CLI so the contract between the two edge functions and the cache
//! policy can be exercised end to end:
//!
//! validator → keyed lookup → (miss) origin fetch → annotator → store.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use cachefront_http::{Request, Response};
use cachefront_policy::{AssetClass, CacheKey, PolicyTable};

use crate::{viewer_request, viewer_response, RequestOutcome};

/// How a simulated request was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheStatus {
    /// Served from the edge store.
    Hit,
    /// Fetched from the origin and stored.
    Miss,
    /// Fetched from the origin; the policy retains nothing.
    Bypass,
    /// Short-circuited by the validator; the origin was never contacted.
    Deny,
}

impl std::fmt::Display for CacheStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hit => write!(f, "HIT"),
            Self::Miss => write!(f, "MISS"),
            Self::Bypass => write!(f, "BYPASS"),
            Self::Deny => write!(f, "DENY"),
        }
    }
}

/// The origin contract: a content store fetched by path on a cache miss.
pub trait Origin {
    /// Fetch the object at a path. Missing objects come back as 404
    /// responses, not errors; origin reachability is the platform's
    /// problem, not the core's.
    fn fetch(&self, path: &str) -> Response;
}

/// A fixed in-memory origin for tests and the CLI simulator.
#[derive(Debug, Clone, Default)]
pub struct StaticOrigin {
    objects: HashMap<String, String>,
}

impl StaticOrigin {
    /// Create an empty origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object.
    pub fn with_object(mut self, path: impl Into<String>, body: impl Into<String>) -> Self {
        self.objects.insert(path.into(), body.into());
        self
    }
}

impl Origin for StaticOrigin {
    fn fetch(&self, path: &str) -> Response {
        match self.objects.get(path) {
            Some(body) => Response::ok(body.clone()),
            None => Response::not_found(),
        }
    }
}

/// Result of serving one request through the simulated pipeline.
#[derive(Debug, Clone)]
pub struct Served {
    /// The response as the client would see it.
    pub response: Response,
    /// How it was resolved.
    pub status: CacheStatus,
    /// The derived cache key, when lookup was reached.
    pub cache_key: Option<CacheKey>,
    /// Table classification of the request path.
    pub asset_class: AssetClass,
}

/// The simulated edge: routing table, keyed store, origin.
///
/// Ordering matches the platform contract: the validator runs strictly
/// before lookup, and the annotator runs on every outgoing response
/// before it is stored or transmitted, so stored entries already carry
/// the annotator's cache-control value.
#[derive(Debug)]
pub struct EdgePipeline<O> {
    table: PolicyTable,
    origin: O,
    store: HashMap<String, Response>,
    origin_fetches: u64,
}

impl<O: Origin> EdgePipeline<O> {
    /// Create a pipeline over a table and an origin.
    pub fn new(table: PolicyTable, origin: O) -> Self {
        Self {
            table,
            origin,
            store: HashMap::new(),
            origin_fetches: 0,
        }
    }

    /// The active routing table.
    pub fn table(&self) -> &PolicyTable {
        &self.table
    }

    /// How many times the origin has been fetched.
    pub fn origin_fetches(&self) -> u64 {
        self.origin_fetches
    }

    /// Number of stored cache entries.
    pub fn stored_entries(&self) -> usize {
        self.store.len()
    }

    /// Serve one request through the full flow.
    pub fn serve(&mut self, request: Request) -> Served {
        let asset_class = self.table.classify(request.path());

        let request = match viewer_request(&self.table, request) {
            RequestOutcome::Forward(request) => request,
            RequestOutcome::Terminal(response) => {
                return Served {
                    response,
                    status: CacheStatus::Deny,
                    cache_key: None,
                    asset_class,
                };
            }
        };

        let rule = self.table.match_rule(request.path());
        let cacheable = rule.policy.allows_caching();
        let key = CacheKey::derive(&rule.policy, &request);

        if cacheable {
            if let Some(stored) = self.store.get(key.as_str()) {
                let response = viewer_response(&self.table, &request, stored.clone());
                return Served {
                    response,
                    status: CacheStatus::Hit,
                    cache_key: Some(key),
                    asset_class,
                };
            }
        }

        self.origin_fetches += 1;
        let origin_response = self.origin.fetch(request.path());
        let response = viewer_response(&self.table, &request, origin_response);

        let status = if cacheable {
            self.store.insert(key.as_str().to_string(), response.clone());
            CacheStatus::Miss
        } else {
            CacheStatus::Bypass
        };

        Served {
            response,
            status,
            cache_key: Some(key),
            asset_class,
        }
    }
}
