//! Cache policies and routing for the edge cache-control engine.
//!
//! This crate provides:
//! - `CachePolicy` - declarative TTL bounds and cache-key composition
//! - `PathPattern` - wildcard path matching for routing
//! - `PolicyTable` - ordered, first-match-wins routing table
//! - `CacheKey` - cache-key derivation from a policy and a request
//!
//! The `PolicyTable` is the single source of truth for classifying a
//! request path: both edge functions resolve the matched rule from the
//! same table, so the validator's gating and the annotator's header
//! choice cannot drift apart.
//!
//! # Example
//!
//! ```
//! use cachefront_http::Request;
//! use cachefront_policy::{CacheKey, PolicyTable};
//!
//! let table = PolicyTable::distribution_defaults();
//! let request = Request::from_target("/logo.png?v=3");
//!
//! let rule = table.match_rule(request.path());
//! assert!(rule.policy.require_version_marker);
//!
//! let key = CacheKey::derive(&rule.policy, &request);
//! assert!(!key.as_str().is_empty());
//! ```

mod key;
mod pattern;
mod policy;
mod table;

pub use key::*;
pub use pattern::*;
pub use policy::*;
pub use table::*;
