//! The two edge functions of the cache-control engine.
//!
//! Both are pure, stateless, run-to-completion transformations driven by
//! the shared [`PolicyTable`]:
//! - [`viewer_request`] - gate versioned assets on a non-empty version
//!   marker, short-circuiting with a terminal 403 when it is missing
//! - [`viewer_response`] - attach the policy's `Cache-Control` header
//!   before the response is stored or transmitted
//!
//! Neither function performs I/O, holds state across invocations, or
//! touches anything but its input values. The [`pipeline`] module is not
//! part of the hot path: it simulates the surrounding CDN flow (lookup,
//! origin fetch, store) for tests and tooling.
//!
//! [`PolicyTable`]: cachefront_policy::PolicyTable

pub mod pipeline;
mod viewer_request;
mod viewer_response;

pub use viewer_request::*;
pub use viewer_response::*;
