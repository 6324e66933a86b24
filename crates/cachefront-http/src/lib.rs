//! HTTP value types for the edge cache-control engine.
//!
//! This crate provides the request/response model the edge functions
//! operate on:
//! - `Request` - immutable per-request value (path, query, headers)
//! - `Response` - response with mutable headers
//! - `QueryParams` - multi-value, order-preserving query parameters
//! - `Headers` - case-insensitive header map with overwrite semantics
//!
//! The types are deliberately plain: the core never performs I/O, so
//! there is no body streaming, no connection state, and no async.

mod headers;
mod query;
mod request;
mod response;

pub use headers::*;
pub use query::*;
pub use request::*;
pub use response::*;
