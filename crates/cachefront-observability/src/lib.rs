//! Structured decision logging.
//!
//! The edge functions themselves are pure and never log; what the
//! platform wants is one structured line per evaluated request, emitted
//! by the surrounding tooling (the CLI and the pipeline simulator). This
//! crate provides that: a `DecisionEntry` record and a `DecisionLogger`
//! that writes JSON (for aggregation) or a human-readable form (for
//! development) to stderr.

mod logging;

pub use logging::*;
