//! Run request targets through the simulated CDN pipeline.

use anyhow::Result;
use clap::Args;

use cachefront_functions::pipeline::{CacheStatus, EdgePipeline, Origin};
use cachefront_http::{Request, Response};
use cachefront_observability::{DecisionEntry, DecisionLogger, LogFormat};

use crate::context::Context;

/// Arguments for `cachefront simulate`.
#[derive(Args)]
pub struct SimulateArgs {
    /// Request targets, in order, e.g. "/logo.png?v=3" "/logo.png?v=3"
    #[arg(required = true)]
    pub targets: Vec<String>,
}

/// An origin that serves a synthetic body for every path, so simulations
/// don't need fixture content.
struct SyntheticOrigin;

impl Origin for SyntheticOrigin {
    fn fetch(&self, path: &str) -> Response {
        Response::ok(format!("origin object for {}", path))
    }
}

/// Run the simulate command.
pub fn run(args: SimulateArgs, ctx: &Context) -> Result<()> {
    let mut edge = EdgePipeline::new(ctx.table.clone(), SyntheticOrigin);
    let logger = DecisionLogger::new().with_format(if ctx.output.json() {
        LogFormat::Json
    } else {
        LogFormat::Human
    });

    ctx.output.header("Simulation");
    let mut results = Vec::new();

    for target in &args.targets {
        let request = Request::from_target(target);
        let pattern = ctx.table.match_rule(request.path()).pattern.clone();
        let served = edge.serve(request);

        ctx.output.info(&format!(
            "{:6} {} -> {} {}",
            served.status.to_string(),
            target,
            served.response.status(),
            served.response.header("cache-control").unwrap_or("-")
        ));

        if ctx.output.verbose() {
            let entry = if served.status == CacheStatus::Deny {
                DecisionEntry::deny(target.clone(), pattern.as_str())
            } else {
                DecisionEntry::allow(target.clone(), pattern.as_str())
            };
            let mut entry = entry
                .with_asset_class(served.asset_class)
                .with_cache_status(served.status);
            if let Some(key) = &served.cache_key {
                entry = entry.with_cache_key(key);
            }
            if let Some(value) = served.response.header("cache-control") {
                entry = entry.with_cache_control(value);
            }
            logger.log(&entry);
        }

        results.push(serde_json::json!({
            "target": target,
            "cache_status": served.status.to_string(),
            "http_status": served.response.status(),
            "cache_key": served.cache_key.as_ref().map(|k| k.as_str().to_string()),
            "cache_control": served.response.header("cache-control"),
        }));
    }

    ctx.output.info(&format!(
        "origin fetches: {}, stored entries: {}",
        edge.origin_fetches(),
        edge.stored_entries()
    ));

    ctx.output.json_value(&serde_json::json!({
        "results": results,
        "origin_fetches": edge.origin_fetches(),
        "stored_entries": edge.stored_entries(),
    }));

    Ok(())
}
