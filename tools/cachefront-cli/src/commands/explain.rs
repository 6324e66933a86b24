//! Explain how a request target is routed, keyed and annotated.

use anyhow::Result;
use clap::Args;

use cachefront_functions::{viewer_request, viewer_response, RequestOutcome};
use cachefront_http::{Request, Response};
use cachefront_policy::CacheKey;

use crate::context::Context;

/// Arguments for `cachefront explain`.
#[derive(Args)]
pub struct ExplainArgs {
    /// Request target, e.g. "/logo.png?v=3&utm_source=x"
    pub target: String,

    /// Accept-Encoding header to negotiate the encoding bucket with
    #[arg(long)]
    pub accept_encoding: Option<String>,
}

/// Run the explain command.
pub fn run(args: ExplainArgs, ctx: &Context) -> Result<()> {
    let mut request = Request::from_target(&args.target);
    if let Some(encoding) = &args.accept_encoding {
        request = request.with_header("Accept-Encoding", encoding.clone());
    }

    let rule = ctx.table.match_rule(request.path());
    let class = ctx.table.classify(request.path());
    let key = CacheKey::derive(&rule.policy, &request);
    let cache_control = rule.policy.cache_control_header();

    let (decision, deny_error) = match viewer_request(&ctx.table, request.clone()) {
        RequestOutcome::Forward(_) => ("allow", None),
        RequestOutcome::Terminal(response) => {
            ("deny", response.header("error").map(str::to_string))
        }
    };

    // What the annotator would write, shown on a blank response so the
    // output does not depend on any origin behavior.
    let annotated = viewer_response(&ctx.table, &request, Response::ok(""));

    ctx.output.header(&format!("Explain {}", args.target));
    ctx.output.kv("pattern", rule.pattern.as_str());
    ctx.output.kv("policy", &rule.policy.name);
    ctx.output.kv("asset class", &class.to_string());
    ctx.output.kv(
        "ttl bounds",
        &format!(
            "min={}s default={}s max={}s",
            rule.policy.min_ttl.as_secs(),
            rule.policy.default_ttl.as_secs(),
            rule.policy.max_ttl.as_secs()
        ),
    );
    ctx.output.kv(
        "version gate",
        if rule.policy.require_version_marker {
            "required"
        } else {
            "not required"
        },
    );
    match &deny_error {
        Some(error) => ctx.output.kv("verdict", &format!("deny ({})", error)),
        None => ctx.output.kv("verdict", decision),
    }
    ctx.output.kv(
        "cache-control",
        annotated.header("cache-control").unwrap_or(&cache_control),
    );
    ctx.output.kv("cache key", key.as_str());
    for component in key.components() {
        ctx.output.kv("  component", component);
    }

    ctx.output.json_value(&serde_json::json!({
        "target": args.target,
        "pattern": rule.pattern.as_str(),
        "policy": rule.policy.name,
        "asset_class": class.to_string(),
        "verdict": decision,
        "error": deny_error,
        "cache_control": cache_control,
        "cache_key": key.as_str(),
        "key_components": key.components(),
    }));

    Ok(())
}
