//! Validator verdict for a single request target.

use anyhow::Result;
use clap::Args;

use cachefront_functions::{viewer_request, RequestOutcome};
use cachefront_http::Request;

use crate::context::Context;

/// Arguments for `cachefront check`.
#[derive(Args)]
pub struct CheckArgs {
    /// Request target, e.g. "/logo.png?v=3"
    pub target: String,
}

/// Run the check command.
pub fn run(args: CheckArgs, ctx: &Context) -> Result<()> {
    let request = Request::from_target(&args.target);
    let pattern = ctx.table.match_rule(request.path()).pattern.clone();

    match viewer_request(&ctx.table, request) {
        RequestOutcome::Forward(request) => {
            ctx.output.success(&format!("ALLOW {}", request.target()));
            ctx.output.json_value(&serde_json::json!({
                "decision": "allow",
                "target": request.target(),
                "pattern": pattern.as_str(),
            }));
        }
        RequestOutcome::Terminal(response) => {
            ctx.output.warn(&format!(
                "DENY {} ({} {}: {})",
                args.target,
                response.status(),
                response.status_description(),
                response.header("error").unwrap_or("")
            ));
            ctx.output.json_value(&serde_json::json!({
                "decision": "deny",
                "target": args.target,
                "pattern": pattern.as_str(),
                "status": response.status(),
                "error": response.header("error"),
            }));
        }
    }

    Ok(())
}
