//! Print the active routing table.

use anyhow::{Context as _, Result};
use clap::Args;

use crate::context::Context;

/// Arguments for `cachefront table`.
#[derive(Args)]
pub struct TableArgs {
    /// Dump the table as TOML (usable as a --config file)
    #[arg(long)]
    pub toml: bool,
}

/// Run the table command.
pub fn run(args: TableArgs, ctx: &Context) -> Result<()> {
    if args.toml {
        let text =
            toml::to_string_pretty(&ctx.table).context("failed to serialize policy table")?;
        println!("{}", text);
        return Ok(());
    }

    ctx.output.header("Routing table (first match wins)");
    for rule in ctx.table.iter() {
        ctx.output.info(&format!(
            "{} -> {}",
            rule.pattern.as_str(),
            rule.policy.name
        ));
        ctx.output.kv("max-age", &format!("{}s", rule.policy.max_ttl.as_secs()));
        ctx.output.kv(
            "key query params",
            &if rule.policy.key_query_params.is_empty() {
                "(none)".to_string()
            } else {
                rule.policy.key_query_params.join(", ")
            },
        );
        ctx.output.kv(
            "functions",
            &match (rule.bindings.viewer_request, rule.bindings.viewer_response) {
                (true, true) => "viewer-request, viewer-response",
                (true, false) => "viewer-request",
                (false, true) => "viewer-response",
                (false, false) => "(none)",
            }
            .to_string(),
        );
    }

    ctx.output.json_value(
        &serde_json::to_value(&ctx.table).context("failed to serialize policy table")?,
    );

    Ok(())
}
