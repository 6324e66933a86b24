//! Cachefront CLI - inspect and simulate edge cache-control behavior.
//!
//! Commands:
//! - `cachefront check` - validator verdict for a request target
//! - `cachefront explain` - matched rule, derived cache key and headers
//! - `cachefront table` - print the active routing table
//! - `cachefront simulate` - run request sequences through the pipeline

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{CheckArgs, ExplainArgs, SimulateArgs, TableArgs};

/// Cachefront CLI - edge cache-control rules, offline
#[derive(Parser)]
#[command(name = "cachefront")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output (includes per-decision logs)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Policy table config file (TOML); defaults to the production table
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the validator verdict for a request target
    Check(CheckArgs),

    /// Explain how a request target is routed, keyed and annotated
    Explain(ExplainArgs),

    /// Print the active routing table
    Table(TableArgs),

    /// Run request targets through the simulated CDN pipeline
    Simulate(SimulateArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = output::Output::new(cli.verbose, cli.json);
    let ctx = context::Context::load(cli.config.as_deref(), output)?;

    let result = match cli.command {
        Commands::Check(args) => commands::check::run(args, &ctx),
        Commands::Explain(args) => commands::explain::run(args, &ctx),
        Commands::Table(args) => commands::table::run(args, &ctx),
        Commands::Simulate(args) => commands::simulate::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
