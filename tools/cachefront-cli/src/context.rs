//! CLI execution context.

use anyhow::Result;

use cachefront_policy::PolicyTable;

use crate::config;
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// The active routing table.
    pub table: PolicyTable,
    /// Output handler.
    pub output: Output,
}

impl Context {
    /// Load the context, reading the policy table from a config file when
    /// one was given and falling back to the production defaults.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let table = config::load_table(config_path)?;
        if config_path.is_none() {
            output.debug("no config given, using the distribution default table");
        }
        Ok(Self { table, output })
    }
}
