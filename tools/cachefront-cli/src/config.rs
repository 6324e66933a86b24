//! Policy table configuration loading.

use anyhow::{Context as _, Result};

use cachefront_policy::PolicyTable;

/// Load a policy table from a TOML file, or the distribution defaults
/// when no path is given. The table is validated either way.
pub fn load_table(path: Option<&str>) -> Result<PolicyTable> {
    let table = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read policy table {}", path))?;
            toml::from_str::<PolicyTable>(&text)
                .with_context(|| format!("failed to parse policy table {}", path))?
        }
        None => PolicyTable::distribution_defaults(),
    };
    table.validate().context("invalid policy table")?;
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_no_path() {
        let table = load_table(None).expect("defaults load");
        assert_eq!(table.rules.len(), 2);
    }

    #[test]
    fn test_toml_roundtrip() {
        let table = PolicyTable::distribution_defaults();
        let text = toml::to_string_pretty(&table).expect("serialize");
        let back: PolicyTable = toml::from_str(&text).expect("parse back");
        assert_eq!(back, table);
    }

    #[test]
    fn test_handwritten_config_parses() {
        let text = r#"
            [[rules]]
            pattern = "*.png"
            bindings = { viewer_request = true, viewer_response = true }

            [rules.policy]
            name = "images-one-year"
            default_ttl = 31536000
            min_ttl = 31536000
            max_ttl = 31536000
            key_query_params = ["v", "h"]
            accepted_encodings = ["brotli", "gzip"]
            require_version_marker = true

            [default]
            pattern = "*"
            bindings = { viewer_request = false, viewer_response = true }

            [default.policy]
            name = "default-no-cache"
            default_ttl = 0
            min_ttl = 0
            max_ttl = 0
        "#;
        let table: PolicyTable = toml::from_str(text).expect("parse");
        assert!(table.validate().is_ok());
        assert!(table.rules[0].policy.require_version_marker);
        assert!(!table.default.policy.allows_caching());
    }
}
