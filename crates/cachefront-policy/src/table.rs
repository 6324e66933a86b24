//! The distribution routing table.

use serde::{Deserialize, Serialize};

use crate::pattern::PathPattern;
use crate::policy::{CachePolicy, PolicyError, PolicyResult};

/// Asset classification derived from the routing table.
///
/// Not stored anywhere: a pure function of the matched rule, reported for
/// diagnostics and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssetClass {
    /// The path matched a rule whose policy gates on a version marker.
    VersionedImage,
    /// Everything else.
    Other,
}

impl std::fmt::Display for AssetClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VersionedImage => write!(f, "versioned-image"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Which edge functions a rule attaches to its behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionBindings {
    /// Run the viewer-request validator before cache lookup.
    pub viewer_request: bool,
    /// Run the viewer-response annotator before store/transmit.
    pub viewer_response: bool,
}

impl FunctionBindings {
    /// Bind both functions.
    pub fn both() -> Self {
        Self {
            viewer_request: true,
            viewer_response: true,
        }
    }

    /// Bind only the response annotator.
    pub fn response_only() -> Self {
        Self {
            viewer_request: false,
            viewer_response: true,
        }
    }
}

/// One routing-table entry: a path pattern, the policy applied to
/// matching paths, and the edge functions attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRule {
    /// Path pattern (first match wins).
    pub pattern: PathPattern,
    /// Cache policy for matching paths.
    pub policy: CachePolicy,
    /// Edge function bindings.
    pub bindings: FunctionBindings,
}

impl RouteRule {
    /// Create a rule.
    pub fn new(pattern: PathPattern, policy: CachePolicy, bindings: FunctionBindings) -> Self {
        Self {
            pattern,
            policy,
            bindings,
        }
    }
}

/// Ordered routing table with first-match-wins semantics and a mandatory
/// catch-all default.
///
/// This table is the single source of truth for classification: the
/// validator, the annotator and cache-key derivation all resolve the same
/// matched rule, which is what keeps the three in lockstep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyTable {
    /// Ordered rules, checked before the default.
    pub rules: Vec<RouteRule>,
    /// Catch-all rule applied when nothing above matches.
    pub default: RouteRule,
}

impl PolicyTable {
    /// Create a table from ordered rules and a default, validating every
    /// policy.
    pub fn new(rules: Vec<RouteRule>, default: RouteRule) -> PolicyResult<Self> {
        let table = Self { rules, default };
        table.validate()?;
        Ok(table)
    }

    /// The table mirroring the production distribution:
    /// `*.png` and `*.jpg` carry the one-year immutable policy with both
    /// functions bound; everything else falls through to a no-cache
    /// default with only the annotator bound.
    pub fn distribution_defaults() -> Self {
        let image_rule = |pattern: &str| RouteRule {
            pattern: PathPattern::new(pattern),
            policy: CachePolicy::versioned_images(),
            bindings: FunctionBindings::both(),
        };
        Self {
            rules: vec![image_rule("*.png"), image_rule("*.jpg")],
            default: RouteRule {
                pattern: PathPattern::new("*"),
                policy: CachePolicy::no_cache(),
                bindings: FunctionBindings::response_only(),
            },
        }
    }

    /// Check table invariants: every policy valid, no catch-all shadowing
    /// in the ordered rules.
    pub fn validate(&self) -> PolicyResult<()> {
        for (i, rule) in self.rules.iter().enumerate() {
            rule.pattern.validate()?;
            if rule.pattern.is_catch_all() {
                return Err(PolicyError::CatchAllRule(i));
            }
            rule.policy.validate()?;
        }
        self.default.pattern.validate()?;
        self.default.policy.validate()
    }

    /// Resolve the first rule matching a path, falling back to the
    /// default. Total: every path resolves to exactly one rule.
    pub fn match_rule(&self, path: &str) -> &RouteRule {
        self.rules
            .iter()
            .find(|rule| rule.pattern.matches(path))
            .unwrap_or(&self.default)
    }

    /// Classify a path by its matched rule.
    pub fn classify(&self, path: &str) -> AssetClass {
        if self.match_rule(path).policy.require_version_marker {
            AssetClass::VersionedImage
        } else {
            AssetClass::Other
        }
    }

    /// Iterate over all rules in match order, default last.
    pub fn iter(&self) -> impl Iterator<Item = &RouteRule> {
        self.rules.iter().chain(std::iter::once(&self.default))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::ONE_YEAR;

    #[test]
    fn test_defaults_shape() {
        let table = PolicyTable::distribution_defaults();
        assert!(table.validate().is_ok());
        assert_eq!(table.rules.len(), 2);
        assert!(table.default.pattern.is_catch_all());
        assert!(!table.default.bindings.viewer_request);
        assert!(table.default.bindings.viewer_response);
    }

    #[test]
    fn test_first_match_wins() {
        let table = PolicyTable::distribution_defaults();
        let rule = table.match_rule("/logo.png");
        assert_eq!(rule.pattern.as_str(), "*.png");
        assert_eq!(rule.policy.max_ttl, ONE_YEAR);
    }

    #[test]
    fn test_fallback_to_default() {
        let table = PolicyTable::distribution_defaults();
        let rule = table.match_rule("/index.html");
        assert!(rule.pattern.is_catch_all());
        assert!(!rule.policy.allows_caching());
    }

    #[test]
    fn test_classification() {
        let table = PolicyTable::distribution_defaults();
        assert_eq!(table.classify("/logo.png"), AssetClass::VersionedImage);
        assert_eq!(table.classify("/photo.jpg"), AssetClass::VersionedImage);
        assert_eq!(table.classify("/index.html"), AssetClass::Other);
        // Unknown extensions are never inspected for version parameters.
        assert_eq!(table.classify("/logo.gif"), AssetClass::Other);
    }

    #[test]
    fn test_catch_all_rule_rejected() {
        let mut table = PolicyTable::distribution_defaults();
        table.rules.push(table.default.clone());
        assert!(matches!(
            table.validate(),
            Err(PolicyError::CatchAllRule(2))
        ));
    }

    #[test]
    fn test_invalid_policy_rejected() {
        let mut table = PolicyTable::distribution_defaults();
        table.rules[0].policy.key_query_params.clear();
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_toml_roundtrip_equivalent_shape() {
        // The table must survive serde for the CLI's TOML config.
        let table = PolicyTable::distribution_defaults();
        let json = serde_json::to_string(&table).expect("serialize");
        let back: PolicyTable = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, table);
    }
}
