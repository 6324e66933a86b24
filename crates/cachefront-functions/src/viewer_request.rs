//! The viewer-request validator.

use cachefront_http::{Request, Response};
use cachefront_policy::{CachePolicy, PolicyTable};

/// Outcome of the viewer-request function.
///
/// Either the request is forwarded toward cache lookup unmodified, or a
/// terminal response short-circuits all downstream processing: no origin
/// fetch, no cache population.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    /// Forward the request, query string untouched.
    Forward(Request),
    /// Stop here and return this response to the client.
    Terminal(Response),
}

impl RequestOutcome {
    /// Whether the request was allowed through.
    pub fn is_forward(&self) -> bool {
        matches!(self, Self::Forward(_))
    }
}

/// Validate an inbound request against the routing table.
///
/// Paths matching a rule whose policy gates on a version marker must
/// carry at least one of the policy's cache-key query parameters with a
/// non-empty value. An empty `?v=` counts as absent. Any single marker
/// satisfies the gate. Paths matched by ungated rules pass through
/// unconditionally, whatever their query string looks like.
pub fn viewer_request(table: &PolicyTable, request: Request) -> RequestOutcome {
    let rule = table.match_rule(request.path());
    if !rule.bindings.viewer_request || !rule.policy.require_version_marker {
        return RequestOutcome::Forward(request);
    }

    let marker_present = rule
        .policy
        .key_query_params
        .iter()
        .any(|name| request.query().has_nonempty(name));

    if marker_present {
        RequestOutcome::Forward(request)
    } else {
        RequestOutcome::Terminal(deny_response(&rule.policy))
    }
}

/// Build the terminal 403 for a request missing its version marker.
fn deny_response(policy: &CachePolicy) -> Response {
    let expected = policy.key_query_params.join(" or ");
    let message = format!("Cannot request asset without a {} query parameter", expected);
    Response::forbidden()
        .with_header("error", message.clone())
        .with_body(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> PolicyTable {
        PolicyTable::distribution_defaults()
    }

    fn assert_forwarded(outcome: RequestOutcome, target: &str) {
        match outcome {
            RequestOutcome::Forward(request) => assert_eq!(request.target(), target),
            RequestOutcome::Terminal(response) => {
                panic!("expected forward, got terminal {}", response.status())
            }
        }
    }

    #[test]
    fn test_image_without_marker_denied() {
        let outcome = viewer_request(&table(), Request::from_target("/logo.png"));
        match outcome {
            RequestOutcome::Terminal(response) => {
                assert_eq!(response.status(), 403);
                assert_eq!(response.status_description(), "Forbidden");
                let error = response.header("error").expect("error header");
                assert!(error.contains("v or h"));
                assert!(!response.body().is_empty());
            }
            RequestOutcome::Forward(_) => panic!("expected terminal response"),
        }
    }

    #[test]
    fn test_image_with_version_allowed() {
        let outcome = viewer_request(&table(), Request::from_target("/logo.png?v=3"));
        assert_forwarded(outcome, "/logo.png?v=3");
    }

    #[test]
    fn test_image_with_hash_allowed() {
        let outcome = viewer_request(&table(), Request::from_target("/photo.jpg?h=abc123"));
        assert_forwarded(outcome, "/photo.jpg?h=abc123");
    }

    #[test]
    fn test_both_markers_allowed() {
        let outcome = viewer_request(&table(), Request::from_target("/logo.png?v=3&h=abc"));
        assert!(outcome.is_forward());
    }

    #[test]
    fn test_empty_marker_treated_as_absent() {
        let outcome = viewer_request(&table(), Request::from_target("/logo.png?v="));
        assert!(!outcome.is_forward());
        let outcome = viewer_request(&table(), Request::from_target("/logo.png?v=&h="));
        assert!(!outcome.is_forward());
    }

    #[test]
    fn test_query_string_forwarded_unstripped() {
        // The cache-key stage still needs to see v/h downstream.
        let outcome = viewer_request(
            &table(),
            Request::from_target("/logo.png?v=3&utm_source=x"),
        );
        assert_forwarded(outcome, "/logo.png?v=3&utm_source=x");
    }

    #[test]
    fn test_ungated_path_always_allowed() {
        assert!(viewer_request(&table(), Request::from_target("/index.html")).is_forward());
        assert!(viewer_request(&table(), Request::from_target("/index.html?x=1")).is_forward());
    }

    #[test]
    fn test_unknown_extension_never_inspected() {
        // A .gif carrying v/h is still ungated: markers on ungated paths
        // are ignored, not validated.
        assert!(viewer_request(&table(), Request::from_target("/logo.gif")).is_forward());
        assert!(viewer_request(&table(), Request::from_target("/logo.gif?v=")).is_forward());
    }
}
