//! The viewer-response annotator.

use cachefront_http::{Request, Response};
use cachefront_policy::PolicyTable;

/// Attach the cache-control header for an outbound response.
///
/// Resolves the same routing-table rule as the validator did for this
/// request and overwrites `Cache-Control` with that rule's policy value:
/// long-lived immutable caching for version-gated assets, revalidate-
/// always for everything else. Runs after the body is finalized and
/// before the CDN stores or transmits the response, so the value written
/// here, not the origin's, is what the cache store honors.
///
/// Status and body are never touched, and overwriting (rather than
/// appending) makes the function idempotent.
pub fn viewer_response(table: &PolicyTable, request: &Request, mut response: Response) -> Response {
    let rule = table.match_rule(request.path());
    if rule.bindings.viewer_response {
        response.set_header("cache-control", rule.policy.cache_control_header());
    }
    response
}
