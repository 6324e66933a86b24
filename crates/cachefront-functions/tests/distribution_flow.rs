//! End-to-end flow through the simulated distribution: validator, keyed
//! cache lookup, origin fetch, annotator, store.

use cachefront_functions::pipeline::{CacheStatus, EdgePipeline, StaticOrigin};
use cachefront_http::Request;
use cachefront_policy::{AssetClass, PolicyTable};

fn edge() -> EdgePipeline<StaticOrigin> {
    let origin = StaticOrigin::new()
        .with_object("/logo.png", "png bytes")
        .with_object("/photo.jpg", "jpg bytes")
        .with_object("/index.html", "<html>home</html>");
    EdgePipeline::new(PolicyTable::distribution_defaults(), origin)
}

#[test]
fn unversioned_image_is_denied_without_origin_contact() {
    let mut edge = edge();
    let served = edge.serve(Request::from_target("/logo.png"));

    assert_eq!(served.status, CacheStatus::Deny);
    assert_eq!(served.response.status(), 403);
    assert_eq!(served.asset_class, AssetClass::VersionedImage);
    assert!(served.cache_key.is_none());
    assert_eq!(edge.origin_fetches(), 0);
}

#[test]
fn versioned_image_miss_gets_year_long_immutable_caching() {
    let mut edge = edge();
    let served = edge.serve(Request::from_target("/logo.png?v=3"));

    assert_eq!(served.status, CacheStatus::Miss);
    assert_eq!(served.response.status(), 200);
    assert_eq!(served.response.body(), "png bytes");
    assert_eq!(
        served.response.header("cache-control"),
        Some("public, max-age=31536000, immutable")
    );
}

#[test]
fn tracking_parameter_shares_the_cache_entry() {
    let mut edge = edge();
    let plain = edge.serve(Request::from_target("/logo.png?v=3"));
    let tracked = edge.serve(Request::from_target("/logo.png?v=3&utm_source=x"));

    assert_eq!(plain.status, CacheStatus::Miss);
    assert_eq!(tracked.status, CacheStatus::Hit);
    assert_eq!(plain.cache_key, tracked.cache_key);
    assert_eq!(edge.origin_fetches(), 1);
}

#[test]
fn version_bump_creates_a_distinct_entry() {
    let mut edge = edge();
    let v3 = edge.serve(Request::from_target("/logo.png?v=3"));
    let v4 = edge.serve(Request::from_target("/logo.png?v=4"));

    assert_eq!(v3.status, CacheStatus::Miss);
    assert_eq!(v4.status, CacheStatus::Miss);
    assert_ne!(v3.cache_key, v4.cache_key);
    assert_eq!(edge.origin_fetches(), 2);
    assert_eq!(edge.stored_entries(), 2);
}

#[test]
fn html_always_passes_and_never_caches() {
    let mut edge = edge();
    let served = edge.serve(Request::from_target("/index.html"));

    assert_eq!(served.status, CacheStatus::Bypass);
    assert_eq!(served.asset_class, AssetClass::Other);
    assert_eq!(
        served.response.header("cache-control"),
        Some("public, max-age=0, must-revalidate")
    );

    // Repeat requests keep going to the origin.
    edge.serve(Request::from_target("/index.html"));
    assert_eq!(edge.origin_fetches(), 2);
}

#[test]
fn hash_marker_satisfies_the_gate() {
    let mut edge = edge();
    let served = edge.serve(Request::from_target("/photo.jpg?h=abc123"));

    assert_eq!(served.status, CacheStatus::Miss);
    assert_eq!(
        served.response.header("cache-control"),
        Some("public, max-age=31536000, immutable")
    );
}

#[test]
fn origin_miss_is_annotated_but_still_a_404() {
    let mut edge = edge();
    let served = edge.serve(Request::from_target("/absent.png?v=1"));

    assert_eq!(served.response.status(), 404);
    // The annotator branches on the path, not the status; a 404 under the
    // image rule is still stored for a year, which is why publishers must
    // bump the marker when the object appears.
    assert_eq!(served.status, CacheStatus::Miss);
}

#[test]
fn classification_is_consistent_across_both_functions() {
    let table = PolicyTable::distribution_defaults();
    for target in [
        "/logo.png",
        "/a/b/c/photo.jpg",
        "/index.html",
        "/logo.gif",
        "/",
    ] {
        let request = Request::from_target(target);
        let from_table = table.classify(request.path());
        let gated = table.match_rule(request.path()).policy.require_version_marker;
        assert_eq!(
            from_table == AssetClass::VersionedImage,
            gated,
            "classification diverged for {}",
            target
        );
    }
}
