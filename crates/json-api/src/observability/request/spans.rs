//! Route labels for spans and metrics.

/// Label for paths that match no mounted route.
pub(super) const UNMATCHED_ROUTE: &str = "other";

/// Map a request path onto the route template it is served by.
///
/// Labels come from a fixed set so request paths cannot grow metric
/// cardinality.
pub(super) fn route_label(path: &str) -> &'static str {
    let mut segments = path
        .trim_matches('/')
        .split('/')
        .filter(|segment| !segment.is_empty());

    match (segments.next(), segments.next(), segments.next()) {
        (None, _, _) => "/",
        (Some("products"), None, _) => "/products",
        (Some("product"), None, _) => "/product",
        (Some("product"), Some(_), None) => "/product/{id}",
        (Some("healthcheck"), None, _) => "/healthcheck",
        (Some("metrics"), None, _) => "/metrics",
        _ => UNMATCHED_ROUTE,
    }
}
