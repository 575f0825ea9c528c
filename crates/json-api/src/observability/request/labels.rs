//! Bounded metric and span labels for incoming requests.
//!
//! Requests are labelled with the route pattern they address, never with the
//! raw path, so ids, counts and file names cannot mint new series.

use salvo::http::Method;

/// Label for paths that match no known route.
pub(super) const UNMATCHED_ROUTE: &str = "unmatched";

/// Every route the server mounts. Literal segments are listed before
/// parameters that would also match them; the first match wins.
const ROUTE_PATTERNS: &[&str] = &[
    "/healthcheck",
    "/metrics",
    "/public/uploads/{**path}",
    "/api-doc/openapi.json",
    "/docs",
    "/docs/{**path}",
    "/api/v1/products",
    "/api/v1/products/get/count",
    "/api/v1/products/get/featured/{count}",
    "/api/v1/products/{product}",
    "/api/v1/products/{product}/image",
    "/api/v1/products/{product}/gallery-images",
    "/api/v1/categories",
    "/api/v1/categories/{category}",
    "/api/v1/users",
    "/api/v1/users/register",
    "/api/v1/users/login",
    "/api/v1/users/logout",
    "/api/v1/users/get/count",
    "/api/v1/users/{user}",
    "/api/v1/orders",
    "/api/v1/orders/active",
    "/api/v1/orders/get/count",
    "/api/v1/orders/get/totalsales",
    "/api/v1/orders/get/userorder/{user}",
    "/api/v1/orders/{order}",
    "/api/v1/orders/{order}/status",
    "/api/v1/orders/{order}/items",
    "/api/v1/orders/{order}/items/{item}",
    "/api/v1/payments/stripe/intents",
    "/api/v1/payments/stripe/webhook",
    "/api/v1/payments/paypal/orders",
    "/api/v1/payments/paypal/orders/{id}/capture",
];

/// The route pattern `path` addresses, or [`UNMATCHED_ROUTE`].
pub(super) fn route_label(path: &str) -> &'static str {
    let path: Vec<&str> = segments(path).collect();

    ROUTE_PATTERNS
        .iter()
        .copied()
        .find(|pattern| pattern_matches(pattern, &path))
        .unwrap_or(UNMATCHED_ROUTE)
}

static STANDARD_METHODS: [Method; 7] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::PATCH,
    Method::HEAD,
    Method::OPTIONS,
];

/// Standard methods by name; extension methods share one label.
pub(super) fn method_label(method: &Method) -> &'static str {
    STANDARD_METHODS
        .iter()
        .find(|standard| *standard == method)
        .map_or("OTHER", Method::as_str)
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

fn pattern_matches(pattern: &str, path: &[&str]) -> bool {
    let mut remaining = path.iter();

    for expected in segments(pattern) {
        if expected.starts_with("{**") {
            return remaining.next().is_some();
        }

        let Some(actual) = remaining.next() else {
            return false;
        };

        let is_param = expected.starts_with('{') && expected.ends_with('}');

        if !is_param && expected != *actual {
            return false;
        }
    }

    remaining.next().is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uploaded_file_names_share_one_label() {
        for path in [
            "/public/uploads/image-0190a1b2c3d47e8f9a0b1c2d3e4f5a7e.png",
            "/public/uploads/images-0190a1b2c3d47e8f9a0b1c2d3e4f5a7f.jpeg",
        ] {
            assert_eq!(route_label(path), "/public/uploads/{**path}");
        }

        assert_eq!(route_label("/public/uploads"), UNMATCHED_ROUTE);
    }

    #[test]
    fn featured_count_is_collapsed() {
        for count in ["1", "17", "999999"] {
            assert_eq!(
                route_label(&format!("/api/v1/products/get/featured/{count}")),
                "/api/v1/products/get/featured/{count}"
            );
        }
    }

    #[test]
    fn paypal_order_ids_are_collapsed() {
        assert_eq!(
            route_label("/api/v1/payments/paypal/orders/5O190127TN364715T/capture"),
            "/api/v1/payments/paypal/orders/{id}/capture"
        );
        assert_eq!(
            route_label("/api/v1/payments/paypal/orders"),
            "/api/v1/payments/paypal/orders"
        );
    }

    #[test]
    fn literal_routes_win_over_parameters() {
        assert_eq!(route_label("/api/v1/orders/active"), "/api/v1/orders/active");
        assert_eq!(route_label("/api/v1/orders/get/count"), "/api/v1/orders/get/count");
        assert_eq!(route_label("/api/v1/users/login"), "/api/v1/users/login");
        assert_eq!(route_label("/api/v1/products/get/count"), "/api/v1/products/get/count");
    }

    #[test]
    fn resource_ids_are_collapsed() {
        let order = "0190a1b2-c3d4-7e8f-9a0b-1c2d3e4f5a6b";
        let item = "0190a1b2-c3d4-7e8f-9a0b-1c2d3e4f5a6c";

        assert_eq!(route_label(&format!("/api/v1/orders/{order}")), "/api/v1/orders/{order}");
        assert_eq!(
            route_label(&format!("/api/v1/orders/{order}/items/{item}")),
            "/api/v1/orders/{order}/items/{item}"
        );
        assert_eq!(
            route_label("/api/v1/products/not-a-uuid/gallery-images"),
            "/api/v1/products/{product}/gallery-images"
        );
    }

    #[test]
    fn trailing_slashes_are_ignored() {
        assert_eq!(route_label("/api/v1/products/"), "/api/v1/products");
        assert_eq!(route_label("/healthcheck//"), "/healthcheck");
    }

    #[test]
    fn unknown_paths_share_one_label() {
        for path in ["/", "/wp-login.php", "/api/v1/orders/a/b/c/d", "/api/v2/products"] {
            assert_eq!(route_label(path), UNMATCHED_ROUTE, "{path}");
        }
    }

    #[test]
    fn extension_methods_share_one_label() {
        let custom = Method::from_bytes(b"PURGE").expect("valid extension method");

        assert_eq!(method_label(&Method::PUT), "PUT");
        assert_eq!(method_label(&custom), "OTHER");
    }
}
