// responses/cors.rs
use astra::{Body, Response, ResponseBuilder};
use http::header::{self, HeaderValue};

const ALLOW_METHODS: &str = "GET, POST, PATCH, OPTIONS";
const ALLOW_HEADERS: &str = "Content-Type, X-User-Hash";

/// Echo the request origin back when it is on the allow list.
/// Requests from other origins get no CORS headers at all.
pub fn apply_cors(resp: &mut Response, origin: Option<&str>, allowed: &[String]) {
    let Some(origin) = origin.filter(|o| is_allowed(o, allowed)) else {
        return;
    };
    let Ok(value) = HeaderValue::from_str(origin) else {
        return;
    };

    let headers = resp.headers_mut();
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("true"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    headers.insert(header::VARY, HeaderValue::from_static("Origin"));
}

fn is_allowed(origin: &str, allowed: &[String]) -> bool {
    allowed.iter().any(|a| a == "*" || a == origin)
}

/// Answer to an `OPTIONS` preflight; headers are added by `apply_cors`.
pub fn preflight_response() -> Response {
    ResponseBuilder::new()
        .status(204)
        .body(Body::empty())
        .unwrap_or_else(|_| Response::new(Body::empty()))
}
