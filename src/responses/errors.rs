// responses/errors.rs
use crate::errors::ServerError;
use astra::{Body, Response, ResponseBuilder};
use serde_json::json;

/// Convert a ServerError into a `{"detail": ...}` JSON response.
/// Store and disk failures are not described to the client.
pub fn error_to_response(err: &ServerError) -> Response {
    let status = err.status();
    let detail = if err.is_internal() {
        "internal server error".to_string()
    } else {
        err.to_string()
    };
    json_error_response(status, &detail)
}

fn json_error_response(status: u16, detail: &str) -> Response {
    let body = json!({ "detail": detail }).to_string();

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::from(body))
        .unwrap_or_else(|_| Response::new(Body::empty()))
}
