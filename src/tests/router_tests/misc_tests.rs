// src/tests/router_tests/misc_tests.rs
use crate::router::serve;
use crate::tests::utils::{body_json, get, request, test_state};
use http::header;
use std::net::SocketAddr;

#[test]
fn health_says_ok() {
    let state = test_state("health");
    let (status, body) = get(&state, "/");
    assert_eq!(status, 200);
    assert_eq!(body, serde_json::json!({ "ok": true }));
}

#[test]
fn unknown_route_is_json_404() {
    let state = test_state("nope");
    let (status, body) = get(&state, "/nowhere");
    assert_eq!(status, 404);
    assert_eq!(body["detail"], "route not found");

    let (status, _) = get(&state, "/reports/abc/confirm-problem");
    assert_eq!(status, 404);
}

#[test]
fn bad_path_id_is_validation_error() {
    let state = test_state("badid");
    let (status, body) = get(&state, "/buildings/abc/reports");
    assert_eq!(status, 422);
    assert!(body["detail"].as_str().unwrap().contains("invalid id"));
}

#[test]
fn preflight_and_cors_headers() {
    let state = test_state("cors");
    let peer: Option<SocketAddr> = "127.0.0.1:40000".parse().ok();

    let mut req = request("OPTIONS", "/reports", None);
    req.headers_mut()
        .insert("Origin", "http://localhost:5173".parse().unwrap());
    let resp = serve(req, peer, &state);
    assert_eq!(resp.status(), 204);
    assert_eq!(
        resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:5173"
    );

    let mut req = request("GET", "/missing", None);
    req.headers_mut()
        .insert("Origin", "http://localhost:5173".parse().unwrap());
    let resp = serve(req, peer, &state);
    assert_eq!(resp.status(), 404);
    assert!(resp.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    assert_eq!(body_json(resp)["detail"], "route not found");
}

#[test]
fn missing_peer_address_is_rejected() {
    let state = test_state("nopeer");
    let resp = serve(request("GET", "/", None), None, &state);
    assert_eq!(resp.status(), 400);
}
