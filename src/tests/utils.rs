// src/tests/utils.rs
use crate::board::Board;
use crate::db::connection::{init_db, Database};
use crate::identity::IdentityDeriver;
use crate::images::DiskImageStore;
use crate::responses::error_to_response;
use crate::router::handle;
use crate::state::AppState;
use astra::{Body, Request, Response};
use serde_json::Value;
use std::io::Read;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_path(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("board_{tag}_{nanos}"))
}

/// Fresh state over a temp-file database and uploads dir.
pub fn test_state(tag: &str) -> AppState {
    let base = unique_path(tag);
    let db = Database::new(format!("{}.sqlite", base.display()));
    init_db(&db).expect("Failed to initialize DB");

    AppState {
        db,
        board: Board::new(IdentityDeriver::unkeyed()),
        images: DiskImageStore::new(base.with_extension("uploads")).unwrap(),
        cors_origins: vec!["http://localhost:5173".to_string()],
    }
}

pub fn request(method: &str, uri: &str, body: Option<Value>) -> Request {
    let body = match body {
        Some(v) => Body::from(v.to_string()),
        None => Body::empty(),
    };
    http::Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(body)
        .unwrap()
}

/// Run a request from `ip` and return status plus decoded JSON body.
pub fn call(state: &AppState, ip: &str, req: Request) -> (u16, Value) {
    let resp = match handle(req, ip, state) {
        Ok(resp) => resp,
        Err(err) => error_to_response(&err),
    };
    let status = resp.status().as_u16();
    (status, body_json(resp))
}

pub fn get(state: &AppState, uri: &str) -> (u16, Value) {
    call(state, "10.0.0.1", request("GET", uri, None))
}

pub fn post(state: &AppState, ip: &str, uri: &str, body: Value) -> (u16, Value) {
    call(state, ip, request("POST", uri, Some(body)))
}

pub fn body_bytes(resp: Response) -> Vec<u8> {
    let mut buf = Vec::new();
    resp.into_body().reader().read_to_end(&mut buf).unwrap();
    buf
}

pub fn body_json(resp: Response) -> Value {
    let bytes = body_bytes(resp);
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a building through the API and return its id.
pub fn new_building(state: &AppState, address: &str) -> i64 {
    let (status, body) = post(
        state,
        "10.0.0.1",
        "/buildings",
        serde_json::json!({ "lat": 55.75, "lng": 37.61, "address": address }),
    );
    assert_eq!(status, 200, "{body}");
    body["id"].as_i64().unwrap()
}
