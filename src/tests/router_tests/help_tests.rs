// src/tests/router_tests/help_tests.rs
use crate::tests::utils::{call, get, new_building, post, request, test_state};
use serde_json::{json, Value};

fn help_body(building_id: i64) -> Value {
    json!({
        "building_id": building_id,
        "title": "Need a drill",
        "description": "Hanging shelves on Saturday",
        "category": "tools",
    })
}

fn respond(state: &crate::state::AppState, help_id: &Value, user_hash: Option<&str>) -> (u16, Value) {
    let mut req = request("POST", &format!("/help/{help_id}/respond"), None);
    if let Some(h) = user_hash {
        req.headers_mut().insert("X-User-Hash", h.parse().unwrap());
    }
    call(state, "10.0.0.1", req)
}

#[test]
fn help_request_lifecycle() {
    let state = test_state("help_flow");
    let b = new_building(&state, "Lenina 5");

    let (status, help) = post(&state, "10.0.0.1", "/help", help_body(b));
    assert_eq!(status, 200, "{help}");
    assert_eq!(help["status"], "open");
    assert_eq!(help["category"], "tools");
    assert!(help.get("user_hash").is_none());

    let (_, list) = get(&state, "/buildings");
    assert_eq!(list[0]["help_count"], 1);

    let (status, body) = post(&state, "10.0.0.1", &format!("/help/{}/close", help["id"]), json!({}));
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "status": "closed" }));

    let (_, list) = get(&state, "/buildings");
    assert_eq!(list[0]["help_count"], 0);
}

#[test]
fn building_caps_open_help_at_three() {
    let state = test_state("help_cap");
    let b = new_building(&state, "Lenina 5");

    for _ in 0..3 {
        let (status, _) = post(&state, "10.0.0.1", "/help", help_body(b));
        assert_eq!(status, 200);
    }
    let (status, body) = post(&state, "10.0.0.1", "/help", help_body(b));
    assert_eq!(status, 400);
    assert!(body["detail"].as_str().unwrap().contains("too many"));

    let (_, all) = get(&state, &format!("/help?building_id={b}"));
    assert_eq!(all.as_array().unwrap().len(), 3);
}

#[test]
fn responses_are_counted_once_per_hash() {
    let state = test_state("help_resp");
    let b = new_building(&state, "Lenina 5");
    let (_, help) = post(&state, "10.0.0.1", "/help", help_body(b));

    assert_eq!(respond(&state, &help["id"], Some("abc")).1, json!({ "message": "ok" }));
    assert_eq!(
        respond(&state, &help["id"], Some("abc")).1,
        json!({ "message": "already responded" })
    );
    respond(&state, &help["id"], Some("def"));

    let (status, body) = get(&state, &format!("/help/{}/responses", help["id"]));
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "count": 2 }));

    let (status, _) = respond(&state, &help["id"], None);
    assert_eq!(status, 400);

    let (status, _) = respond(&state, &json!(999), Some("abc"));
    assert_eq!(status, 404);
}
