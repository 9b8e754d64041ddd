// src/tests/router_tests/building_tests.rs
use crate::tests::utils::{call, get, new_building, post, request, test_state};
use serde_json::json;

#[test]
fn create_then_list_buildings() {
    let state = test_state("bld_list");
    let id = new_building(&state, "Lenina 5");

    let (status, body) = get(&state, "/buildings");
    assert_eq!(status, 200);
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["id"], id);
    assert_eq!(list[0]["status"], "green");
    assert_eq!(list[0]["positive_count"], 0);
    assert_eq!(list[0]["help_count"], 0);
}

#[test]
fn bbox_applies_only_with_all_four_edges() {
    let state = test_state("bld_bbox");
    new_building(&state, "Inside");

    let (_, body) = get(&state, "/buildings?south=0&west=0&north=1&east=1");
    assert_eq!(body.as_array().unwrap().len(), 0);

    let (_, body) = get(&state, "/buildings?south=0&west=0&north=1");
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (_, body) = get(&state, "/buildings?south=55&west=37&north=56&east=38");
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, _) = get(&state, "/buildings?south=x&west=0&north=1&east=1");
    assert_eq!(status, 422);
}

#[test]
fn create_rejects_bad_coordinates() {
    let state = test_state("bld_bad");
    let (status, _) = post(&state, "10.0.0.1", "/buildings", json!({ "lat": 100.0, "lng": 0.0 }));
    assert_eq!(status, 422);

    let (status, _) = post(&state, "10.0.0.1", "/buildings", json!({ "lng": 0.0 }));
    assert_eq!(status, 422);
}

#[test]
fn patch_position_moves_the_pin() {
    let state = test_state("bld_move");
    let id = new_building(&state, "Lenina 5");

    let (status, body) = call(
        &state,
        "10.0.0.1",
        request("PATCH", &format!("/buildings/{id}/position"), Some(json!({ "lat": 10.5 }))),
    );
    assert_eq!(status, 200);
    assert_eq!(body["lat"], 10.5);
    assert_eq!(body["lng"], 37.61);

    let (status, _) = call(
        &state,
        "10.0.0.1",
        request("PATCH", "/buildings/999/position", Some(json!({ "lat": 1.0 }))),
    );
    assert_eq!(status, 404);
}

#[test]
fn positive_confirmation_once_per_day() {
    let state = test_state("bld_pos");
    let id = new_building(&state, "Lenina 5");
    let uri = format!("/buildings/{id}/confirm-positive");

    let (status, body) = post(&state, "10.0.0.1", &uri, json!({}));
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "success": true }));

    let (status, body) = post(&state, "10.0.0.2", &uri, json!({}));
    assert_eq!(status, 400);
    assert!(body["detail"].as_str().unwrap().contains("24 hours"));

    let (_, body) = get(&state, "/buildings");
    assert_eq!(body[0]["positive_count"], 1);

    let (status, _) = post(&state, "10.0.0.1", "/buildings/999/confirm-positive", json!({}));
    assert_eq!(status, 404);
}
