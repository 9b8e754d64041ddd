// src/tests/router_tests/report_tests.rs
use crate::tests::utils::{get, new_building, post, test_state};
use base64::Engine;
use serde_json::{json, Value};

fn report_body(building_id: i64, severity: &str) -> Value {
    json!({
        "building_id": building_id,
        "category": "heating",
        "severity": severity,
        "periodicity": "always",
        "text": "No heating since Monday",
    })
}

#[test]
fn submit_and_list_reports() {
    let state = test_state("rep_submit");
    let b = new_building(&state, "Lenina 5");

    let (status, body) = post(&state, "10.0.0.1", "/reports", report_body(b, "high"));
    assert_eq!(status, 200, "{body}");
    assert_eq!(body["status"], "open");
    assert_eq!(body["text"], "No heating since Monday");
    assert_eq!(body["problem_confirmations"], 0);
    assert_eq!(body["image_path"], Value::Null);

    for uri in [format!("/buildings/{b}/reports"), format!("/reports/buildings/{b}/reports")] {
        let (status, list) = get(&state, &uri);
        assert_eq!(status, 200);
        assert_eq!(list.as_array().unwrap().len(), 1);
        assert_eq!(list[0]["id"], body["id"]);
    }
}

#[test]
fn rejects_unknown_enum_and_short_text() {
    let state = test_state("rep_bad");
    let b = new_building(&state, "Lenina 5");

    let mut bad = report_body(b, "catastrophic");
    let (status, _) = post(&state, "10.0.0.1", "/reports", bad.clone());
    assert_eq!(status, 422);

    bad["severity"] = json!("low");
    bad["text"] = json!("hey");
    let (status, _) = post(&state, "10.0.0.1", "/reports", bad);
    assert_eq!(status, 422);

    let (status, body) = post(&state, "10.0.0.1", "/reports", report_body(b + 100, "low"));
    assert_eq!(status, 404);
    assert_eq!(body["detail"], "building not found");
}

#[test]
fn same_address_same_building_is_deduplicated() {
    let state = test_state("rep_dedup");
    let b = new_building(&state, "Lenina 5");

    let (status, _) = post(&state, "10.0.0.1", "/reports", report_body(b, "low"));
    assert_eq!(status, 200);

    let (status, body) = post(&state, "10.0.0.1", "/reports", report_body(b, "low"));
    assert_eq!(status, 400);
    assert!(body["detail"].as_str().unwrap().contains("already reported"));

    let (status, _) = post(&state, "10.0.0.2", "/reports", report_body(b, "low"));
    assert_eq!(status, 200);
}

#[test]
fn report_with_image_is_served_back() {
    let state = test_state("rep_img");
    let b = new_building(&state, "Lenina 5");
    let png = vec![0x89, b'P', b'N', b'G', 1, 2, 3];

    let mut body = report_body(b, "medium");
    body["image"] = json!({
        "content_type": "image/png",
        "data": base64::engine::general_purpose::STANDARD.encode(&png),
    });
    let (status, report) = post(&state, "10.0.0.1", "/reports", body);
    assert_eq!(status, 200, "{report}");

    let path = report["image_path"].as_str().unwrap().to_string();
    assert!(path.starts_with("/uploads/") && path.ends_with(".png"));

    let resp = crate::router::handle(
        crate::tests::utils::request("GET", &path, None),
        "10.0.0.1",
        &state,
    )
    .unwrap();
    assert_eq!(resp.headers()["Content-Type"], "image/png");
    assert_eq!(crate::tests::utils::body_bytes(resp), png);
}

#[test]
fn non_image_upload_is_rejected() {
    let state = test_state("rep_gif");
    let b = new_building(&state, "Lenina 5");

    let mut body = report_body(b, "medium");
    body["image"] = json!({ "content_type": "text/plain", "data": "aGVsbG8=" });
    let (status, resp) = post(&state, "10.0.0.1", "/reports", body);
    assert_eq!(status, 400);
    assert_eq!(resp["detail"], "only images are allowed");

    let (_, list) = get(&state, &format!("/buildings/{b}/reports"));
    assert!(list.as_array().unwrap().is_empty());
}

#[test]
fn problem_confirmations_escalate_and_dedupe() {
    let state = test_state("rep_problem");
    let b = new_building(&state, "Lenina 5");
    let (_, report) = post(&state, "10.0.0.1", "/reports", report_body(b, "low"));
    let uri = format!("/reports/{}/confirm-problem", report["id"]);

    for (i, ip) in ["10.0.1.1", "10.0.1.2", "10.0.1.3"].iter().enumerate() {
        let (status, body) = post(&state, ip, &uri, json!({}));
        assert_eq!(status, 200);
        assert_eq!(body["confirmations"], i as i64 + 1);
    }

    let (status, _) = post(&state, "10.0.1.3", &uri, json!({}));
    assert_eq!(status, 400);

    let (_, list) = get(&state, &format!("/buildings/{b}/reports"));
    assert_eq!(list[0]["severity"], "medium");
    assert_eq!(list[0]["problem_confirmations"], 3);
}

#[test]
fn three_fixed_votes_resolve() {
    let state = test_state("rep_resolve");
    let b = new_building(&state, "Lenina 5");
    let (_, report) = post(&state, "10.0.0.1", "/reports", report_body(b, "low"));
    let uri = format!("/reports/{}/confirm-resolved", report["id"]);

    post(&state, "10.0.2.1", &uri, json!({}));
    post(&state, "10.0.2.2", &uri, json!({}));
    let (status, body) = post(&state, "10.0.2.3", &uri, json!({}));
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "confirmations": 3, "status": "resolved" }));

    let (status, body) = post(&state, "10.0.2.4", &uri, json!({}));
    assert_eq!(status, 400);
    assert_eq!(body["detail"], "report is already closed");

    let (status, _) = post(&state, "10.0.2.4", "/reports/999/confirm-resolved", json!({}));
    assert_eq!(status, 404);
}
