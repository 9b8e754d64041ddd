// src/tests/router_tests/analytics_tests.rs
use crate::tests::utils::{get, new_building, post, test_state};
use serde_json::json;

#[test]
fn analytics_endpoints_summarize_reports() {
    let state = test_state("analytics");
    let quiet = new_building(&state, "Quiet 1");
    let busy = new_building(&state, "Busy 2");

    for (ip, severity) in [("10.0.0.1", "high"), ("10.0.0.2", "high"), ("10.0.0.3", "low")] {
        let (status, _) = post(
            &state,
            ip,
            "/reports",
            json!({
                "building_id": busy,
                "category": "noise",
                "severity": severity,
                "periodicity": "often",
                "text": "Loud music every night",
            }),
        );
        assert_eq!(status, 200);
    }

    let (status, top) = get(&state, "/analytics/top-buildings");
    assert_eq!(status, 200);
    assert_eq!(top[0], json!({ "id": busy, "address": "Busy 2", "reports_count": 3 }));
    assert_eq!(top[1]["id"], quiet);
    assert_eq!(top[1]["reports_count"], 0);

    let (_, stats) = get(&state, "/analytics/severity-stats");
    let stats = stats.as_array().unwrap();
    assert!(stats.contains(&json!({ "severity": "high", "count": 2 })));
    assert!(stats.contains(&json!({ "severity": "low", "count": 1 })));

    let (_, days) = get(&state, "/analytics/reports-by-day");
    let days = days.as_array().unwrap();
    let total: i64 = days.iter().map(|d| d["count"].as_i64().unwrap()).sum();
    assert_eq!(total, 3);
}
