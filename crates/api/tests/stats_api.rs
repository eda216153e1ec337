//! HTTP-level integration tests for `/stats`.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, create_customer, create_repair, get, get_auth, register};
use serde_json::json;

#[tokio::test]
async fn empty_account_gets_zeroed_report() {
    let app = build_test_app();
    let token = register(&app, "alice").await;

    let response = get_auth(app, "/api/v1/stats", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["data"],
        json!({
            "total_customers": 0,
            "total_repairs": 0,
            "total_income": 0.0,
            "repair_status_breakdown": {},
            "repair_device_type_breakdown": {},
            "recent_activity": { "new_customers": 0, "new_repairs": 0 },
        })
    );
}

#[tokio::test]
async fn report_covers_own_subtree() {
    let app = build_test_app();
    let alice = register(&app, "alice").await;
    let bob = register(&app, "bob").await;
    let c1 = create_customer(&app, &alice, "c1@client.test").await;
    let c2 = create_customer(&app, &alice, "c2@client.test").await;
    create_repair(&app, &alice, c1, 50.0, "pending").await;
    create_repair(&app, &alice, c1, 30.0, "completed").await;
    create_repair(&app, &alice, c2, 20.0, "pending").await;
    let b1 = create_customer(&app, &bob, "b1@client.test").await;
    create_repair(&app, &bob, b1, 1000.0, "cancelled").await;

    let json = body_json(get_auth(app, "/api/v1/stats", &alice).await).await;
    let data = &json["data"];

    assert_eq!(data["total_customers"], 2);
    assert_eq!(data["total_repairs"], 3);
    assert_eq!(data["total_income"], 100.0);
    assert_eq!(
        data["repair_status_breakdown"],
        json!({ "pending": 2, "completed": 1 })
    );
    assert_eq!(data["repair_device_type_breakdown"], json!({ "laptop": 3 }));
    assert_eq!(
        data["recent_activity"],
        json!({ "new_customers": 2, "new_repairs": 3 })
    );
}

#[tokio::test]
async fn stats_require_authentication() {
    let app = build_test_app();
    let response = get(app, "/api/v1/stats").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
