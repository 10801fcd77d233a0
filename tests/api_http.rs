// tests/api_http.rs
//
// HTTP-level tests for the public API Router without opening sockets.
// We exercise the router directly via tower::ServiceExt::oneshot.
//
// Covered:
// - GET /health
// - POST /claims/priority
// - POST /insights/report (fallback mode shape)

use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::json;
use serde_json::Value as Json;
use tower::ServiceExt as _; // for `oneshot`

use claims_insight_engine::insights::ai_adapter::DisabledClient;
use claims_insight_engine::{create_router, AppState};

const BODY_LIMIT: usize = 1024 * 1024; // 1MB, safe for tests

/// Build the same Router the binary uses, with inference disabled so the
/// handlers stay deterministic and offline.
fn test_router() -> Router {
    create_router(AppState::new(Arc::new(DisabledClient)))
}

async fn json_body(resp: axum::response::Response) -> Json {
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn api_health_returns_200_and_ok_body() {
    let app = test_router();

    let req = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .expect("build GET /health");

    let resp = app.oneshot(req).await.expect("oneshot /health");
    assert_eq!(resp.status(), StatusCode::OK, "health should be 200");

    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body")
        .to_vec();
    let body = String::from_utf8(bytes).expect("utf8");
    assert_eq!(body.trim(), "ok");
}

#[tokio::test]
async fn api_priority_classifies_via_keywords() {
    let app = test_router();

    let payload = json!({ "description": "sparking and smoke, fire hazard" });
    let req = Request::builder()
        .method("POST")
        .uri("/claims/priority")
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("build POST /claims/priority");

    let resp = app.oneshot(req).await.expect("oneshot /claims/priority");
    assert_eq!(resp.status(), StatusCode::OK);

    let body = json_body(resp).await;
    assert_eq!(body["priority"], "High");
}

#[tokio::test]
async fn api_report_returns_fallback_shape() {
    let app = test_router();

    let payload = json!({
        "claims": [{
            "id": 1,
            "claim_number": "CLM-00001",
            "issue_summary": "Battery drains fast",
            "detailed_description": "battery draining quickly even with light use",
            "product_name": "Phone X"
        }],
        "rejected_claims": [],
        "top_claimed_products": [],
        "slow_processing_claims": []
    });
    let req = Request::builder()
        .method("POST")
        .uri("/insights/report")
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("build POST /insights/report");

    let resp = app.oneshot(req).await.expect("oneshot /insights/report");
    assert_eq!(resp.status(), StatusCode::OK);

    let body = json_body(resp).await;
    assert_eq!(body["ai_powered"], false);
    assert_eq!(body["claim_reasons"]["total_claims_analyzed"], 1);
    assert_eq!(
        body["claim_reasons"]["categories"][0]["category"],
        "Battery issue"
    );
    assert_eq!(body["claim_reasons"]["categories"][0]["percentage"], 100.0);
    assert_eq!(
        body["summary"],
        "AI insights unavailable - API key not configured"
    );
}
