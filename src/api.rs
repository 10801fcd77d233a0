use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;

use crate::claims::{ClaimRecord, ProductClaimStat, SlowProcessingStat};
use crate::insights::{build_insights_report, DynInference, InsightsReport};
use crate::priority::{PriorityEngine, PriorityLevel};

#[derive(Clone)]
pub struct AppState {
    ai: DynInference,
}

impl AppState {
    pub fn new(ai: DynInference) -> Self {
        Self { ai }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/claims/priority", post(infer_priority))
        .route("/insights/report", post(insights_report))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(serde::Deserialize)]
struct PriorityReq {
    description: String,
}

#[derive(serde::Serialize)]
struct PriorityResp {
    priority: PriorityLevel,
}

/// Called by the claims service at claim creation; the result is stored on
/// the claim by the caller.
async fn infer_priority(
    State(state): State<AppState>,
    Json(body): Json<PriorityReq>,
) -> Json<PriorityResp> {
    let engine = PriorityEngine::new(state.ai.clone());
    let priority = engine.infer_priority(&body.description).await;
    Json(PriorityResp { priority })
}

#[derive(serde::Deserialize)]
struct ReportReq {
    #[serde(default)]
    claims: Vec<ClaimRecord>,
    #[serde(default)]
    rejected_claims: Vec<ClaimRecord>,
    #[serde(default)]
    top_claimed_products: Vec<ProductClaimStat>,
    #[serde(default)]
    slow_processing_claims: Vec<SlowProcessingStat>,
}

/// Reporting endpoint: batches and precomputed stats in, full report out.
/// Filtering/scoping happened upstream.
async fn insights_report(
    State(state): State<AppState>,
    Json(body): Json<ReportReq>,
) -> Json<InsightsReport> {
    let report = build_insights_report(
        &state.ai,
        &body.claims,
        &body.rejected_claims,
        &body.top_claimed_products,
        &body.slow_processing_claims,
    )
    .await;
    Json(report)
}
