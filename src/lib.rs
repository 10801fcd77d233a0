// src/lib.rs
// Public library surface for integration tests (and the service binary).

pub mod api;
pub mod claims;
pub mod config;
pub mod priority;

// Insight pipeline (AI adapter, keyword fallback, analyzers, summary, recommendations)
pub mod insights;

pub mod ai_bootstrap;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router, AppState};
pub use crate::claims::{ClaimRecord, ProductClaimStat, SlowProcessingStat};
pub use crate::insights::ai_adapter::{
    build_client_from_config, ClassifyOutcome, DisabledClient, DynInference, InferenceClient,
    MockInference,
};
pub use crate::insights::{build_insights_report, InsightsReport};
pub use crate::priority::{PriorityEngine, PriorityLevel};

use tracing::info;

/// One-off smoke test of the inference client, callable from the entrypoint
/// after tracing init. It won't panic on failure; it just logs the result.
pub async fn run_ai_quick_probe() -> anyhow::Result<()> {
    // Path is relative to the runtime working dir (repo root in `cargo run`)
    let ai = ai_bootstrap::AiRuntime::from_path("config/ai.json")?;
    ai.quick_probe().await;
    info!("AI quick probe finished");
    Ok(())
}
