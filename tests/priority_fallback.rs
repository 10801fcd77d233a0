// tests/priority_fallback.rs
// Priority inference without a remote capability: keyword tiers only,
// plus the AI-path override when a mock classifier answers.

use std::collections::HashMap;
use std::sync::Arc;

use claims_insight_engine::insights::ai_adapter::{ClassifyOutcome, DisabledClient, MockInference};
use claims_insight_engine::priority::PRIORITY_LABELS;
use claims_insight_engine::{DynInference, PriorityEngine, PriorityLevel};

fn fallback_engine() -> PriorityEngine {
    PriorityEngine::new(Arc::new(DisabledClient))
}

#[tokio::test]
async fn empty_description_defaults_to_medium() {
    let engine = fallback_engine();
    assert_eq!(engine.infer_priority("").await, PriorityLevel::Medium);
    assert_eq!(engine.infer_priority("   ").await, PriorityLevel::Medium);
}

#[tokio::test]
async fn high_tier_wins_over_low_tier() {
    // "urgent" is a high keyword, "minor" a low keyword; High is checked first.
    let engine = fallback_engine();
    assert_eq!(
        engine
            .infer_priority("urgent replacement needed, even if the dent is minor")
            .await,
        PriorityLevel::High
    );
}

#[tokio::test]
async fn low_only_keywords_resolve_low() {
    let engine = fallback_engine();
    assert_eq!(
        engine.infer_priority("tiny cosmetic discoloration").await,
        PriorityLevel::Low
    );
}

#[tokio::test]
async fn medium_keywords_resolve_medium() {
    let engine = fallback_engine();
    assert_eq!(
        engine.infer_priority("battery not holding charge").await,
        PriorityLevel::Medium
    );
}

#[tokio::test]
async fn no_keyword_match_defaults_to_medium() {
    let engine = fallback_engine();
    assert_eq!(
        engine.infer_priority("it rattles when shaken").await,
        PriorityLevel::Medium
    );
}

#[tokio::test]
async fn ai_verdict_overrides_keyword_tiers() {
    // Classifier says High even though the text only carries low keywords.
    let client: DynInference = Arc::new(MockInference::with(
        |_text| {
            let mut scores = HashMap::new();
            scores.insert(PRIORITY_LABELS[2].to_string(), 0.91);
            scores.insert(PRIORITY_LABELS[1].to_string(), 0.05);
            scores.insert(PRIORITY_LABELS[0].to_string(), 0.04);
            ClassifyOutcome::Scored(scores)
        },
        None,
    ));
    let engine = PriorityEngine::new(client);
    assert_eq!(
        engine.infer_priority("slight scratch on the casing").await,
        PriorityLevel::High
    );
}

#[tokio::test]
async fn failed_call_falls_back_to_keywords() {
    let client: DynInference = Arc::new(MockInference::with(
        |_text| ClassifyOutcome::Failed("timeout".to_string()),
        None,
    ));
    let engine = PriorityEngine::new(client);
    assert_eq!(
        engine.infer_priority("slight scratch on the casing").await,
        PriorityLevel::Low
    );
}
