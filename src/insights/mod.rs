//! Insight pipeline entry: batch classification, aggregation, summary and
//! recommendations composed into one report.

pub mod ai_adapter;
pub mod keywords;
pub mod reasons;
pub mod recommend;
pub mod rejections;
pub mod summary;

use serde::{Deserialize, Serialize};

use crate::claims::{ClaimRecord, ProductClaimStat, SlowProcessingStat};

// Re-export convenient types.
pub use crate::insights::ai_adapter::{
    build_client_from_config, ClassifyOutcome, DynInference, InferenceClient,
};
pub use crate::insights::reasons::{ClaimReasonAnalyzer, ClaimReasonReport, PercentBase};
pub use crate::insights::recommend::{generate_recommendations, Recommendation};
pub use crate::insights::rejections::{RejectionReasonAnalyzer, RejectionReasonReport};
pub use crate::insights::summary::{
    AnalyticsDigest, InsightsSummarizer, SUMMARY_FAILED, SUMMARY_UNAVAILABLE,
};

/// Note attached to analyzer output produced by the keyword fallback.
pub const FALLBACK_NOTE: &str = "Using keyword-based analysis (AI unavailable)";

/// Combined report returned by the reporting endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightsReport {
    pub claim_reasons: ClaimReasonReport,
    pub rejection_reasons: RejectionReasonReport,
    pub summary: String,
    pub recommendations: Vec<Recommendation>,
    /// Whether a remote capability was configured for this request. The
    /// per-analyzer flags can still be false for empty inputs.
    pub ai_powered: bool,
}

/// Build the full report from caller-supplied batches and precomputed stats.
/// Pure function of its inputs plus capability availability; nothing is
/// persisted.
pub async fn build_insights_report(
    client: &DynInference,
    claims: &[ClaimRecord],
    rejected_claims: &[ClaimRecord],
    top_claimed_products: &[ProductClaimStat],
    slow_processing_claims: &[SlowProcessingStat],
) -> InsightsReport {
    let claim_reasons = ClaimReasonAnalyzer::new(client.clone()).analyze(claims).await;
    let rejection_reasons = RejectionReasonAnalyzer::new(client.clone())
        .analyze(rejected_claims)
        .await;

    let summary = InsightsSummarizer::new(client.clone())
        .summarize(&AnalyticsDigest {
            top_claimed_products,
            slow_processing_claims,
            claim_reasons: &claim_reasons,
            rejection_reasons: &rejection_reasons,
        })
        .await;

    let recommendations = generate_recommendations(
        top_claimed_products,
        slow_processing_claims,
        &claim_reasons,
        &rejection_reasons,
    );

    InsightsReport {
        claim_reasons,
        rejection_reasons,
        summary,
        recommendations,
        ai_powered: client.is_configured(),
    }
}

// ------------------------------------------------------------
// Shared aggregation helpers
// ------------------------------------------------------------

/// Insertion-ordered tally. Keeps first-seen order so that the stable sort
/// in `into_sorted_desc` breaks count ties by encounter order.
#[derive(Debug, Default)]
pub(crate) struct Tally {
    entries: Vec<(String, usize)>,
}

impl Tally {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn bump(&mut self, key: &str) {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| k == key) {
            entry.1 += 1;
        } else {
            self.entries.push((key.to_string(), 1));
        }
    }

    pub(crate) fn into_sorted_desc(mut self) -> Vec<(String, usize)> {
        // sort_by is stable; ties keep insertion order.
        self.entries.sort_by(|a, b| b.1.cmp(&a.1));
        self.entries
    }
}

/// count/denominator as a 0–100 percentage, one decimal. Zero denominator
/// yields 0.0 (empty-input guard).
pub(crate) fn round_pct(count: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    (count as f64 / denominator as f64 * 1000.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tally_sorts_desc_with_first_seen_tie_break() {
        let mut tally = Tally::new();
        #[rustfmt::skip]
        let keys = [
            "x", "x", "x",
            "y", "y", "y", "y", "y", "y", "y",
            "z",
            "w", "w", "w", "w", "w", "w", "w",
        ];
        for key in keys {
            tally.bump(key);
        }
        // counts x=3, y=7, z=1, w=7; y and w tie at 7, y was seen first
        assert_eq!(
            tally.into_sorted_desc(),
            vec![
                ("y".to_string(), 7),
                ("w".to_string(), 7),
                ("x".to_string(), 3),
                ("z".to_string(), 1),
            ]
        );
    }

    #[test]
    fn pct_rounds_to_one_decimal() {
        assert_eq!(round_pct(1, 3), 33.3);
        assert_eq!(round_pct(2, 3), 66.7);
        assert_eq!(round_pct(3, 3), 100.0);
        assert_eq!(round_pct(0, 0), 0.0);
    }
}
