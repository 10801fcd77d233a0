//! Insights summarizer: deterministic textual digest of the aggregates,
//! handed to the remote summarization model. Fixed fallback strings when the
//! capability is missing or the call fails; never raises to the caller.

use crate::claims::{ProductClaimStat, SlowProcessingStat};
use crate::insights::ai_adapter::DynInference;
use crate::insights::reasons::ClaimReasonReport;
use crate::insights::rejections::RejectionReasonReport;

pub const SUMMARY_UNAVAILABLE: &str = "AI insights unavailable - API key not configured";
pub const SUMMARY_FAILED: &str = "Unable to generate AI summary at this time";

/// Borrowed view over the aggregates the summary is built from.
pub struct AnalyticsDigest<'a> {
    pub top_claimed_products: &'a [ProductClaimStat],
    pub slow_processing_claims: &'a [SlowProcessingStat],
    pub claim_reasons: &'a ClaimReasonReport,
    pub rejection_reasons: &'a RejectionReasonReport,
}

pub struct InsightsSummarizer {
    client: DynInference,
}

impl InsightsSummarizer {
    pub fn new(client: DynInference) -> Self {
        Self { client }
    }

    pub async fn summarize(&self, digest: &AnalyticsDigest<'_>) -> String {
        if !self.client.is_configured() {
            return SUMMARY_UNAVAILABLE.to_string();
        }

        let text = compose_digest(digest);
        match self.client.summarize(&text).await {
            Some(summary) if !summary.trim().is_empty() => summary,
            _ => SUMMARY_FAILED.to_string(),
        }
    }
}

/// Build the paragraph passed to the summarization model: top-3 claimed
/// products, top-2 slowest products, top-3 claim reasons, top-3 rejection
/// reasons. Sections with no data are skipped.
pub fn compose_digest(digest: &AnalyticsDigest<'_>) -> String {
    let mut parts: Vec<String> = Vec::new();

    if !digest.top_claimed_products.is_empty() {
        let listed = digest
            .top_claimed_products
            .iter()
            .take(3)
            .map(|p| format!("{} with {} claims", p.product_name, p.claim_count))
            .collect::<Vec<_>>()
            .join(", ");
        parts.push(format!("The most claimed products are: {listed}"));
    }

    if !digest.slow_processing_claims.is_empty() {
        let listed = digest
            .slow_processing_claims
            .iter()
            .take(2)
            .map(|c| format!("{} averaging {:.1} days", c.product_name, c.avg_processing_days))
            .collect::<Vec<_>>()
            .join(", ");
        parts.push(format!("Claims taking longest to process: {listed}"));
    }

    if !digest.claim_reasons.categories.is_empty() {
        let listed = digest
            .claim_reasons
            .categories
            .iter()
            .take(3)
            .map(|c| format!("{} ({:.1}%)", c.category, c.percentage))
            .collect::<Vec<_>>()
            .join(", ");
        parts.push(format!("Main claim reasons: {listed}"));
    }

    if !digest.rejection_reasons.rejection_reasons.is_empty() {
        let listed = digest
            .rejection_reasons
            .rejection_reasons
            .iter()
            .take(3)
            .map(|r| format!("{} ({:.1}%)", r.reason, r.percentage))
            .collect::<Vec<_>>()
            .join(", ");
        parts.push(format!("Top rejection reasons: {listed}"));
    }

    let mut text = parts.join(". ");
    text.push('.');
    text
}
