//! Rejection-reason analysis: same aggregation shape as claim reasons, but
//! over rejected claims' triage notes and a distinct taxonomy, with example
//! claims instead of product rankings.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::claims::ClaimRecord;
use crate::insights::ai_adapter::{ClassifyOutcome, DynInference};
use crate::insights::keywords::{
    classify_by_keywords, OTHER_CATEGORY, REJECTION_CATEGORIES, REJECTION_KEYWORDS,
};
use crate::insights::{round_pct, Tally, FALLBACK_NOTE};

/// Example claim attached to a rejection category (at most 3 per category).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RejectionExample {
    pub claim_number: String,
    pub product: String,
}

/// One row of the rejection-reason distribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectionAggregate {
    pub reason: String,
    pub count: usize,
    /// 0–100, one decimal; denominator is the full rejected-claims input.
    pub percentage: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<RejectionExample>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectionReasonReport {
    pub total_rejections_analyzed: usize,
    /// Descending by count; ties keep first-encountered order.
    pub rejection_reasons: Vec<RejectionAggregate>,
    pub ai_powered: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

pub struct RejectionReasonAnalyzer {
    client: DynInference,
}

impl RejectionReasonAnalyzer {
    pub fn new(client: DynInference) -> Self {
        Self { client }
    }

    /// Analyze a batch of already-rejected claims. The caller filters by
    /// status; this only reads the notes.
    pub async fn analyze(&self, rejected: &[ClaimRecord]) -> RejectionReasonReport {
        if rejected.is_empty() || !self.client.is_configured() {
            return self.fallback(rejected);
        }

        let mut tally = Tally::new();
        let mut examples: Vec<(String, Vec<RejectionExample>)> = Vec::new();

        for claim in rejected {
            let notes_text = claim.notes_text();
            // Claims without notes carry no signal for the AI path and are
            // excluded from classification entirely.
            if notes_text.is_empty() {
                continue;
            }

            match self.client.zero_shot(&notes_text, REJECTION_CATEGORIES).await {
                outcome @ ClassifyOutcome::Scored(_) => {
                    if let Some(top) = outcome.top_label() {
                        tally.bump(&top);
                        push_example(&mut examples, &top, claim);
                    }
                }
                ClassifyOutcome::Unavailable | ClassifyOutcome::Failed(_) => {
                    warn!(
                        claim_number = %claim.claim_number,
                        "rejection left unclassified after remote failure"
                    );
                }
            }
        }

        let rejection_reasons = tally
            .into_sorted_desc()
            .into_iter()
            .map(|(reason, count)| RejectionAggregate {
                percentage: round_pct(count, rejected.len()),
                examples: examples
                    .iter()
                    .find(|(r, _)| *r == reason)
                    .map(|(_, ex)| ex.clone())
                    .unwrap_or_default(),
                reason,
                count,
            })
            .collect();

        RejectionReasonReport {
            total_rejections_analyzed: rejected.len(),
            rejection_reasons,
            ai_powered: true,
            note: None,
        }
    }

    /// Keyword-only analysis. One no-signal rule: claims with no notes and
    /// claims whose notes match no keyword both land in "Other".
    fn fallback(&self, rejected: &[ClaimRecord]) -> RejectionReasonReport {
        info!(total = rejected.len(), "rejection reasons via keyword fallback");
        let mut tally = Tally::new();
        for claim in rejected {
            let notes_text = claim.notes_text();
            let reason = if notes_text.is_empty() {
                OTHER_CATEGORY.to_string()
            } else {
                classify_by_keywords(&notes_text, REJECTION_KEYWORDS, OTHER_CATEGORY)
            };
            tally.bump(&reason);
        }

        let rejection_reasons = tally
            .into_sorted_desc()
            .into_iter()
            .map(|(reason, count)| RejectionAggregate {
                percentage: round_pct(count, rejected.len()),
                examples: Vec::new(),
                reason,
                count,
            })
            .collect();

        RejectionReasonReport {
            total_rejections_analyzed: rejected.len(),
            rejection_reasons,
            ai_powered: false,
            note: Some(FALLBACK_NOTE.to_string()),
        }
    }
}

fn push_example(
    examples: &mut Vec<(String, Vec<RejectionExample>)>,
    reason: &str,
    claim: &ClaimRecord,
) {
    let idx = match examples.iter().position(|(r, _)| r == reason) {
        Some(i) => i,
        None => {
            examples.push((reason.to_string(), Vec::new()));
            examples.len() - 1
        }
    };
    let entry = &mut examples[idx].1;
    if entry.len() < 3 {
        entry.push(RejectionExample {
            claim_number: claim.claim_number.clone(),
            product: claim.product_name.clone(),
        });
    }
}
