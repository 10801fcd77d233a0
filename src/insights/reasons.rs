//! Claim-reason analysis: classify each claim's issue text into one category
//! and aggregate counts, percentages and top products per category.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::claims::ClaimRecord;
use crate::insights::ai_adapter::{ClassifyOutcome, DynInference};
use crate::insights::keywords::{
    classify_by_keywords, CLAIM_CATEGORIES, CLAIM_KEYWORDS, OTHER_CATEGORY,
};
use crate::insights::{round_pct, Tally, FALLBACK_NOTE};

/// Denominator used for category percentages in the AI path.
///
/// `InputTotal` reproduces the historical behavior: claims the classifier
/// could not score are dropped from the counts but still inflate the
/// denominator, so percentages may sum below 100. `Classified` divides by
/// the number of successfully scored claims instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PercentBase {
    #[default]
    InputTotal,
    Classified,
}

/// Product frequency within one category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductCount {
    pub product: String,
    pub count: usize,
}

/// One row of the category distribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryAggregate {
    pub category: String,
    pub count: usize,
    /// 0–100, one decimal.
    pub percentage: f64,
    /// Up to 3 most frequent products for this category (AI path only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub top_products: Vec<ProductCount>,
}

/// Aggregate output of one analysis run. Recomputed per request, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimReasonReport {
    pub total_claims_analyzed: usize,
    /// Descending by count; ties keep first-encountered order.
    pub categories: Vec<CategoryAggregate>,
    pub ai_powered: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

pub struct ClaimReasonAnalyzer {
    client: DynInference,
    percent_base: PercentBase,
}

impl ClaimReasonAnalyzer {
    pub fn new(client: DynInference) -> Self {
        Self {
            client,
            percent_base: PercentBase::default(),
        }
    }

    pub fn with_percent_base(mut self, base: PercentBase) -> Self {
        self.percent_base = base;
        self
    }

    /// Classify a batch of claims and aggregate the category distribution.
    ///
    /// Capability availability is checked once here; an unconfigured client
    /// (or an empty batch) commits the whole request to the keyword fallback.
    pub async fn analyze(&self, claims: &[ClaimRecord]) -> ClaimReasonReport {
        if claims.is_empty() || !self.client.is_configured() {
            return self.fallback(claims);
        }

        let mut tally = Tally::new();
        let mut products: Vec<(String, Vec<String>)> = Vec::new();
        let mut classified = 0usize;

        for claim in claims {
            let text = claim.issue_text();
            match self.client.zero_shot(&text, CLAIM_CATEGORIES).await {
                outcome @ ClassifyOutcome::Scored(_) => {
                    if let Some(top) = outcome.top_label() {
                        tally.bump(&top);
                        push_product(&mut products, &top, &claim.product_name);
                        classified += 1;
                    }
                    // Empty score map: claim stays uncounted in the AI path.
                }
                ClassifyOutcome::Unavailable | ClassifyOutcome::Failed(_) => {
                    // Logged by the adapter; the claim stays uncounted.
                    warn!(
                        claim_number = %claim.claim_number,
                        "claim left unclassified after remote failure"
                    );
                }
            }
        }

        let denominator = match self.percent_base {
            PercentBase::InputTotal => claims.len(),
            PercentBase::Classified => classified,
        };

        let categories = tally
            .into_sorted_desc()
            .into_iter()
            .map(|(category, count)| {
                let top_products = products
                    .iter()
                    .find(|(c, _)| *c == category)
                    .map(|(_, names)| top_counts(names, 3))
                    .unwrap_or_default();
                CategoryAggregate {
                    percentage: round_pct(count, denominator),
                    category,
                    count,
                    top_products,
                }
            })
            .collect();

        ClaimReasonReport {
            total_claims_analyzed: claims.len(),
            categories,
            ai_powered: true,
            note: None,
        }
    }

    /// Keyword-only analysis. Every claim gets a category ("Other" when no
    /// keyword matches), so counts always cover the full input.
    fn fallback(&self, claims: &[ClaimRecord]) -> ClaimReasonReport {
        info!(total = claims.len(), "claim reasons via keyword fallback");
        let mut tally = Tally::new();
        for claim in claims {
            let category = classify_by_keywords(&claim.issue_text(), CLAIM_KEYWORDS, OTHER_CATEGORY);
            tally.bump(&category);
        }

        let categories = tally
            .into_sorted_desc()
            .into_iter()
            .map(|(category, count)| CategoryAggregate {
                percentage: round_pct(count, claims.len()),
                category,
                count,
                top_products: Vec::new(),
            })
            .collect();

        ClaimReasonReport {
            total_claims_analyzed: claims.len(),
            categories,
            ai_powered: false,
            note: Some(FALLBACK_NOTE.to_string()),
        }
    }
}

fn push_product(products: &mut Vec<(String, Vec<String>)>, category: &str, product: &str) {
    if let Some((_, names)) = products.iter_mut().find(|(c, _)| c == category) {
        names.push(product.to_string());
    } else {
        products.push((category.to_string(), vec![product.to_string()]));
    }
}

/// Top `n` most frequent names, ties kept in first-seen order.
pub(crate) fn top_counts(names: &[String], n: usize) -> Vec<ProductCount> {
    let mut tally = Tally::new();
    for name in names {
        tally.bump(name);
    }
    tally
        .into_sorted_desc()
        .into_iter()
        .take(n)
        .map(|(product, count)| ProductCount { product, count })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn top_counts_orders_by_frequency_then_first_seen() {
        let got = top_counts(
            &names(&["A", "B", "B", "C", "A", "D"]),
            3,
        );
        // A and B both count 2; A was seen first.
        assert_eq!(
            got,
            vec![
                ProductCount { product: "A".into(), count: 2 },
                ProductCount { product: "B".into(), count: 2 },
                ProductCount { product: "C".into(), count: 1 },
            ]
        );
    }
}
