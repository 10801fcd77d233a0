//! Rule-based recommendations derived from the aggregates. Pure and
//! deterministic, no classifier involved. Each rule is independent; the
//! output keeps rule declaration order, it is not re-sorted.

use serde::{Deserialize, Serialize};

use crate::claims::{ProductClaimStat, SlowProcessingStat};
use crate::insights::reasons::ClaimReasonReport;
use crate::insights::rejections::RejectionReasonReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    ProductQuality,
    ProcessingTime,
    ClaimPattern,
    RejectionPattern,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationPriority {
    High,
    Medium,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub priority: RecommendationPriority,
    pub title: String,
    pub description: String,
    pub action: String,
}

/// Thresholds are strict: a top product with exactly 5 claims fires nothing.
pub fn generate_recommendations(
    top_claimed_products: &[ProductClaimStat],
    slow_processing_claims: &[SlowProcessingStat],
    claim_reasons: &ClaimReasonReport,
    rejection_reasons: &RejectionReasonReport,
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if let Some(top_product) = top_claimed_products.first() {
        if top_product.claim_count > 5 {
            recommendations.push(Recommendation {
                kind: RecommendationKind::ProductQuality,
                priority: RecommendationPriority::High,
                title: format!("High claim rate for {}", top_product.product_name),
                description: format!(
                    "This product has {} claims. Consider reviewing product quality or supplier.",
                    top_product.claim_count
                ),
                action: "Review supplier quality or consider alternative products".to_string(),
            });
        }
    }

    if let Some(slowest) = slow_processing_claims.first() {
        if slowest.avg_processing_days > 7.0 {
            recommendations.push(Recommendation {
                kind: RecommendationKind::ProcessingTime,
                priority: RecommendationPriority::Medium,
                title: format!("Slow processing for {}", slowest.product_name),
                description: format!(
                    "Average processing time is {:.1} days. This may affect customer satisfaction.",
                    slowest.avg_processing_days
                ),
                action: "Streamline claim processing workflow or allocate more resources"
                    .to_string(),
            });
        }
    }

    if let Some(top_reason) = claim_reasons.categories.first() {
        if top_reason.percentage > 30.0 {
            recommendations.push(Recommendation {
                kind: RecommendationKind::ClaimPattern,
                priority: RecommendationPriority::High,
                title: format!("High incidence of {}", top_reason.category),
                description: format!(
                    "{:.1}% of claims are related to {}.",
                    top_reason.percentage, top_reason.category
                ),
                action: "Investigate root cause and implement preventive measures".to_string(),
            });
        }
    }

    if let Some(top_rejection) = rejection_reasons.rejection_reasons.first() {
        if top_rejection.percentage > 25.0 {
            recommendations.push(Recommendation {
                kind: RecommendationKind::RejectionPattern,
                priority: RecommendationPriority::Medium,
                title: format!("Common rejection reason: {}", top_rejection.reason),
                description: format!(
                    "{:.1}% of rejections are due to {}.",
                    top_rejection.percentage, top_rejection.reason
                ),
                action: "Improve customer education about warranty terms and coverage".to_string(),
            });
        }
    }

    recommendations
}
