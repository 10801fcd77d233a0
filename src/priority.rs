//! Claim priority inference: zero-shot severity classification first,
//! three-tier keyword matching second.
//!
//! Tier precedence in the fallback is fixed and intentional: High keywords
//! are checked before Low before Medium, so a description mentioning both an
//! urgent and a minor symptom resolves High. Reordering the tiers changes
//! outcomes.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::insights::ai_adapter::{ClassifyOutcome, DynInference};
use crate::insights::keywords::matches_any;

/// Severity descriptors handed to the zero-shot classifier. The priority is
/// recovered from the winning label by substring.
pub const PRIORITY_LABELS: [&str; 3] = [
    "Low priority - minor issue, cosmetic damage, can wait",
    "Medium priority - moderate issue, affects functionality but not critical",
    "High priority - severe issue, complete failure, urgent, dangerous, safety concern",
];

#[derive(Debug, Deserialize)]
struct PriorityTiers {
    high: Vec<String>,
    medium: Vec<String>,
    low: Vec<String>,
}

static TIERS: Lazy<PriorityTiers> = Lazy::new(|| {
    let raw = include_str!("../priority_keywords.json");
    serde_json::from_str::<PriorityTiers>(raw).expect("valid priority keyword tiers")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PriorityLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl PriorityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityLevel::Low => "Low",
            PriorityLevel::Medium => "Medium",
            PriorityLevel::High => "High",
        }
    }
}

pub struct PriorityEngine {
    client: DynInference,
}

impl PriorityEngine {
    pub fn new(client: DynInference) -> Self {
        Self { client }
    }

    /// Infer a priority for one claim description. Always returns exactly
    /// one level; Medium is the default for empty or inconclusive input.
    pub async fn infer_priority(&self, description: &str) -> PriorityLevel {
        if description.trim().is_empty() {
            return PriorityLevel::Medium;
        }

        if self.client.is_configured() {
            match self.client.zero_shot(description, &PRIORITY_LABELS).await {
                outcome @ ClassifyOutcome::Scored(_) => {
                    if let Some(label) = outcome.top_label() {
                        let level = label_to_priority(&label);
                        debug!(%label, level = level.as_str(), "priority via zero-shot");
                        return level;
                    }
                    // Empty score map: fall through to keywords.
                }
                ClassifyOutcome::Unavailable => {}
                ClassifyOutcome::Failed(reason) => {
                    warn!(%reason, "priority classification failed; using keywords");
                }
            }
        }

        keyword_priority(description)
    }
}

/// Map a winning severity label back to a priority by substring. Unknown
/// labels resolve to Medium.
fn label_to_priority(label: &str) -> PriorityLevel {
    if label.contains("High priority") {
        PriorityLevel::High
    } else if label.contains("Medium priority") {
        PriorityLevel::Medium
    } else if label.contains("Low priority") {
        PriorityLevel::Low
    } else {
        PriorityLevel::Medium
    }
}

/// Keyword-tier fallback. High short-circuits before Low before Medium;
/// no match in any tier defaults to Medium.
pub fn keyword_priority(description: &str) -> PriorityLevel {
    let lower = description.to_lowercase();

    if matches_any(&lower, &TIERS.high) {
        return PriorityLevel::High;
    }
    if matches_any(&lower, &TIERS.low) {
        return PriorityLevel::Low;
    }
    if matches_any(&lower, &TIERS.medium) {
        return PriorityLevel::Medium;
    }
    PriorityLevel::Medium
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_mapping_by_substring() {
        assert_eq!(label_to_priority(PRIORITY_LABELS[2]), PriorityLevel::High);
        assert_eq!(label_to_priority(PRIORITY_LABELS[1]), PriorityLevel::Medium);
        assert_eq!(label_to_priority(PRIORITY_LABELS[0]), PriorityLevel::Low);
        assert_eq!(label_to_priority("something else"), PriorityLevel::Medium);
    }

    #[test]
    fn high_tier_beats_low_tier() {
        // "urgent" (high) and "minor" (low) in one text: High wins.
        assert_eq!(
            keyword_priority("urgent but the dent itself is minor"),
            PriorityLevel::High
        );
    }

    #[test]
    fn low_tier_beats_medium_tier() {
        // "scratch" (low) and "display" (medium): Low is checked first.
        assert_eq!(
            keyword_priority("slight scratch on the display"),
            PriorityLevel::Low
        );
    }

    #[test]
    fn no_match_defaults_to_medium() {
        assert_eq!(keyword_priority("it hums oddly"), PriorityLevel::Medium);
    }
}
