//! Deterministic keyword fallback: ordered category tables and the
//! substring matcher used whenever the remote classifier is unavailable.
//!
//! Table order is load-bearing: the first category with any matching keyword
//! wins, so reordering entries changes classification outcomes.

/// Ordered (category, keywords) pairs. First match wins.
pub type KeywordTable = &'static [(&'static str, &'static [&'static str])];

/// Bucket for anything no table entry matches.
pub const OTHER_CATEGORY: &str = "Other";

/// Full claim-reason taxonomy used for zero-shot classification.
pub const CLAIM_CATEGORIES: &[&str] = &[
    "Battery issue",
    "Screen damage",
    "Hardware malfunction",
    "Software problem",
    "Water damage",
    "Charging issue",
    "Audio problem",
    "Performance issue",
    "Overheating",
    "Physical damage",
    "Other",
];

/// Full rejection-reason taxonomy used for zero-shot classification.
pub const REJECTION_CATEGORIES: &[&str] = &[
    "Physical damage not covered",
    "Warranty expired",
    "Misuse or abuse",
    "Missing documentation",
    "Normal wear and tear",
    "Unauthorized repairs",
    "Liquid damage",
    "User error",
    "Cosmetic damage",
    "Insufficient evidence",
    "Other",
];

/// Fallback table for claim reasons (coarser than the zero-shot taxonomy;
/// unmatched claims land in "Other").
pub const CLAIM_KEYWORDS: KeywordTable = &[
    ("Battery issue", &["battery", "charging", "power", "drain"]),
    ("Screen damage", &["screen", "display", "crack", "broken", "shatter"]),
    ("Hardware malfunction", &["hardware", "button", "port", "camera", "speaker"]),
    ("Software problem", &["software", "freeze", "crash", "app", "update", "bug"]),
    ("Water damage", &["water", "liquid", "wet", "moisture"]),
    ("Overheating", &["heat", "hot", "overheat", "temperature"]),
    ("Physical damage", &["drop", "damage", "dent", "scratch", "physical"]),
];

/// Fallback table for rejection reasons.
pub const REJECTION_KEYWORDS: KeywordTable = &[
    ("Physical damage not covered", &["physical damage", "not covered", "accidental"]),
    ("Warranty expired", &["expired", "expiry", "warranty period"]),
    ("Misuse or abuse", &["misuse", "abuse", "improper"]),
    ("Missing documentation", &["documentation", "proof", "missing", "evidence"]),
    ("Unauthorized repairs", &["unauthorized", "third party", "repair"]),
];

/// Classify `text` against an ordered keyword table.
///
/// Pure function: case-insensitive substring match, first matching category
/// wins, `default_category` when nothing matches.
pub fn classify_by_keywords(text: &str, table: KeywordTable, default_category: &str) -> String {
    let lower = text.to_lowercase();
    for (category, keywords) in table {
        if keywords.iter().any(|k| lower.contains(k)) {
            return (*category).to_string();
        }
    }
    default_category.to_string()
}

/// Case-insensitive "any keyword present" check, shared with the priority
/// tier evaluation.
pub fn matches_any(text_lower: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|k| text_lower.contains(k.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_matching_category_wins() {
        // "screen" (2nd entry) and "water" (5th entry) both match; table
        // order decides.
        let got = classify_by_keywords(
            "screen went dark after water exposure",
            CLAIM_KEYWORDS,
            OTHER_CATEGORY,
        );
        assert_eq!(got, "Screen damage");
    }

    #[test]
    fn unmatched_text_falls_to_default() {
        let got = classify_by_keywords("smells odd sometimes", CLAIM_KEYWORDS, OTHER_CATEGORY);
        assert_eq!(got, OTHER_CATEGORY);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let got = classify_by_keywords("BATTERY Drains FAST", CLAIM_KEYWORDS, OTHER_CATEGORY);
        assert_eq!(got, "Battery issue");
    }

    #[test]
    fn classification_is_deterministic() {
        let text = "won't hold a charge, battery swollen";
        let a = classify_by_keywords(text, CLAIM_KEYWORDS, OTHER_CATEGORY);
        let b = classify_by_keywords(text, CLAIM_KEYWORDS, OTHER_CATEGORY);
        assert_eq!(a, b);
    }

    #[test]
    fn rejection_table_matches_phrases() {
        let got = classify_by_keywords(
            "Repair done by a third party voids coverage",
            REJECTION_KEYWORDS,
            OTHER_CATEGORY,
        );
        assert_eq!(got, "Unauthorized repairs");
    }
}
