//! Input records consumed by the insight engine.
//!
//! These are read-only snapshots handed over by the claims store; the engine
//! never mutates or persists them. Filtering/scoping (retailer, time window,
//! status) is the caller's job — the engine receives already-filtered batches.

use serde::{Deserialize, Serialize};

/// One claim as fetched from the claims store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimRecord {
    pub id: i64,
    /// Human-readable record number, e.g. "CLM-2026-00042".
    pub claim_number: String,
    pub issue_summary: String,
    pub detailed_description: String,
    /// Category the customer picked at submission, if any.
    #[serde(default)]
    pub category: Option<String>,
    pub product_name: String,
    /// Free-text notes attached during triage, in chronological order.
    /// For rejected claims these usually carry the rejection rationale.
    #[serde(default)]
    pub notes: Vec<String>,
}

impl ClaimRecord {
    /// Text blob used for reason classification: summary + description.
    pub fn issue_text(&self) -> String {
        format!("{} {}", self.issue_summary, self.detailed_description)
    }

    /// Text blob used for rejection classification: all notes joined.
    /// Empty when the claim carries no notes.
    pub fn notes_text(&self) -> String {
        self.notes.join(" ")
    }
}

/// Per-product claim volume, precomputed by the caller's reporting query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductClaimStat {
    pub product_name: String,
    pub claim_count: u32,
}

/// Per-product average resolution time, precomputed by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlowProcessingStat {
    pub product_name: String,
    pub avg_processing_days: f64,
}
