// src/config/ai.rs
use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path};
use tracing::warn;

fn default_classify_model() -> String {
    "facebook/bart-large-mnli".to_string()
}
fn default_summary_model() -> String {
    "facebook/bart-large-cnn".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    pub enabled: bool,
    /// "huggingface" (case-insensitive)
    pub provider: String,
    /// "ENV" means: read from HUGGINGFACE_API_KEY
    pub api_key: String,
    /// Zero-shot classification model.
    #[serde(default = "default_classify_model")]
    pub classify_model: String,
    /// Summarization model.
    #[serde(default = "default_summary_model")]
    pub summary_model: String,
    /// Per-call timeout; one hung call must not stall a batch.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            provider: "huggingface".to_string(),
            api_key: String::new(),
            classify_model: default_classify_model(),
            summary_model: default_summary_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl AiConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let data = fs::read_to_string(path)?;
        let mut cfg: AiConfig = serde_json::from_str(&data)?;

        // Normalize provider
        cfg.provider = cfg.provider.to_lowercase();

        // Resolve api key if "ENV". A missing key is not an error here: the
        // engine degrades to the keyword fallback instead of refusing to boot.
        if cfg.api_key.trim().eq_ignore_ascii_case("env") {
            cfg.api_key = env::var("HUGGINGFACE_API_KEY").unwrap_or_default();
        }

        if cfg.timeout_secs == 0 {
            cfg.timeout_secs = default_timeout_secs();
        }

        Ok(cfg)
    }

    /// Load config, or return a disabled config when the file is missing or
    /// malformed. Used by the service entrypoint.
    pub fn load_or_disabled<P: AsRef<Path>>(path: P) -> Self {
        match Self::load_from_file(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!(error = %e, "AI config not loaded; inference disabled");
                Self::default()
            }
        }
    }
}
