// src/ai_bootstrap.rs
use crate::config::ai::AiConfig;
use crate::insights::ai_adapter::{build_client_from_config, DynInference};
use crate::priority::PRIORITY_LABELS;
use tracing::{info, warn};

pub struct AiRuntime {
    pub cfg: AiConfig,
    pub client: DynInference,
}

impl AiRuntime {
    pub fn from_path(path: &str) -> anyhow::Result<Self> {
        let cfg = AiConfig::load_from_file(path)?;
        // Safe diagnostics: only provider + enabled + key length
        info!(
            "AI cfg loaded: provider={}, enabled={}, key_len={}",
            cfg.provider,
            cfg.enabled,
            cfg.api_key.len()
        );
        let client = build_client_from_config(&cfg);
        Ok(Self { cfg, client })
    }

    /// One-off smoke test against the classifier. Logs the result, never
    /// panics on failure.
    pub async fn quick_probe(&self) {
        if !self.client.is_configured() {
            warn!("AI quick_probe skipped: no inference capability configured");
            return;
        }
        let sample = "Device stopped working completely after two weeks, screen stays black.";
        let out = self.client.zero_shot(sample, &PRIORITY_LABELS).await;
        info!("AI quick_probe => {:?}", out);
    }
}
