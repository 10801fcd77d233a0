//! AI adapter: provider abstraction over the remote zero-shot classification
//! and summarization capabilities (Hugging Face Inference API).
//!
//! Failure handling is deliberately one-sided: a classify call never raises,
//! it returns a typed degraded outcome the analyzers use to switch to the
//! keyword fallback. One attempt per call, no retry, no caching.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::ai::AiConfig;

// ------------------------------------------------------------
// Public surface
// ------------------------------------------------------------

/// Outcome of one zero-shot classification call.
///
/// `Unavailable` and `Failed` are behaviorally identical to callers (both
/// trigger the keyword fallback); they are kept distinct so logs can tell
/// "never configured" apart from "errored mid-request".
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifyOutcome {
    /// Confidence per candidate label, each in [0,1]. Labels are scored
    /// independently; scores do not sum to 1.
    Scored(HashMap<String, f32>),
    /// No remote capability is configured for this process.
    Unavailable,
    /// The remote call errored or timed out.
    Failed(String),
}

impl ClassifyOutcome {
    /// Non-empty scores, or `None` for any degraded outcome.
    pub fn into_scores(self) -> Option<HashMap<String, f32>> {
        match self {
            ClassifyOutcome::Scored(scores) if !scores.is_empty() => Some(scores),
            _ => None,
        }
    }

    /// Label with the highest score, ties broken by label order in the map
    /// iteration (callers treat ties as don't-care).
    pub fn top_label(self) -> Option<String> {
        let scores = self.into_scores()?;
        scores
            .into_iter()
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(label, _)| label)
    }
}

/// Trait object used by the analyzers and the priority engine.
///
/// One client instance per service context, passed explicitly — no global
/// shared instance.
pub trait InferenceClient: Send + Sync {
    /// True when a remote capability is configured. Analyzers check this once
    /// at batch entry and commit to the fallback path for the whole request
    /// when it is false.
    fn is_configured(&self) -> bool;

    /// Score `text` against `labels`. Contract: at least 2 candidate labels;
    /// fewer is a caller bug and fails fast.
    fn zero_shot<'a>(
        &'a self,
        text: &'a str,
        labels: &'a [&'a str],
    ) -> Pin<Box<dyn Future<Output = ClassifyOutcome> + Send + 'a>>;

    /// Summarize `text` into a short paragraph. `None` on any failure.
    fn summarize<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Option<String>> + Send + 'a>>;

    /// Provider name for diagnostics.
    fn provider_name(&self) -> &'static str;
}

/// Convenient alias used by callers.
pub type DynInference = Arc<dyn InferenceClient>;

/// Factory: build a client according to config and environment variables.
///
/// * If `AI_TEST_MODE=mock`, returns a deterministic mock client.
/// * Else if `config.enabled==false` or no API key resolves, returns a
///   disabled client (everything degrades to the keyword fallback).
/// * Else builds the real Hugging Face client.
pub fn build_client_from_config(config: &AiConfig) -> DynInference {
    if std::env::var("AI_TEST_MODE")
        .map(|v| v == "mock")
        .unwrap_or(false)
    {
        return Arc::new(MockInference::fixed(
            &[("Other", 1.0)],
            Some("Mock insight summary."),
        ));
    }

    if !config.enabled {
        return Arc::new(DisabledClient);
    }

    match config.provider.as_str() {
        "huggingface" => {
            if config.api_key.is_empty() {
                warn!("no Hugging Face API key resolved; inference disabled");
                return Arc::new(DisabledClient);
            }
            Arc::new(HuggingFaceClient::new(config))
        }
        other => {
            warn!(provider = other, "unsupported inference provider; disabled");
            Arc::new(DisabledClient)
        }
    }
}

// ------------------------------------------------------------
// Hugging Face client
// ------------------------------------------------------------

/// Real client against the Hugging Face Inference API.
/// Zero-shot via `facebook/bart-large-mnli`, summaries via
/// `facebook/bart-large-cnn` (both overridable in config).
pub struct HuggingFaceClient {
    http: reqwest::Client,
    api_key: String,
    classify_model: String,
    summary_model: String,
}

impl HuggingFaceClient {
    pub fn new(config: &AiConfig) -> Self {
        let http = reqwest::Client::builder()
            .user_agent("claims-insight-engine/0.1")
            .connect_timeout(Duration::from_secs(4))
            // Per-call ceiling so one hung call cannot stall a whole batch.
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("reqwest client");
        Self {
            http,
            api_key: config.api_key.clone(),
            classify_model: config.classify_model.clone(),
            summary_model: config.summary_model.clone(),
        }
    }

    fn model_url(&self, model: &str) -> String {
        format!("https://api-inference.huggingface.co/models/{model}")
    }

    async fn zero_shot_impl(&self, text: &str, labels: &[&str]) -> ClassifyOutcome {
        #[derive(Serialize)]
        struct Params<'a> {
            candidate_labels: &'a [&'a str],
        }
        #[derive(Serialize)]
        struct Req<'a> {
            inputs: &'a str,
            parameters: Params<'a>,
        }
        #[derive(Deserialize)]
        struct Resp {
            labels: Vec<String>,
            scores: Vec<f32>,
        }

        let req = Req {
            inputs: text,
            parameters: Params {
                candidate_labels: labels,
            },
        };

        let resp = match self
            .http
            .post(self.model_url(&self.classify_model))
            .bearer_auth(&self.api_key)
            .json(&req)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                warn!(target: "inference", id = %anon_hash(text), error = %e, "zero-shot call failed");
                return ClassifyOutcome::Failed(e.to_string());
            }
        };

        if !resp.status().is_success() {
            let status = resp.status();
            warn!(target: "inference", id = %anon_hash(text), %status, "zero-shot call rejected");
            return ClassifyOutcome::Failed(format!("status {status}"));
        }

        match resp.json::<Resp>().await {
            Ok(body) => {
                let scores: HashMap<String, f32> =
                    body.labels.into_iter().zip(body.scores).collect();
                ClassifyOutcome::Scored(scores)
            }
            Err(e) => {
                warn!(target: "inference", id = %anon_hash(text), error = %e, "zero-shot response malformed");
                ClassifyOutcome::Failed(e.to_string())
            }
        }
    }

    async fn summarize_impl(&self, text: &str) -> Option<String> {
        #[derive(Serialize)]
        struct Req<'a> {
            inputs: &'a str,
        }
        #[derive(Deserialize)]
        struct Item {
            summary_text: String,
        }

        let resp = self
            .http
            .post(self.model_url(&self.summary_model))
            .bearer_auth(&self.api_key)
            .json(&Req { inputs: text })
            .send()
            .await
            .ok()?;
        if !resp.status().is_success() {
            warn!(target: "inference", status = %resp.status(), "summarization call rejected");
            return None;
        }
        let body: Vec<Item> = resp.json().await.ok()?;
        let summary = body.into_iter().next()?.summary_text;
        if summary.trim().is_empty() {
            None
        } else {
            Some(summary)
        }
    }
}

impl InferenceClient for HuggingFaceClient {
    fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    fn zero_shot<'a>(
        &'a self,
        text: &'a str,
        labels: &'a [&'a str],
    ) -> Pin<Box<dyn Future<Output = ClassifyOutcome> + Send + 'a>> {
        assert!(
            labels.len() >= 2,
            "zero-shot classification needs at least 2 candidate labels"
        );
        Box::pin(self.zero_shot_impl(text, labels))
    }

    fn summarize<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Option<String>> + Send + 'a>> {
        Box::pin(self.summarize_impl(text))
    }

    fn provider_name(&self) -> &'static str {
        "huggingface"
    }
}

// ------------------------------------------------------------
// Disabled + mock clients
// ------------------------------------------------------------

/// Always-degraded client used when no capability is configured.
pub struct DisabledClient;

impl InferenceClient for DisabledClient {
    fn is_configured(&self) -> bool {
        false
    }
    fn zero_shot<'a>(
        &'a self,
        _text: &'a str,
        labels: &'a [&'a str],
    ) -> Pin<Box<dyn Future<Output = ClassifyOutcome> + Send + 'a>> {
        assert!(
            labels.len() >= 2,
            "zero-shot classification needs at least 2 candidate labels"
        );
        Box::pin(async { ClassifyOutcome::Unavailable })
    }
    fn summarize<'a>(
        &'a self,
        _text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Option<String>> + Send + 'a>> {
        Box::pin(async { None })
    }
    fn provider_name(&self) -> &'static str {
        "disabled"
    }
}

/// Deterministic mock for tests/local runs. The classify closure lets tests
/// vary outcomes per input text.
pub struct MockInference {
    classify: Box<dyn Fn(&str) -> ClassifyOutcome + Send + Sync>,
    summary: Option<String>,
}

impl MockInference {
    /// Mock returning the same scores for every input.
    pub fn fixed(scores: &[(&str, f32)], summary: Option<&str>) -> Self {
        let fixed: HashMap<String, f32> = scores
            .iter()
            .map(|(label, score)| (label.to_string(), *score))
            .collect();
        Self {
            classify: Box::new(move |_| ClassifyOutcome::Scored(fixed.clone())),
            summary: summary.map(str::to_string),
        }
    }

    /// Mock with a per-input classify function.
    pub fn with(
        classify: impl Fn(&str) -> ClassifyOutcome + Send + Sync + 'static,
        summary: Option<&str>,
    ) -> Self {
        Self {
            classify: Box::new(classify),
            summary: summary.map(str::to_string),
        }
    }
}

impl InferenceClient for MockInference {
    fn is_configured(&self) -> bool {
        true
    }
    fn zero_shot<'a>(
        &'a self,
        text: &'a str,
        labels: &'a [&'a str],
    ) -> Pin<Box<dyn Future<Output = ClassifyOutcome> + Send + 'a>> {
        assert!(
            labels.len() >= 2,
            "zero-shot classification needs at least 2 candidate labels"
        );
        let out = (self.classify)(text);
        Box::pin(async move { out })
    }
    fn summarize<'a>(
        &'a self,
        _text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Option<String>> + Send + 'a>> {
        let out = self.summary.clone();
        Box::pin(async move { out })
    }
    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

// ------------------------------------------------------------
// Logging helpers
// ------------------------------------------------------------

/// Short anonymized id for log lines. Claim text itself is never logged.
pub(crate) fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}
