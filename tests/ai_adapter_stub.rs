// tests/ai_adapter_stub.rs
// Client factory behavior. These tests mutate process env, so they are
// serialized.

use claims_insight_engine::build_client_from_config;
use claims_insight_engine::config::ai::AiConfig;
use serial_test::serial;

fn config(enabled: bool, provider: &str, api_key: &str) -> AiConfig {
    AiConfig {
        enabled,
        provider: provider.to_string(),
        api_key: api_key.to_string(),
        ..AiConfig::default()
    }
}

#[test]
#[serial]
fn mock_mode_overrides_config() {
    std::env::set_var("AI_TEST_MODE", "mock");
    let client = build_client_from_config(&config(false, "huggingface", ""));
    std::env::remove_var("AI_TEST_MODE");

    assert_eq!(client.provider_name(), "mock");
    assert!(client.is_configured());
}

#[test]
#[serial]
fn disabled_config_builds_disabled_client() {
    std::env::remove_var("AI_TEST_MODE");
    let client = build_client_from_config(&config(false, "huggingface", "hf_key"));
    assert_eq!(client.provider_name(), "disabled");
    assert!(!client.is_configured());
}

#[test]
#[serial]
fn missing_api_key_degrades_to_disabled() {
    std::env::remove_var("AI_TEST_MODE");
    let client = build_client_from_config(&config(true, "huggingface", ""));
    assert_eq!(client.provider_name(), "disabled");
}

#[test]
#[serial]
fn unsupported_provider_degrades_to_disabled() {
    std::env::remove_var("AI_TEST_MODE");
    let client = build_client_from_config(&config(true, "acme-nlp", "key"));
    assert_eq!(client.provider_name(), "disabled");
}

#[test]
#[serial]
fn configured_provider_builds_real_client() {
    std::env::remove_var("AI_TEST_MODE");
    let client = build_client_from_config(&config(true, "huggingface", "hf_key"));
    assert_eq!(client.provider_name(), "huggingface");
    assert!(client.is_configured());
}
