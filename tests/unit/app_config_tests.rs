/*!
 * Tests for application configuration
 */

use yasnai::app_config::{Config, FailurePolicy};

/// Test default configuration values
#[test]
fn test_default_config_shouldCarryDocumentedDefaults() {
    let config = Config::default();

    assert_eq!(config.voice, "my-thiha");
    assert_eq!(config.synthesis.retry_count, 3);
    assert_eq!(config.synthesis.retry_backoff_ms, 1000);
    assert_eq!(config.synthesis.failure_policy, FailurePolicy::FailSoft);
    assert_eq!(config.synthesis.failure_silence_ms, 1000);
    assert_eq!(config.engine.max_speed_factor, 1.5);
    assert_eq!(config.engine.merge_gap_threshold_ms, 500);
    assert_eq!(config.engine.max_compression_ratio, 2.0);
    assert_eq!(config.engine.breath_cap_ms, 800);
    assert_eq!(config.engine.breath_floor_ms, 300);
    assert_eq!(config.engine.min_estimate_secs, 0.4);
    assert_eq!(config.engine.chars_per_second, 14.0);
    assert!(!config.shortener.enabled);
}

/// Test default configuration validates
#[test]
fn test_default_config_shouldValidate() {
    assert!(Config::default().validate().is_ok());
}

/// Test partial JSON falls back to defaults
#[test]
fn test_config_fromPartialJson_shouldFillDefaults() {
    let json = r#"{
        "voice": "en-jenny",
        "synthesis": { "endpoint": "http://tts.local:8080", "retry_count": 5 }
    }"#;

    let config: Config = serde_json::from_str(json).unwrap();
    assert_eq!(config.voice, "en-jenny");
    assert_eq!(config.synthesis.endpoint, "http://tts.local:8080");
    assert_eq!(config.synthesis.retry_count, 5);
    assert_eq!(config.synthesis.timeout_secs, 30);
    assert_eq!(config.engine.max_speed_factor, 1.5);
}

/// Test failure policy serde spelling
#[test]
fn test_failure_policy_fromJson_shouldParseLowercase() {
    let json = r#"{ "synthesis": { "failure_policy": "failhard" } }"#;
    let config: Config = serde_json::from_str(json).unwrap();
    assert_eq!(config.synthesis.failure_policy, FailurePolicy::FailHard);

    assert_eq!("hard".parse::<FailurePolicy>().unwrap(), FailurePolicy::FailHard);
    assert_eq!("fail-soft".parse::<FailurePolicy>().unwrap(), FailurePolicy::FailSoft);
    assert!("maybe".parse::<FailurePolicy>().is_err());
}

/// Test the SSML toggle defaults off and parses from JSON
#[test]
fn test_config_withSsmlFlag_shouldParse() {
    assert!(!Config::default().synthesis.ssml);

    let json = r#"{ "synthesis": { "ssml": true } }"#;
    let config: Config = serde_json::from_str(json).unwrap();
    assert!(config.synthesis.ssml);
}

/// Test validation rejects an unknown voice
#[test]
fn test_validate_withUnknownVoice_shouldFail() {
    let mut config = Config::default();
    config.voice = "no-such-voice".to_string();
    assert!(config.validate().is_err());
}

/// Test validation rejects a broken endpoint
#[test]
fn test_validate_withEmptyEndpoint_shouldFail() {
    let mut config = Config::default();
    config.synthesis.endpoint = String::new();
    assert!(config.validate().is_err());
}

/// Test validation rejects inconsistent engine bounds
#[test]
fn test_validate_withBadEngineBounds_shouldFail() {
    let mut config = Config::default();
    config.engine.max_speed_factor = 0.5;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.engine.breath_floor_ms = 900;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.engine.chars_per_second = 0.0;
    assert!(config.validate().is_err());
}

/// Test the shortener requires a key only when enabled
#[test]
fn test_validate_withEnabledShortenerAndNoKey_shouldFail() {
    let mut config = Config::default();
    config.shortener.enabled = true;
    assert!(config.validate().is_err());

    config.shortener.api_key = "key".to_string();
    assert!(config.validate().is_ok());
}
