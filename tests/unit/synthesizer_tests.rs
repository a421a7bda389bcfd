/*!
 * Tests for the retrying synthesizer and failure policy
 */

use yasnai::app_config::FailurePolicy;
use yasnai::errors::SynthesisError;
use yasnai::narration::{SynthesisCache, Synthesizer};
use yasnai::providers::mock::MockSpeechProvider;
use yasnai::providers::SynthesisRequest;
use crate::common::{test_config, TEST_SAMPLE_RATE};

fn request() -> SynthesisRequest {
    SynthesisRequest::new("hello there", "en-US-JennyNeural", 0)
}

/// Test a repeated request hits the cache instead of the provider
#[tokio::test]
async fn test_synthesizer_withRepeatedRequest_shouldCallProviderOnce() {
    let config = test_config();
    let provider = MockSpeechProvider::new(TEST_SAMPLE_RATE);
    let cache = SynthesisCache::new();
    let synthesizer = Synthesizer::new(&provider, &cache, &config.synthesis);

    let first = synthesizer.synthesize(&request()).await.unwrap();
    let second = synthesizer.synthesize(&request()).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(provider.call_count(), 1);
}

/// Test a transient failure is retried until it succeeds
#[tokio::test]
async fn test_synthesizer_withOneTransientFailure_shouldRecover() {
    let config = test_config();
    let provider = MockSpeechProvider::new(TEST_SAMPLE_RATE).fail_first(1);
    let cache = SynthesisCache::new();
    let synthesizer = Synthesizer::new(&provider, &cache, &config.synthesis);

    let segment = synthesizer.synthesize(&request()).await.unwrap();
    assert!(!segment.is_empty());
    assert_eq!(provider.call_count(), 2);
}

/// Test exhausted retries under fail-soft yield a silent substitute
#[tokio::test]
async fn test_synthesizer_withPersistentFailure_underFailSoft_shouldSubstituteSilence() {
    let config = test_config();
    let provider = MockSpeechProvider::new(TEST_SAMPLE_RATE).fail_first(u32::MAX);
    let cache = SynthesisCache::new();
    let synthesizer = Synthesizer::new(&provider, &cache, &config.synthesis);

    let segment = synthesizer.synthesize_with_policy(&request()).await.unwrap();

    assert_eq!(provider.call_count(), config.synthesis.retry_count);
    assert_eq!(segment.duration_ms(), config.synthesis.failure_silence_ms);
    assert!(segment.samples.iter().all(|&s| s == 0.0));

    // The substitute is not cached; a later attempt goes back to the provider
    assert!(cache.is_empty());
}

/// Test exhausted retries under fail-hard abort with an error
#[tokio::test]
async fn test_synthesizer_withPersistentFailure_underFailHard_shouldError() {
    let mut config = test_config();
    config.synthesis.failure_policy = FailurePolicy::FailHard;
    let provider = MockSpeechProvider::new(TEST_SAMPLE_RATE).fail_first(u32::MAX);
    let cache = SynthesisCache::new();
    let synthesizer = Synthesizer::new(&provider, &cache, &config.synthesis);

    let result = synthesizer.synthesize_with_policy(&request()).await;
    assert!(matches!(
        result,
        Err(SynthesisError::RetriesExhausted { attempts: 3, .. })
    ));
}

/// Test the request carries the rate through to the provider
#[tokio::test]
async fn test_synthesizer_withRatedRequest_shouldForwardRate() {
    let config = test_config();
    let provider = MockSpeechProvider::new(TEST_SAMPLE_RATE);
    let cache = SynthesisCache::new();
    let synthesizer = Synthesizer::new(&provider, &cache, &config.synthesis);

    let rated = SynthesisRequest::new("hello there", "en-US-JennyNeural", 25);
    let natural = synthesizer.synthesize(&request()).await.unwrap();
    let sped_up = synthesizer.synthesize(&rated).await.unwrap();

    assert!(sped_up.duration_ms() < natural.duration_ms());
    assert_eq!(provider.recorded_requests()[1].rate_percent, 25);
}
