/*!
 * Deterministic in-memory provider used by tests and dry runs.
 *
 * Speech duration is derived from text length and the requested rate, so
 * planner and timeline behavior is fully predictable without a network or
 * ffmpeg.
 */

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::audio::AudioSegment;
use crate::errors::ProviderError;
use crate::providers::{SpeechProvider, SynthesisRequest, TextShortener};

/// Speaking rate assumed by the mock, characters per second
const MOCK_CHARS_PER_SECOND: f64 = 14.0;

/// Floor on mock speech duration, milliseconds
const MOCK_MIN_DURATION_MS: u64 = 400;

/// Mock speech provider with scriptable failures
pub struct MockSpeechProvider {
    sample_rate: u32,
    /// Number of initial calls that fail before the provider recovers
    fail_first: AtomicU32,
    calls: AtomicU32,
    requests: Mutex<Vec<SynthesisRequest>>,
}

impl MockSpeechProvider {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            fail_first: AtomicU32::new(0),
            calls: AtomicU32::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Make the first `n` synthesize calls fail with a transport error
    pub fn fail_first(self, n: u32) -> Self {
        self.fail_first.store(n, Ordering::SeqCst);
        self
    }

    /// Total number of synthesize calls observed
    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    /// Copy of every request received, in order
    pub fn recorded_requests(&self) -> Vec<SynthesisRequest> {
        self.requests.lock().clone()
    }

    /// Duration the mock will speak the given text at the given rate
    pub fn expected_duration_ms(text: &str, rate_percent: u32) -> u64 {
        let natural = ((text.chars().count() as f64 / MOCK_CHARS_PER_SECOND) * 1000.0) as u64;
        let natural = natural.max(MOCK_MIN_DURATION_MS);
        (natural as f64 / (1.0 + rate_percent as f64 / 100.0)) as u64
    }
}

#[async_trait]
impl SpeechProvider for MockSpeechProvider {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<AudioSegment, ProviderError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(request.clone());

        if call < self.fail_first.load(Ordering::SeqCst) {
            return Err(ProviderError::ConnectionError(format!(
                "Mock failure on call {}",
                call + 1
            )));
        }

        let duration_ms = Self::expected_duration_ms(&request.text, request.rate_percent);
        let count = (duration_ms as u128 * self.sample_rate as u128 / 1000) as usize;

        // Non-zero constant samples so substituted silence is distinguishable
        Ok(AudioSegment::new(vec![0.1; count], self.sample_rate))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Mock shortener that replaces the text with a canned response
pub struct MockShortener {
    response: Option<String>,
}

impl MockShortener {
    /// Shortener that always answers with the given text
    pub fn answering(response: impl Into<String>) -> Self {
        Self {
            response: Some(response.into()),
        }
    }

    /// Shortener that always fails
    pub fn failing() -> Self {
        Self { response: None }
    }
}

#[async_trait]
impl TextShortener for MockShortener {
    async fn shorten(&self, _text: &str, _target_secs: f64) -> Result<String, ProviderError> {
        match &self.response {
            Some(text) => Ok(text.clone()),
            None => Err(ProviderError::RequestFailed("Mock shortener failure".to_string())),
        }
    }
}
