/*!
 * Provider interfaces for external services.
 *
 * Two seams: speech synthesis gateways and the optional text shortener.
 * Implementations live in sibling modules; the mock provider backs tests.
 */

use async_trait::async_trait;

use crate::audio::AudioSegment;
use crate::errors::ProviderError;

pub mod edge;
pub mod gemini;
pub mod mock;

/// How the request text should be interpreted by the synthesis engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SpeechMode {
    /// Plain prose, engine applies its own prosody
    #[default]
    PlainText,
    /// Text carries SSML markup the engine must honor
    SsmlMarkup,
}

/// A single synthesis request.
///
/// `rate_percent` is a speed-up above the natural rate, in whole percent;
/// 0 means natural speed.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    /// Normalized text to speak
    pub text: String,

    /// Engine voice identifier (already resolved from the catalog)
    pub voice_id: String,

    /// Speed-up above natural rate, in percent
    pub rate_percent: u32,

    /// Interpretation of the text payload
    pub mode: SpeechMode,
}

impl SynthesisRequest {
    pub fn new(text: impl Into<String>, voice_id: impl Into<String>, rate_percent: u32) -> Self {
        Self {
            text: text.into(),
            voice_id: voice_id.into(),
            rate_percent,
            mode: SpeechMode::PlainText,
        }
    }

    /// Override the payload interpretation
    pub fn with_mode(mut self, mode: SpeechMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Trait for speech synthesis backends
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Synthesize one request into a decoded audio segment.
    ///
    /// Implementations must not retry internally; the synthesizer layer owns
    /// the retry policy.
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<AudioSegment, ProviderError>;

    /// Short name for logging
    fn name(&self) -> &str;
}

/// Trait for opportunistic text shortening backends
#[async_trait]
pub trait TextShortener: Send + Sync {
    /// Ask for a tighter phrasing of `text` that should fit roughly within
    /// `target_secs` of speech. Errors are advisory; callers keep the
    /// original text on any failure.
    async fn shorten(&self, text: &str, target_secs: f64) -> Result<String, ProviderError>;
}
