/*!
 * Retrying synthesizer.
 *
 * Wraps a speech provider with the per-job cache, bounded retries with
 * exponential backoff, and the configured failure policy. A cache hit never
 * touches the provider.
 */

use std::time::Duration;

use log::{debug, error, warn};

use crate::app_config::{FailurePolicy, SynthesisConfig};
use crate::audio::AudioSegment;
use crate::errors::SynthesisError;
use crate::narration::cache::SynthesisCache;
use crate::providers::{SpeechProvider, SynthesisRequest};

/// Synthesizer bound to one job's provider, cache, and policy
pub struct Synthesizer<'a> {
    provider: &'a dyn SpeechProvider,
    cache: &'a SynthesisCache,
    config: &'a SynthesisConfig,
}

impl<'a> Synthesizer<'a> {
    pub fn new(
        provider: &'a dyn SpeechProvider,
        cache: &'a SynthesisCache,
        config: &'a SynthesisConfig,
    ) -> Self {
        Self {
            provider,
            cache,
            config,
        }
    }

    /// Synthesize a request, consulting the cache first.
    ///
    /// Retries transient provider failures with exponential backoff; returns
    /// `RetriesExhausted` once every attempt has failed.
    pub async fn synthesize(
        &self,
        request: &SynthesisRequest,
    ) -> Result<AudioSegment, SynthesisError> {
        if let Some(segment) = self.cache.get(request) {
            debug!(
                "Cache hit for {} chars at +{}%",
                request.text.chars().count(),
                request.rate_percent
            );
            return Ok(segment);
        }

        let max_attempts = self.config.retry_count.max(1);
        let mut last_error = String::new();

        for attempt in 1..=max_attempts {
            match self.provider.synthesize(request).await {
                Ok(segment) if !segment.is_empty() => {
                    self.cache.put(request, segment.clone());
                    return Ok(segment);
                }
                Ok(_) => {
                    last_error = "Provider returned an empty segment".to_string();
                    warn!(
                        "Synthesis attempt {}/{} via {} produced no audio",
                        attempt,
                        max_attempts,
                        self.provider.name()
                    );
                }
                Err(e) => {
                    last_error = e.to_string();
                    warn!(
                        "Synthesis attempt {}/{} via {} failed: {}",
                        attempt,
                        max_attempts,
                        self.provider.name(),
                        e
                    );
                }
            }

            if attempt < max_attempts {
                let backoff_ms = self.config.retry_backoff_ms * (1 << (attempt - 1));
                debug!("Backing off for {} ms before retry", backoff_ms);
                tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
            }
        }

        Err(SynthesisError::RetriesExhausted {
            attempts: max_attempts,
            message: last_error,
        })
    }

    /// Synthesize with the failure policy applied.
    ///
    /// Under fail-soft, exhausted retries yield a fixed-duration silent
    /// substitute (not cached) so the job keeps going; under fail-hard the
    /// error propagates and aborts the job.
    pub async fn synthesize_with_policy(
        &self,
        request: &SynthesisRequest,
    ) -> Result<AudioSegment, SynthesisError> {
        match self.synthesize(request).await {
            Ok(segment) => Ok(segment),
            Err(e) => match self.config.failure_policy {
                FailurePolicy::FailSoft => {
                    error!("{}; substituting {} ms of silence", e, self.config.failure_silence_ms);
                    Ok(AudioSegment::silence(
                        self.config.failure_silence_ms,
                        self.config.sample_rate,
                    ))
                }
                FailurePolicy::FailHard => Err(e),
            },
        }
    }
}
