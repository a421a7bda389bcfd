/*!
 * Per-job synthesis cache.
 *
 * Keyed by (text, voice id, rate). Constructed inside the controller for each
 * job and dropped with it; repeated cues and retried jobs within one run
 * never hit the provider twice for the same request.
 */

use std::collections::HashMap;

use log::debug;
use parking_lot::Mutex;

use crate::audio::AudioSegment;
use crate::providers::SynthesisRequest;

type CacheKey = (String, String, u32);

/// In-memory synthesis cache scoped to one narration job
pub struct SynthesisCache {
    entries: Mutex<HashMap<CacheKey, AudioSegment>>,
    hits: Mutex<u64>,
    misses: Mutex<u64>,
}

impl SynthesisCache {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            hits: Mutex::new(0),
            misses: Mutex::new(0),
        }
    }

    fn key(request: &SynthesisRequest) -> CacheKey {
        (
            request.text.clone(),
            request.voice_id.clone(),
            request.rate_percent,
        )
    }

    /// Look up a previously synthesized segment
    pub fn get(&self, request: &SynthesisRequest) -> Option<AudioSegment> {
        let entries = self.entries.lock();
        match entries.get(&Self::key(request)) {
            Some(segment) => {
                *self.hits.lock() += 1;
                Some(segment.clone())
            }
            None => {
                *self.misses.lock() += 1;
                None
            }
        }
    }

    /// Store a synthesized segment
    pub fn put(&self, request: &SynthesisRequest, segment: AudioSegment) {
        self.entries.lock().insert(Self::key(request), segment);
    }

    /// Number of cached segments
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Log hit/miss counters for the finished job
    pub fn log_stats(&self) {
        debug!(
            "Synthesis cache: {} entries, {} hits, {} misses",
            self.len(),
            *self.hits.lock(),
            *self.misses.lock()
        );
    }
}

impl Default for SynthesisCache {
    fn default() -> Self {
        Self::new()
    }
}
