/*!
 * Timeline assembler.
 *
 * Append-only buffer of mono samples with a cursor that never moves
 * backwards. Gaps between the cursor and a cue's start are filled with a
 * bounded breathing pause; oversized gaps are collapsed to the bound rather
 * than reproduced.
 */

use log::debug;

use crate::app_config::EngineConfig;
use crate::audio::AudioSegment;

/// Append-only audio timeline owned by one narration job
pub struct Timeline {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl Timeline {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            samples: Vec::new(),
            sample_rate,
        }
    }

    /// Current cursor position in milliseconds.
    ///
    /// Derived from the sample count so repeated placement cannot drift.
    pub fn cursor_ms(&self) -> u64 {
        (self.samples.len() as u128 * 1000 / self.sample_rate as u128) as u64
    }

    /// Append silence of the given duration
    pub fn append_silence_ms(&mut self, duration_ms: u64) {
        let count = (duration_ms as u128 * self.sample_rate as u128 / 1000) as usize;
        self.samples.extend(std::iter::repeat(0.0).take(count));
    }

    /// Place a segment at (or after) its intended start.
    ///
    /// When the cursor lags behind `start_ms`, at most `breath_ms` of silence
    /// is inserted first; a start before the cursor appends immediately, the
    /// cursor never rewinds.
    pub fn place(&mut self, start_ms: u64, segment: &AudioSegment, breath_ms: u64) {
        debug_assert_eq!(segment.sample_rate, self.sample_rate);

        let cursor = self.cursor_ms();
        if start_ms > cursor {
            let gap = start_ms - cursor;
            let pause = gap.min(breath_ms);
            if gap > pause {
                debug!("Collapsing {} ms gap to a {} ms pause", gap, pause);
            }
            self.append_silence_ms(pause);
        }

        self.samples.extend_from_slice(&segment.samples);
    }

    /// Pad with trailing silence so the track lasts at least `end_ms`
    pub fn pad_to_ms(&mut self, end_ms: u64) {
        let cursor = self.cursor_ms();
        if end_ms > cursor {
            self.append_silence_ms(end_ms - cursor);
        }
    }

    /// Consume the timeline into a single exportable segment
    pub fn into_segment(self) -> AudioSegment {
        AudioSegment::new(self.samples, self.sample_rate)
    }
}

/// Adaptive breathing bound for the pause before a cue.
///
/// Longer utterances earn a longer breath; the result stays within the
/// configured floor and cap.
pub fn adaptive_breath_ms(text: &str, engine: &EngineConfig) -> u64 {
    let scaled = engine.breath_floor_ms + text.chars().count() as u64 * 5;
    scaled.clamp(engine.breath_floor_ms, engine.breath_cap_ms)
}
