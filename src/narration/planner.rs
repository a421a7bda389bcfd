/*!
 * Rate/compression planner.
 *
 * Pops cues from a pending queue and decides, per cue, how the speech will
 * fit its slot: natural rate, bounded speed-up, opportunistic shortening,
 * merge with the following cue, or split at punctuation with the remainder
 * pushed back as a zero-width cue. Whatever still does not fit is left for
 * post-hoc waveform compression.
 */

use std::collections::VecDeque;

use log::{debug, warn};

use crate::app_config::EngineConfig;
use crate::narration::estimate;
use crate::providers::TextShortener;
use crate::subtitle_processor::SubtitleEntry;
use crate::text_normalizer;

/// Punctuation classes scanned for a split point, highest priority first.
/// Sentence terminators (including Myanmar and CJK stops) beat clause marks.
const SPLIT_CLASSES: [&[char]; 2] = [
    &['။', '。', '．', '.', '!', '?'],
    &[',', '،', '、', ';', ':'],
];

/// One cue's worth of planned speech
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedUnit {
    /// Timestamp the speech should start at, in ms
    pub start_ms: u64,

    /// Time available for the speech, in ms
    pub slot_ms: u64,

    /// Normalized text to synthesize
    pub text: String,

    /// Speed-up above natural rate, in percent
    pub rate_percent: u32,
}

/// Planner over a job-owned queue of pending cues
pub struct CuePlanner<'a> {
    queue: VecDeque<SubtitleEntry>,
    engine: &'a EngineConfig,
    shortener: Option<&'a dyn TextShortener>,
    total_sources: usize,
    processed_sources: usize,
}

impl<'a> CuePlanner<'a> {
    pub fn new(
        entries: Vec<SubtitleEntry>,
        engine: &'a EngineConfig,
        shortener: Option<&'a dyn TextShortener>,
    ) -> Self {
        let total_sources = entries.len();
        Self {
            queue: VecDeque::from(entries),
            engine,
            shortener,
            total_sources,
            processed_sources: 0,
        }
    }

    /// Number of cues in the original input
    pub fn total_sources(&self) -> usize {
        self.total_sources
    }

    /// Number of original cues consumed so far (split remainders and merged
    /// neighbors count against their source cue)
    pub fn processed_sources(&self) -> usize {
        self.processed_sources
    }

    /// Plan the next unit of speech, or None when the queue is drained.
    ///
    /// Cues that normalize to empty text or end up with no usable slot are
    /// skipped without producing a unit.
    pub async fn next_unit(&mut self) -> Option<PlannedUnit> {
        loop {
            let cue = self.queue.pop_front()?;

            // Split remainders are the zero-width entries we pushed ourselves
            let is_remainder = cue.end_time_ms <= cue.start_time_ms;
            if !is_remainder {
                self.processed_sources += 1;
            }

            let text = text_normalizer::normalize(&cue.text);
            if text.is_empty() {
                debug!("Cue {} has no speakable text, skipping", cue.seq_num);
                continue;
            }

            let start = cue.start_time_ms;
            let Some(slot_ms) = self.effective_slot_ms(&cue, &text) else {
                warn!("Cue {} has no usable slot, skipping", cue.seq_num);
                continue;
            };

            return Some(self.fit_text(cue.seq_num, start, slot_ms, text).await);
        }
    }

    /// Step 0: the slot a cue actually has, truncated by the next cue's start
    /// when they overlap. Zero-width remainders inherit the next cue's start
    /// as their end; a trailing remainder gets its natural estimated duration.
    fn effective_slot_ms(&self, cue: &SubtitleEntry, text: &str) -> Option<u64> {
        let start = cue.start_time_ms;
        let is_remainder = cue.end_time_ms <= start;

        let end = match self.queue.front() {
            Some(next) => {
                if is_remainder {
                    next.start_time_ms.max(start)
                } else {
                    cue.end_time_ms.min(next.start_time_ms.max(start))
                }
            }
            None => {
                if is_remainder {
                    start + estimate::estimate_ms(text, self.engine)
                } else {
                    cue.end_time_ms
                }
            }
        };

        let slot = end.saturating_sub(start);
        (slot > 0).then_some(slot)
    }

    /// Steps 1-5: choose rate, shorten, merge, or split until the text fits
    /// or every option is exhausted.
    async fn fit_text(
        &mut self,
        seq_num: usize,
        start: u64,
        mut slot_ms: u64,
        mut text: String,
    ) -> PlannedUnit {
        let max_rate = ((self.engine.max_speed_factor - 1.0) * 100.0) as u32;
        let mut shortening_tried = false;
        let mut head_final = false;

        loop {
            let slot_sec = slot_ms as f64 / 1000.0;
            let est = estimate::estimate_seconds(&text, self.engine);

            // Step 1: fits at natural rate
            if est <= slot_sec {
                return PlannedUnit {
                    start_ms: start,
                    slot_ms,
                    text,
                    rate_percent: 0,
                };
            }

            // Step 2: fits with a bounded speed-up
            if est <= slot_sec * self.engine.max_speed_factor {
                let rate = (((est / slot_sec - 1.0) * 100.0) as u32).min(max_rate);
                return PlannedUnit {
                    start_ms: start,
                    slot_ms,
                    text,
                    rate_percent: rate,
                };
            }

            // Step 3: ask the shortener once; failure keeps the original text
            if !shortening_tried {
                shortening_tried = true;
                if let Some(shortener) = self.shortener {
                    match shortener.shorten(&text, slot_sec).await {
                        Ok(shortened) => {
                            let shortened = text_normalizer::normalize(&shortened);
                            if !shortened.is_empty()
                                && shortened.chars().count() < text.chars().count()
                            {
                                debug!("Cue {}: shortened text accepted", seq_num);
                                text = shortened;
                                continue;
                            }
                        }
                        Err(e) => {
                            warn!("Cue {}: shortener failed, keeping original text: {}", seq_num, e);
                        }
                    }
                }
            }

            // Once a split has cut the text for this slot, the head is
            // final: merging again would pull the just-deferred remainder
            // straight back and re-create the pre-split state
            if !head_final {
                // Step 4: merge with the following cue when the gap is small
                if let Some(merged_slot) = self.try_merge(start, slot_ms, &mut text) {
                    slot_ms = merged_slot;
                    continue;
                }

                // Step 5: split at the best punctuation mark and requeue the rest
                if let Some(head) = self.try_split(seq_num, start, slot_ms, &text) {
                    text = head;
                    head_final = true;
                    continue;
                }
            }

            // Nothing left to try: cap the rate and rely on post-hoc
            // compression of the synthesized waveform
            debug!(
                "Cue {}: still over capacity, relying on compression",
                seq_num
            );
            return PlannedUnit {
                start_ms: start,
                slot_ms,
                text,
                rate_percent: max_rate,
            };
        }
    }

    /// Step 4 helper. Consumes the next cue when the gap allows, returning
    /// the extended slot (both cues plus the gap between them).
    fn try_merge(&mut self, start: u64, slot_ms: u64, text: &mut String) -> Option<u64> {
        let current_end = start + slot_ms;
        let gap = self
            .queue
            .front()?
            .start_time_ms
            .saturating_sub(current_end);
        if gap > self.engine.merge_gap_threshold_ms {
            return None;
        }

        let next = self.queue.pop_front()?;
        self.processed_sources += 1;

        let next_text = text_normalizer::normalize(&next.text);
        if !next_text.is_empty() {
            text.push(' ');
            text.push_str(&next_text);
        }

        // The merged slot may itself be truncated by the cue after it
        let mut end = next.end_time_ms.max(current_end);
        if let Some(following) = self.queue.front() {
            if following.start_time_ms < end {
                end = following.start_time_ms.max(start);
            }
        }

        debug!(
            "Merged cue {} into previous, slot extended to {} ms",
            next.seq_num,
            end.saturating_sub(start)
        );

        Some(end.saturating_sub(start))
    }

    /// Step 5 helper. Returns the head segment and pushes the remainder to
    /// the queue front as a zero-width cue at the current slot end.
    fn try_split(&mut self, seq_num: usize, start: u64, slot_ms: u64, text: &str) -> Option<String> {
        let (head, tail) = split_at_best_mark(text)?;

        let slot_end = start + slot_ms;
        let deferred_chars = tail.chars().count();
        self.queue
            .push_front(SubtitleEntry::new(seq_num, slot_end, slot_end, tail));

        debug!(
            "Cue {}: split, {} chars deferred to a zero-width remainder",
            seq_num, deferred_chars
        );

        Some(head)
    }
}

/// Split the text at the first occurrence of the highest-priority punctuation
/// class present. The head keeps its terminating mark; both halves must be
/// non-empty for the split to count.
fn split_at_best_mark(text: &str) -> Option<(String, String)> {
    for class in SPLIT_CLASSES {
        let mark_pos = text
            .char_indices()
            .find(|(_, ch)| class.contains(ch))
            .map(|(i, ch)| i + ch.len_utf8());

        if let Some(pos) = mark_pos {
            let head = text[..pos].trim();
            let tail = text[pos..].trim();
            if !head.is_empty() && !tail.is_empty() {
                return Some((head.to_string(), tail.to_string()));
            }
        }
    }
    None
}
