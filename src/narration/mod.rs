/*!
 * Narration engine: turns a subtitle collection into one continuous track.
 *
 * The planner decides per cue how to make the speech fit its slot, the
 * synthesizer produces audio with retries and a failure policy, the cache
 * deduplicates identical requests within one job, and the timeline assembler
 * lays segments out against the original timestamps.
 */

pub mod cache;
pub mod estimate;
pub mod planner;
pub mod progress;
pub mod synthesizer;
pub mod timeline;

pub use cache::SynthesisCache;
pub use planner::{CuePlanner, PlannedUnit};
pub use progress::ProgressReporter;
pub use synthesizer::Synthesizer;
pub use timeline::Timeline;
