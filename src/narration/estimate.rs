//! Synthesis-free speech duration estimation.

use crate::app_config::EngineConfig;

/// Estimate how long the text takes to speak at natural rate, in seconds.
///
/// A flat character-rate model: fast, deterministic, and close enough to
/// choose a strategy before any synthesis happens. The floor keeps very
/// short cues from producing degenerate rate math.
pub fn estimate_seconds(text: &str, engine: &EngineConfig) -> f64 {
    let chars = text.chars().count() as f64;
    (chars / engine.chars_per_second).max(engine.min_estimate_secs)
}

/// Same estimate in whole milliseconds
pub fn estimate_ms(text: &str, engine: &EngineConfig) -> u64 {
    (estimate_seconds(text, engine) * 1000.0) as u64
}
