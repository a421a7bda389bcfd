/*!
 * Common test utilities for the yasnai test suite
 */

use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use yasnai::app_config::Config;
use yasnai::subtitle_processor::SubtitleEntry;

/// Sample rate used by most audio-touching tests; small to keep them fast
pub const TEST_SAMPLE_RATE: u32 = 8_000;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a sample subtitle file for testing
pub fn create_test_subtitle(dir: &PathBuf, filename: &str) -> Result<PathBuf> {
    let content = r#"1
00:00:01,000 --> 00:00:04,000
This is a test subtitle.

2
00:00:05,000 --> 00:00:09,000
It contains multiple entries.

3
00:00:10,000 --> 00:00:14,000
For testing purposes.
"#;
    create_test_file(dir, filename, content)
}

/// Shorthand for building a cue without validation
pub fn entry(seq_num: usize, start_ms: u64, end_ms: u64, text: &str) -> SubtitleEntry {
    SubtitleEntry::new(seq_num, start_ms, end_ms, text.to_string())
}

/// Config tuned for tests: fast retries, small sample rate, silence that
/// fits any slot used in the suite
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.synthesis.sample_rate = TEST_SAMPLE_RATE;
    config.synthesis.retry_count = 3;
    config.synthesis.retry_backoff_ms = 1;
    config.synthesis.failure_silence_ms = 300;
    config
}
