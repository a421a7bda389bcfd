/*!
 * Tests for audio segments and WAV I/O
 *
 * Only the hound-backed paths are exercised here; ffmpeg-dependent
 * conversion is covered by the gateway client at runtime.
 */

use anyhow::Result;
use yasnai::audio::{read_wav, write_wav, AudioSegment};
use crate::common;

/// Test silence generation duration math
#[test]
fn test_silence_withDuration_shouldMatchSampleCount() {
    let segment = AudioSegment::silence(500, common::TEST_SAMPLE_RATE);
    assert_eq!(segment.samples.len(), 4000);
    assert_eq!(segment.duration_ms(), 500);
    assert!(segment.samples.iter().all(|&s| s == 0.0));
}

/// Test truncation to a shorter duration
#[test]
fn test_truncate_withLongerSegment_shouldTrimToDuration() {
    let mut segment = AudioSegment::silence(1000, common::TEST_SAMPLE_RATE);
    segment.truncate_to_ms(250);
    assert_eq!(segment.duration_ms(), 250);

    // Truncating to a longer duration is a no-op
    segment.truncate_to_ms(5000);
    assert_eq!(segment.duration_ms(), 250);
}

/// Test empty segment predicate
#[test]
fn test_is_empty_withZeroSamples_shouldBeTrue() {
    assert!(AudioSegment::new(Vec::new(), common::TEST_SAMPLE_RATE).is_empty());
    assert!(!AudioSegment::silence(10, common::TEST_SAMPLE_RATE).is_empty());
}

/// Test WAV write/read preserves duration and rate
#[test]
fn test_wav_roundtrip_withGeneratedTone_shouldPreserveShape() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("tone.wav");

    let samples: Vec<f32> = (0..8000)
        .map(|i| (i as f32 * 0.05).sin() * 0.5)
        .collect();
    let original = AudioSegment::new(samples, common::TEST_SAMPLE_RATE);

    write_wav(&original, &path)?;
    let reread = read_wav(&path)?;

    assert_eq!(reread.sample_rate, common::TEST_SAMPLE_RATE);
    assert_eq!(reread.samples.len(), original.samples.len());
    assert_eq!(reread.duration_ms(), 1000);

    // 16-bit quantization bounds the roundtrip error
    for (a, b) in original.samples.iter().zip(reread.samples.iter()) {
        assert!((a - b).abs() < 0.001);
    }

    Ok(())
}

/// Test reading a missing file is an error, not a panic
#[test]
fn test_read_wav_withMissingFile_shouldFail() {
    assert!(read_wav("/nonexistent/file.wav").is_err());
}
