/*!
 * Tests for timeline assembly
 */

use yasnai::app_config::EngineConfig;
use yasnai::audio::AudioSegment;
use yasnai::narration::timeline::{adaptive_breath_ms, Timeline};
use crate::common::TEST_SAMPLE_RATE;

fn tone(duration_ms: u64) -> AudioSegment {
    let count = (duration_ms as u128 * TEST_SAMPLE_RATE as u128 / 1000) as usize;
    AudioSegment::new(vec![0.2; count], TEST_SAMPLE_RATE)
}

/// Test the cursor advances by exactly the placed audio
#[test]
fn test_timeline_withBackToBackSegments_shouldAdvanceCursor() {
    let mut timeline = Timeline::new(TEST_SAMPLE_RATE);
    assert_eq!(timeline.cursor_ms(), 0);

    timeline.place(0, &tone(500), 800);
    assert_eq!(timeline.cursor_ms(), 500);

    timeline.place(500, &tone(250), 800);
    assert_eq!(timeline.cursor_ms(), 750);
}

/// Test a small gap is reproduced as a breathing pause
#[test]
fn test_timeline_withSmallGap_shouldInsertPauseVerbatim() {
    let mut timeline = Timeline::new(TEST_SAMPLE_RATE);
    timeline.place(0, &tone(500), 800);

    // 300 ms gap, inside the 800 ms bound
    timeline.place(800, &tone(200), 800);
    assert_eq!(timeline.cursor_ms(), 1000);
}

/// Test an oversized gap collapses to the breathing bound
#[test]
fn test_timeline_withLargeGap_shouldCollapseToBreath() {
    let mut timeline = Timeline::new(TEST_SAMPLE_RATE);
    timeline.place(0, &tone(500), 800);

    // 9.5 s of dead air collapses to 800 ms of pause
    timeline.place(10_000, &tone(200), 800);
    assert_eq!(timeline.cursor_ms(), 1500);
}

/// Test a start behind the cursor never rewinds it
#[test]
fn test_timeline_withLateStart_shouldNeverRewind() {
    let mut timeline = Timeline::new(TEST_SAMPLE_RATE);
    timeline.place(0, &tone(1000), 800);

    // Scheduled at 500 ms but the cursor is already at 1000 ms
    timeline.place(500, &tone(300), 800);
    assert_eq!(timeline.cursor_ms(), 1300);
}

/// Test trailing padding extends the track to the schedule end
#[test]
fn test_timeline_padToMs_shouldExtendWithSilence() {
    let mut timeline = Timeline::new(TEST_SAMPLE_RATE);
    timeline.place(0, &tone(400), 800);

    timeline.pad_to_ms(1500);
    assert_eq!(timeline.cursor_ms(), 1500);

    // Padding never truncates
    timeline.pad_to_ms(1000);
    assert_eq!(timeline.cursor_ms(), 1500);

    let segment = timeline.into_segment();
    assert_eq!(segment.duration_ms(), 1500);
    // Tail is silent
    assert!(segment.samples[segment.samples.len() - 100..]
        .iter()
        .all(|&s| s == 0.0));
}

/// Test the adaptive breath stays within the configured bounds
#[test]
fn test_adaptive_breath_withVariedTextLengths_shouldStayBounded() {
    let engine = EngineConfig::default();

    assert_eq!(adaptive_breath_ms("", &engine), 300);
    assert_eq!(adaptive_breath_ms("short", &engine), 325);
    assert_eq!(adaptive_breath_ms(&"x".repeat(500), &engine), 800);
}
