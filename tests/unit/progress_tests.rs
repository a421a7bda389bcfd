/*!
 * Tests for throttled progress reporting
 */

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use yasnai::narration::ProgressReporter;

/// Test updates inside the interval are suppressed
#[test]
fn test_progress_withRapidUpdates_shouldThrottle() {
    let count = Arc::new(AtomicUsize::new(0));
    let sink_count = count.clone();
    let reporter = ProgressReporter::with_interval(
        10,
        move |_processed, _total| {
            sink_count.fetch_add(1, Ordering::SeqCst);
        },
        Duration::from_secs(60),
    );

    for i in 0..10 {
        reporter.update(i);
    }

    // Only the first update goes through inside one interval
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

/// Test a zero interval forwards every update
#[test]
fn test_progress_withZeroInterval_shouldForwardEveryUpdate() {
    let count = Arc::new(AtomicUsize::new(0));
    let sink_count = count.clone();
    let reporter = ProgressReporter::with_interval(
        3,
        move |_processed, _total| {
            sink_count.fetch_add(1, Ordering::SeqCst);
        },
        Duration::from_secs(0),
    );

    reporter.update(1);
    reporter.update(2);
    reporter.update(3);
    assert_eq!(count.load(Ordering::SeqCst), 3);
}

/// Test finish always reports, even right after an update
#[test]
fn test_progress_finish_shouldBypassThrottle() {
    let last = Arc::new(AtomicUsize::new(usize::MAX));
    let sink_last = last.clone();
    let reporter = ProgressReporter::new(5, move |processed, total| {
        assert_eq!(total, 5);
        sink_last.store(processed, Ordering::SeqCst);
    });

    reporter.update(1);
    reporter.finish(5);
    assert_eq!(last.load(Ordering::SeqCst), 5);
}
