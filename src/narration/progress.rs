/*!
 * Throttled progress reporting.
 *
 * Wraps a `(processed, total)` sink and forwards updates at most once per
 * interval, plus a forced final report so the sink always sees completion.
 */

use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Default minimum interval between forwarded reports
const DEFAULT_REPORT_INTERVAL: Duration = Duration::from_secs(3);

type ProgressSink = Box<dyn Fn(usize, usize) + Send + Sync>;

/// Progress reporter for one narration job
pub struct ProgressReporter {
    total: usize,
    sink: ProgressSink,
    interval: Duration,
    last_report: Mutex<Option<Instant>>,
}

impl ProgressReporter {
    pub fn new(total: usize, sink: impl Fn(usize, usize) + Send + Sync + 'static) -> Self {
        Self::with_interval(total, sink, DEFAULT_REPORT_INTERVAL)
    }

    pub fn with_interval(
        total: usize,
        sink: impl Fn(usize, usize) + Send + Sync + 'static,
        interval: Duration,
    ) -> Self {
        Self {
            total,
            sink: Box::new(sink),
            interval,
            last_report: Mutex::new(None),
        }
    }

    /// Report progress, rate-limited to the configured interval
    pub fn update(&self, processed: usize) {
        let mut last = self.last_report.lock();
        let due = match *last {
            Some(at) => at.elapsed() >= self.interval,
            None => true,
        };
        if due {
            *last = Some(Instant::now());
            (self.sink)(processed, self.total);
        }
    }

    /// Force a final report regardless of throttling
    pub fn finish(&self, processed: usize) {
        *self.last_report.lock() = Some(Instant::now());
        (self.sink)(processed, self.total);
    }
}
