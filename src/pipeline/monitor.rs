//! Thread-safe progress accounting for an in-flight run
//!
//! The monitor is the only state mutated concurrently by multiple workers.
//! Counter updates and the progress line emission happen under one mutex
//! guard, so a reported rate is never computed from stale totals. The guard
//! is never held across a network call; the log emission is a non-blocking
//! unbounded-channel send.

use crate::pipeline::LogSender;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Running totals for one scraping run
#[derive(Debug, Clone, Copy, Default)]
pub struct AggregateStats {
    pub processed_count: u64,
    pub total_words: u64,
}

/// Mutex-guarded progress counters, constructed once per run
pub struct ProgressMonitor {
    stats: Mutex<AggregateStats>,
    start_time: Instant,
    log: LogSender,
}

impl ProgressMonitor {
    /// Creates a monitor; elapsed time is measured from this call
    pub fn new(log: LogSender) -> Self {
        Self {
            stats: Mutex::new(AggregateStats::default()),
            start_time: Instant::now(),
            log,
        }
    }

    /// Records one successful extraction and emits a progress block
    pub fn record_success(&self, url: &str, word_count: usize, worker_id: &str) {
        let mut stats = self.stats.lock().unwrap();
        stats.processed_count += 1;
        stats.total_words += word_count as u64;
        let elapsed = self.start_time.elapsed();
        let line = progress_block(url, word_count, worker_id, *stats, elapsed);
        let _ = self.log.send(line);
    }

    /// Snapshot of the current totals
    pub fn snapshot(&self) -> AggregateStats {
        *self.stats.lock().unwrap()
    }
}

/// Formats one progress block; the rate line is omitted entirely when no
/// time has elapsed, rather than dividing by zero
fn progress_block(
    url: &str,
    word_count: usize,
    worker_id: &str,
    stats: AggregateStats,
    elapsed: Duration,
) -> String {
    let secs = elapsed.as_secs_f64();
    let mut block = format!(
        "[{:.1}s] {}: {}\n  Content: {} words\n  Progress: {} articles, {} words total",
        secs, worker_id, url, word_count, stats.processed_count, stats.total_words
    );
    if secs > 0.0 {
        block.push_str(&format!(
            "\n  Rate: {:.2} articles/sec, {:.0} words/sec",
            stats.processed_count as f64 / secs,
            stats.total_words as f64 / secs
        ));
    }
    block
}
