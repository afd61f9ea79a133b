//! Pipeline module for concurrent article fetching and extraction
//!
//! This module contains the core scraping logic, including:
//! - Pure HTML field extraction with ordered fallback selectors
//! - HTTP fetching and outcome classification
//! - Thread-safe progress accounting
//! - Worker pool coordination with a full completion barrier

mod coordinator;
mod extractor;
mod fetcher;
mod monitor;

pub use coordinator::{ArticleTask, Coordinator, RunSummary, TaskOutcome, UrlStatus};
pub use extractor::{extract_article, ExtractionFields};
pub use fetcher::{
    build_http_client, fetch_article, FailureRecord, FetchError, SuccessRecord, TIMESTAMP_FORMAT,
};
pub use monitor::{AggregateStats, ProgressMonitor};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Sender half of the run's log channel.
///
/// Workers and the progress monitor hand human-readable lines to the single
/// context that owns the receiving end; nothing in the pipeline writes to a
/// shared display surface directly.
pub type LogSender = tokio::sync::mpsc::UnboundedSender<String>;

/// Cooperative cancellation flag shared between a run and its caller.
///
/// Once cancelled, the coordinator stops dispatching unsubmitted tasks;
/// tasks already in flight finish or hit their own timeout. The completion
/// barrier is never blocked by cancellation.
#[derive(Debug, Clone, Default)]
pub struct CancelSignal {
    flag: Arc<AtomicBool>,
}

impl CancelSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_signal_is_shared() {
        let signal = CancelSignal::new();
        let clone = signal.clone();

        assert!(!signal.is_cancelled());
        clone.cancel();
        assert!(signal.is_cancelled());
    }
}
