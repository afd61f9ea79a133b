//! Run coordination over a bounded worker pool
//!
//! The coordinator owns everything a run needs: the task list, the shared
//! HTTP client, the progress monitor, and the outcome collections. Workers
//! claim tasks through an atomic index over a shared slice and hand every
//! result back over the pool's outcome channel; only the coordinating
//! context ever appends to the success and failure lists. The run finalizes
//! behind a full barrier: nothing is persisted or summarized until every
//! claimed task has resolved to exactly one outcome.

use crate::config::Config;
use crate::output::CsvStore;
use crate::pipeline::fetcher::{
    build_http_client, fetch_article, FailureRecord, FetchError, SuccessRecord,
};
use crate::pipeline::monitor::ProgressMonitor;
use crate::pipeline::{CancelSignal, LogSender};
use crate::PressclipError;
use reqwest::Client;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// One unit of work: a single URL to fetch and classify
#[derive(Debug, Clone)]
pub struct ArticleTask {
    pub url: String,
}

/// The tagged result of one task; exactly one per task, no exceptions
#[derive(Debug)]
pub enum TaskOutcome {
    Success(SuccessRecord),
    Failure(FailureRecord),
}

/// Per-URL result in original input order, for the final report
#[derive(Debug, Clone)]
pub enum UrlStatus {
    Succeeded { title: String, word_count: usize },
    Failed { reason: String },
}

/// Everything a completed run produced, before rendering
#[derive(Debug)]
pub struct RunSummary {
    /// Number of input URLs
    pub attempted: usize,
    /// Successful records, in the order they were finalized
    pub successes: Vec<SuccessRecord>,
    /// Failure records, in the order they were finalized
    pub failures: Vec<FailureRecord>,
    /// Per-URL outcome in original input order
    pub statuses: Vec<(String, UrlStatus)>,
}

impl RunSummary {
    fn empty() -> Self {
        Self {
            attempted: 0,
            successes: Vec::new(),
            failures: Vec::new(),
            statuses: Vec::new(),
        }
    }

    /// Percentage of attempted URLs that produced a success
    pub fn success_rate(&self) -> f64 {
        if self.attempted == 0 {
            0.0
        } else {
            self.successes.len() as f64 / self.attempted as f64 * 100.0
        }
    }
}

/// Coordinates one scraping run end to end
pub struct Coordinator {
    config: Arc<Config>,
    tasks: Vec<ArticleTask>,
    log: LogSender,
    cancel: CancelSignal,
}

impl Coordinator {
    /// Creates a coordinator for one run over the given URLs
    ///
    /// All run state (monitor, client, counters) is scoped to this instance;
    /// concurrent runs do not share anything.
    pub fn new(config: Config, urls: Vec<String>, log: LogSender) -> Self {
        let tasks = urls.into_iter().map(|url| ArticleTask { url }).collect();
        Self {
            config: Arc::new(config),
            tasks,
            log,
            cancel: CancelSignal::new(),
        }
    }

    /// Handle for external cancellation (Ctrl-C, caller shutdown)
    pub fn cancel_signal(&self) -> CancelSignal {
        self.cancel.clone()
    }

    /// Runs the pipeline to completion and returns the finalized summary
    ///
    /// Dispatches one task per URL onto the worker pool, waits for every
    /// outcome, writes successes to the CSV table, and reports totals.
    pub async fn run(self) -> Result<RunSummary, PressclipError> {
        let attempted = self.tasks.len();
        if attempted == 0 {
            tracing::warn!("no URLs supplied, nothing to scrape");
            let _ = self
                .log
                .send("Warning: no URLs supplied, nothing to scrape".to_string());
            return Ok(RunSummary::empty());
        }

        let pool_size = (self.config.scraper.max_concurrent_fetches as usize).min(attempted);
        tracing::info!(urls = attempted, workers = pool_size, "starting scraping run");
        let _ = self.log.send(format!(
            "Scraping {} URL(s) with {} worker(s)",
            attempted, pool_size
        ));

        let client = build_http_client(&self.config.scraper)?;
        let monitor = Arc::new(ProgressMonitor::new(self.log.clone()));

        self.arm_run_watchdog();

        let tasks: Arc<[ArticleTask]> = self.tasks.into();
        let next_index = Arc::new(AtomicUsize::new(0));
        let (outcome_tx, mut outcome_rx) = mpsc::unbounded_channel::<(usize, TaskOutcome)>();

        for n in 1..=pool_size {
            let worker = WorkerContext {
                worker_id: format!("worker-{}", n),
                tasks: Arc::clone(&tasks),
                next_index: Arc::clone(&next_index),
                outcome_tx: outcome_tx.clone(),
                client: client.clone(),
                config: Arc::clone(&self.config),
                monitor: Arc::clone(&monitor),
                cancel: self.cancel.clone(),
            };
            tokio::spawn(worker.run());
        }
        // The channel closes when the last worker drops its sender
        drop(outcome_tx);

        // Barrier: drain every outcome before any finalization
        let mut successes = Vec::new();
        let mut failures = Vec::new();
        let mut statuses: Vec<Option<UrlStatus>> = vec![None; attempted];
        while let Some((index, outcome)) = outcome_rx.recv().await {
            match outcome {
                TaskOutcome::Success(record) => {
                    statuses[index] = Some(UrlStatus::Succeeded {
                        title: record.fields.title.clone(),
                        word_count: record.fields.word_count,
                    });
                    successes.push(record);
                }
                TaskOutcome::Failure(failure) => {
                    statuses[index] = Some(UrlStatus::Failed {
                        reason: failure.reason.clone(),
                    });
                    failures.push(failure);
                }
            }
        }

        // Workers resolve every claimed index; an unresolved slot would mean
        // a worker died without reporting, which still must not lose the URL
        let statuses: Vec<(String, UrlStatus)> = tasks
            .iter()
            .zip(statuses)
            .map(|(task, status)| {
                let status = status.unwrap_or_else(|| {
                    tracing::error!(url = %task.url, "task resolved without an outcome");
                    UrlStatus::Failed {
                        reason: "unresolved: worker terminated without reporting".to_string(),
                    }
                });
                (task.url.clone(), status)
            })
            .collect();

        let summary = RunSummary {
            attempted,
            successes,
            failures,
            statuses,
        };

        // Persist after the barrier; a run with outcomes but no successes
        // still leaves a header-only table behind
        if !summary.successes.is_empty() || !summary.failures.is_empty() {
            let store = CsvStore::new(&self.config.output.csv_path);
            store.write(&summary.successes)?;
            let _ = self.log.send(format!(
                "Saved {} article(s) to {}",
                summary.successes.len(),
                self.config.output.csv_path
            ));
        }

        tracing::info!(
            attempted = summary.attempted,
            succeeded = summary.successes.len(),
            failed = summary.failures.len(),
            "scraping run complete"
        );
        let _ = self.log.send(format!(
            "Run complete: {} succeeded, {} failed out of {}",
            summary.successes.len(),
            summary.failures.len(),
            summary.attempted
        ));

        Ok(summary)
    }

    /// Arms the optional run-level duration bound
    ///
    /// The watchdog trips the same cancellation path as an external signal:
    /// undispatched tasks fail as cancelled, in-flight tasks finish or hit
    /// their own request timeout.
    fn arm_run_watchdog(&self) {
        if let Some(secs) = self.config.scraper.max_run_duration_secs {
            let cancel = self.cancel.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_secs(secs)).await;
                if !cancel.is_cancelled() {
                    tracing::warn!(limit_secs = secs, "run duration limit hit, cancelling");
                    cancel.cancel();
                }
            });
        }
    }
}

/// Everything one pool worker needs to claim and resolve tasks
struct WorkerContext {
    worker_id: String,
    tasks: Arc<[ArticleTask]>,
    next_index: Arc<AtomicUsize>,
    outcome_tx: mpsc::UnboundedSender<(usize, TaskOutcome)>,
    client: Client,
    config: Arc<Config>,
    monitor: Arc<ProgressMonitor>,
    cancel: CancelSignal,
}

impl WorkerContext {
    /// Claims tasks until the slice is exhausted
    ///
    /// Claiming an index is dispatch: each claimed task resolves to exactly
    /// one outcome on the channel, including tasks claimed after
    /// cancellation, which resolve as cancelled failures without fetching.
    async fn run(self) {
        loop {
            let index = self.next_index.fetch_add(1, Ordering::Relaxed);
            if index >= self.tasks.len() {
                break;
            }
            let task = &self.tasks[index];

            let outcome = if self.cancel.is_cancelled() {
                TaskOutcome::Failure(FailureRecord {
                    url: task.url.clone(),
                    reason: FetchError::Cancelled.to_string(),
                })
            } else {
                tracing::debug!(worker = %self.worker_id, url = %task.url, "fetching");
                match fetch_article(
                    &self.client,
                    &task.url,
                    &self.worker_id,
                    &self.config.scraper,
                    &self.monitor,
                )
                .await
                {
                    Ok(record) => TaskOutcome::Success(record),
                    Err(error) => {
                        tracing::debug!(worker = %self.worker_id, url = %task.url, %error, "fetch failed");
                        TaskOutcome::Failure(FailureRecord {
                            url: task.url.clone(),
                            reason: error.to_string(),
                        })
                    }
                }
            };

            if self.outcome_tx.send((index, outcome)).is_err() {
                // Coordinator went away; no point claiming further work
                break;
            }
        }
    }
}
