//! HTTP fetching and outcome classification
//!
//! This module performs the single GET request for one article task,
//! parses the body, runs field extraction, and folds every possible
//! failure into a closed error taxonomy. Nothing here propagates a
//! panic or an unclassified error to the coordinator.

use crate::config::ScraperConfig;
use crate::pipeline::extractor::{extract_article, ExtractionFields};
use crate::pipeline::monitor::ProgressMonitor;
use chrono::Local;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION};
use reqwest::Client;
use scraper::Html;
use std::time::Duration;
use thiserror::Error;

/// Fixed format of the timestamp column in records and the CSV table
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Desktop browser identity; bare library user agents get rejected by
/// enough article hosts to matter
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Closed classification of everything that can go wrong with one task
///
/// Every variant is terminal for the task within a run; there is no retry.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Timeout error: request exceeded {0}s")]
    Timeout(u64),

    #[error("HTTP error: {status} - {reason}")]
    HttpStatus { status: u16, reason: String },

    #[error("Low content: extracted {word_count} words, below the {minimum}-word article threshold")]
    LowContent { word_count: usize, minimum: usize },

    #[error("Unexpected error: {0}")]
    Unexpected(String),

    #[error("Cancelled before dispatch")]
    Cancelled,
}

/// A fully classified successful extraction
#[derive(Debug, Clone)]
pub struct SuccessRecord {
    pub url: String,
    pub fields: ExtractionFields,
    pub worker_id: String,
    pub timestamp: String,
}

/// A fully classified failure; reported and logged, never persisted
#[derive(Debug, Clone)]
pub struct FailureRecord {
    pub url: String,
    pub reason: String,
}

/// Builds the shared HTTP client for a run
///
/// One client per run; reqwest clients are cheap to clone across workers.
/// The gzip/brotli features advertise Accept-Encoding on the wire and
/// decompress transparently.
pub fn build_http_client(config: &ScraperConfig) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));

    Client::builder()
        .user_agent(BROWSER_USER_AGENT)
        .default_headers(headers)
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches one URL and classifies the outcome
///
/// On transport success the body is parsed and run through extraction;
/// pages below the word-count threshold are failures regardless of HTTP
/// status. On success the record is stamped with the worker identity and
/// current local time, and the progress monitor is notified before the
/// record is handed back.
pub async fn fetch_article(
    client: &Client,
    url: &str,
    worker_id: &str,
    config: &ScraperConfig,
    monitor: &ProgressMonitor,
) -> Result<SuccessRecord, FetchError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| classify_transport_error(&e, config.request_timeout_secs))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::HttpStatus {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| classify_transport_error(&e, config.request_timeout_secs))?;

    let document = Html::parse_document(&body);
    let fields = extract_article(&document);
    drop(document);

    if fields.word_count < config.min_word_count {
        return Err(FetchError::LowContent {
            word_count: fields.word_count,
            minimum: config.min_word_count,
        });
    }

    let word_count = fields.word_count;
    let record = SuccessRecord {
        url: url.to_string(),
        fields,
        worker_id: worker_id.to_string(),
        timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
    };

    monitor.record_success(url, word_count, worker_id);

    Ok(record)
}

fn classify_transport_error(error: &reqwest::Error, timeout_secs: u64) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout(timeout_secs)
    } else if error.is_connect() {
        FetchError::Connection(error.to_string())
    } else {
        FetchError::Unexpected(error.to_string())
    }
}
