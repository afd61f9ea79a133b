//! Pressclip: a concurrent article scraping pipeline
//!
//! This crate fetches batches of web pages concurrently, extracts structured
//! article fields from unreliable HTML with ordered fallback heuristics,
//! classifies every fetch as a content success or a tagged failure, persists
//! successes to a CSV table, and re-reads that table later to produce a
//! statistical report.

pub mod config;
pub mod output;
pub mod pipeline;

use thiserror::Error;

/// Main error type for pressclip operations
#[derive(Debug, Error)]
pub enum PressclipError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for pressclip operations
pub type Result<T> = std::result::Result<T, PressclipError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use output::{render_run_report, CsvStore, ResultAnalyzer};
pub use pipeline::{
    ArticleTask, CancelSignal, Coordinator, FailureRecord, FetchError, ProgressMonitor,
    SuccessRecord,
};
