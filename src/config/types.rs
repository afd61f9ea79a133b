use serde::Deserialize;

/// Main configuration structure for pressclip
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scraper: ScraperConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Scraper behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperConfig {
    /// Number of concurrent fetch workers
    #[serde(rename = "max-concurrent-fetches", default = "default_concurrency")]
    pub max_concurrent_fetches: u32,

    /// Per-request timeout in seconds
    #[serde(rename = "request-timeout-secs", default = "default_timeout")]
    pub request_timeout_secs: u64,

    /// Minimum extracted word count for a page to count as an article
    #[serde(rename = "min-word-count", default = "default_min_words")]
    pub min_word_count: usize,

    /// Optional upper bound on total run duration in seconds.
    /// When exceeded, remaining undispatched URLs are recorded as cancelled.
    #[serde(rename = "max-run-duration-secs", default)]
    pub max_run_duration_secs: Option<u64>,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the CSV results table
    #[serde(rename = "csv-path", default = "default_csv_path")]
    pub csv_path: String,
}

fn default_concurrency() -> u32 {
    5
}

fn default_timeout() -> u64 {
    15
}

fn default_min_words() -> usize {
    100
}

fn default_csv_path() -> String {
    "./articles.csv".to_string()
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            max_concurrent_fetches: default_concurrency(),
            request_timeout_secs: default_timeout(),
            min_word_count: default_min_words(),
            max_run_duration_secs: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: default_csv_path(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scraper: ScraperConfig::default(),
            output: OutputConfig::default(),
        }
    }
}
