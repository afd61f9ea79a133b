//! Pressclip main entry point
//!
//! This is the command-line front end for the pressclip scraping pipeline.
//! It collects URLs, streams the run's log lines to stdout, and prints the
//! final report; the pipeline itself lives in the library crate.

use anyhow::Context;
use clap::{Parser, Subcommand};
use pressclip::config::{load_config_with_hash, Config};
use pressclip::output::{render_run_report, ResultAnalyzer};
use pressclip::pipeline::Coordinator;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Pressclip: concurrent article scraping and analysis
#[derive(Parser, Debug)]
#[command(name = "pressclip")]
#[command(about = "Fetch article batches, extract fields, analyze results", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch a batch of article URLs and write the results table
    Scrape {
        /// Article URLs to fetch
        urls: Vec<String>,

        /// File with one URL per line (blank lines and # comments skipped)
        #[arg(long)]
        urls_file: Option<PathBuf>,
    },

    /// Analyze a previously written results table
    Analyze {
        /// Table to analyze (defaults to the configured csv-path)
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?;
            tracing::info!(path = %path.display(), hash, "configuration loaded");
            config
        }
        None => Config::default(),
    };

    match cli.command {
        Command::Scrape { urls, urls_file } => handle_scrape(config, urls, urls_file).await,
        Command::Analyze { csv } => handle_analyze(&config, csv.as_deref()),
    }
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("pressclip=info,warn"),
            1 => EnvFilter::new("pressclip=debug,info"),
            2 => EnvFilter::new("pressclip=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Handles the scrape subcommand: runs the full pipeline over the URL batch
async fn handle_scrape(
    config: Config,
    mut urls: Vec<String>,
    urls_file: Option<PathBuf>,
) -> anyhow::Result<()> {
    if let Some(path) = urls_file {
        urls.extend(read_urls_file(&path)?);
    }

    // Reject malformed input up front; a URL reqwest cannot even parse
    // should not burn a worker slot
    for url in &urls {
        url::Url::parse(url).with_context(|| format!("invalid URL: {}", url))?;
    }

    let (log_tx, mut log_rx) = tokio::sync::mpsc::unbounded_channel::<String>();
    let printer = tokio::spawn(async move {
        while let Some(line) = log_rx.recv().await {
            println!("{}", line);
        }
    });

    let coordinator = Coordinator::new(config, urls, log_tx);

    // Ctrl-C stops dispatching; in-flight requests finish or time out
    let cancel = coordinator.cancel_signal();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received, cancelling remaining work");
            cancel.cancel();
        }
    });

    let summary = coordinator.run().await?;

    // The coordinator dropped its sender; wait for the printer to drain
    printer.await.ok();

    println!("{}", render_run_report(&summary));
    Ok(())
}

/// Handles the analyze subcommand: re-reads the persisted table
fn handle_analyze(config: &Config, csv: Option<&Path>) -> anyhow::Result<()> {
    let path = csv
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&config.output.csv_path));

    tracing::info!(path = %path.display(), "analyzing results table");
    let analyzer = ResultAnalyzer::load(&path);
    println!("{}", analyzer.generate_report());
    Ok(())
}

/// Reads one URL per line, skipping blanks and # comments
fn read_urls_file(path: &Path) -> anyhow::Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read URL file {}", path.display()))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}
