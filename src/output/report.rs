//! End-of-run summary rendering
//!
//! Renders the finalized run summary as the text report handed back to the
//! caller: totals, success rate, per-URL status in original input order,
//! and a short sample of recovered titles.

use crate::pipeline::{RunSummary, UrlStatus};

const SAMPLE_TITLES: usize = 5;
const SAMPLE_TITLE_LEN: usize = 80;

/// Renders the human-readable report for a completed run
pub fn render_run_report(summary: &RunSummary) -> String {
    let divider = "=".repeat(60);
    let mut report = format!("{}\nScraping Summary\n{}\n", divider, divider);

    report.push_str(&format!("Total URLs attempted: {}\n", summary.attempted));
    report.push_str(&format!(
        "Successfully scraped: {}\n",
        summary.successes.len()
    ));
    report.push_str(&format!("Failed: {}\n", summary.failures.len()));
    if summary.attempted > 0 {
        report.push_str(&format!("Success rate: {:.2}%\n", summary.success_rate()));
    }

    if !summary.statuses.is_empty() {
        report.push_str("\nPer-URL results (input order):\n");
        for (position, (url, status)) in summary.statuses.iter().enumerate() {
            let (label, detail) = match status {
                UrlStatus::Succeeded { title, word_count } => (
                    "OK",
                    format!("'{}' ({} words)", title, word_count),
                ),
                UrlStatus::Failed { reason } => ("FAILED", reason.clone()),
            };
            report.push_str(&format!(
                "  {}. {}\n     {}: {}\n",
                position + 1,
                url,
                label,
                detail
            ));
        }
    }

    if !summary.successes.is_empty() {
        let total_words: u64 = summary
            .successes
            .iter()
            .map(|record| record.fields.word_count as u64)
            .sum();
        let average = total_words as f64 / summary.successes.len() as f64;
        report.push_str(&format!("\nAverage article length: {:.0} words\n", average));
        report.push_str(&format!("Total words scraped: {}\n", total_words));

        report.push_str(&format!(
            "\nSample titles (first {} successes):\n",
            summary.successes.len().min(SAMPLE_TITLES)
        ));
        for (position, record) in summary.successes.iter().take(SAMPLE_TITLES).enumerate() {
            let title: String = record.fields.title.chars().take(SAMPLE_TITLE_LEN).collect();
            report.push_str(&format!(
                "  {}. {} ({} words)\n",
                position + 1,
                title,
                record.fields.word_count
            ));
        }
    } else {
        report.push_str("\nNo articles were scraped successfully.\n");
    }

    report
}
