//! Post-hoc analysis of a persisted results table
//!
//! The analyzer is an independent read path: it knows nothing about the run
//! that wrote the table and degrades gracefully instead of failing the
//! program. A missing, empty, or structurally unreadable table produces the
//! explicit no-data report; a malformed field degrades only that field.

use crate::pipeline::TIMESTAMP_FORMAT;
use chrono::NaiveDateTime;
use std::collections::BTreeMap;
use std::path::Path;

/// One table row reduced to the fields the analysis needs
#[derive(Debug, Clone)]
pub struct AnalyzedRow {
    pub url: String,
    /// Non-numeric values in the table coerce to 0
    pub word_count: u64,
    pub worker_id: String,
    /// None when the stored value did not parse; the row still counts
    /// toward count-based statistics
    pub timestamp: Option<NaiveDateTime>,
}

/// Recomputes aggregate statistics from a persisted CSV table
pub struct ResultAnalyzer {
    rows: Vec<AnalyzedRow>,
}

impl ResultAnalyzer {
    /// Loads the table at `path`; never fails
    ///
    /// Any problem reading the file or its header resolves to an analyzer
    /// with zero rows, which reports "no data" rather than raising.
    pub fn load(path: &Path) -> Self {
        let rows = read_rows(path).unwrap_or_default();
        Self { rows }
    }

    /// Builds an analyzer directly from rows (test and library use)
    pub fn from_rows(rows: Vec<AnalyzedRow>) -> Self {
        Self { rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Renders the comprehensive text report
    pub fn generate_report(&self) -> String {
        let divider = "=".repeat(60);
        let mut report = format!(
            "{}\nCOMPREHENSIVE ARTICLE SCRAPING ANALYSIS\n{}\n",
            divider, divider
        );

        if self.rows.is_empty() {
            report.push_str("No data available to analyze.\n");
            return report;
        }

        report.push_str(&format!(
            "Total articles processed: {}\n",
            self.rows.len()
        ));

        self.append_content_section(&mut report);
        self.append_worker_section(&mut report);
        self.append_time_section(&mut report);

        report
    }

    fn append_content_section(&self, report: &mut String) {
        let total_words: u64 = self.rows.iter().map(|row| row.word_count).sum();
        if total_words > 0 {
            let mean = total_words as f64 / self.rows.len() as f64;
            report.push_str("\nContent analysis:\n");
            report.push_str(&format!("  Average word count: {:.2} words\n", mean));
            report.push_str(&format!("  Total words scraped: {} words\n", total_words));
        } else {
            report.push_str("\nNo word count data available.\n");
        }
    }

    fn append_worker_section(&self, report: &mut String) {
        let per_worker = self.per_worker_counts();

        report.push_str("\nWorker performance:\n");
        for (worker_id, (count, words)) in &per_worker {
            let mean = *words as f64 / *count as f64;
            report.push_str(&format!(
                "  {}: {} article(s), {:.0} words average\n",
                worker_id, count, mean
            ));
        }
    }

    fn append_time_section(&self, report: &mut String) {
        let mut valid: Vec<NaiveDateTime> =
            self.rows.iter().filter_map(|row| row.timestamp).collect();
        if valid.is_empty() {
            report.push_str("\nNo valid timestamp data available.\n");
            return;
        }
        valid.sort();
        let earliest = valid[0];
        let latest = valid[valid.len() - 1];

        report.push_str("\nTiming analysis:\n");
        report.push_str(&format!(
            "  First article: {}\n",
            earliest.format(TIMESTAMP_FORMAT)
        ));
        report.push_str(&format!(
            "  Last article: {}\n",
            latest.format(TIMESTAMP_FORMAT)
        ));

        if valid.len() > 1 {
            let span_secs = (latest - earliest).num_milliseconds() as f64 / 1000.0;
            if span_secs > 0.0 {
                let rate = valid.len() as f64 / span_secs;
                report.push_str(&format!(
                    "  Average scraping rate: {:.2} articles per second\n",
                    rate
                ));
            } else {
                report.push_str("  Scraping span too short to compute a per-second rate.\n");
            }
        } else {
            report.push_str("  Only one valid timestamp, cannot compute a rate.\n");
        }
    }

    /// Per-worker (count, total words), grouped by stored worker id
    ///
    /// BTreeMap keeps the listing deterministic.
    pub fn per_worker_counts(&self) -> BTreeMap<String, (u64, u64)> {
        let mut per_worker: BTreeMap<String, (u64, u64)> = BTreeMap::new();
        for row in &self.rows {
            let entry = per_worker.entry(row.worker_id.clone()).or_insert((0, 0));
            entry.0 += 1;
            entry.1 += row.word_count;
        }
        per_worker
    }
}

/// Reads and coerces all rows; None when the table itself is unreadable
fn read_rows(path: &Path) -> Option<Vec<AnalyzedRow>> {
    let mut reader = csv::Reader::from_path(path).ok()?;
    let headers = reader.headers().ok()?.clone();
    let column = |name: &str| headers.iter().position(|header| header == name);

    let url_col = column("url")?;
    let word_count_col = column("word_count")?;
    let worker_col = column("worker_id")?;
    let timestamp_col = column("timestamp")?;

    let mut rows = Vec::new();
    for record in reader.records() {
        // A torn row degrades to a skipped row, not a failed analysis
        let Ok(record) = record else {
            continue;
        };
        let word_count = record
            .get(word_count_col)
            .and_then(|value| value.trim().parse::<u64>().ok())
            .unwrap_or(0);
        let timestamp = record
            .get(timestamp_col)
            .and_then(|value| NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT).ok());

        rows.push(AnalyzedRow {
            url: record.get(url_col).unwrap_or("").to_string(),
            word_count,
            worker_id: record.get(worker_col).unwrap_or("").to_string(),
            timestamp,
        });
    }
    Some(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str =
        "url,title,word_count,author,publish_date,meta_description,content_preview,worker_id,timestamp";

    fn table(rows: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        for row in rows {
            writeln!(file, "{}", row).unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_missing_file_reports_no_data() {
        let analyzer = ResultAnalyzer::load(Path::new("/nonexistent/results.csv"));
        assert_eq!(analyzer.row_count(), 0);
        assert!(analyzer.generate_report().contains("No data available"));
    }

    #[test]
    fn test_empty_file_reports_no_data() {
        let file = NamedTempFile::new().unwrap();
        let analyzer = ResultAnalyzer::load(file.path());
        assert!(analyzer.generate_report().contains("No data available"));
    }

    #[test]
    fn test_header_only_file_reports_no_data() {
        let file = table(&[]);
        let analyzer = ResultAnalyzer::load(file.path());
        assert_eq!(analyzer.row_count(), 0);
        assert!(analyzer.generate_report().contains("No data available"));
    }

    #[test]
    fn test_missing_columns_reports_no_data() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "a,b,c").unwrap();
        writeln!(file, "1,2,3").unwrap();
        file.flush().unwrap();

        let analyzer = ResultAnalyzer::load(file.path());
        assert!(analyzer.generate_report().contains("No data available"));
    }

    #[test]
    fn test_basic_statistics() {
        let file = table(&[
            "https://a.example/1,First,100,Unknown,Unknown,,p,worker-1,2024-05-01 12:00:00",
            "https://a.example/2,Second,300,Unknown,Unknown,,p,worker-2,2024-05-01 12:00:10",
        ]);
        let analyzer = ResultAnalyzer::load(file.path());

        assert_eq!(analyzer.row_count(), 2);
        let report = analyzer.generate_report();
        assert!(report.contains("Total articles processed: 2"));
        assert!(report.contains("Average word count: 200.00"));
        assert!(report.contains("Total words scraped: 400"));
        assert!(report.contains("First article: 2024-05-01 12:00:00"));
        assert!(report.contains("Last article: 2024-05-01 12:00:10"));
        // 2 valid rows over 10 seconds
        assert!(report.contains("0.20 articles per second"));
    }

    #[test]
    fn test_non_numeric_word_count_coerces_to_zero() {
        let file = table(&[
            "https://a.example/1,First,not-a-number,Unknown,Unknown,,p,worker-1,2024-05-01 12:00:00",
            "https://a.example/2,Second,200,Unknown,Unknown,,p,worker-1,2024-05-01 12:00:05",
        ]);
        let analyzer = ResultAnalyzer::load(file.path());

        // The bad row is kept, its count is zero
        assert_eq!(analyzer.row_count(), 2);
        let report = analyzer.generate_report();
        assert!(report.contains("Total words scraped: 200"));
        assert!(report.contains("Average word count: 100.00"));
    }

    #[test]
    fn test_bad_timestamp_excluded_from_time_range_only() {
        let file = table(&[
            "https://a.example/1,First,100,Unknown,Unknown,,p,worker-1,garbage",
            "https://a.example/2,Second,200,Unknown,Unknown,,p,worker-1,2024-05-01 12:00:00",
        ]);
        let analyzer = ResultAnalyzer::load(file.path());

        assert_eq!(analyzer.row_count(), 2);
        let report = analyzer.generate_report();
        assert!(report.contains("Total articles processed: 2"));
        assert!(report.contains("Only one valid timestamp"));
    }

    #[test]
    fn test_per_worker_counts_sum_to_total() {
        let file = table(&[
            "https://a.example/1,First,100,Unknown,Unknown,,p,worker-1,2024-05-01 12:00:00",
            "https://a.example/2,Second,200,Unknown,Unknown,,p,worker-2,2024-05-01 12:00:01",
            "https://a.example/3,Third,300,Unknown,Unknown,,p,worker-1,2024-05-01 12:00:02",
        ]);
        let analyzer = ResultAnalyzer::load(file.path());

        let per_worker = analyzer.per_worker_counts();
        let total: u64 = per_worker.values().map(|(count, _)| count).sum();
        assert_eq!(total as usize, analyzer.row_count());
        assert_eq!(per_worker.get("worker-1").unwrap().0, 2);
        assert_eq!(per_worker.get("worker-2").unwrap().0, 1);
    }

    #[test]
    fn test_zero_word_counts_report_no_word_data() {
        let file = table(&[
            "https://a.example/1,First,0,Unknown,Unknown,,p,worker-1,2024-05-01 12:00:00",
        ]);
        let analyzer = ResultAnalyzer::load(file.path());
        let report = analyzer.generate_report();
        assert!(report.contains("No word count data available"));
    }

    #[test]
    fn test_identical_timestamps_skip_rate() {
        let file = table(&[
            "https://a.example/1,First,100,Unknown,Unknown,,p,worker-1,2024-05-01 12:00:00",
            "https://a.example/2,Second,200,Unknown,Unknown,,p,worker-1,2024-05-01 12:00:00",
        ]);
        let analyzer = ResultAnalyzer::load(file.path());
        let report = analyzer.generate_report();
        assert!(report.contains("too short to compute"));
        assert!(!report.contains("articles per second"));
    }
}
