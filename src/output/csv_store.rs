//! CSV persistence for successful extractions
//!
//! One row per success record in finalization order, fixed column schema,
//! header always written. The destination is truncated and recreated on
//! every write; keeping history is deliberately not this store's job.

use crate::pipeline::SuccessRecord;
use crate::PressclipError;
use std::path::{Path, PathBuf};

/// Fixed column order of the results table
pub const CSV_COLUMNS: [&str; 9] = [
    "url",
    "title",
    "word_count",
    "author",
    "publish_date",
    "meta_description",
    "content_preview",
    "worker_id",
    "timestamp",
];

/// Writes finalized success records to a CSV table
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the header and one sanitized row per record
    ///
    /// Overwrites any previous table at the path. Embedded newlines and
    /// carriage returns are replaced with single spaces so no field ever
    /// spans rows.
    pub fn write(&self, records: &[SuccessRecord]) -> Result<(), PressclipError> {
        let mut writer = csv::Writer::from_path(&self.path)?;
        writer.write_record(CSV_COLUMNS)?;

        for record in records {
            writer.write_record([
                sanitize(&record.url),
                sanitize(&record.fields.title),
                record.fields.word_count.to_string(),
                sanitize(&record.fields.author),
                sanitize(&record.fields.publish_date),
                sanitize(&record.fields.meta_description),
                sanitize(&record.fields.content_preview),
                sanitize(&record.worker_id),
                sanitize(&record.timestamp),
            ])?;
        }

        writer.flush()?;
        Ok(())
    }
}

/// Replaces each newline and carriage return with one space
fn sanitize(field: &str) -> String {
    field.replace(['\n', '\r'], " ")
}
