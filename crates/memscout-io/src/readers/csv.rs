//! Head-of-file CSV sampler.
//!
//! Reads the header and the first `limit` records as decoded strings, then
//! counts the remaining records by reusing a single `ByteRecord`, so memory
//! stays bounded by the sample no matter how large the file is.

use std::path::Path;

use ::csv::{ByteRecord, ErrorKind as CsvErrorKind, ReaderBuilder, StringRecord};
use memscout_core::error::{Error, Result};
use memscout_core::source::{RowSample, RowSampler};

use crate::buf::{open_bounded, DEFAULT_READ_CAPACITY};

#[derive(Debug, Clone)]
pub struct CsvSampler {
    delimiter: u8,
}

impl Default for CsvSampler {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvSampler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

impl RowSampler for CsvSampler {
    fn sample(&self, path: &Path, limit: usize) -> Result<RowSample> {
        let input = open_bounded(path, DEFAULT_READ_CAPACITY)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .delimiter(self.delimiter)
            .from_reader(input);

        let headers: Vec<String> = reader
            .byte_headers()
            .map_err(|e| map_csv_error(path, e))?
            .iter()
            .map(|h| String::from_utf8_lossy(h).into_owned())
            .collect();
        if headers.is_empty() {
            return Err(Error::EmptySource {
                path: path.to_path_buf(),
            });
        }

        let mut rows = Vec::with_capacity(limit.min(4096));
        let mut skipped_rows = 0u64;
        let mut seen = 0usize;
        let mut record = StringRecord::new();
        while seen < limit {
            match reader.read_record(&mut record) {
                Ok(true) => {
                    seen += 1;
                    rows.push(record.iter().map(str::to_owned).collect());
                }
                Ok(false) => break,
                Err(e) if is_malformed_record(&e) => {
                    seen += 1;
                    skipped_rows += 1;
                    tracing::debug!(path = %path.display(), error = %e, "skipping malformed record");
                }
                Err(e) => return Err(map_csv_error(path, e)),
            }
        }

        // Count the rest without decoding; malformed tails still count as rows.
        let mut remaining = 0u64;
        let mut raw = ByteRecord::new();
        loop {
            match reader.read_byte_record(&mut raw) {
                Ok(true) => remaining += 1,
                Ok(false) => break,
                Err(e) if is_malformed_record(&e) => remaining += 1,
                Err(e) => return Err(map_csv_error(path, e)),
            }
        }

        if seen == 0 {
            return Err(Error::EmptySource {
                path: path.to_path_buf(),
            });
        }

        Ok(RowSample {
            headers,
            total_rows: seen as u64 + remaining,
            rows,
            skipped_rows,
        })
    }
}

fn is_malformed_record(e: &::csv::Error) -> bool {
    matches!(
        e.kind(),
        CsvErrorKind::Utf8 { .. } | CsvErrorKind::UnequalLengths { .. }
    )
}

fn map_csv_error(path: &Path, e: ::csv::Error) -> Error {
    match e.into_kind() {
        CsvErrorKind::Io(source) => Error::from_io(path, source),
        other => Error::SchemaInference {
            path: path.to_path_buf(),
            detail: format!("{other:?}"),
        },
    }
}
