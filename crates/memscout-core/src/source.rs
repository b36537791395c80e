//! Contracts for the collaborators that touch file bytes.
//!
//! `memscout-io` implements both traits; the estimators in `memscout-planner`
//! only see these shapes.

use std::path::Path;

use crate::error::Result;
use crate::schema::LogicalType;

/// Head-of-file sample of a delimited text file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowSample {
    /// Column names from the header record.
    pub headers: Vec<String>,
    /// Decoded fields of the well-formed sampled records, in file order.
    pub rows: Vec<Vec<String>>,
    /// Sampled records that were dropped as malformed.
    pub skipped_rows: u64,
    /// Every data record in the file, sampled or not, malformed or not.
    pub total_rows: u64,
}

impl RowSample {
    pub fn sampled_rows(&self) -> u64 {
        self.rows.len() as u64
    }
}

/// Reads up to `limit` data records plus a count of all records, without
/// materializing the whole file.
pub trait RowSampler: Send + Sync {
    fn sample(&self, path: &Path, limit: usize) -> Result<RowSample>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMetadata {
    pub name: String,
    pub logical_type: LogicalType,
    /// Uncompressed size as recorded by the writer, summed over row groups.
    pub uncompressed_bytes: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnarMetadata {
    pub num_rows: u64,
    pub columns: Vec<ColumnMetadata>,
}

/// Reads file-level metadata of a columnar file without touching row data.
pub trait ColumnarMetadataSource: Send + Sync {
    fn read_metadata(&self, path: &Path) -> Result<ColumnarMetadata>;
}
