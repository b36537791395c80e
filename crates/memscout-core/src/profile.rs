//! Supported file formats and their fixed format-level overhead profiles.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Parsing overhead of CSV: field splitting, string building, and allocator slack.
pub const CSV_FORMAT_OVERHEAD: f64 = 1.59;

/// Materialization overhead of Parquet: decompression buffers and the
/// in-memory layout differing from the encoded pages.
pub const PARQUET_FORMAT_OVERHEAD: f64 = 1.22;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Csv,
    Parquet,
}

impl FileFormat {
    /// Case-insensitive extension lookup.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(FileFormat::Csv),
            "parquet" => Some(FileFormat::Parquet),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileFormat::Csv => "csv",
            FileFormat::Parquet => "parquet",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a format estimator obtains its raw sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingStrategy {
    /// Read the first N records and extrapolate to the full row count.
    HeadRows,
    /// Read footer metadata only; sizes and row counts are exact.
    MetadataOnly,
}

/// Per-format constants. Two instances exist, see [`FormatProfile::csv`] and
/// [`FormatProfile::parquet`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FormatProfile {
    pub format: FileFormat,
    pub overhead: f64,
    /// Informational: each estimator has one fixed strategy and reports it in its logs.
    pub sampling: SamplingStrategy,
}

impl FormatProfile {
    pub const fn csv() -> Self {
        Self {
            format: FileFormat::Csv,
            overhead: CSV_FORMAT_OVERHEAD,
            sampling: SamplingStrategy::HeadRows,
        }
    }

    pub const fn parquet() -> Self {
        Self {
            format: FileFormat::Parquet,
            overhead: PARQUET_FORMAT_OVERHEAD,
            sampling: SamplingStrategy::MetadataOnly,
        }
    }

    pub fn with_overhead(mut self, overhead: f64) -> Self {
        self.overhead = overhead;
        self
    }
}
