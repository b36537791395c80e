//! Estimation outputs: per-format estimates and the final decision record.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::profile::FileFormat;
use crate::schema::{LogicalType, Schema};

/// Loading strategy chosen by the decision policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    /// Materialize the whole dataset up front.
    Eager,
    /// Build a deferred plan; materialize only what queries need.
    Lazy,
    /// Process in bounded chunks.
    Streaming,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Eager => "eager",
            Decision::Lazy => "lazy",
            Decision::Streaming => "streaming",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contribution of one column to the estimate, before the format overhead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnFootprint {
    pub name: String,
    pub logical_type: LogicalType,
    /// Raw bytes for the whole file (extrapolated for sampled formats).
    pub raw_bytes: u64,
    pub type_overhead: f64,
}

impl ColumnFootprint {
    pub fn weighted_bytes(&self) -> f64 {
        self.raw_bytes as f64 * self.type_overhead
    }
}

/// What a format estimator hands back to the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatEstimate {
    pub format: FileFormat,
    pub estimated_total_bytes: u64,
    pub schema: Schema,
    pub columns: Vec<ColumnFootprint>,
    /// Format-level multiplier that was applied.
    pub format_overhead: f64,
    pub total_rows: u64,
    /// Rows the raw sizes were measured on (equals `total_rows` for metadata reads).
    pub sampled_rows: u64,
    /// Type-weighted bytes per row, before the format overhead.
    pub bytes_per_row: f64,
}

/// Result of one `estimate` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimationResult {
    pub path: PathBuf,
    pub format: FileFormat,
    pub decision: Decision,
    /// `estimated_total_bytes / usable_bytes`; infinite when nothing is usable.
    pub ratio: f64,
    pub estimated_total_bytes: u64,
    pub available_bytes: u64,
    /// `available_bytes * (1 - safety_margin)`.
    pub usable_bytes: u64,
    pub safety_margin: f64,
    pub format_overhead: f64,
    pub schema: Schema,
    pub columns: Vec<ColumnFootprint>,
    /// Size on disk, for diagnostics only.
    pub file_size_bytes: u64,
    pub total_rows: u64,
    pub sampled_rows: u64,
    /// Rows per chunk that keep each chunk in the eager band; set for streaming only.
    pub suggested_chunk_rows: Option<u64>,
}
