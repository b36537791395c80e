//! Convenient re-exports for downstream crates.

pub use crate::config::{DecisionThresholds, EstimationRequest, EstimatorConfig};
pub use crate::error::{Error, ErrorKind, Result};
pub use crate::estimate::{ColumnFootprint, Decision, EstimationResult, FormatEstimate};
pub use crate::overhead::{default_overhead_table, OverheadTable, TypeOverhead};
pub use crate::probe::MemoryProbe;
pub use crate::profile::{FileFormat, FormatProfile, SamplingStrategy};
pub use crate::schema::{Field, LogicalType, Schema};
pub use crate::source::{ColumnMetadata, ColumnarMetadata, ColumnarMetadataSource, RowSample, RowSampler};
