//! Parquet size estimation from footer metadata.

use std::path::Path;
use std::sync::Arc;

use memscout_core::error::Result;
use memscout_core::estimate::{ColumnFootprint, FormatEstimate};
use memscout_core::overhead::TypeOverhead;
use memscout_core::profile::{FileFormat, FormatProfile};
use memscout_core::schema::{Field, Schema};
use memscout_core::source::{ColumnarMetadata, ColumnarMetadataSource};
use memscout_io::ParquetMetadataReader;

use super::FormatSizeEstimator;

pub struct ParquetEstimator<M = ParquetMetadataReader> {
    metadata: M,
    overheads: Arc<dyn TypeOverhead>,
    profile: FormatProfile,
}

impl<M: ColumnarMetadataSource> ParquetEstimator<M> {
    pub fn new(metadata: M, overheads: Arc<dyn TypeOverhead>, profile: FormatProfile) -> Self {
        Self {
            metadata,
            overheads,
            profile,
        }
    }

    /// Row counts are exact here, so there is no extrapolation: the estimate is
    /// `Σ(uncompressed_bytes * type_overhead) * format_overhead`.
    pub fn estimate_from_metadata(&self, path: &Path, meta: &ColumnarMetadata) -> FormatEstimate {
        let mut fields = Vec::with_capacity(meta.columns.len());
        let mut columns = Vec::with_capacity(meta.columns.len());
        let mut weighted = 0.0_f64;
        for column in &meta.columns {
            let type_overhead = self.overheads.overhead(&column.logical_type);
            weighted += column.uncompressed_bytes as f64 * type_overhead;
            fields.push(Field::new(column.name.clone(), column.logical_type));
            columns.push(ColumnFootprint {
                name: column.name.clone(),
                logical_type: column.logical_type,
                raw_bytes: column.uncompressed_bytes,
                type_overhead,
            });
        }

        // A zero-row file still has a schema; its footprint is defined as zero.
        let (estimated, bytes_per_row) = if meta.num_rows > 0 {
            (
                (weighted * self.profile.overhead).ceil(),
                weighted / meta.num_rows as f64,
            )
        } else {
            (0.0, 0.0)
        };
        tracing::debug!(
            path = %path.display(),
            sampling = ?self.profile.sampling,
            rows = meta.num_rows,
            columns = columns.len(),
            estimated,
            "parquet estimate"
        );

        FormatEstimate {
            format: FileFormat::Parquet,
            estimated_total_bytes: estimated as u64,
            schema: Schema::new(fields),
            columns,
            format_overhead: self.profile.overhead,
            total_rows: meta.num_rows,
            sampled_rows: meta.num_rows,
            bytes_per_row,
        }
    }
}

impl<M: ColumnarMetadataSource> FormatSizeEstimator for ParquetEstimator<M> {
    fn estimate_bytes(&self, path: &Path, _sample_rows: usize) -> Result<FormatEstimate> {
        let meta = self.metadata.read_metadata(path)?;
        Ok(self.estimate_from_metadata(path, &meta))
    }
}
