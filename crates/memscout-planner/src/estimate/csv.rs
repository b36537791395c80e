//! CSV size estimation: sample the head, infer types, extrapolate.

use std::path::Path;
use std::sync::Arc;

use memscout_core::error::{Error, Result};
use memscout_core::estimate::{ColumnFootprint, FormatEstimate};
use memscout_core::overhead::TypeOverhead;
use memscout_core::profile::{FileFormat, FormatProfile};
use memscout_core::schema::{Field, Schema};
use memscout_core::source::{RowSample, RowSampler};
use memscout_io::CsvSampler;

use super::infer::infer_column;
use super::FormatSizeEstimator;

pub struct CsvEstimator<S = CsvSampler> {
    sampler: S,
    overheads: Arc<dyn TypeOverhead>,
    profile: FormatProfile,
}

impl<S: RowSampler> CsvEstimator<S> {
    pub fn new(sampler: S, overheads: Arc<dyn TypeOverhead>, profile: FormatProfile) -> Self {
        Self {
            sampler,
            overheads,
            profile,
        }
    }

    /// Turn an already-taken sample into an estimate.
    ///
    /// `estimated_total_bytes = Σ(avg_width * type_overhead) * total_rows * format_overhead`,
    /// where `avg_width` is the mean decoded byte length over the valid sampled rows.
    pub fn estimate_from_sample(&self, path: &Path, sample: &RowSample) -> Result<FormatEstimate> {
        let sampled = sample.rows.len();
        if sampled == 0 {
            return Err(if sample.skipped_rows > 0 {
                Error::SchemaInference {
                    path: path.to_path_buf(),
                    detail: format!(
                        "all {} sampled records were malformed",
                        sample.skipped_rows
                    ),
                }
            } else {
                Error::EmptySource {
                    path: path.to_path_buf(),
                }
            });
        }

        // Never extrapolate below the rows we actually saw.
        let total_rows = sample.total_rows.max(sampled as u64);

        let mut fields = Vec::with_capacity(sample.headers.len());
        let mut columns = Vec::with_capacity(sample.headers.len());
        let mut bytes_per_row = 0.0_f64;
        for (idx, name) in sample.headers.iter().enumerate() {
            let values = || {
                sample
                    .rows
                    .iter()
                    .map(move |row| row.get(idx).map(String::as_str).unwrap_or(""))
            };
            let logical_type = infer_column(values());
            let width_sum: usize = values().map(str::len).sum();
            let avg_width = width_sum as f64 / sampled as f64;
            let type_overhead = self.overheads.overhead(&logical_type);

            bytes_per_row += avg_width * type_overhead;
            fields.push(Field::new(name.clone(), logical_type));
            columns.push(ColumnFootprint {
                name: name.clone(),
                logical_type,
                raw_bytes: (avg_width * total_rows as f64).round() as u64,
                type_overhead,
            });
        }

        let estimated = (bytes_per_row * total_rows as f64 * self.profile.overhead).ceil();
        if sample.skipped_rows > 0 {
            tracing::warn!(
                path = %path.display(),
                skipped = sample.skipped_rows,
                sampled,
                "malformed CSV records skipped while sampling"
            );
        }
        tracing::debug!(
            path = %path.display(),
            sampling = ?self.profile.sampling,
            sampled,
            total_rows,
            bytes_per_row,
            estimated,
            "csv estimate"
        );

        Ok(FormatEstimate {
            format: FileFormat::Csv,
            estimated_total_bytes: estimated as u64,
            schema: Schema::new(fields),
            columns,
            format_overhead: self.profile.overhead,
            total_rows,
            sampled_rows: sampled as u64,
            bytes_per_row,
        })
    }
}

impl<S: RowSampler> FormatSizeEstimator for CsvEstimator<S> {
    fn estimate_bytes(&self, path: &Path, sample_rows: usize) -> Result<FormatEstimate> {
        let sample = self.sampler.sample(path, sample_rows)?;
        self.estimate_from_sample(path, &sample)
    }
}
