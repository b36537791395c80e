//! Format size estimators.
//!
//! Each supported format gets one estimator behind the same contract. They
//! share nothing else: CSV samples and extrapolates, Parquet reads exact sizes
//! from the footer.

use std::path::Path;

use memscout_core::error::Result;
use memscout_core::estimate::FormatEstimate;

pub mod csv;
pub mod infer;
pub mod parquet;

pub use self::csv::CsvEstimator;
pub use self::parquet::ParquetEstimator;

pub trait FormatSizeEstimator: Send + Sync {
    /// Estimate the in-memory footprint of `path`, format overhead included.
    ///
    /// `sample_rows` bounds the records read by sampling estimators; metadata
    /// estimators ignore it.
    fn estimate_bytes(&self, path: &Path, sample_rows: usize) -> Result<FormatEstimate>;
}
