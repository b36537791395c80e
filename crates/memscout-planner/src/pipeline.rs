//! Estimation pipeline: path → format → format estimate → probe → decision.
//!
//! Every call is self-contained: one bounded read (a row sample or a footer),
//! exactly one probe reading, no retries. Any failure propagates unchanged and
//! no partial result is produced.

use std::path::Path;
use std::sync::Arc;

use memscout_core::config::{EstimationRequest, EstimatorConfig};
use memscout_core::error::{Error, Result};
use memscout_core::estimate::{Decision, EstimationResult};
use memscout_core::overhead::TypeOverhead;
use memscout_core::probe::MemoryProbe;
use memscout_core::profile::FileFormat;
use memscout_core::source::{ColumnarMetadataSource, RowSampler};
use memscout_io::{CsvSampler, ParquetMetadataReader};
use memscout_mem::{FixedMemoryProbe, SystemMemoryProbe};

use crate::estimate::{CsvEstimator, FormatSizeEstimator, ParquetEstimator};
use crate::format::detect_format;
use crate::policy::DecisionPolicy;

/// Orchestrator owning the configuration, the two format estimators, the
/// memory probe, and the decision policy.
pub struct Estimator<P = SystemMemoryProbe, S = CsvSampler, M = ParquetMetadataReader> {
    config: EstimatorConfig,
    policy: DecisionPolicy,
    probe: P,
    csv: CsvEstimator<S>,
    parquet: ParquetEstimator<M>,
}

impl Estimator {
    /// Estimator backed by the real filesystem readers and the system probe.
    pub fn new(config: EstimatorConfig) -> Result<Self> {
        Self::with_probe(config, SystemMemoryProbe::new())
    }
}

impl<P: MemoryProbe> Estimator<P> {
    pub fn with_probe(config: EstimatorConfig, probe: P) -> Result<Self> {
        let sampler = CsvSampler::new().with_delimiter(config.csv_delimiter as u8);
        Estimator::with_sources(config, probe, sampler, ParquetMetadataReader::new())
    }
}

impl<P, S, M> Estimator<P, S, M>
where
    P: MemoryProbe,
    S: RowSampler,
    M: ColumnarMetadataSource,
{
    /// Use the config's own overhead table.
    pub fn with_sources(config: EstimatorConfig, probe: P, sampler: S, metadata: M) -> Result<Self> {
        let overheads: Arc<dyn TypeOverhead> = Arc::new(config.type_overheads.clone());
        Self::with_parts(config, overheads, probe, sampler, metadata)
    }

    /// Fully injected constructor; `overheads` replaces the config's table.
    pub fn with_parts(
        config: EstimatorConfig,
        overheads: Arc<dyn TypeOverhead>,
        probe: P,
        sampler: S,
        metadata: M,
    ) -> Result<Self> {
        config.validate()?;
        let policy = DecisionPolicy::new(config.thresholds)?;
        let csv = CsvEstimator::new(sampler, Arc::clone(&overheads), config.csv_profile());
        let parquet = ParquetEstimator::new(metadata, overheads, config.parquet_profile());
        Ok(Self {
            config,
            policy,
            probe,
            csv,
            parquet,
        })
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    /// Estimate `path` with the configured sample size and safety margin.
    pub fn estimate(&self, path: impl AsRef<Path>) -> Result<EstimationResult> {
        self.estimate_with(&self.config.request(path.as_ref()))
    }

    pub fn estimate_with(&self, request: &EstimationRequest) -> Result<EstimationResult> {
        self.run(request, &self.probe)
    }

    /// Estimate several files against one probe reading taken up front.
    ///
    /// Failures are per file; one unreadable file does not abort the batch.
    pub fn estimate_many<I, T>(&self, paths: I) -> Vec<Result<EstimationResult>>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<Path>,
    {
        let snapshot = FixedMemoryProbe::snapshot(&self.probe);
        paths
            .into_iter()
            .map(|p| self.run(&self.config.request(p.as_ref()), &snapshot))
            .collect()
    }

    fn estimator_for(&self, format: FileFormat) -> &dyn FormatSizeEstimator {
        match format {
            FileFormat::Csv => &self.csv,
            FileFormat::Parquet => &self.parquet,
        }
    }

    fn run(&self, request: &EstimationRequest, probe: &dyn MemoryProbe) -> Result<EstimationResult> {
        request.validate()?;
        let path = request.path.as_path();

        let file_meta = std::fs::metadata(path).map_err(|e| Error::from_io(path, e))?;
        if !file_meta.is_file() {
            return Err(Error::UnsupportedFormat {
                path: path.to_path_buf(),
                reason: "not a regular file".into(),
            });
        }

        let format = detect_format(path, self.config.sniff_signature)?;
        let estimate = self
            .estimator_for(format)
            .estimate_bytes(path, request.sample_rows)?;

        let available_bytes = probe.available_bytes();
        let outcome = self.policy.decide(
            estimate.estimated_total_bytes,
            available_bytes,
            request.safety_margin,
        )?;

        let suggested_chunk_rows = match outcome.decision {
            Decision::Streaming => self.policy.suggest_chunk_rows(
                outcome.usable_bytes,
                estimate.bytes_per_row * estimate.format_overhead,
                estimate.total_rows,
            ),
            Decision::Eager | Decision::Lazy => None,
        };

        tracing::info!(
            path = %path.display(),
            %format,
            estimated_bytes = estimate.estimated_total_bytes,
            available_bytes,
            ratio = outcome.ratio,
            decision = %outcome.decision,
            "load strategy selected"
        );

        Ok(EstimationResult {
            path: request.path.clone(),
            format,
            decision: outcome.decision,
            ratio: outcome.ratio,
            estimated_total_bytes: estimate.estimated_total_bytes,
            available_bytes,
            usable_bytes: outcome.usable_bytes.floor() as u64,
            safety_margin: request.safety_margin,
            format_overhead: estimate.format_overhead,
            schema: estimate.schema,
            columns: estimate.columns,
            file_size_bytes: file_meta.len(),
            total_rows: estimate.total_rows,
            sampled_rows: estimate.sampled_rows,
            suggested_chunk_rows,
        })
    }
}

/// One-shot estimate with default configuration and the system memory probe.
pub fn estimate(
    path: impl AsRef<Path>,
    sample_rows: usize,
    safety_margin: f64,
) -> Result<EstimationResult> {
    let request = EstimationRequest::new(path.as_ref())
        .with_sample_rows(sample_rows)
        .with_safety_margin(safety_margin);
    Estimator::new(EstimatorConfig::default())?.estimate_with(&request)
}
