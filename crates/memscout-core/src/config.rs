//! Estimator configuration that callers can serialize/deserialize.
//!
//! Precedence when layered by a binary: defaults < config file < environment <
//! explicit flags. Every value is validated by [`EstimatorConfig::validate`]
//! before it reaches an estimator.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::overhead::OverheadTable;
use crate::profile::{FormatProfile, CSV_FORMAT_OVERHEAD, PARQUET_FORMAT_OVERHEAD};

/// Largest ratio (inclusive) that still loads eagerly.
pub const EAGER_MAX_RATIO: f64 = 0.65;

/// Largest ratio (inclusive) that still loads lazily; anything above streams.
pub const LAZY_MAX_RATIO: f64 = 2.0;

pub const DEFAULT_SAMPLE_ROWS: usize = 1000;

pub const DEFAULT_SAFETY_MARGIN: f64 = 0.3;

/// Band boundaries of the decision policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionThresholds {
    pub eager_max_ratio: f64,
    pub lazy_max_ratio: f64,
}

impl Default for DecisionThresholds {
    fn default() -> Self {
        Self {
            eager_max_ratio: EAGER_MAX_RATIO,
            lazy_max_ratio: LAZY_MAX_RATIO,
        }
    }
}

impl DecisionThresholds {
    pub fn validate(&self) -> Result<()> {
        let Self {
            eager_max_ratio,
            lazy_max_ratio,
        } = *self;
        if !eager_max_ratio.is_finite() || !lazy_max_ratio.is_finite() {
            return Err(Error::InvalidConfiguration(
                "decision thresholds must be finite".into(),
            ));
        }
        if eager_max_ratio <= 0.0 || eager_max_ratio > lazy_max_ratio {
            return Err(Error::InvalidConfiguration(format!(
                "decision thresholds must satisfy 0 < eager ({eager_max_ratio}) <= lazy ({lazy_max_ratio})"
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Data records read from the head of a CSV file.
    pub sample_rows: usize,

    /// Fraction of available memory withheld from the usable figure, in [0, 1).
    pub safety_margin: f64,

    pub thresholds: DecisionThresholds,

    pub csv_format_overhead: f64,

    pub parquet_format_overhead: f64,

    /// Replaces the whole default table; untabulated types take its largest value.
    pub type_overheads: OverheadTable,

    pub csv_delimiter: char,

    /// Check the `PAR1` magic when the extension is missing or says parquet.
    pub sniff_signature: bool,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            sample_rows: DEFAULT_SAMPLE_ROWS,
            safety_margin: DEFAULT_SAFETY_MARGIN,
            thresholds: DecisionThresholds::default(),
            csv_format_overhead: CSV_FORMAT_OVERHEAD,
            parquet_format_overhead: PARQUET_FORMAT_OVERHEAD,
            type_overheads: OverheadTable::default(),
            csv_delimiter: ',',
            sniff_signature: true,
        }
    }
}

impl EstimatorConfig {
    /// Defaults overlaid with `MEMSCOUT_*` environment variables.
    /// Unparsable values are ignored.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        cfg.apply_env();
        cfg
    }

    pub fn apply_env(&mut self) {
        if let Some(v) = env_parse::<usize>("MEMSCOUT_SAMPLE_ROWS") {
            self.sample_rows = v;
        }

        if let Some(v) = env_parse::<f64>("MEMSCOUT_SAFETY_MARGIN") {
            self.safety_margin = v;
        }

        if let Some(v) = env_parse::<f64>("MEMSCOUT_EAGER_MAX_RATIO") {
            self.thresholds.eager_max_ratio = v;
        }

        if let Some(v) = env_parse::<f64>("MEMSCOUT_LAZY_MAX_RATIO") {
            self.thresholds.lazy_max_ratio = v;
        }

        if let Some(v) = env_parse::<f64>("MEMSCOUT_CSV_OVERHEAD") {
            self.csv_format_overhead = v;
        }

        if let Some(v) = env_parse::<f64>("MEMSCOUT_PARQUET_OVERHEAD") {
            self.parquet_format_overhead = v;
        }

        if let Ok(s) = std::env::var("MEMSCOUT_CSV_DELIMITER") {
            let mut chars = s.chars();
            if let (Some(c), None) = (chars.next(), chars.next()) {
                self.csv_delimiter = c;
            }
        }
    }

    /// Parse a YAML (or JSON) document; missing keys keep their defaults.
    pub fn from_yaml_str(doc: &str) -> Result<Self> {
        let cfg = Self::parse_yaml_str(doc)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let cfg = Self::read_yaml_file(path)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse without range checks, for callers that layer more overrides on
    /// top and validate once at the end. Malformed documents and invalid
    /// `type_overheads` tables still fail here.
    pub fn parse_yaml_str(doc: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(doc)?)
    }

    /// File counterpart of [`EstimatorConfig::parse_yaml_str`].
    pub fn read_yaml_file(path: &Path) -> Result<Self> {
        let doc = std::fs::read_to_string(path).map_err(|e| Error::from_io(path, e))?;
        Self::parse_yaml_str(&doc)
    }

    pub fn validate(&self) -> Result<()> {
        validate_sample_rows(self.sample_rows)?;
        validate_safety_margin(self.safety_margin)?;
        self.thresholds.validate()?;
        validate_format_overhead("csv_format_overhead", self.csv_format_overhead)?;
        validate_format_overhead("parquet_format_overhead", self.parquet_format_overhead)?;
        if !self.csv_delimiter.is_ascii() {
            return Err(Error::InvalidConfiguration(format!(
                "csv_delimiter must be a single ASCII character, got {:?}",
                self.csv_delimiter
            )));
        }
        Ok(())
    }

    pub fn csv_profile(&self) -> FormatProfile {
        FormatProfile::csv().with_overhead(self.csv_format_overhead)
    }

    pub fn parquet_profile(&self) -> FormatProfile {
        FormatProfile::parquet().with_overhead(self.parquet_format_overhead)
    }

    /// A request for `path` carrying this config's sample size and margin.
    pub fn request(&self, path: impl Into<PathBuf>) -> EstimationRequest {
        EstimationRequest {
            path: path.into(),
            sample_rows: self.sample_rows,
            safety_margin: self.safety_margin,
        }
    }
}

/// Inputs of a single estimation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimationRequest {
    pub path: PathBuf,
    pub sample_rows: usize,
    pub safety_margin: f64,
}

impl EstimationRequest {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            sample_rows: DEFAULT_SAMPLE_ROWS,
            safety_margin: DEFAULT_SAFETY_MARGIN,
        }
    }

    pub fn with_sample_rows(mut self, sample_rows: usize) -> Self {
        self.sample_rows = sample_rows;
        self
    }

    pub fn with_safety_margin(mut self, safety_margin: f64) -> Self {
        self.safety_margin = safety_margin;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_sample_rows(self.sample_rows)?;
        validate_safety_margin(self.safety_margin)
    }
}

pub fn validate_safety_margin(margin: f64) -> Result<()> {
    // NaN fails both comparisons.
    if (0.0..1.0).contains(&margin) {
        Ok(())
    } else {
        Err(Error::InvalidConfiguration(format!(
            "safety_margin must be in [0, 1), got {margin}"
        )))
    }
}

fn validate_sample_rows(sample_rows: usize) -> Result<()> {
    if sample_rows == 0 {
        return Err(Error::InvalidConfiguration(
            "sample_rows must be positive".into(),
        ));
    }
    Ok(())
}

fn validate_format_overhead(name: &str, overhead: f64) -> Result<()> {
    if !overhead.is_finite() || overhead < 1.0 {
        return Err(Error::InvalidConfiguration(format!(
            "{name} must be a finite value >= 1.0, got {overhead}"
        )));
    }
    Ok(())
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.trim().parse().ok())
}
