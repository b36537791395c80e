//! Ratio-based loading policy.
//!
//! Inputs:
//! - Estimated in-memory footprint (bytes).
//! - Available memory reported by the probe (bytes).
//! - Safety margin: the fraction of available memory held back.
//!
//! Output: the ratio `estimate / usable` and the band it falls into. Bands are
//! closed on the right: `ratio <= eager_max` is eager, `ratio <= lazy_max` is
//! lazy, everything above streams.

use memscout_core::config::{validate_safety_margin, DecisionThresholds};
use memscout_core::error::{Error, Result};
use memscout_core::estimate::Decision;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolicyOutcome {
    pub ratio: f64,
    /// `available * (1 - safety_margin)`, as computed for the ratio.
    pub usable_bytes: f64,
    pub decision: Decision,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DecisionPolicy {
    thresholds: DecisionThresholds,
}

impl DecisionPolicy {
    pub fn new(thresholds: DecisionThresholds) -> Result<Self> {
        thresholds.validate()?;
        Ok(Self { thresholds })
    }

    pub fn thresholds(&self) -> &DecisionThresholds {
        &self.thresholds
    }

    pub fn decide(
        &self,
        estimated_total_bytes: u64,
        available_bytes: u64,
        safety_margin: f64,
    ) -> Result<PolicyOutcome> {
        validate_safety_margin(safety_margin)?;
        if available_bytes == 0 {
            return Err(Error::InvalidConfiguration(
                "available memory must be positive".into(),
            ));
        }

        let usable_bytes = available_bytes as f64 * (1.0 - safety_margin);
        if usable_bytes <= 0.0 {
            return Ok(PolicyOutcome {
                ratio: f64::INFINITY,
                usable_bytes: 0.0,
                decision: Decision::Streaming,
            });
        }

        let ratio = estimated_total_bytes as f64 / usable_bytes;
        Ok(PolicyOutcome {
            ratio,
            usable_bytes,
            decision: self.classify(ratio),
        })
    }

    /// Map a ratio onto its band. Gap-free: every non-NaN ratio has exactly one.
    pub fn classify(&self, ratio: f64) -> Decision {
        if ratio <= self.thresholds.eager_max_ratio {
            Decision::Eager
        } else if ratio <= self.thresholds.lazy_max_ratio {
            Decision::Lazy
        } else {
            Decision::Streaming
        }
    }

    /// Rows per chunk so that one chunk sits inside the eager band.
    ///
    /// `bytes_per_row` is the full in-memory cost of one row (format overhead
    /// included). Capped at `total_rows`, never below 1.
    pub fn suggest_chunk_rows(&self, usable_bytes: f64, bytes_per_row: f64, total_rows: u64) -> Option<u64> {
        if !(bytes_per_row > 0.0) || total_rows == 0 {
            return None;
        }
        let budget = usable_bytes * self.thresholds.eager_max_ratio;
        let rows = (budget / bytes_per_row).floor().max(1.0) as u64;
        Some(rows.clamp(1, total_rows))
    }
}

/// [`DecisionPolicy::decide`] with the default thresholds.
pub fn decide(
    estimated_total_bytes: u64,
    available_bytes: u64,
    safety_margin: f64,
) -> Result<PolicyOutcome> {
    DecisionPolicy::default().decide(estimated_total_bytes, available_bytes, safety_margin)
}
