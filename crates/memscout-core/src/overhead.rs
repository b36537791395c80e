//! Per-type memory overhead multipliers.
//!
//! A multiplier converts the raw width of a column (sampled text width for CSV,
//! uncompressed page bytes for Parquet) into its expected in-memory footprint.
//! Estimators only see the [`TypeOverhead`] trait, so the table can be swapped
//! for any mapping without touching them.

use std::collections::BTreeMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::schema::LogicalType;

/// Anything that maps a logical type to a multiplier >= 1.0.
///
/// Implementations must be total: a type they know nothing about resolves to a
/// conservative (large) multiplier rather than an error.
pub trait TypeOverhead: Send + Sync {
    fn overhead(&self, logical_type: &LogicalType) -> f64;
}

impl<T: TypeOverhead + ?Sized> TypeOverhead for Arc<T> {
    fn overhead(&self, logical_type: &LogicalType) -> f64 {
        (**self).overhead(logical_type)
    }
}

impl<T: TypeOverhead + ?Sized> TypeOverhead for &T {
    fn overhead(&self, logical_type: &LogicalType) -> f64 {
        (**self).overhead(logical_type)
    }
}

/// Tabulated multipliers. Untabulated types resolve to the largest entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<LogicalType, f64>",
    into = "BTreeMap<LogicalType, f64>"
)]
pub struct OverheadTable {
    entries: BTreeMap<LogicalType, f64>,
    fallback: f64,
}

impl OverheadTable {
    /// Build a table, rejecting empty tables and multipliers below 1.0.
    pub fn new(entries: BTreeMap<LogicalType, f64>) -> Result<Self> {
        if entries.is_empty() {
            return Err(Error::InvalidConfiguration(
                "overhead table must tabulate at least one type".into(),
            ));
        }
        for (ty, factor) in &entries {
            if !factor.is_finite() || *factor < 1.0 {
                return Err(Error::InvalidConfiguration(format!(
                    "overhead for '{ty}' must be a finite value >= 1.0, got {factor}"
                )));
            }
        }
        let fallback = entries.values().copied().fold(1.0_f64, f64::max);
        Ok(Self { entries, fallback })
    }

    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (LogicalType, f64)>,
    {
        Self::new(entries.into_iter().collect())
    }

    pub fn get(&self, logical_type: &LogicalType) -> Option<f64> {
        self.entries.get(logical_type).copied()
    }
}

impl TypeOverhead for OverheadTable {
    fn overhead(&self, logical_type: &LogicalType) -> f64 {
        self.get(logical_type).unwrap_or(self.fallback)
    }
}

impl TryFrom<BTreeMap<LogicalType, f64>> for OverheadTable {
    type Error = Error;

    fn try_from(entries: BTreeMap<LogicalType, f64>) -> Result<Self> {
        Self::new(entries)
    }
}

impl From<OverheadTable> for BTreeMap<LogicalType, f64> {
    fn from(table: OverheadTable) -> Self {
        table.entries
    }
}

impl Default for OverheadTable {
    fn default() -> Self {
        default_overhead_table().clone()
    }
}

// `Other` is deliberately absent: it takes the fallback (largest) multiplier.
static DEFAULT_TABLE: Lazy<OverheadTable> = Lazy::new(|| OverheadTable {
    entries: BTreeMap::from([
        (LogicalType::Integer, 1.0),
        (LogicalType::Float, 1.0),
        (LogicalType::Boolean, 1.0),
        (LogicalType::Datetime, 1.25),
        (LogicalType::String, 2.0),
    ]),
    fallback: 2.0,
});

/// Process-wide default table. Built once, read-only afterwards.
pub fn default_overhead_table() -> &'static OverheadTable {
    &DEFAULT_TABLE
}
