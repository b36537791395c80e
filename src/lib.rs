#![forbid(unsafe_code)]
//! memscout: estimate how much memory a CSV or Parquet file will take once
//! loaded into a dataframe, and pick eager, lazy, or streaming loading so the
//! footprint stays inside a safety-adjusted share of available memory.
//!
//! ```no_run
//! let result = memscout::estimate("data/trips.parquet", 1000, 0.3)?;
//! println!("{} (ratio {:.3})", result.decision, result.ratio);
//! # Ok::<(), memscout::Error>(())
//! ```
//!
//! The workspace crates are re-exported for callers that need the pieces:
//! `memscout_core` (data model, config, errors), `memscout_mem` (memory
//! probes), `memscout_io` (samplers and footer readers), `memscout_planner`
//! (estimators, policy, pipeline).

pub use memscout_core;
pub use memscout_io;
pub use memscout_mem;
pub use memscout_planner;

pub use memscout_core::prelude::*;
pub use memscout_mem::{FixedMemoryProbe, SystemMemoryProbe};
pub use memscout_planner::{decide, estimate, format_bytes, DecisionPolicy, Estimator, PolicyOutcome};
