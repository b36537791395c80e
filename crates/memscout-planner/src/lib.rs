#![forbid(unsafe_code)]
//! memscout-planner: from a file path to a loading decision.
//!
//! Design:
//! - `estimate` holds one `FormatSizeEstimator` per supported format; they
//!   share a contract but no implementation.
//! - `policy` is a pure function of (estimate, available memory, margin).
//! - `pipeline::Estimator` wires format detection, the estimators, the memory
//!   probe, and the policy together.
//!
//! NOTE: no file bytes are read here; that is `memscout-io`'s job.

pub mod estimate;
pub mod format;
pub mod pipeline;
pub mod policy;
pub mod units;

pub use estimate::{CsvEstimator, FormatSizeEstimator, ParquetEstimator};
pub use format::detect_format;
pub use pipeline::{estimate, Estimator};
pub use policy::{decide, DecisionPolicy, PolicyOutcome};
pub use units::format_bytes;
