#![forbid(unsafe_code)]
//! memscout-core: data model, error taxonomy, overhead tables, and configuration.
//!
//! Everything here is pure data. The collaborator *interfaces* (row sampling,
//! columnar metadata, memory probing) are declared in `source` and `probe`;
//! concrete implementations live in `memscout-io` and `memscout-mem`.

pub mod config;
pub mod error;
pub mod estimate;
pub mod overhead;
pub mod prelude;
pub mod probe;
pub mod profile;
pub mod schema;
pub mod source;
